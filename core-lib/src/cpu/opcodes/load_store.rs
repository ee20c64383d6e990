//! Load, store and stack instructions. None of these touch the flags, except
//! `LD HL,SP+e8` and `POP AF`.

use super::alu::add_sp_offset;
use crate::bus::MemoryBus;
use crate::cpu::registers::{Reg16, Reg8};
use crate::cpu::Cpu;

/// Base of the I/O page used by the `LDH` family
pub const HIGH_PAGE: u16 = 0xFF00;

/// `LD r,r'` (0x40-0x7F, except 0x76)
pub(crate) fn ld_r_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.read_operand(bus, Reg8::from_bits(op));
    cpu.write_operand(bus, Reg8::from_bits(op >> 3), value);
    false
}

/// `LD r,n8` / `LD (HL),n8`
pub(crate) fn ld_r_n8(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.fetch8(bus);
    cpu.write_operand(bus, Reg8::from_bits(op >> 3), value);
    false
}

/// `LD rr,n16` / `LD SP,n16`
pub(crate) fn ld_rr_n16(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.fetch16(bus);
    cpu.regs.set_pair(Reg16::from_bits_sp(op >> 4), value);
    false
}

/// Resolves the pointer of `LD (rr),A` / `LD A,(rr)` and applies the HL
/// post-increment or post-decrement of the `HL+`/`HL-` forms.
fn indirect_address(cpu: &mut Cpu, op: u8) -> u16 {
    match (op >> 4) & 0x03 {
        0 => cpu.regs.bc(),
        1 => cpu.regs.de(),
        2 => {
            let hl = cpu.regs.hl();
            cpu.regs.set_hl(hl.wrapping_add(1));
            hl
        }
        _ => {
            let hl = cpu.regs.hl();
            cpu.regs.set_hl(hl.wrapping_sub(1));
            hl
        }
    }
}

/// `LD (BC),A`, `LD (DE),A`, `LD (HL+),A`, `LD (HL-),A`
pub(crate) fn ld_ind_a(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let addr = indirect_address(cpu, op);
    bus.write8(addr, cpu.regs.a);
    false
}

/// `LD A,(BC)`, `LD A,(DE)`, `LD A,(HL+)`, `LD A,(HL-)`
pub(crate) fn ld_a_ind(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let addr = indirect_address(cpu, op);
    cpu.regs.a = bus.read8(addr);
    false
}

/// `LD (n16),SP`
pub(crate) fn ld_n16_sp(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let addr = cpu.fetch16(bus);
    bus.write16(addr, cpu.regs.sp);
    false
}

/// `LD (n16),A`
pub(crate) fn ld_n16_a(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let addr = cpu.fetch16(bus);
    bus.write8(addr, cpu.regs.a);
    false
}

/// `LD A,(n16)`
pub(crate) fn ld_a_n16(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let addr = cpu.fetch16(bus);
    cpu.regs.a = bus.read8(addr);
    false
}

/// `LDH (n8),A`: store A at 0xFF00 + n8
pub(crate) fn ldh_n8_a(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let offset = cpu.fetch8(bus);
    bus.write8(HIGH_PAGE | u16::from(offset), cpu.regs.a);
    false
}

/// `LDH A,(n8)`: load A from 0xFF00 + n8
pub(crate) fn ldh_a_n8(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let offset = cpu.fetch8(bus);
    cpu.regs.a = bus.read8(HIGH_PAGE | u16::from(offset));
    false
}

/// `LD (C),A`: store A at 0xFF00 + C
pub(crate) fn ldh_c_a(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    bus.write8(HIGH_PAGE | u16::from(cpu.regs.c), cpu.regs.a);
    false
}

/// `LD A,(C)`: load A from 0xFF00 + C
pub(crate) fn ldh_a_c(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.regs.a = bus.read8(HIGH_PAGE | u16::from(cpu.regs.c));
    false
}

/// `LD SP,HL`
pub(crate) fn ld_sp_hl(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.regs.sp = cpu.regs.hl();
    false
}

/// `LD HL,SP+e8`
pub(crate) fn ld_hl_sp_e8(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let offset = cpu.fetch8(bus);
    let (result, f) = add_sp_offset(cpu.regs.sp, offset);
    cpu.regs.set_hl(result);
    cpu.regs.set_flags(f);
    false
}

/// `PUSH rr`
pub(crate) fn push(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.regs.pair(Reg16::from_bits_af(op >> 4));
    cpu.push16(bus, value);
    false
}

/// `POP rr`; `POP AF` drops the low nibble of F
pub(crate) fn pop(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.pop16(bus);
    cpu.regs.set_pair(Reg16::from_bits_af(op >> 4), value);
    false
}
