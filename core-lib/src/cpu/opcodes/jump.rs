//! Jump, call, and return instructions.
//!
//! Every conditional form decodes its [`Condition`] and funnels into one of
//! the shared `*_if` routines, so JR, JP, CALL and RET agree on what each
//! condition code means. By the time a handler runs, PC has already moved
//! past the opcode; after the operands are fetched it addresses the next
//! instruction, which is the base for relative jumps and the return address
//! pushed by calls.

use super::types::Condition;
use crate::bus::MemoryBus;
use crate::cpu::Cpu;

fn jump_relative_if(cpu: &mut Cpu, bus: &mut dyn MemoryBus, cond: Condition) -> bool {
    let offset = cpu.fetch8(bus) as i8;
    if !cond.holds(cpu.regs.flags()) {
        return false;
    }
    cpu.regs.pc = cpu.regs.pc.wrapping_add_signed(i16::from(offset));
    true
}

fn jump_if(cpu: &mut Cpu, bus: &mut dyn MemoryBus, cond: Condition) -> bool {
    let target = cpu.fetch16(bus);
    if !cond.holds(cpu.regs.flags()) {
        return false;
    }
    cpu.regs.pc = target;
    true
}

fn call_if(cpu: &mut Cpu, bus: &mut dyn MemoryBus, cond: Condition) -> bool {
    let target = cpu.fetch16(bus);
    if !cond.holds(cpu.regs.flags()) {
        return false;
    }
    let ret = cpu.regs.pc;
    cpu.push16(bus, ret);
    cpu.regs.pc = target;
    true
}

fn return_if(cpu: &mut Cpu, bus: &mut dyn MemoryBus, cond: Condition) -> bool {
    if !cond.holds(cpu.regs.flags()) {
        return false;
    }
    cpu.regs.pc = cpu.pop16(bus);
    true
}

/// `JR e8`
pub(crate) fn jr(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    jump_relative_if(cpu, bus, Condition::Always)
}

/// `JR cc,e8`
pub(crate) fn jr_cc(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    jump_relative_if(cpu, bus, Condition::from_bits(op >> 3))
}

/// `JP n16`
pub(crate) fn jp(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    jump_if(cpu, bus, Condition::Always)
}

/// `JP cc,n16`
pub(crate) fn jp_cc(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    jump_if(cpu, bus, Condition::from_bits(op >> 3))
}

/// `JP HL`
pub(crate) fn jp_hl(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.regs.pc = cpu.regs.hl();
    true
}

/// `CALL n16`
pub(crate) fn call(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    call_if(cpu, bus, Condition::Always)
}

/// `CALL cc,n16`
pub(crate) fn call_cc(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    call_if(cpu, bus, Condition::from_bits(op >> 3))
}

/// `RET`
pub(crate) fn ret(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    return_if(cpu, bus, Condition::Always)
}

/// `RET cc`
pub(crate) fn ret_cc(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    return_if(cpu, bus, Condition::from_bits(op >> 3))
}

/// `RETI`: return and enable interrupts immediately (no EI delay)
pub(crate) fn reti(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.ime = true;
    return_if(cpu, bus, Condition::Always)
}

/// `RST n`: call the fixed vector encoded in bits 5-3
pub(crate) fn rst(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let ret = cpu.regs.pc;
    cpu.push16(bus, ret);
    cpu.regs.pc = u16::from(op & 0x38);
    true
}
