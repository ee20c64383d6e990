//! Arithmetic and logic unit (ALU) instructions.
//!
//! The flag arithmetic lives in small pure functions (`add8`, `sub8`, ...)
//! that return the result together with the complete new flag set. Handlers
//! only move operands in and out of the register file.

use super::types::flags;
use crate::bus::MemoryBus;
use crate::cpu::registers::{Flags, Reg16, Reg8};
use crate::cpu::Cpu;

/// The eight accumulator operations, in opcode order (bits 5-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Add,
            1 => Self::Adc,
            2 => Self::Sub,
            3 => Self::Sbc,
            4 => Self::And,
            5 => Self::Xor,
            6 => Self::Or,
            _ => Self::Cp,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD A,",
            Self::Adc => "ADC A,",
            Self::Sub => "SUB A,",
            Self::Sbc => "SBC A,",
            Self::And => "AND A,",
            Self::Xor => "XOR A,",
            Self::Or => "OR A,",
            Self::Cp => "CP A,",
        }
    }

    /// Applies the operation to the accumulator `a`. `None` means A is left
    /// unchanged (CP).
    pub fn apply(self, a: u8, value: u8, current: Flags) -> (Option<u8>, Flags) {
        let carry = current.contains(Flags::CARRY);
        let (result, f) = match self {
            Self::Add => add8(a, value, false),
            Self::Adc => add8(a, value, carry),
            Self::Sub | Self::Cp => sub8(a, value, false),
            Self::Sbc => sub8(a, value, carry),
            Self::And => and8(a, value),
            Self::Xor => xor8(a, value),
            Self::Or => or8(a, value),
        };
        if self == Self::Cp {
            (None, f)
        } else {
            (Some(result), f)
        }
    }
}

/// 8-bit add with optional carry-in.
///
/// H: `(a & 0xF) + (b & 0xF) + c > 0xF`; C: unsigned sum exceeds 0xFF; N cleared.
pub fn add8(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let c = u8::from(carry_in);
    let sum = u16::from(a) + u16::from(b) + u16::from(c);
    let result = sum as u8;
    let half = (a & 0x0F) + (b & 0x0F) + c > 0x0F;
    (result, flags(result == 0, false, half, sum > 0xFF))
}

/// 8-bit subtract with optional borrow-in.
///
/// H: `(a & 0xF) < (b & 0xF) + c`; C: `a < b + c`; N set.
pub fn sub8(a: u8, b: u8, borrow_in: bool) -> (u8, Flags) {
    let c = u8::from(borrow_in);
    let result = a.wrapping_sub(b).wrapping_sub(c);
    let half = (a & 0x0F) < (b & 0x0F) + c;
    let carry = u16::from(a) < u16::from(b) + u16::from(c);
    (result, flags(result == 0, true, half, carry))
}

pub fn and8(a: u8, b: u8) -> (u8, Flags) {
    let result = a & b;
    (result, flags(result == 0, false, true, false))
}

pub fn xor8(a: u8, b: u8) -> (u8, Flags) {
    let result = a ^ b;
    (result, flags(result == 0, false, false, false))
}

pub fn or8(a: u8, b: u8) -> (u8, Flags) {
    let result = a | b;
    (result, flags(result == 0, false, false, false))
}

/// Increment; carry is passed through untouched.
pub fn inc8(value: u8, carry: bool) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    (result, flags(result == 0, false, value & 0x0F == 0x0F, carry))
}

/// Decrement; carry is passed through untouched.
pub fn dec8(value: u8, carry: bool) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    (result, flags(result == 0, true, value & 0x0F == 0, carry))
}

/// `ADD HL,rr`: H from bit 11, C from bit 15, Z preserved, N cleared.
pub fn add16(hl: u16, rr: u16, zero: bool) -> (u16, Flags) {
    let sum = u32::from(hl) + u32::from(rr);
    let half = (hl & 0x0FFF) + (rr & 0x0FFF) > 0x0FFF;
    (sum as u16, flags(zero, false, half, sum > 0xFFFF))
}

/// `SP + e8` as used by `ADD SP,e8` and `LD HL,SP+e8`.
///
/// H and C come from the unsigned add of the low byte; Z and N are cleared.
pub fn add_sp_offset(sp: u16, offset: u8) -> (u16, Flags) {
    let result = sp.wrapping_add_signed(i16::from(offset as i8));
    let half = (sp & 0x000F) + u16::from(offset & 0x0F) > 0x000F;
    let carry = (sp & 0x00FF) + u16::from(offset) > 0x00FF;
    (result, flags(false, false, half, carry))
}

/// Decimal adjust after a BCD add or subtract.
pub fn daa(a: u8, current: Flags) -> (u8, Flags) {
    let subtract = current.contains(Flags::SUBTRACT);
    let half = current.contains(Flags::HALF_CARRY);
    let mut carry = current.contains(Flags::CARRY);
    let mut adjust = 0u8;
    let result = if subtract {
        if carry {
            adjust |= 0x60;
        }
        if half {
            adjust |= 0x06;
        }
        a.wrapping_sub(adjust)
    } else {
        if carry || a > 0x99 {
            adjust |= 0x60;
            carry = true;
        }
        if half || a & 0x0F > 0x09 {
            adjust |= 0x06;
        }
        a.wrapping_add(adjust)
    };
    (result, flags(result == 0, subtract, false, carry))
}

impl Cpu {
    fn apply_alu(&mut self, op: AluOp, value: u8) {
        let (result, f) = op.apply(self.regs.a, value, self.regs.flags());
        if let Some(result) = result {
            self.regs.a = result;
        }
        self.regs.set_flags(f);
    }
}

/// `ADD/ADC/SUB/SBC/AND/XOR/OR/CP r` (0x80-0xBF)
pub(crate) fn alu_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.read_operand(bus, Reg8::from_bits(op));
    cpu.apply_alu(AluOp::from_bits(op >> 3), value);
    false
}

/// `ADD/ADC/SUB/SBC/AND/XOR/OR/CP n8`
pub(crate) fn alu_n8(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.fetch8(bus);
    cpu.apply_alu(AluOp::from_bits(op >> 3), value);
    false
}

/// `INC r` / `INC (HL)`
pub(crate) fn inc_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg8::from_bits(op >> 3);
    let (result, f) = inc8(cpu.read_operand(bus, reg), cpu.regs.flag(Flags::CARRY));
    cpu.write_operand(bus, reg, result);
    cpu.regs.set_flags(f);
    false
}

/// `DEC r` / `DEC (HL)`
pub(crate) fn dec_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg8::from_bits(op >> 3);
    let (result, f) = dec8(cpu.read_operand(bus, reg), cpu.regs.flag(Flags::CARRY));
    cpu.write_operand(bus, reg, result);
    cpu.regs.set_flags(f);
    false
}

/// `INC rr` (no flags)
pub(crate) fn inc_rr(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg16::from_bits_sp(op >> 4);
    cpu.regs.set_pair(reg, cpu.regs.pair(reg).wrapping_add(1));
    false
}

/// `DEC rr` (no flags)
pub(crate) fn dec_rr(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg16::from_bits_sp(op >> 4);
    cpu.regs.set_pair(reg, cpu.regs.pair(reg).wrapping_sub(1));
    false
}

/// `ADD HL,rr`
pub(crate) fn add_hl_rr(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, op: u8) -> bool {
    let rr = cpu.regs.pair(Reg16::from_bits_sp(op >> 4));
    let (result, f) = add16(cpu.regs.hl(), rr, cpu.regs.flag(Flags::ZERO));
    cpu.regs.set_hl(result);
    cpu.regs.set_flags(f);
    false
}

/// `ADD SP,e8`
pub(crate) fn add_sp_e8(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let offset = cpu.fetch8(bus);
    let (result, f) = add_sp_offset(cpu.regs.sp, offset);
    cpu.regs.sp = result;
    cpu.regs.set_flags(f);
    false
}

pub(crate) fn daa_a(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let (result, f) = daa(cpu.regs.a, cpu.regs.flags());
    cpu.regs.a = result;
    cpu.regs.set_flags(f);
    false
}

/// `CPL`: invert A, set N and H
pub(crate) fn cpl(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.regs.a = !cpu.regs.a;
    cpu.regs.set_flag(Flags::SUBTRACT | Flags::HALF_CARRY, true);
    false
}

/// `SCF`: set carry, clear N and H
pub(crate) fn scf(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let zero = cpu.regs.flag(Flags::ZERO);
    cpu.regs.set_flags(flags(zero, false, false, true));
    false
}

/// `CCF`: complement carry, clear N and H
pub(crate) fn ccf(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let zero = cpu.regs.flag(Flags::ZERO);
    let carry = cpu.regs.flag(Flags::CARRY);
    cpu.regs.set_flags(flags(zero, false, false, !carry));
    false
}
