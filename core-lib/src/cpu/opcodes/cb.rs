//! CB-prefixed (extended) instructions: rotates, shifts, and single-bit
//! test/reset/set. The four accumulator rotates of the primary table
//! (`RLCA`, `RRCA`, `RLA`, `RRA`) share the same rotate primitive.
//!
//! Extended opcode layout: bits 7-6 select the group, bits 5-3 the shift
//! kind or bit index, bits 2-0 the operand.

use super::types::flags;
use crate::bus::MemoryBus;
use crate::cpu::registers::{Flags, Reg8};
use crate::cpu::Cpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Rlc,
            1 => Self::Rrc,
            2 => Self::Rl,
            3 => Self::Rr,
            4 => Self::Sla,
            5 => Self::Sra,
            6 => Self::Swap,
            _ => Self::Srl,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rlc => "RLC",
            Self::Rrc => "RRC",
            Self::Rl => "RL",
            Self::Rr => "RR",
            Self::Sla => "SLA",
            Self::Sra => "SRA",
            Self::Swap => "SWAP",
            Self::Srl => "SRL",
        }
    }

    /// Returns the shifted value and the bit shifted out (the new carry).
    pub const fn apply(self, value: u8, carry_in: bool) -> (u8, bool) {
        match self {
            Self::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Self::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Self::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
            Self::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
            Self::Sla => (value << 1, value & 0x80 != 0),
            Self::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Self::Swap => (value.rotate_left(4), false),
            Self::Srl => (value >> 1, value & 0x01 != 0),
        }
    }
}

/// `RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r` (CB 0x00-0x3F)
pub(crate) fn shift_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg8::from_bits(op);
    let value = cpu.read_operand(bus, reg);
    let (result, carry) = ShiftOp::from_bits(op >> 3).apply(value, cpu.regs.flag(Flags::CARRY));
    cpu.write_operand(bus, reg, result);
    cpu.regs.set_flags(flags(result == 0, false, false, carry));
    false
}

/// `BIT b,r` (CB 0x40-0x7F): Z = bit clear, N cleared, H set, C kept
pub(crate) fn bit_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let value = cpu.read_operand(bus, Reg8::from_bits(op));
    let bit = (op >> 3) & 0x07;
    let carry = cpu.regs.flag(Flags::CARRY);
    cpu.regs.set_flags(flags(value & (1 << bit) == 0, false, true, carry));
    false
}

/// `RES b,r` (CB 0x80-0xBF)
pub(crate) fn res_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg8::from_bits(op);
    let bit = (op >> 3) & 0x07;
    let value = cpu.read_operand(bus, reg);
    cpu.write_operand(bus, reg, value & !(1 << bit));
    false
}

/// `SET b,r` (CB 0xC0-0xFF)
pub(crate) fn set_r(cpu: &mut Cpu, bus: &mut dyn MemoryBus, op: u8) -> bool {
    let reg = Reg8::from_bits(op);
    let bit = (op >> 3) & 0x07;
    let value = cpu.read_operand(bus, reg);
    cpu.write_operand(bus, reg, value | (1 << bit));
    false
}

/// `RLCA/RRCA/RLA/RRA` (0x07, 0x0F, 0x17, 0x1F): like the CB forms on A but
/// Z is always cleared
pub(crate) fn rotate_a(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, op: u8) -> bool {
    let (result, carry) =
        ShiftOp::from_bits(op >> 3).apply(cpu.regs.a, cpu.regs.flag(Flags::CARRY));
    cpu.regs.a = result;
    cpu.regs.set_flags(flags(false, false, false, carry));
    false
}

#[cfg(test)]
mod tests {
    use super::ShiftOp;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(ShiftOp::Rlc, 0x85, false, 0x0B, true)]
    #[test_case(ShiftOp::Rrc, 0x01, false, 0x80, true)]
    #[test_case(ShiftOp::Rl, 0x80, false, 0x00, true)]
    #[test_case(ShiftOp::Rl, 0x11, true, 0x23, false)]
    #[test_case(ShiftOp::Rr, 0x01, false, 0x00, true)]
    #[test_case(ShiftOp::Rr, 0x8A, true, 0xC5, false)]
    #[test_case(ShiftOp::Sla, 0xFF, false, 0xFE, true)]
    #[test_case(ShiftOp::Sra, 0x8A, false, 0xC5, false)]
    #[test_case(ShiftOp::Swap, 0xF1, true, 0x1F, false)]
    #[test_case(ShiftOp::Srl, 0x01, false, 0x00, true)]
    fn test_shift_truth_table(
        op: ShiftOp,
        value: u8,
        carry_in: bool,
        expected: u8,
        carry_out: bool,
    ) {
        assert_eq!(op.apply(value, carry_in), (expected, carry_out));
    }
}
