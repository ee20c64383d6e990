//! Types shared by every opcode table entry.
//!
//! An [`Opcode`] is plain data plus a function pointer, so whole tables are
//! `Copy` and can be cloned and edited (see `InstructionSet::without_extended`).

use crate::bus::MemoryBus;
use crate::cpu::registers::Flags;
use crate::cpu::Cpu;

/// Instruction handler. Receives the opcode byte that selected it (the second
/// byte for extended opcodes) so one handler can serve a whole decoded row.
/// Returns `true` if a conditional transfer was taken.
pub type Handler = fn(&mut Cpu, &mut dyn MemoryBus, u8) -> bool;

/// Represents a single CPU opcode and its execution logic.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    /// Human-readable mnemonic for tracing and diagnostics.
    pub mnemonic: &'static str,
    /// Encoded length in bytes, including the `0xCB` prefix for extended opcodes.
    pub length: u8,
    /// M-cycles when no branch is taken (or for any non-branching instruction).
    pub cycles: u8,
    /// M-cycles when the handler reports a taken branch.
    pub taken_cycles: u8,
    /// The handler sets PC itself instead of falling through.
    pub transfers_control: bool,
    pub exec: Handler,
}

impl Opcode {
    pub const fn plain(mnemonic: &'static str, length: u8, cycles: u8, exec: Handler) -> Self {
        Self {
            mnemonic,
            length,
            cycles,
            taken_cycles: cycles,
            transfers_control: false,
            exec,
        }
    }

    /// Control transfer whose cost depends on whether the branch is taken.
    pub const fn branch(
        mnemonic: &'static str,
        length: u8,
        cycles: u8,
        taken_cycles: u8,
        exec: Handler,
    ) -> Self {
        Self {
            mnemonic,
            length,
            cycles,
            taken_cycles,
            transfers_control: true,
            exec,
        }
    }

    pub const fn cost(&self, taken: bool) -> u8 {
        if taken {
            self.taken_cycles
        } else {
            self.cycles
        }
    }
}

/// Branch condition used by JR, JP, CALL and RET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    /// Decodes the two-bit `cc` field (bits 4-3 of the opcode).
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::NotZero,
            1 => Self::Zero,
            2 => Self::NotCarry,
            _ => Self::Carry,
        }
    }

    pub const fn holds(self, flags: Flags) -> bool {
        match self {
            Self::Always => true,
            Self::NotZero => !flags.contains(Flags::ZERO),
            Self::Zero => flags.contains(Flags::ZERO),
            Self::NotCarry => !flags.contains(Flags::CARRY),
            Self::Carry => flags.contains(Flags::CARRY),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Always => "",
            Self::NotZero => "NZ",
            Self::Zero => "Z",
            Self::NotCarry => "NC",
            Self::Carry => "C",
        }
    }
}

/// Builds a flag set from the four individual outcomes.
#[inline]
pub fn flags(zero: bool, subtract: bool, half_carry: bool, carry: bool) -> Flags {
    let mut f = Flags::empty();
    f.set(Flags::ZERO, zero);
    f.set(Flags::SUBTRACT, subtract);
    f.set(Flags::HALF_CARRY, half_carry);
    f.set(Flags::CARRY, carry);
    f
}
