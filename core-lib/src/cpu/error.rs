use super::registers::Flags;
use super::CpuSnapshot;
use std::fmt;
use thiserror::Error;

/// Errors surfaced by [`super::Cpu::step`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("unimplemented opcode {} at PC={:#06X}", opcode_label(.0), .0.snapshot.registers.pc)]
    UnimplementedOpcode(Box<FatalReport>),
}

impl CpuError {
    /// The diagnostic report carried by the error.
    pub fn report(&self) -> &FatalReport {
        match self {
            Self::UnimplementedOpcode(report) => report,
        }
    }
}

fn opcode_label(report: &FatalReport) -> String {
    if report.extended {
        format!("CB {:02X}", report.opcode)
    } else {
        format!("{:02X}", report.opcode)
    }
}

/// Everything needed to diagnose a fatal decode failure without rerunning.
///
/// The snapshot is taken before any state is touched, so PC still points at
/// the offending opcode (or at the `0xCB` prefix for extended opcodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FatalReport {
    pub opcode: u8,
    /// The opcode came from the `0xCB` extended table
    pub extended: bool,
    pub snapshot: CpuSnapshot,
}

impl fmt::Display for FatalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = &self.snapshot.registers;
        let flags = Flags::from_bits_truncate(regs.f);
        let bit = |flag: Flags| u8::from(flags.contains(flag));
        writeln!(f, "Unimplemented opcode {}", opcode_label(self))?;
        writeln!(
            f,
            "A:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} F:{:02X} H:{:02X} L:{:02X}",
            regs.a, regs.b, regs.c, regs.d, regs.e, regs.f, regs.h, regs.l
        )?;
        writeln!(
            f,
            "Z:{} N:{} H:{} C:{}",
            bit(Flags::ZERO),
            bit(Flags::SUBTRACT),
            bit(Flags::HALF_CARRY),
            bit(Flags::CARRY)
        )?;
        writeln!(f, "PC:{:04X} SP:{:04X}", regs.pc, regs.sp)?;
        writeln!(f, "OPCODES RUN: {}", self.snapshot.opcodes_run)?;
        write!(f, "TOTAL CYCLES: {}", self.snapshot.total_cycles)
    }
}
