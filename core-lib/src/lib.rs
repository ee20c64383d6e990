//! Instruction-level emulation of the SM83, the CPU of the original Game Boy.
//!
//! The crate executes one instruction at a time against any [`MemoryBus`]
//! and reports its cost in M-cycles. It knows nothing about cartridges,
//! video, audio or timers; a host wires those up behind the bus.

pub mod bus;
pub mod cpu;
pub mod mmu;

// Re-export common types
pub use bus::MemoryBus;
pub use cpu::{
    Cpu, CpuConfig, CpuError, CpuSnapshot, FatalReport, Flags, InstructionSet, Registers,
    RunState, StartupState,
};
pub use mmu::{Memory, MemoryError};
