//! CPU control instructions: NOP, HALT, STOP, DI, EI.

use crate::bus::MemoryBus;
use crate::cpu::{Cpu, RunState};
use tracing::debug;

pub(crate) fn nop(_cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    false
}

/// `HALT`: idle until an interrupt is delivered
pub(crate) fn halt(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    debug!(pc = cpu.regs.pc, "halted");
    cpu.state = RunState::Halted;
    false
}

/// `STOP`: two-byte encoding, the second byte is ignored
pub(crate) fn stop(cpu: &mut Cpu, bus: &mut dyn MemoryBus, _op: u8) -> bool {
    let _ = cpu.fetch8(bus);
    debug!(pc = cpu.regs.pc, "stopped");
    cpu.state = RunState::Stopped;
    false
}

/// `DI` takes effect immediately and cancels a pending `EI`
pub(crate) fn di(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.ime = false;
    cpu.ime_pending = false;
    false
}

/// `EI` takes effect after the following instruction
pub(crate) fn ei(cpu: &mut Cpu, _bus: &mut dyn MemoryBus, _op: u8) -> bool {
    cpu.ime_pending = true;
    false
}
