//! SM83 instruction execution engine.
//!
//! [`Cpu::step`] fetches one instruction at PC, dispatches it through the
//! primary or `0xCB` extended table, runs it against a [`MemoryBus`], and
//! reports its cost in M-cycles. An opcode with no table entry stops the
//! engine with a [`FatalReport`]; the CPU stays faulted afterwards.
use crate::bus::MemoryBus;
use tracing::{debug, error, instrument, trace};

mod config;
mod error;
pub mod opcodes;
pub mod registers;

pub use config::{CpuConfig, StartupState};
pub use error::{CpuError, FatalReport};
pub use opcodes::{InstructionSet, Opcode, PREFIX_CB};
pub use registers::{Flags, Reg16, Reg8, Registers};

/// Cost of delivering an interrupt (two wait states, the push, and the jump).
pub const INTERRUPT_CYCLES: u8 = 5;

/// Cost of one idle step while halted or stopped.
const IDLE_CYCLES: u8 = 1;

/// Execution state of the core.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Running,
    /// `HALT` executed; idles until an interrupt is serviced.
    Halted,
    /// `STOP` executed; idles until an interrupt is serviced.
    Stopped,
    /// An unknown opcode was hit. Terminal.
    Faulted,
}

/// Point-in-time copy of everything observable about the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuSnapshot {
    pub registers: Registers,
    /// M-cycles of the most recent step
    pub cycles: u8,
    pub total_cycles: u64,
    pub opcodes_run: u64,
    pub ime: bool,
    pub state: RunState,
}

pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable
    pub ime: bool,
    /// Set by `EI`; IME turns on once the following instruction completes.
    pub(crate) ime_pending: bool,
    pub(crate) state: RunState,
    cycles: u8,
    total_cycles: u64,
    opcodes_run: u64,
    fault: Option<FatalReport>,
    trace: bool,
    instructions: &'static InstructionSet,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("ime", &self.ime)
            .field("state", &self.state)
            .field("total_cycles", &self.total_cycles)
            .field("opcodes_run", &self.opcodes_run)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// A core with all registers zeroed and the standard instruction set.
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            regs: config.startup.registers(),
            ime: false,
            ime_pending: false,
            state: RunState::Running,
            cycles: 0,
            total_cycles: 0,
            opcodes_run: 0,
            fault: None,
            trace: config.trace,
            instructions: InstructionSet::standard(),
        }
    }

    /// Replaces the dispatch tables, e.g. with a reduced set.
    #[must_use]
    pub fn with_instruction_set(mut self, instructions: &'static InstructionSet) -> Self {
        self.instructions = instructions;
        self
    }

    /// M-cycles consumed by the most recent step.
    pub const fn cycles(&self) -> u8 {
        self.cycles
    }

    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Instructions executed so far (idle and interrupt steps excluded).
    pub const fn opcodes_run(&self) -> u64 {
        self.opcodes_run
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// The report of the fault that stopped the core, if any.
    pub const fn fault(&self) -> Option<&FatalReport> {
        self.fault.as_ref()
    }

    pub const fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            registers: self.regs,
            cycles: self.cycles,
            total_cycles: self.total_cycles,
            opcodes_run: self.opcodes_run,
            ime: self.ime,
            state: self.state,
        }
    }

    /// Executes one instruction and returns the M-cycles it consumed.
    ///
    /// While halted or stopped, each call idles for one M-cycle. Once an
    /// unknown opcode has been hit every call returns the same error and the
    /// state is never touched again.
    pub fn step(&mut self, bus: &mut dyn MemoryBus) -> Result<u8, CpuError> {
        if let Some(report) = self.fault {
            return Err(CpuError::UnimplementedOpcode(Box::new(report)));
        }
        if matches!(self.state, RunState::Halted | RunState::Stopped) {
            self.account(IDLE_CYCLES);
            return Ok(IDLE_CYCLES);
        }

        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let (code, extended) = if opcode == PREFIX_CB {
            (bus.read8(pc.wrapping_add(1)), true)
        } else {
            (opcode, false)
        };
        let entry = if extended {
            self.instructions.extended(code)
        } else {
            self.instructions.primary(code)
        };
        let Some(&op) = entry else {
            return Err(self.fault_on(code, extended));
        };

        let enable_after = self.ime_pending;
        self.regs.pc = pc.wrapping_add(if extended { 2 } else { 1 });
        let taken = (op.exec)(self, bus, code);
        if enable_after && self.ime_pending {
            self.ime = true;
            self.ime_pending = false;
        }

        let cycles = op.cost(taken);
        self.account(cycles);
        self.opcodes_run += 1;
        if self.trace {
            trace!(pc, opcode = code, extended, mnemonic = op.mnemonic, cycles, "step");
        }
        Ok(cycles)
    }

    /// Delivers an interrupt through `vector` if IME allows it.
    ///
    /// Any pending interrupt wakes a halted or stopped core, even with IME
    /// off. When IME is set it is cleared, PC is pushed, and execution
    /// continues at `vector`; the cost is returned. Whoever owns the
    /// interrupt flag registers decides which vector to pass.
    #[instrument(level = "debug", skip(self, bus), fields(pc = self.regs.pc))]
    pub fn service_interrupt(&mut self, bus: &mut dyn MemoryBus, vector: u16) -> Option<u8> {
        match self.state {
            RunState::Faulted => return None,
            RunState::Halted | RunState::Stopped => {
                debug!(from = ?self.state, "woken by interrupt");
                self.state = RunState::Running;
            }
            RunState::Running => {}
        }
        if !self.ime {
            return None;
        }
        self.ime = false;
        self.ime_pending = false;
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = vector;
        self.account(INTERRUPT_CYCLES);
        debug!("interrupt dispatched");
        Some(INTERRUPT_CYCLES)
    }

    fn account(&mut self, cycles: u8) {
        self.cycles = cycles;
        self.total_cycles += u64::from(cycles);
    }

    /// Records the fault from the untouched state and switches the core off.
    fn fault_on(&mut self, opcode: u8, extended: bool) -> CpuError {
        let report = FatalReport {
            opcode,
            extended,
            snapshot: self.snapshot(),
        };
        error!("{report}");
        self.state = RunState::Faulted;
        self.fault = Some(report);
        CpuError::UnimplementedOpcode(Box::new(report))
    }
}


#[cfg(test)]
pub(crate) mod tracing_init {
    use std::sync::Once;
    static INIT: Once = Once::new();
    pub fn init() {
        INIT.call_once(|| {
            tracing_subscriber::fmt::Subscriber::builder()
                .with_max_level(tracing::Level::TRACE)
                .with_test_writer()
                .init();
        });
    }
}
