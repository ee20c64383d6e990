/// core-lib/src/cpu/config.rs
use super::registers::Registers;

/// Register contents the engine starts from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    /// Every register, PC and SP zero (execution begins at the boot ROM).
    #[default]
    Zeroed,
    /// DMG state left behind by the boot ROM (PC=0x0100, SP=0xFFFE).
    PostBoot,
}

impl StartupState {
    pub const fn registers(self) -> Registers {
        match self {
            Self::Zeroed => Registers {
                a: 0,
                f: 0,
                b: 0,
                c: 0,
                d: 0,
                e: 0,
                h: 0,
                l: 0,
                pc: 0,
                sp: 0,
            },
            Self::PostBoot => Registers::post_boot(),
        }
    }
}

/// Construction-time options for [`super::Cpu`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    pub startup: StartupState,
    /// Emit a `trace` event for every executed instruction.
    pub trace: bool,
}

impl CpuConfig {
    #[must_use]
    pub const fn with_startup(mut self, startup: StartupState) -> Self {
        self.startup = startup;
        self
    }

    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
