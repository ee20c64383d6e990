//! Register file and flag model.
//!
//! The eight 8-bit registers are stored individually; the 16-bit pairs are
//! composed and decomposed on demand and have no storage of their own.
use bitflags::bitflags;

bitflags! {
    /// Bits of the F register. The low nibble is never set.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        const ZERO       = 0b1000_0000;
        const SUBTRACT   = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY      = 0b0001_0000;
    }
}

/// 8-bit operand as encoded in the low three bits of most opcodes.
///
/// `HlIndirect` is not a register: it names the byte HL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Reg8 {
    /// Decodes a 3-bit operand field (`0..=7`, higher bits ignored).
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::B,
            1 => Self::C,
            2 => Self::D,
            3 => Self::E,
            4 => Self::H,
            5 => Self::L,
            6 => Self::HlIndirect,
            _ => Self::A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::H => "H",
            Self::L => "L",
            Self::HlIndirect => "(HL)",
            Self::A => "A",
        }
    }
}

/// 16-bit register pairs plus the stack pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    /// Decodes the `rr` field of `LD rr,n16`, `INC rr`, `ADD HL,rr` (SP in slot 3).
    pub const fn from_bits_sp(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::SP,
        }
    }

    /// Decodes the `rr` field of `PUSH`/`POP` (AF in slot 3).
    pub const fn from_bits_af(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::BC,
            1 => Self::DE,
            2 => Self::HL,
            _ => Self::AF,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AF => "AF",
            Self::BC => "BC",
            Self::DE => "DE",
            Self::HL => "HL",
            Self::SP => "SP",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub pc: u16,
    pub sp: u16,
}

/// Compose a 16-bit value from a high and a low register.
#[inline]
pub const fn pack(hi: u8, lo: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// Split a 16-bit value into its (high, low) bytes.
#[inline]
pub const fn unpack(value: u16) -> (u8, u8) {
    ((value >> 8) as u8, value as u8)
}

impl Registers {
    /// DMG register state after the boot ROM hands over to the cartridge.
    pub const fn post_boot() -> Self {
        Self {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            pc: 0x0100,
            sp: 0xFFFE,
        }
    }

    pub const fn af(&self) -> u16 {
        pack(self.a, self.f)
    }

    pub fn set_af(&mut self, val: u16) {
        let (hi, lo) = unpack(val);
        self.a = hi;
        self.f = lo & 0xF0;
    }

    pub const fn bc(&self) -> u16 {
        pack(self.b, self.c)
    }

    pub fn set_bc(&mut self, val: u16) {
        (self.b, self.c) = unpack(val);
    }

    pub const fn de(&self) -> u16 {
        pack(self.d, self.e)
    }

    pub fn set_de(&mut self, val: u16) {
        (self.d, self.e) = unpack(val);
    }

    pub const fn hl(&self) -> u16 {
        pack(self.h, self.l)
    }

    pub fn set_hl(&mut self, val: u16) {
        (self.h, self.l) = unpack(val);
    }

    pub const fn pair(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af(),
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    pub fn set_pair(&mut self, reg: Reg16, val: u16) {
        match reg {
            Reg16::AF => self.set_af(val),
            Reg16::BC => self.set_bc(val),
            Reg16::DE => self.set_de(val),
            Reg16::HL => self.set_hl(val),
            Reg16::SP => self.sp = val,
        }
    }

    /// Returns a plain register. `(HL)` lives in memory and reads as `None`.
    pub const fn get(&self, reg: Reg8) -> Option<u8> {
        match reg {
            Reg8::A => Some(self.a),
            Reg8::B => Some(self.b),
            Reg8::C => Some(self.c),
            Reg8::D => Some(self.d),
            Reg8::E => Some(self.e),
            Reg8::H => Some(self.h),
            Reg8::L => Some(self.l),
            Reg8::HlIndirect => None,
        }
    }

    /// Sets a plain register. Writing `(HL)` here is a no-op; go through the bus.
    pub fn set(&mut self, reg: Reg8, val: u8) {
        match reg {
            Reg8::A => self.a = val,
            Reg8::B => self.b = val,
            Reg8::C => self.c = val,
            Reg8::D => self.d = val,
            Reg8::E => self.e = val,
            Reg8::H => self.h = val,
            Reg8::L => self.l = val,
            Reg8::HlIndirect => {}
        }
    }

    pub const fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.f)
    }

    /// Replaces all four flags at once.
    pub fn set_flags(&mut self, flags: Flags) {
        self.f = flags.bits();
    }

    /// Tests a single flag bit.
    pub const fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    /// Sets or clears the given flag bit(s), leaving the others alone.
    pub fn set_flag(&mut self, flag: Flags, on: bool) {
        let mut flags = self.flags();
        flags.set(flag, on);
        self.set_flags(flags);
    }
}
