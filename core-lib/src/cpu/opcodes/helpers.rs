//! Operand access shared by the instruction handlers.
//!
//! Immediates are fetched from the bytes following the opcode as the handler
//! runs, advancing PC as they are consumed. Stack accesses wrap modulo 65536.

use crate::bus::MemoryBus;
use crate::cpu::registers::{unpack, Reg8};
use crate::cpu::Cpu;

impl Cpu {
    /// Reads the byte at PC and moves PC past it.
    pub(crate) fn fetch8(&mut self, bus: &mut dyn MemoryBus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and moves PC past it.
    pub(crate) fn fetch16(&mut self, bus: &mut dyn MemoryBus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Reads an 8-bit operand, going through the bus for `(HL)`.
    pub(crate) fn read_operand(&self, bus: &dyn MemoryBus, reg: Reg8) -> u8 {
        match self.regs.get(reg) {
            Some(value) => value,
            None => bus.read8(self.regs.hl()),
        }
    }

    /// Writes an 8-bit operand, going through the bus for `(HL)`.
    pub(crate) fn write_operand(&mut self, bus: &mut dyn MemoryBus, reg: Reg8, value: u8) {
        if reg == Reg8::HlIndirect {
            bus.write8(self.regs.hl(), value);
        } else {
            self.regs.set(reg, value);
        }
    }

    /// High byte to SP-1, low byte to SP-2, then SP -= 2.
    pub(crate) fn push16(&mut self, bus: &mut dyn MemoryBus, value: u16) {
        let (hi, lo) = unpack(value);
        let sp = self.regs.sp;
        bus.write8(sp.wrapping_sub(1), hi);
        bus.write8(sp.wrapping_sub(2), lo);
        self.regs.sp = sp.wrapping_sub(2);
    }

    /// Low byte from SP, high byte from SP+1, then SP += 2.
    pub(crate) fn pop16(&mut self, bus: &mut dyn MemoryBus) -> u16 {
        let sp = self.regs.sp;
        let lo = bus.read8(sp);
        let hi = bus.read8(sp.wrapping_add(1));
        self.regs.sp = sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }
}
