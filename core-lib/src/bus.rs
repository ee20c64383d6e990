/// core-lib/src/bus.rs

/// Byte-addressable view of the 16-bit address space the CPU executes against.
///
/// The core never owns memory. Bank switching, ROM write protection and I/O
/// register side effects belong to the implementor; from the CPU's point of
/// view every address in `0x0000..=0xFFFF` is readable and writable.
pub trait MemoryBus {
    fn read8(&self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Read a 16-bit value from memory in little-endian format
    fn read16(&self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Write a 16-bit value to memory in little-endian format
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}
