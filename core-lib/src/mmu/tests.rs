/// core-lib/src/mmu/tests.rs
use super::{Memory, MemoryError, ADDRESS_SPACE};
use crate::bus::MemoryBus;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_new_memory_is_zeroed() {
    let mem = Memory::new();
    assert_eq!(mem.read8(0x0000), 0x00);
    assert_eq!(mem.read8(0xFFFF), 0x00);
}

#[test]
fn test_read_write_byte() {
    let mut mem = Memory::new();
    mem.write8(0xC000, 0xAB);
    assert_eq!(mem.read8(0xC000), 0xAB);
}

#[test]
fn test_word_is_little_endian() {
    let mut mem = Memory::new();
    mem.write16(0x1000, 0xBEEF);
    assert_eq!(mem.read8(0x1000), 0xEF);
    assert_eq!(mem.read8(0x1001), 0xBE);
    assert_eq!(mem.read16(0x1000), 0xBEEF);
}

/// A word access at the top of memory wraps its high byte to 0x0000
#[test]
fn test_word_access_wraps_at_top() {
    let mut mem = Memory::new();
    mem.write16(0xFFFF, 0x1234);
    assert_eq!(mem.read8(0xFFFF), 0x34);
    assert_eq!(mem.read8(0x0000), 0x12);
    assert_eq!(mem.read16(0xFFFF), 0x1234);
}

#[test]
fn test_load_program() -> Result<(), MemoryError> {
    let mem = Memory::with_program(0x0150, &[0x3E, 0x42, 0x76])?;
    assert_eq!(mem.slice(0x0150, 3), &[0x3E, 0x42, 0x76]);
    assert_eq!(mem.read8(0x014F), 0x00);
    Ok(())
}

#[test]
fn test_load_up_to_last_byte() -> Result<(), MemoryError> {
    let mut mem = Memory::new();
    mem.load(0xFFFE, &[0x01, 0x02])?;
    assert_eq!(mem.read8(0xFFFF), 0x02);
    Ok(())
}

#[test]
fn test_load_rejects_overflowing_image() {
    let mut mem = Memory::new();
    let err = mem.load(0xFFFF, &[0xAA, 0xBB]).unwrap_err();
    assert_eq!(err, MemoryError::ImageOutOfRange { base: 0xFFFF, len: 2 });
    // Nothing is written on failure
    assert_eq!(mem.read8(0xFFFF), 0x00);
}

#[test]
fn test_slice_is_clamped() {
    let mem = Memory::new();
    assert_eq!(mem.slice(0xFFF0, 0x100).len(), 0x10);
    assert_eq!(mem.slice(0x0000, ADDRESS_SPACE).len(), ADDRESS_SPACE);
}

proptest! {
    #[test]
    fn test_word_round_trip(addr in any::<u16>(), value in any::<u16>()) {
        let mut mem = Memory::new();
        mem.write16(addr, value);
        prop_assert_eq!(mem.read16(addr), value);
    }
}
