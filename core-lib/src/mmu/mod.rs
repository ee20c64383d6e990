//! Flat 64 KiB memory image. This is the simplest possible `MemoryBus`: no
//! banking, no I/O register side effects, every address backed by a byte.
//! Hosts with a real memory map implement `MemoryBus` themselves.
use crate::bus::MemoryBus;
use thiserror::Error;
use tracing::debug;

/// Size of the CPU address space in bytes
pub const ADDRESS_SPACE: usize = 0x1_0000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("image of {len} bytes at {base:#06X} runs past the end of the address space")]
    ImageOutOfRange { base: u16, len: usize },
}

/// Flat memory backing the whole 16-bit address space
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; ADDRESS_SPACE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Memory {
    /// Creates a zero-filled memory image.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Creates a memory image with `program` copied to `base`.
    ///
    /// # Errors
    /// Returns [`MemoryError::ImageOutOfRange`] if the program does not fit.
    pub fn with_program(base: u16, program: &[u8]) -> Result<Self, MemoryError> {
        let mut memory = Self::new();
        memory.load(base, program)?;
        Ok(memory)
    }

    /// Copies `image` into memory starting at `base`.
    ///
    /// Unlike CPU accesses, loading does not wrap: an image that would run past
    /// 0xFFFF is rejected and memory is left untouched.
    ///
    /// # Errors
    /// Returns [`MemoryError::ImageOutOfRange`] if the image does not fit.
    pub fn load(&mut self, base: u16, image: &[u8]) -> Result<(), MemoryError> {
        let start = usize::from(base);
        let end = start
            .checked_add(image.len())
            .filter(|end| *end <= ADDRESS_SPACE)
            .ok_or(MemoryError::ImageOutOfRange {
                base,
                len: image.len(),
            })?;
        self.bytes[start..end].copy_from_slice(image);
        debug!(base, len = image.len(), "loaded image");
        Ok(())
    }

    /// Borrow a window of memory, clamped to the end of the address space.
    pub fn slice(&self, base: u16, len: usize) -> &[u8] {
        let start = usize::from(base);
        let end = start.saturating_add(len).min(ADDRESS_SPACE);
        &self.bytes[start..end]
    }
}

impl MemoryBus for Memory {
    fn read8(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr)]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr)] = value;
    }
}

#[cfg(test)]
mod tests;
