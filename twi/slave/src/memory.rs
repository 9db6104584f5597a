//! Register files backing the write and read sides of the bus

use core::fmt;
use crate::MEMORY_SIZE;

/// Fixed 256-byte memory indexed by a `u8` cursor.
///
/// Any `u8` is a valid index, so bus-driven access can never go out of
/// range. Bulk operations wrap modulo 256 the same way the cursor does.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterFile {
    bytes: [u8; MEMORY_SIZE],
}

impl RegisterFile {
    /// Create a zero-filled register file
    pub const fn new() -> Self {
        Self { bytes: [0; MEMORY_SIZE] }
    }

    /// Read one byte
    #[inline]
    pub fn get(&self, index: u8) -> u8 {
        self.bytes[usize::from(index)]
    }

    /// Write one byte
    #[inline]
    pub fn set(&mut self, index: u8, value: u8) {
        self.bytes[usize::from(index)] = value;
    }

    /// Copy `data` in starting at `offset`, wrapping past index 255
    pub fn load(&mut self, offset: u8, data: &[u8]) {
        let mut index = offset;
        for &byte in data.iter().take(MEMORY_SIZE) {
            self.set(index, byte);
            index = index.wrapping_add(1);
        }
    }

    /// Copy out into `buf` starting at `offset`, wrapping past index 255
    pub fn copy_out(&self, offset: u8, buf: &mut [u8]) {
        let mut index = offset;
        for slot in buf.iter_mut() {
            *slot = self.get(index);
            index = index.wrapping_add(1);
        }
    }

    /// Set every byte to `value`
    pub fn fill(&mut self, value: u8) {
        self.bytes = [value; MEMORY_SIZE];
    }

    /// Borrow the whole memory
    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("RegisterFile")
            .field("len", &MEMORY_SIZE)
            .field("non_zero", &used)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterFile {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "RegisterFile({=[u8]:x})", &self.bytes[..]);
    }
}
