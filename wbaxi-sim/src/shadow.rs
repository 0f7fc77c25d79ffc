//! Reference memory for end-to-end checks.

use std::collections::HashMap;

use crate::error::SimError;

/// Word-addressed memory updated by acknowledged writes.
#[derive(Debug, Clone, Default)]
pub struct ShadowMemory {
    size: usize,
    words: HashMap<u64, u64>,
}

impl ShadowMemory {
    /// Creates an all-zero memory of `size`-byte words.
    pub fn new(size: usize) -> Self { Self { size, words: HashMap::new() } }

    /// Word at `addr`.
    pub fn read(&self, addr: u64) -> u64 { self.words.get(&addr).copied().unwrap_or(0) }

    /// Writes the bytes of `data` selected by `sel`.
    pub fn write(&mut self, addr: u64, data: u64, sel: u8) {
        let mask = (0..self.size)
            .filter(|byte| sel >> byte & 1 != 0)
            .fold(0u64, |mask, byte| mask | 0xff << (8 * byte));
        let word = self.words.entry(addr).or_insert(0);
        *word = (*word & !mask) | (data & mask);
    }

    /// Checks a read result.
    pub fn check(&self, addr: u64, got: u64) -> Result<(), SimError> {
        let expected = self.read(addr);
        if got != expected {
            return Err(SimError::Mismatch { addr, got, expected });
        }
        Ok(())
    }
}
