//! A trivial word-addressed memory. Loads and stores of unaligned or
//! out-of-range addresses fault; a store to address 0 is the simulator's
//! shutdown sentinel.

use crate::common::ExceptionKind;

/// Flat, word-addressed memory backing the simulator.
#[derive(Debug, Clone)]
pub struct Memory {
    words: Vec<u32>,
}

impl Memory {
    /// Builds `words`-word memory, zero-initialized.
    #[must_use]
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Builds memory of `words` words, copying `image` (little-endian byte
    /// layout) into the front of it. `image.len()` must be a multiple of 4
    /// and must not exceed `words * 4`.
    #[must_use]
    pub fn from_image(image: &[u8], words: usize) -> Self {
        assert!(image.len() % 4 == 0, "image length must be a multiple of 4");
        assert!(image.len() <= words * 4, "image does not fit in memory");

        let mut mem = Self::new(words);
        for (i, chunk) in image.chunks_exact(4).enumerate() {
            mem.words[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        mem
    }

    /// Total size in words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether this memory holds zero words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Loads the word at byte address `addr`. Fails `UnalignedAddr` if `addr`
    /// is not a multiple of 4, `MmuMiss` if the word index is out of range.
    pub fn load(&self, addr: u32) -> Result<u32, ExceptionKind> {
        if addr % 4 != 0 {
            return Err(ExceptionKind::UnalignedAddr { addr });
        }
        let idx = (addr / 4) as usize;
        self.words
            .get(idx)
            .copied()
            .ok_or(ExceptionKind::MmuMiss { addr })
    }

    /// Stores `data` at byte address `addr`. Same alignment/range checks as
    /// [`Memory::load`]. A store to address 0 does not special-case the
    /// write itself — callers that need the shutdown sentinel check
    /// `addr == 0` before or after calling this.
    pub fn store(&mut self, addr: u32, data: u32) -> Result<(), ExceptionKind> {
        if addr % 4 != 0 {
            return Err(ExceptionKind::UnalignedAddr { addr });
        }
        let idx = (addr / 4) as usize;
        if idx >= self.words.len() {
            return Err(ExceptionKind::MmuMiss { addr });
        }
        self.words[idx] = data;
        if addr == 0 {
            tracing::trace!("store to address 0: shutdown sentinel");
        }
        Ok(())
    }
}
