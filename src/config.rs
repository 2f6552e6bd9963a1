//! Simulator configuration: memory size and the trap-handler entry point.

use serde::Deserialize;

/// Default memory size: 1024 words (4096 bytes), per `CPUEnv`'s default
/// `memSize`.
const DEFAULT_MEMORY_WORDS: usize = 1024;

/// Construction-time parameters for a [`crate::cpu::Cpu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Size of backing memory, in words.
    pub memory_words: usize,
    /// Byte address the hazard unit redirects the PC to on exception.
    pub tvec: u32,
}

impl Default for Config {
    /// A 1024-word memory with `tvec` pointing at the last four words, where
    /// [`crate::cpu::Cpu::new`] installs a `sw x0, 0(x0)` shutdown handler.
    fn default() -> Self {
        let memory_words = DEFAULT_MEMORY_WORDS;
        Self {
            memory_words,
            tvec: (memory_words * 4 - 16) as u32,
        }
    }
}
