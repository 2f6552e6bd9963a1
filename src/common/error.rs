//! The exception taxonomy raised by decode, fetch, and the memory unit, and
//! the pipeline-stage ordinal used to decide which of several simultaneous
//! exceptions wins within a single tick.

use thiserror::Error;

/// A pipeline stage, ordered so that a later stage's exception always takes
/// priority over an earlier stage's within the same tick (spec: exception
/// aggregation priority FETCH < DECODE < EXECUTE < MEMORY < WRITEBACK).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    None,
    Fetch,
    Decode,
    Execute,
    Memory,
    Writeback,
}

/// A trap raised by some pipeline stage, carrying enough context to vector
/// control to `tvec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExceptionKind {
    /// Decode saw an instruction with no matching opcode/funct3/funct7.
    #[error("illegal instruction")]
    BadOpcode,
    /// A memory access address was not aligned to the access width.
    #[error("unaligned memory address {addr:#010x}")]
    UnalignedAddr {
        /// The offending address.
        addr: u32,
    },
    /// A memory access address fell outside the configured memory.
    #[error("address {addr:#010x} out of range")]
    MmuMiss {
        /// The offending address.
        addr: u32,
    },
    /// ECALL or EBREAK reached Execute.
    #[error("interrupt (ecall/ebreak)")]
    Interrupt,
}
