//! The pipeline datapath: per-stage latches, the five stages themselves,
//! and the hazard unit that arbitrates stalls, flushes, and exceptions.

pub mod hazard;
pub mod latches;
pub mod stages;

pub use hazard::HazardUnit;
pub use latches::{DecodeState, ExecuteState, FetchState, Latch, MemoryState, WritebackState};
