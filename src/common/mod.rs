//! Types shared across the ISA decoder, pipeline stages, and memory unit.

pub mod error;
pub mod reg;

pub use error::{ExceptionKind, Stage};
pub use reg::RegisterFile;
