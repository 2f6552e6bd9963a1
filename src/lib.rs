//! A cycle-accurate functional simulator of a 5-stage in-order RV32I
//! pipeline: Fetch, Decode, Execute, Memory, and Writeback, connected by
//! two-phase latches and arbitrated by a single hazard unit that handles
//! load-use stalls, control-flow flushes, operand forwarding, and
//! exception priority.

pub mod common;
pub mod config;
pub mod cpu;
pub mod isa;
pub mod memory;
pub mod pipeline;

pub use common::{ExceptionKind, RegisterFile, Stage};
pub use config::Config;
pub use cpu::Cpu;
pub use memory::Memory;
