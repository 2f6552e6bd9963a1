//! The five pipeline stages, each a free `tick(&mut Cpu)` function run in
//! reverse data-flow order (Writeback, Memory, Execute, Decode, Fetch) so
//! every stage reads latches nothing has overwritten yet this cycle.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;
