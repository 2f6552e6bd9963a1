//! The two-phase read/write latch discipline every pipeline stage commits
//! through: a stage reads the *read* half of its own latch and the *read*
//! half of upstream latches, and writes only the *write* half of the
//! latches it owns. `commit` is called once per tick, after every stage has
//! run, copying `write` into `read` so no stage ever observes a write made
//! during its own cycle.

use crate::isa::ControlParams;

/// A paired read/write latch. `T` is the per-stage state it carries.
#[derive(Debug, Clone, Default)]
pub struct Latch<T> {
    pub read: T,
    pub write: T,
}

impl<T: Clone> Latch<T> {
    /// Copies `write` into `read`, making this cycle's writes visible to
    /// the next cycle's reads.
    pub fn commit(&mut self) {
        self.read = self.write.clone();
    }
}

/// Fetch's only state: the PC of the instruction it issued a load for.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchState {
    pub pc: u32,
}

/// Decode's state: the raw word Fetch loaded, its PC and predicted
/// successor, and the bubble flag `v` (true = bubble, no instruction).
#[derive(Debug, Clone, Copy)]
pub struct DecodeState {
    pub inst: u32,
    pub pc: u32,
    pub pc_next: u32,
    pub v: bool,
}

impl Default for DecodeState {
    fn default() -> Self {
        Self {
            inst: 0,
            pc: 0,
            pc_next: 0,
            v: true,
        }
    }
}

/// Execute's state: the decoded control params plus operands read from the
/// register file (subject to forwarding) and the immediate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteState {
    pub params: ControlParams,
    pub pc: u32,
    pub pc_next: u32,
    pub rs1v: u32,
    pub rs2v: u32,
    pub imm_ext: u32,
    pub rs1a: u8,
    pub rs2a: u8,
    pub rda: u8,
}

/// Memory's state: the subset of control needed for the memory access plus
/// the ALU result (address or value) and forwarded store data.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryState {
    pub params: ControlParams,
    pub reg_addr: u8,
    pub pc: u32,
    pub pc_next: u32,
    pub mem_wdata: u32,
    pub alu_res: u32,
}

/// Writeback's state: what to write back, and where.
#[derive(Debug, Clone, Copy, Default)]
pub struct WritebackState {
    pub reg_write: bool,
    pub reg_addr: u8,
    pub reg_wdata: u32,
}
