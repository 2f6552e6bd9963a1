//! The top-level simulator: owns the register file, memory, and every
//! pipeline latch, and drives one cycle at a time.

use crate::common::RegisterFile;
use crate::config::Config;
use crate::memory::Memory;
use crate::pipeline::latches::{
    DecodeState, ExecuteState, FetchState, Latch, MemoryState, WritebackState,
};
use crate::pipeline::HazardUnit;
use crate::pipeline::{hazard, stages};

/// The instruction a freshly constructed [`Cpu`] installs at `tvec`:
/// `sw x0, 0(x0)`, a store to the shutdown sentinel address that halts
/// simulation the moment an exception is taken.
const SHUTDOWN_HANDLER_WORD: u32 = 0x0000_2023;

/// A 5-stage in-order RV32I pipeline.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub regs: RegisterFile,
    pub mmu: Memory,

    pub fetch: Latch<FetchState>,
    pub decode: Latch<DecodeState>,
    pub execute: Latch<ExecuteState>,
    pub memory: Latch<MemoryState>,
    pub writeback: Latch<WritebackState>,

    pub hazard: HazardUnit,

    /// Byte address the hazard unit redirects the PC to on exception.
    pub tvec: u32,
    /// Whether a store to address 0 has fired the shutdown sentinel.
    pub shutdown: bool,
    /// Whether Execute decided this cycle's PC must be redirected.
    pub pc_r: bool,
    /// The redirect base Fetch adds Execute's immediate to, when `pc_r`.
    pub jump_base: u32,
}

impl Cpu {
    /// Builds a [`Cpu`] with `image` loaded at address 0 and a shutdown
    /// handler installed at `config.tvec`.
    #[must_use]
    pub fn new(image: &[u8], config: Config) -> Self {
        let mut mmu = Memory::from_image(image, config.memory_words);
        for offset in [0, 4, 8, 12] {
            // Ignore the Result: tvec is caller-supplied and must already
            // fall within the memory this Memory was just sized for.
            let _: Result<(), _> = mmu.store(config.tvec + offset, SHUTDOWN_HANDLER_WORD);
        }

        Self {
            regs: RegisterFile::new(),
            mmu,
            fetch: Latch::default(),
            decode: Latch::default(),
            execute: Latch::default(),
            memory: Latch::default(),
            writeback: Latch::default(),
            hazard: HazardUnit::default(),
            tvec: config.tvec,
            shutdown: false,
            pc_r: false,
            jump_base: 0,
        }
    }

    /// Runs one pipeline cycle: Writeback, Memory, Execute, Decode, Fetch,
    /// then the hazard unit, which overrides write latches and commits them.
    pub fn tick(&mut self) {
        stages::writeback::tick(self);
        stages::memory::tick(self);
        stages::execute::tick(self);
        stages::decode::tick(self);
        stages::fetch::tick(self);
        hazard::tick(self);
    }

    /// Seeds the PC and runs cycles until the shutdown sentinel fires.
    pub fn run(&mut self, entry_pc: u32) {
        self.fetch.read.pc = entry_pc;
        while !self.shutdown {
            self.tick();
        }
    }

    /// A snapshot of the architectural register file, for tests and
    /// diagnostics.
    #[must_use]
    pub fn dump_regs(&self) -> [u32; 32] {
        self.regs.dump()
    }
}
