//! Stalling, flushing, operand forwarding, and exception aggregation.
//!
//! The hazard unit runs last in every tick, after all five stages have
//! computed their write latches from this cycle's read latches — it then
//! overrides those write latches (to insert bubbles, suppress side
//! effects, or redirect the PC) before any latch is committed.

use crate::common::{ExceptionKind, Stage};
use crate::cpu::Cpu;
use crate::isa::ResSrc;

/// Which source an operand should actually be read from this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rs {
    /// The value Decode read from the register file.
    Reg,
    /// Bypassed from Memory's latched ALU result.
    BpMem,
    /// Bypassed from Writeback's latched result.
    BpWb,
}

/// Tracks the single highest-priority pending exception and answers
/// forwarding queries for the Execute stage.
#[derive(Debug, Clone, Default)]
pub struct HazardUnit {
    pub exception_pc: u32,
    pub exception_stage: Stage,
    pub exception_kind: Option<ExceptionKind>,
}

impl HazardUnit {
    /// Records `kind` raised by `stage` at `pc`, unless a later stage has
    /// already raised one this tick (latest stage wins).
    pub fn raise(&mut self, stage: Stage, kind: ExceptionKind, pc: u32) {
        if stage < self.exception_stage {
            return;
        }
        self.exception_stage = stage;
        self.exception_kind = Some(kind);
        self.exception_pc = pc;
        tracing::trace!(?stage, ?kind, pc, "exception raised");
    }

    /// Decides where operand `rsa` should be read from, given Memory's and
    /// Writeback's current read latches. `x0` is never forwarded (it always
    /// reads 0, and forwarding it would violate that invariant).
    #[must_use]
    pub fn get_rs(&self, cpu: &Cpu, rsa: u8) -> Rs {
        if rsa == 0 {
            return Rs::Reg;
        }
        if cpu.memory.read.params.reg_write && cpu.memory.read.reg_addr == rsa {
            Rs::BpMem
        } else if cpu.writeback.read.reg_write && cpu.writeback.read.reg_addr == rsa {
            Rs::BpWb
        } else {
            Rs::Reg
        }
    }
}

/// Runs the hazard unit for one tick: detects the load-use hazard and the
/// control-flow flush, clears a stale pending exception if a redirect or
/// stall makes it moot, then forces bubbles/suppressions into each write
/// latch (from Writeback back to Fetch) before any latch commits.
pub fn tick(cpu: &mut Cpu) {
    let load_hazard = needs_load_use_stall(cpu);
    let pc_flush = cpu.pc_r;

    if (pc_flush || load_hazard) && cpu.hazard.exception_stage <= Stage::Decode {
        cpu.hazard.exception_stage = Stage::None;
        cpu.hazard.exception_kind = None;
    }

    if cpu.hazard.exception_stage >= Stage::Memory {
        cpu.writeback.write.reg_write = false;
    }
    cpu.writeback.commit();

    if cpu.hazard.exception_stage >= Stage::Execute {
        cpu.memory.write.params.reg_write = false;
        cpu.memory.write.params.mem_write = false;
        cpu.memory.write.params.res_src = ResSrc::Alu;
    }
    cpu.memory.commit();

    if cpu.hazard.exception_stage >= Stage::Decode || load_hazard || pc_flush {
        let p = &mut cpu.execute.write.params;
        p.reg_write = false;
        p.mem_write = false;
        p.is_branch = false;
        p.is_jump = false;
        p.interrupt = false;
        p.res_src = ResSrc::Alu;
    }
    cpu.execute.commit();

    if cpu.hazard.exception_stage >= Stage::Fetch || pc_flush {
        cpu.decode.write.v = true;
        cpu.decode.commit();
    } else if !load_hazard {
        cpu.decode.commit();
    }

    if cpu.hazard.exception_kind.is_some() {
        cpu.fetch.write.pc = cpu.tvec;
        cpu.fetch.commit();
    } else if !load_hazard {
        cpu.fetch.commit();
    }

    cpu.hazard.exception_stage = Stage::None;
}

/// A load-use hazard exists when the instruction in Execute is a load and
/// its destination register is a source operand of the instruction in
/// Decode — consuming it one cycle early requires a stall plus bubble.
fn needs_load_use_stall(cpu: &Cpu) -> bool {
    let ex = &cpu.execute.read;
    if ex.params.res_src != ResSrc::Mem || ex.rda == 0 {
        return false;
    }
    let inst = cpu.decode.read.inst;
    let rs1 = crate::isa::fields::rs1(inst);
    let rs2 = crate::isa::fields::rs2(inst);
    ex.rda == rs1 || ex.rda == rs2
}
