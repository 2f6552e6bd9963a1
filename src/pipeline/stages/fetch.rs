//! Fetch: issues the instruction-memory load for the current PC and
//! computes the next PC, honoring any redirect Execute raised this cycle.

use crate::common::Stage;
use crate::cpu::Cpu;

pub fn tick(cpu: &mut Cpu) {
    let pc = cpu.fetch.read.pc;

    let inst = match cpu.mmu.load(pc) {
        Ok(word) => word,
        Err(kind) => {
            cpu.hazard.raise(Stage::Fetch, kind, pc);
            0
        }
    };

    let pc_next = if cpu.pc_r {
        cpu.jump_base.wrapping_add(cpu.execute.read.imm_ext)
    } else {
        pc.wrapping_add(4)
    };

    tracing::trace!(pc, inst, pc_next, "IF");

    cpu.fetch.write.pc = pc_next;
    cpu.decode.write.inst = inst;
    cpu.decode.write.pc = pc;
    cpu.decode.write.pc_next = pc_next;
    cpu.decode.write.v = false;
}
