//! Decode: looks up an instruction's control parameters and immediate,
//! applies the bubble contract, and reads the register file — after first
//! committing Writeback's pending write, so a same-cycle write-then-read
//! is visible.

use crate::common::{ExceptionKind, Stage};
use crate::cpu::Cpu;
use crate::isa::{self, ResSrc, fields};

pub fn tick(cpu: &mut Cpu) {
    let inst = cpu.decode.read.inst;
    let pc = cpu.decode.read.pc;
    let pc_next = cpu.decode.read.pc_next;
    let bubble = cpu.decode.read.v;

    let mut params = isa::decode(inst);
    let imm_ext = isa::unpack_immediate(inst, params.itype);

    if bubble {
        params.reg_write = false;
        params.mem_write = false;
        params.is_jump = false;
        params.is_branch = false;
        params.interrupt = false;
        params.res_src = ResSrc::Alu;
    } else if !params.is_opcode_ok {
        cpu.hazard.raise(Stage::Decode, ExceptionKind::BadOpcode, pc);
    }

    if cpu.writeback.read.reg_write {
        cpu.regs
            .write(cpu.writeback.read.reg_addr, cpu.writeback.read.reg_wdata);
    }

    let rs1a = fields::rs1(inst);
    let rs2a = fields::rs2(inst);
    let rda = fields::rd(inst);

    tracing::trace!(pc, inst, bubble, "ID");

    cpu.execute.write.params = params;
    cpu.execute.write.pc = pc;
    cpu.execute.write.pc_next = pc_next;
    cpu.execute.write.rs1v = cpu.regs.read(rs1a);
    cpu.execute.write.rs2v = cpu.regs.read(rs2a);
    cpu.execute.write.imm_ext = imm_ext;
    cpu.execute.write.rs1a = rs1a;
    cpu.execute.write.rs2a = rs2a;
    cpu.execute.write.rda = rda;
}
