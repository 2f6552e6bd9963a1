//! Execute: forwards operands, runs the ALU and branch comparator, and
//! decides whether the PC must be redirected.

use crate::common::{ExceptionKind, Stage};
use crate::cpu::Cpu;
use crate::isa::{AluOp, AluSrc, CmpOp};
use crate::pipeline::hazard::Rs;

pub fn tick(cpu: &mut Cpu) {
    let read = cpu.execute.read;
    let params = read.params;

    let rs1v = forward(cpu, cpu.hazard.get_rs(cpu, read.rs1a), read.rs1v);
    let rs2v = forward(cpu, cpu.hazard.get_rs(cpu, read.rs2a), read.rs2v);

    cpu.memory.write.mem_wdata = rs2v;

    let jump_base = if params.is_jump_reg {
        rs1v & !1
    } else {
        read.pc
    };
    cpu.jump_base = jump_base;

    let op1 = match params.alu_src1 {
        AluSrc::Reg => rs1v,
        AluSrc::Pc => read.pc,
        AluSrc::Imm => read.imm_ext,
    };
    let op2 = match params.alu_src2 {
        AluSrc::Reg => rs2v,
        AluSrc::Imm => read.imm_ext,
        AluSrc::Pc => read.pc,
    };

    let alu_res = alu(params.alu_op, op1, op2);
    let cmp_res = compare(params.cmp_op, rs1v, rs2v);

    cpu.pc_r = params.is_jump || (params.is_branch && cmp_res);

    if params.interrupt {
        cpu.hazard.raise(Stage::Execute, ExceptionKind::Interrupt, read.pc);
    }

    tracing::trace!(pc = read.pc, alu_res, pc_r = cpu.pc_r, "EX");

    cpu.memory.write.params = params;
    cpu.memory.write.reg_addr = read.rda;
    cpu.memory.write.pc = read.pc;
    cpu.memory.write.pc_next = read.pc_next;
    cpu.memory.write.alu_res = alu_res;
}

fn forward(cpu: &Cpu, source: Rs, fallback: u32) -> u32 {
    match source {
        Rs::Reg => fallback,
        Rs::BpMem => cpu.memory.read.alu_res,
        Rs::BpWb => cpu.writeback.read.reg_wdata,
    }
}

fn alu(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a.wrapping_shl(b & 0x1f),
        AluOp::Srl => a.wrapping_shr(b & 0x1f),
        AluOp::Sra => ((a as i32).wrapping_shr(b & 0x1f)) as u32,
        AluOp::Slt => u32::from((a as i32) < (b as i32)),
        AluOp::Sltu => u32::from(a < b),
        AluOp::Xor => a ^ b,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::PassSrc2 => b,
    }
}

fn compare(op: CmpOp, a: u32, b: u32) -> bool {
    match op {
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
        CmpOp::Lt => (a as i32) < (b as i32),
        CmpOp::Ge => (a as i32) >= (b as i32),
        CmpOp::Ltu => a < b,
        CmpOp::Geu => a >= b,
    }
}
