//! Memory: performs the actual load or store the ALU's address computed,
//! and picks what Writeback will commit to the register file.

use crate::common::{ExceptionKind, Stage};
use crate::cpu::Cpu;
use crate::isa::{MemOp, ResSrc};

pub fn tick(cpu: &mut Cpu) {
    let read = cpu.memory.read;
    let params = read.params;
    let addr = read.alu_res;

    let mut reg_wdata = addr;

    if params.mem_write {
        if let Err(kind) = cpu.mmu.store(addr, read.mem_wdata) {
            cpu.hazard.raise(Stage::Memory, kind, read.pc);
        } else if addr == 0 {
            cpu.shutdown = true;
        }
    }

    if params.res_src == ResSrc::Mem {
        match load_value(cpu, addr, params.mem_op, params.mem_sign_ext) {
            Ok(v) => reg_wdata = v,
            Err(kind) => cpu.hazard.raise(Stage::Memory, kind, read.pc),
        }
    } else if params.res_src == ResSrc::Pc {
        reg_wdata = read.pc_next;
    }

    tracing::trace!(pc = read.pc, addr, reg_wdata, "MEM");

    cpu.writeback.write.reg_write = params.reg_write;
    cpu.writeback.write.reg_addr = read.reg_addr;
    cpu.writeback.write.reg_wdata = reg_wdata;
}

fn load_value(cpu: &mut Cpu, addr: u32, op: MemOp, sign_ext: bool) -> Result<u32, ExceptionKind> {
    let align = match op {
        MemOp::Word => 4,
        MemOp::Half => 2,
        MemOp::Byte => 1,
    };
    let sh = addr % 4;
    if sh % align != 0 {
        return Err(ExceptionKind::UnalignedAddr { addr });
    }

    let word = cpu.mmu.load(addr & !3)?;
    let shifted = word >> (sh * 8);

    Ok(match (op, sign_ext) {
        (MemOp::Word, _) => shifted,
        (MemOp::Half, true) => (shifted as i16) as i32 as u32,
        (MemOp::Half, false) => shifted & 0xffff,
        (MemOp::Byte, true) => (shifted as i8) as i32 as u32,
        (MemOp::Byte, false) => shifted & 0xff,
    })
}
