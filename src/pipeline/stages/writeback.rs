//! Writeback: performs no combinational work of its own. The actual
//! register-file write happens in Decode, which commits Writeback's read
//! latch before reading its own operands each cycle.

use crate::cpu::Cpu;

pub fn tick(cpu: &mut Cpu) {
    tracing::trace!(
        reg_write = cpu.writeback.read.reg_write,
        reg_addr = cpu.writeback.read.reg_addr,
        "WB"
    );
}
