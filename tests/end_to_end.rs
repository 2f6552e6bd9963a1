//! End-to-end pipeline scenarios: each assembles a tiny RV32I program,
//! places it at byte address 1024, runs it to completion (an `ebreak`
//! redirects to the shutdown handler), and checks the architectural state
//! the program should have left behind.

use pretty_assertions::assert_eq;
use rv32i_pipeline::{Config, Cpu};

const MEMORY_WORDS: usize = 4096;
const CODE_BASE: u32 = 1024;

fn image_with_code(code: &[u32]) -> Vec<u8> {
    let mut image = vec![0u8; MEMORY_WORDS * 4];
    let base = CODE_BASE as usize;
    for (i, word) in code.iter().enumerate() {
        image[base + i * 4..base + i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    image
}

fn config() -> Config {
    Config {
        memory_words: MEMORY_WORDS,
        tvec: (MEMORY_WORDS * 4 - 16) as u32,
    }
}

/// Installs a `tracing-subscriber` fmt layer once per test binary, gated by
/// `RUST_LOG` (unset means silent), so `cpu.tick()`'s per-stage `trace!`
/// output is visible with e.g. `RUST_LOG=trace cargo test -- --nocapture`.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[test]
fn ebreak_alone_halts_at_its_own_pc() {
    init_tracing();
    let code = [0x0010_0073]; // ebreak
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.run(CODE_BASE);
    assert_eq!(cpu.hazard.exception_pc, CODE_BASE);
}

#[test]
fn loads_sub_and_store_round_trip_through_memory() {
    init_tracing();
    let code = [
        0x0200_2503, // lw a0, 32(zero)
        0x0240_2583, // lw a1, 36(zero)
        0x40a5_8633, // sub a2, a1, a0
        0x02c0_2423, // sw a2, 40(zero)
        0x0010_0073, // ebreak
    ];
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.mmu.store(32, 0x2132_3424).unwrap();
    cpu.mmu.store(36, 0xdead_babe).unwrap();

    cpu.run(CODE_BASE);

    assert_eq!(cpu.hazard.exception_pc, CODE_BASE + 4 * 4);
    let expected = 0xdead_babe_u32.wrapping_sub(0x2132_3424);
    assert_eq!(cpu.dump_regs()[12], expected);
    assert_eq!(cpu.mmu.load(40).unwrap(), expected);
}

#[test]
fn jal_skips_the_delay_slot_instruction() {
    init_tracing();
    let code = [
        0x0080_056f, // jal a0, +8
        0x07b0_0593, // li a1, 123
        0x1410_0613, // li a2, 321
        0x0010_0073, // ebreak
    ];
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.run(CODE_BASE);

    assert_eq!(cpu.hazard.exception_pc, CODE_BASE + 4 * 3);
    let regs = cpu.dump_regs();
    assert_eq!(regs[10], CODE_BASE + 4);
    assert_eq!(regs[11], 0);
    assert_eq!(regs[12], 321);
}

#[test]
fn call_and_return_restore_the_caller_frame() {
    init_tracing();
    let code = [
        0x4000_0113, // li sp, 1024 (start)
        0x00c0_00ef, // jal ra, main
        0x0010_0073, // ebreak
        0x0000_0013, // nop
        0xff01_0113, // main: addi sp,sp,-16
        0x0081_2623, // sw s0,12(sp)
        0x0101_0413, // addi s0,sp,16
        0x0000_0793, // li a5,0
        0x0007_8513, // mv a0,a5
        0x00c1_2403, // lw s0,12(sp)
        0x0101_0113, // addi sp,sp,16
        0x0000_8067, // jr ra
    ];
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.run(CODE_BASE);

    assert_eq!(cpu.hazard.exception_pc, CODE_BASE + 4 * 2);
    let regs = cpu.dump_regs();
    assert_eq!(regs[1], CODE_BASE + 4 * 2);
    assert_eq!(regs[2], CODE_BASE);
    assert_eq!(regs[10], 0);
}

#[test]
fn loop_with_backward_branch_counts_to_completion() {
    init_tracing();
    let code = [
        0x4000_0113, // li sp, 1024 (start)
        0x00c0_00ef, // jal ra, main
        0x0010_0073, // ebreak
        0x0000_0013, // nop
        0xfe01_0113, // main: addi sp,sp,-32
        0x0081_2e23, // sw s0,28(sp)
        0x0201_0413, // addi s0,sp,32
        0xfe04_2623, // sw zero,-20(s0)
        0xfe04_2423, // sw zero,-24(s0)
        0x01c0_006f, // j .L3
        0xfec4_2783, // .L4: lw a5,-20(s0)
        0x0027_8793, // addi a5,a5,2
        0xfef4_2623, // sw a5,-20(s0)
        0xfe84_2783, // lw a5,-24(s0)
        0x0017_8793, // addi a5,a5,1
        0xfef4_2423, // sw a5,-24(s0)
        0xfe84_2703, // .L3: lw a4,-24(s0)
        0x0020_0793, // li a5,2
        0xfee7_d0e3, // bge a5,a4,.L4
        0xfec4_2783, // lw a5,-20(s0)
        0x0007_8513, // mv a0,a5
        0x01c1_2403, // lw s0,28(sp)
        0x0201_0113, // addi sp,sp,32
        0x0000_8067, // jr ra
    ];
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.run(CODE_BASE);

    assert_eq!(cpu.hazard.exception_pc, CODE_BASE + 4 * 2);
    let regs = cpu.dump_regs();
    assert_eq!(regs[1], CODE_BASE + 4 * 2);
    assert_eq!(regs[2], CODE_BASE);
    assert_eq!(regs[10], 6);
}

/// A recursive factorial, with the multiply each frame performs by a
/// repeated-addition loop since RV32I alone has no `mul`. Follows the same
/// `li sp,1024; jal ra,<fn>; ebreak` call template as
/// `call_and_return_restore_the_caller_frame`, so the literal argument (5)
/// is set inside `fact`'s own entry point rather than by a top-level
/// instruction; recursive self-calls jump past that reset straight to
/// `fact_body`.
#[test]
fn recursive_factorial_of_five() {
    init_tracing();
    let code = [
        0x4000_0113, // addi sp,zero,1024
        0x00c0_00ef, // jal ra,fact
        0x0010_0073, // ebreak
        0x0000_0013, // nop
        0x0050_0513, // fact: addi a0,zero,5
        0xff01_0113, // fact_body: addi sp,sp,-16
        0x0011_2623, // sw ra,12(sp)
        0x0081_2423, // sw s0,8(sp)
        0x0005_0413, // mv s0,a0
        0x0020_0793, // li a5,2
        0x02f4_4863, // blt s0,a5,base
        0xfff4_0513, // addi a0,s0,-1
        0xfe5f_f0ef, // jal ra,fact_body
        0x0005_0593, // mv a1,a0
        0x0000_0613, // li a2,0
        0x0004_0693, // mv a3,s0
        0x0006_8863, // mulloop: beq a3,zero,muldone
        0x00b6_0633, // add a2,a2,a1
        0xfff6_8693, // addi a3,a3,-1
        0xff5f_f06f, // j mulloop
        0x0006_0513, // muldone: mv a0,a2
        0x0080_006f, // j done
        0x0010_0513, // base: li a0,1
        0x00c1_2083, // done: lw ra,12(sp)
        0x0081_2403, // lw s0,8(sp)
        0x0101_0113, // addi sp,sp,16
        0x0000_8067, // jr ra
    ];
    let mut cpu = Cpu::new(&image_with_code(&code), config());
    cpu.run(CODE_BASE);

    assert_eq!(cpu.hazard.exception_pc, CODE_BASE + 4 * 2);
    let regs = cpu.dump_regs();
    assert_eq!(regs[1], CODE_BASE + 4 * 2);
    assert_eq!(regs[2], CODE_BASE);
    assert_eq!(regs[10], 120);
}
