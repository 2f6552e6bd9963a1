//! Instruction decode: control-parameter construction and the
//! opcode/funct3/funct7 dispatch that picks a set for each instruction.

use super::fields::{self, InstructionType};

/// Where the ALU's first or second operand comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluSrc {
    Reg,
    Imm,
    Pc,
}

/// The ALU operation an instruction selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    /// Passes the second operand through unchanged (used by LUI).
    PassSrc2,
}

/// The branch comparison an instruction selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Ge,
    Ltu,
    Geu,
}

/// The width of a load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    Word,
    Half,
    Byte,
}

/// Where the value written back to the register file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResSrc {
    Alu,
    Mem,
    Pc,
}

/// The full set of control parameters a decoded instruction carries through
/// the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlParams {
    pub itype: InstructionType,
    pub reg_write: bool,
    pub alu_src1: AluSrc,
    pub alu_src2: AluSrc,
    pub alu_op: AluOp,
    pub cmp_op: CmpOp,
    pub is_jump: bool,
    pub is_jump_reg: bool,
    pub is_branch: bool,
    pub mem_op: MemOp,
    pub mem_write: bool,
    pub mem_sign_ext: bool,
    pub res_src: ResSrc,
    pub is_opcode_ok: bool,
    pub interrupt: bool,
}

impl Default for ControlParams {
    /// Mirrors the all-ALU, non-effectful default of a freshly-constructed
    /// control record (reg_write/mem_write/branch/jump/interrupt all false,
    /// res_src ALU) — the shape a bubble's control params must take.
    fn default() -> Self {
        Self::base(InstructionType::R)
    }
}

impl ControlParams {
    const fn base(itype: InstructionType) -> Self {
        Self {
            itype,
            reg_write: false,
            alu_src1: AluSrc::Reg,
            alu_src2: AluSrc::Reg,
            alu_op: AluOp::PassSrc2,
            cmp_op: CmpOp::Eq,
            is_jump: false,
            is_jump_reg: false,
            is_branch: false,
            mem_op: MemOp::Word,
            mem_write: false,
            mem_sign_ext: false,
            res_src: ResSrc::Alu,
            is_opcode_ok: true,
            interrupt: false,
        }
    }

    const fn alu_inst(itype: InstructionType, op: AluOp, src1: AluSrc, src2: AluSrc) -> Self {
        let mut p = Self::base(itype);
        p.reg_write = true;
        p.alu_op = op;
        p.alu_src1 = src1;
        p.alu_src2 = src2;
        p
    }

    const fn jump(itype: InstructionType, is_jump_reg: bool) -> Self {
        let mut p = Self::base(itype);
        p.reg_write = true;
        p.is_jump = true;
        p.is_jump_reg = is_jump_reg;
        p.res_src = ResSrc::Pc;
        p
    }

    const fn branch(cmp_op: CmpOp) -> Self {
        let mut p = Self::base(InstructionType::B);
        p.is_branch = true;
        p.cmp_op = cmp_op;
        p.alu_src2 = AluSrc::Imm;
        p.alu_op = AluOp::Add;
        p.alu_src1 = AluSrc::Pc;
        p
    }

    const fn load(mem_op: MemOp, sign_ext: bool) -> Self {
        let mut p = Self::base(InstructionType::I);
        p.reg_write = true;
        p.alu_src2 = AluSrc::Imm;
        p.alu_op = AluOp::Add;
        p.mem_op = mem_op;
        p.mem_sign_ext = sign_ext;
        p.res_src = ResSrc::Mem;
        p
    }

    const fn store(mem_op: MemOp) -> Self {
        let mut p = Self::base(InstructionType::S);
        p.alu_src2 = AluSrc::Imm;
        p.alu_op = AluOp::Add;
        p.mem_op = mem_op;
        p.mem_write = true;
        p
    }

    const fn system(interrupt: bool) -> Self {
        let mut p = Self::base(InstructionType::I);
        p.interrupt = interrupt;
        p
    }

    const fn unknown() -> Self {
        let mut p = Self::base(InstructionType::Unknown);
        p.is_opcode_ok = false;
        p
    }
}

mod opcodes {
    pub const LOAD: u32 = 0b000_0011;
    pub const MISC_MEM: u32 = 0b000_1111;
    pub const OP_IMM: u32 = 0b001_0011;
    pub const AUIPC: u32 = 0b001_0111;
    pub const STORE: u32 = 0b010_0011;
    pub const OP: u32 = 0b011_0011;
    pub const LUI: u32 = 0b011_0111;
    pub const BRANCH: u32 = 0b110_0011;
    pub const JALR: u32 = 0b110_0111;
    pub const JAL: u32 = 0b110_1111;
    pub const SYSTEM: u32 = 0b111_0011;
}

mod funct3 {
    pub const BEQ: u32 = 0b000;
    pub const BNE: u32 = 0b001;
    pub const BLT: u32 = 0b100;
    pub const BGE: u32 = 0b101;
    pub const BLTU: u32 = 0b110;
    pub const BGEU: u32 = 0b111;

    pub const LB: u32 = 0b000;
    pub const LH: u32 = 0b001;
    pub const LW: u32 = 0b010;
    pub const LBU: u32 = 0b100;
    pub const LHU: u32 = 0b101;

    pub const SB: u32 = 0b000;
    pub const SH: u32 = 0b001;
    pub const SW: u32 = 0b010;

    pub const ADD_SUB: u32 = 0b000;
    pub const SLL: u32 = 0b001;
    pub const SLT: u32 = 0b010;
    pub const SLTU: u32 = 0b011;
    pub const XOR: u32 = 0b100;
    pub const SRL_SRA: u32 = 0b101;
    pub const OR: u32 = 0b110;
    pub const AND: u32 = 0b111;
}

const FUNCT7_ALT: u32 = 0b0100000;

/// Decodes `inst` to its [`ControlParams`]. Unrecognized encodings return
/// `ControlParams::unknown()` (`is_opcode_ok == false`).
#[must_use]
pub fn decode(inst: u32) -> ControlParams {
    let op = fields::opcode(inst);
    let f3 = fields::funct3(inst);
    let f7 = fields::funct7(inst);

    match op {
        opcodes::LUI => ControlParams::alu_inst(
            InstructionType::U,
            AluOp::PassSrc2,
            AluSrc::Reg,
            AluSrc::Imm,
        ),
        opcodes::AUIPC => {
            ControlParams::alu_inst(InstructionType::U, AluOp::Add, AluSrc::Pc, AluSrc::Imm)
        }
        opcodes::JAL => ControlParams::jump(InstructionType::J, false),
        opcodes::JALR => ControlParams::jump(InstructionType::I, true),
        opcodes::BRANCH => match f3 {
            funct3::BEQ => ControlParams::branch(CmpOp::Eq),
            funct3::BNE => ControlParams::branch(CmpOp::Ne),
            funct3::BLT => ControlParams::branch(CmpOp::Lt),
            funct3::BGE => ControlParams::branch(CmpOp::Ge),
            funct3::BLTU => ControlParams::branch(CmpOp::Ltu),
            funct3::BGEU => ControlParams::branch(CmpOp::Geu),
            _ => ControlParams::unknown(),
        },
        opcodes::LOAD => match f3 {
            funct3::LB => ControlParams::load(MemOp::Byte, true),
            funct3::LH => ControlParams::load(MemOp::Half, true),
            funct3::LW => ControlParams::load(MemOp::Word, true),
            funct3::LBU => ControlParams::load(MemOp::Byte, false),
            funct3::LHU => ControlParams::load(MemOp::Half, false),
            _ => ControlParams::unknown(),
        },
        opcodes::STORE => match f3 {
            funct3::SB => ControlParams::store(MemOp::Byte),
            funct3::SH => ControlParams::store(MemOp::Half),
            funct3::SW => ControlParams::store(MemOp::Word),
            _ => ControlParams::unknown(),
        },
        opcodes::OP_IMM => match f3 {
            funct3::ADD_SUB => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Add, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::SLT => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Slt, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::SLTU => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Sltu, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::XOR => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Xor, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::OR => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Or, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::AND => {
                ControlParams::alu_inst(InstructionType::I, AluOp::And, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::SLL if f7 == 0 => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Sll, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::SRL_SRA if f7 == 0 => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Srl, AluSrc::Reg, AluSrc::Imm)
            }
            funct3::SRL_SRA if f7 == FUNCT7_ALT => {
                ControlParams::alu_inst(InstructionType::I, AluOp::Sra, AluSrc::Reg, AluSrc::Imm)
            }
            _ => ControlParams::unknown(),
        },
        opcodes::OP => match (f3, f7) {
            (funct3::ADD_SUB, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Add, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::ADD_SUB, FUNCT7_ALT) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Sub, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::SLL, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Sll, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::SLT, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Slt, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::SLTU, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Sltu, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::XOR, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Xor, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::SRL_SRA, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Srl, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::SRL_SRA, FUNCT7_ALT) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Sra, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::OR, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::Or, AluSrc::Reg, AluSrc::Reg)
            }
            (funct3::AND, 0) => {
                ControlParams::alu_inst(InstructionType::R, AluOp::And, AluSrc::Reg, AluSrc::Reg)
            }
            _ => ControlParams::unknown(),
        },
        opcodes::MISC_MEM => ControlParams::base(InstructionType::I),
        opcodes::SYSTEM => match fields::imm_11_0(inst) {
            0 => ControlParams::system(true),
            1 => ControlParams::system(true),
            _ => ControlParams::unknown(),
        },
        _ => ControlParams::unknown(),
    }
}
