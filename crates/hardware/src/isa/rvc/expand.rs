//! Compressed Instruction Expansion.
//!
//! Provides the `expand` function which converts a 16-bit RV32C instruction
//! into its 32-bit base-encoding equivalent. Expansion is independent of the
//! compressed decoder and serves as the reference it is checked against.

use super::constants::{QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use super::imm;
use crate::isa::abi::{REG_RA, REG_SP};
use crate::isa::instruction::CompressedBits;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Expands a 16-bit RVC instruction into its 32-bit equivalent.
///
/// Returns 0, itself an illegal 32-bit word, for reserved encodings and for
/// slots this core does not implement. Hints expand to their base forms.
pub fn expand(inst: u16) -> u32 {
    match inst.quadrant() {
        QUADRANT_0 => expand_quadrant_0(inst),
        QUADRANT_1 => expand_quadrant_1(inst),
        QUADRANT_2 => expand_quadrant_2(inst),
        _ => 0,
    }
}

fn expand_quadrant_0(inst: u16) -> u32 {
    let rs1 = u32::from(inst.rs1_prime());
    let rd = u32::from(inst.rs2_prime());
    match inst.opc() {
        q0::C_ADDI4SPN => match imm::ciw(inst) {
            0 => 0,
            offset => i_type(offset, u32::from(REG_SP), funct3::ADD_SUB, rd, opcodes::OP_IMM),
        },
        q0::C_LW => i_type(imm::cl_word(inst), rs1, funct3::LW, rd, opcodes::OP_LOAD),
        q0::C_SW => s_type(imm::cl_word(inst), rd, rs1, funct3::SW, opcodes::OP_STORE),
        _ => 0,
    }
}

fn expand_quadrant_1(inst: u16) -> u32 {
    let rd = u32::from(inst.rd_full());
    let rd_prime = u32::from(inst.rs1_prime());
    let rs2_prime = u32::from(inst.rs2_prime());
    let sp = u32::from(REG_SP);

    match inst.opc() {
        q1::C_ADDI => i_type(imm::ci(inst), rd, funct3::ADD_SUB, rd, opcodes::OP_IMM),
        q1::C_JAL => j_type(imm::cj(inst), u32::from(REG_RA)),
        q1::C_LI => i_type(imm::ci(inst), 0, funct3::ADD_SUB, rd, opcodes::OP_IMM),
        q1::C_LUI_ADDI16SP if rd == sp => match imm::ci_addi16sp(inst) {
            0 => 0,
            offset => i_type(offset, sp, funct3::ADD_SUB, sp, opcodes::OP_IMM),
        },
        q1::C_LUI_ADDI16SP => match imm::ci_lui(inst) {
            upper if rd != 0 && upper != 0 => u_type(upper, rd, opcodes::OP_LUI),
            _ => 0,
        },
        q1::C_MISC_ALU => {
            let shamt = u32::from(imm::ci_shamt(inst));
            match inst.bits(11, 10) {
                q1::MISC_ANDI => {
                    i_type(imm::ci(inst), rd_prime, funct3::AND, rd_prime, opcodes::OP_IMM)
                }
                _ if inst.bit(12) != 0 => 0,
                q1::MISC_SRLI => shift_imm(funct7::DEFAULT, shamt, rd_prime, funct3::SRL_SRA),
                q1::MISC_SRAI => shift_imm(funct7::SRA, shamt, rd_prime, funct3::SRL_SRA),
                _ => {
                    let (f7, f3) = match inst.bits(6, 5) {
                        q1::REG_SUB => (funct7::SUB, funct3::ADD_SUB),
                        q1::REG_XOR => (funct7::DEFAULT, funct3::XOR),
                        q1::REG_OR => (funct7::DEFAULT, funct3::OR),
                        _ => (funct7::DEFAULT, funct3::AND),
                    };
                    r_type(f7, rs2_prime, rd_prime, f3, rd_prime)
                }
            }
        }
        q1::C_J => j_type(imm::cj(inst), 0),
        q1::C_BEQZ => b_type(imm::cb(inst), 0, rd_prime, funct3::BEQ),
        q1::C_BNEZ => b_type(imm::cb(inst), 0, rd_prime, funct3::BNE),
        _ => 0,
    }
}

fn expand_quadrant_2(inst: u16) -> u32 {
    let rd = u32::from(inst.rd_full());
    let rs2 = u32::from(inst.rs2_full());
    let sp = u32::from(REG_SP);

    match inst.opc() {
        q2::C_SLLI => {
            if inst.bit(12) == 0 {
                shift_imm(funct7::DEFAULT, u32::from(imm::ci_shamt(inst)), rd, funct3::SLL)
            } else {
                0
            }
        }
        q2::C_LWSP => {
            if rd == 0 {
                0
            } else {
                i_type(imm::ci_lwsp(inst), sp, funct3::LW, rd, opcodes::OP_LOAD)
            }
        }
        q2::C_MISC_ALU => match (inst.bit(12) != 0, rd, rs2) {
            (false, 0, 0) => 0,
            (false, _, 0) => i_type(0, rd, funct3::JALR, 0, opcodes::OP_JALR),
            (false, _, _) => r_type(funct7::DEFAULT, rs2, 0, funct3::ADD_SUB, rd),
            (true, 0, 0) => sys_ops::EBREAK,
            (true, _, 0) => i_type(0, rd, funct3::JALR, u32::from(REG_RA), opcodes::OP_JALR),
            (true, _, _) => r_type(funct7::DEFAULT, rs2, rd, funct3::ADD_SUB, rd),
        },
        q2::C_SWSP => s_type(imm::css_swsp(inst), rs2, sp, funct3::SW, opcodes::OP_STORE),
        _ => 0,
    }
}

/// `funct7 | rs2 | rs1 | funct3 | rd | OP`
const fn r_type(f7: u32, rs2: u32, rs1: u32, f3: u32, rd: u32) -> u32 {
    (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcodes::OP_REG
}

/// `imm[11:0] | rs1 | funct3 | rd | opcode`
const fn i_type(imm: i32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    ((imm as u32 & 0xFFF) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

/// Shift immediate in place of `rd`'s source: `rd = rd <op> shamt`.
const fn shift_imm(f7: u32, shamt: u32, rd: u32, f3: u32) -> u32 {
    (f7 << 25) | (shamt << 20) | (rd << 15) | (f3 << 12) | (rd << 7) | opcodes::OP_IMM
}

/// `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const fn s_type(imm: i32, rs2: u32, rs1: u32, f3: u32, opcode: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | ((imm & 0x1F) << 7)
        | opcode
}

/// `imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | BRANCH`
const fn b_type(imm: i32, rs2: u32, rs1: u32, f3: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 12) & 1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 1) << 7)
        | opcodes::OP_BRANCH
}

/// `imm[31:12] | rd | opcode`
const fn u_type(imm: i32, rd: u32, opcode: u32) -> u32 {
    (imm as u32 & 0xFFFF_F000) | (rd << 7) | opcode
}

/// `imm[20|10:1|11|19:12] | rd | JAL`
const fn j_type(imm: i32, rd: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 20) & 1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (rd << 7)
        | opcodes::OP_JAL
}
