//! Compressed Instruction Decoder.
//!
//! Decodes 16-bit RV32C encodings directly into the same `DecodedInstruction`
//! the base decoder produces, without going through a 32-bit expansion.

use tracing::trace;

use super::constants::{QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use super::imm;
use crate::config::CoreConfig;
use crate::core::arch::mode::PrivilegeMode;
use crate::isa::abi::{REG_RA, REG_SP};
use crate::isa::decode::finalize;
use crate::isa::instruction::{CompressedBits, DecodedInstruction, Op, Subop};

/// Decodes a 16-bit compressed instruction.
///
/// Reserved encodings, floating-point and RV64-only slots decode illegal, as
/// does every word when the compressed extension is disabled. The result is
/// always flagged `is_compressed`.
pub fn decode_compressed(inst: u16, config: &CoreConfig) -> DecodedInstruction {
    if !config.compressed_enabled() {
        trace!(raw = format_args!("{inst:#06x}"), "compressed extension disabled");
        return DecodedInstruction::illegal(true);
    }

    let candidate = match inst.quadrant() {
        QUADRANT_0 => decode_quadrant_0(inst),
        QUADRANT_1 => decode_quadrant_1(inst),
        QUADRANT_2 => decode_quadrant_2(inst),
        _ => None,
    };

    finalize(candidate, u32::from(inst), true, config)
}

fn decode_quadrant_0(inst: u16) -> Option<DecodedInstruction> {
    match inst.opc() {
        q0::C_ADDI4SPN => {
            // Zero immediate covers the all-zero word.
            let offset = imm::ciw(inst);
            (offset != 0).then(|| {
                DecodedInstruction::reg_imm(Subop::Add, inst.rs2_prime(), REG_SP, offset)
            })
        }
        q0::C_LW => Some(DecodedInstruction::load(
            Subop::Lw,
            inst.rs2_prime(),
            inst.rs1_prime(),
            imm::cl_word(inst),
        )),
        q0::C_SW => Some(DecodedInstruction::store(
            Subop::Sw,
            inst.rs1_prime(),
            inst.rs2_prime(),
            imm::cl_word(inst),
        )),
        // C.FLD, C.FLW, C.FSD, C.FSW and the reserved slot.
        _ => None,
    }
}

fn decode_quadrant_1(inst: u16) -> Option<DecodedInstruction> {
    let rd = inst.rd_full();
    match inst.opc() {
        // rd = x0 is C.NOP / a hint, both legal.
        q1::C_ADDI => Some(DecodedInstruction::reg_imm(Subop::Add, rd, rd, imm::ci(inst))),
        q1::C_JAL => Some(DecodedInstruction::jal(REG_RA, imm::cj(inst))),
        q1::C_LI => Some(DecodedInstruction::reg_imm(Subop::Add, rd, 0, imm::ci(inst))),
        q1::C_LUI_ADDI16SP if rd == REG_SP => {
            let offset = imm::ci_addi16sp(inst);
            (offset != 0).then(|| DecodedInstruction::reg_imm(Subop::Add, REG_SP, REG_SP, offset))
        }
        q1::C_LUI_ADDI16SP => {
            let upper = imm::ci_lui(inst);
            (rd != 0 && upper != 0).then(|| DecodedInstruction::upper(Op::Lui, rd, upper))
        }
        q1::C_MISC_ALU => decode_quadrant_1_misc(inst),
        q1::C_J => Some(DecodedInstruction::jal(0, imm::cj(inst))),
        q1::C_BEQZ => Some(DecodedInstruction::branch(
            Subop::Beq,
            inst.rs1_prime(),
            0,
            imm::cb(inst),
        )),
        q1::C_BNEZ => Some(DecodedInstruction::branch(
            Subop::Bne,
            inst.rs1_prime(),
            0,
            imm::cb(inst),
        )),
        _ => None,
    }
}

/// SRLI / SRAI / ANDI and the register-register group, all on prime registers.
fn decode_quadrant_1_misc(inst: u16) -> Option<DecodedInstruction> {
    let rd = inst.rs1_prime();
    match inst.bits(11, 10) {
        q1::MISC_ANDI => Some(DecodedInstruction::reg_imm(Subop::And, rd, rd, imm::ci(inst))),
        // Bit 12 set: a shift amount of 32 or more, or an RV64 word form.
        _ if inst.bit(12) != 0 => None,
        q1::MISC_SRLI => Some(shift(Subop::Srl, rd, inst)),
        q1::MISC_SRAI => Some(shift(Subop::Sra, rd, inst)),
        _ => {
            let subop = match inst.bits(6, 5) {
                q1::REG_SUB => Subop::Sub,
                q1::REG_XOR => Subop::Xor,
                q1::REG_OR => Subop::Or,
                _ => Subop::And,
            };
            Some(DecodedInstruction::reg_reg(Op::Alu, subop, rd, rd, inst.rs2_prime()))
        }
    }
}

fn decode_quadrant_2(inst: u16) -> Option<DecodedInstruction> {
    let rd = inst.rd_full();
    let rs2 = inst.rs2_full();
    match inst.opc() {
        q2::C_SLLI => (inst.bit(12) == 0).then(|| shift(Subop::Sll, rd, inst)),
        q2::C_LWSP => {
            (rd != 0).then(|| DecodedInstruction::load(Subop::Lw, rd, REG_SP, imm::ci_lwsp(inst)))
        }
        q2::C_MISC_ALU => decode_quadrant_2_misc(inst, rd, rs2),
        q2::C_SWSP => Some(DecodedInstruction::store(
            Subop::Sw,
            REG_SP,
            rs2,
            imm::css_swsp(inst),
        )),
        // C.FLDSP, C.FLWSP, C.FSDSP, C.FSWSP.
        _ => None,
    }
}

/// JR / MV / EBREAK / JALR / ADD, selected by bit 12, `rs2 == 0` and `rs1 == 0`.
fn decode_quadrant_2_misc(inst: u16, rs1: u8, rs2: u8) -> Option<DecodedInstruction> {
    match (inst.bit(12) != 0, rs1, rs2) {
        (false, 0, 0) => None,
        (false, _, 0) => Some(DecodedInstruction::jalr(0, rs1, 0)),
        (false, _, _) => Some(DecodedInstruction::reg_reg(Op::Alu, Subop::Add, rs1, 0, rs2)),
        (true, 0, 0) => Some(DecodedInstruction::system(Subop::Ebreak, PrivilegeMode::User)),
        (true, _, 0) => Some(DecodedInstruction::jalr(REG_RA, rs1, 0)),
        (true, _, _) => Some(DecodedInstruction::reg_reg(Op::Alu, Subop::Add, rs1, rs1, rs2)),
    }
}

fn shift(subop: Subop, rd: u8, inst: u16) -> DecodedInstruction {
    DecodedInstruction::reg_imm(subop, rd, rd, i32::from(imm::ci_shamt(inst)))
}
