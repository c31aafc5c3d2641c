//! RISC-V Instruction Decoder.
//!
//! This module turns fetched instruction words into `DecodedInstruction`s. It provides:
//! 1. **Dispatch:** `decode` selects the base or compressed decoder from the two low bits.
//! 2. **Base decoding:** `decode_base` for the 32-bit RV32I/RV32M encodings.
//! 3. **Immediates:** Reconstruction of the I, S, B, U and J immediates.
//! 4. **Finalization:** Narrow register file checks and x0 flag clearing shared by both decoders.

use tracing::trace;

use crate::config::CoreConfig;
use crate::core::arch::csr::{CsrAccessKind, decode_csr};
use crate::core::arch::mode::PrivilegeMode;
use crate::isa::instruction::{DecodedInstruction, InstructionBits, Op, Subop};
use crate::isa::privileged::opcodes as sys;
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{self, funct3 as m_funct3};
use crate::isa::rvc::decode::decode_compressed;

/// Low two bits of every 32-bit encoding.
pub const BASE_ENCODING_MARK: u32 = 0b11;

/// First register index outside the narrow (E) register file.
const E32_REGISTER_LIMIT: u8 = 16;

/// Extracts bits `hi:lo` of `word`, right aligned.
#[inline(always)]
pub const fn field(word: u32, hi: u32, lo: u32) -> u32 {
    (word >> lo) & (u32::MAX >> (31 - (hi - lo)))
}

/// Sign extends the low `bits` bits of `val`.
#[inline(always)]
pub const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((val << shift) as i32) >> shift
}

/// I-type immediate: `sext(31:20)`.
///
/// Used by loads, JALR and register-immediate arithmetic.
pub const fn i_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// S-type immediate: `sext({31:25, 11:7})`.
pub const fn s_imm(word: u32) -> i32 {
    let combined = (field(word, 31, 25) << 5) | field(word, 11, 7);
    sign_extend(combined, 12)
}

/// B-type immediate: `sext({31, 7, 30:25, 11:8, 0})`.
pub const fn b_imm(word: u32) -> i32 {
    let combined = (field(word, 31, 31) << 12)
        | (field(word, 7, 7) << 11)
        | (field(word, 30, 25) << 5)
        | (field(word, 11, 8) << 1);
    sign_extend(combined, 13)
}

/// U-type immediate: `{31:12, 12'b0}`.
pub const fn u_imm(word: u32) -> i32 {
    (word & 0xFFFF_F000) as i32
}

/// J-type immediate: `sext({31, 19:12, 20, 30:21, 0})`.
pub const fn j_imm(word: u32) -> i32 {
    let combined = (field(word, 31, 31) << 20)
        | (field(word, 19, 12) << 12)
        | (field(word, 20, 20) << 11)
        | (field(word, 30, 21) << 1);
    sign_extend(combined, 21)
}

/// Decodes a fetched word, choosing the encoding width from its low two bits.
///
/// With low bits `11` the whole word is a 32-bit instruction; otherwise only
/// the low halfword is used as a compressed instruction.
pub fn decode(word: u32, config: &CoreConfig) -> DecodedInstruction {
    if word & BASE_ENCODING_MARK == BASE_ENCODING_MARK {
        decode_base(word, config)
    } else {
        decode_compressed(word as u16, config)
    }
}

/// Decodes a 32-bit RV32I (plus M when configured) instruction.
///
/// Any opcode/funct3/funct7 combination outside the implemented set yields an
/// illegal descriptor.
pub fn decode_base(word: u32, config: &CoreConfig) -> DecodedInstruction {
    let rd = word.rd();
    let rs1 = word.rs1();
    let rs2 = word.rs2();

    let candidate = match word.opcode() {
        opcodes::OP_LUI => Some(DecodedInstruction::upper(Op::Lui, rd, u_imm(word))),
        opcodes::OP_AUIPC => Some(DecodedInstruction::upper(Op::Auipc, rd, u_imm(word))),
        opcodes::OP_JAL => Some(DecodedInstruction::jal(rd, j_imm(word))),
        opcodes::OP_JALR => (word.funct3() == funct3::JALR)
            .then(|| DecodedInstruction::jalr(rd, rs1, i_imm(word))),
        opcodes::OP_BRANCH => branch_subop(word.funct3())
            .map(|subop| DecodedInstruction::branch(subop, rs1, rs2, b_imm(word))),
        opcodes::OP_LOAD => load_subop(word.funct3())
            .map(|subop| DecodedInstruction::load(subop, rd, rs1, i_imm(word))),
        opcodes::OP_STORE => store_subop(word.funct3())
            .map(|subop| DecodedInstruction::store(subop, rs1, rs2, s_imm(word))),
        opcodes::OP_IMM => decode_op_imm(word),
        opcodes::OP_REG => decode_op_reg(word, config),
        opcodes::OP_MISC_MEM => decode_misc_mem(word),
        sys::OP_SYSTEM => decode_system(word, config),
        _ => None,
    };

    finalize(candidate, word, false, config)
}

const fn branch_subop(f3: u32) -> Option<Subop> {
    match f3 {
        funct3::BEQ => Some(Subop::Beq),
        funct3::BNE => Some(Subop::Bne),
        funct3::BLT => Some(Subop::Blt),
        funct3::BGE => Some(Subop::Bge),
        funct3::BLTU => Some(Subop::Bltu),
        funct3::BGEU => Some(Subop::Bgeu),
        _ => None,
    }
}

const fn load_subop(f3: u32) -> Option<Subop> {
    match f3 {
        funct3::LB => Some(Subop::Lb),
        funct3::LH => Some(Subop::Lh),
        funct3::LW => Some(Subop::Lw),
        funct3::LBU => Some(Subop::Lbu),
        funct3::LHU => Some(Subop::Lhu),
        _ => None,
    }
}

const fn store_subop(f3: u32) -> Option<Subop> {
    match f3 {
        funct3::SB => Some(Subop::Sb),
        funct3::SH => Some(Subop::Sh),
        funct3::SW => Some(Subop::Sw),
        _ => None,
    }
}

/// Register-immediate arithmetic. Shift immediates carry the shift amount in
/// place of the I-type immediate; funct7 must be exactly 0, or 0100000 for
/// SRAI, which also forces shamt bit 5 to zero.
fn decode_op_imm(word: u32) -> Option<DecodedInstruction> {
    let (rd, rs1) = (word.rd(), word.rs1());
    let imm = i_imm(word);
    let shamt = i32::from(word.rs2());

    let (subop, immediate) = match (word.funct3(), word.funct7()) {
        (funct3::ADD_SUB, _) => (Subop::Add, imm),
        (funct3::SLT, _) => (Subop::Slt, imm),
        (funct3::SLTU, _) => (Subop::Sltu, imm),
        (funct3::XOR, _) => (Subop::Xor, imm),
        (funct3::OR, _) => (Subop::Or, imm),
        (funct3::AND, _) => (Subop::And, imm),
        (funct3::SLL, funct7::DEFAULT) => (Subop::Sll, shamt),
        (funct3::SRL_SRA, funct7::DEFAULT) => (Subop::Srl, shamt),
        (funct3::SRL_SRA, funct7::SRA) => (Subop::Sra, shamt),
        _ => return None,
    };
    Some(DecodedInstruction::reg_imm(subop, rd, rs1, immediate))
}

fn decode_op_reg(word: u32, config: &CoreConfig) -> Option<DecodedInstruction> {
    let (op, subop) = match (word.funct7(), word.funct3()) {
        (funct7::DEFAULT, funct3::ADD_SUB) => (Op::Alu, Subop::Add),
        (funct7::DEFAULT, funct3::SLL) => (Op::Alu, Subop::Sll),
        (funct7::DEFAULT, funct3::SLT) => (Op::Alu, Subop::Slt),
        (funct7::DEFAULT, funct3::SLTU) => (Op::Alu, Subop::Sltu),
        (funct7::DEFAULT, funct3::XOR) => (Op::Alu, Subop::Xor),
        (funct7::DEFAULT, funct3::SRL_SRA) => (Op::Alu, Subop::Srl),
        (funct7::DEFAULT, funct3::OR) => (Op::Alu, Subop::Or),
        (funct7::DEFAULT, funct3::AND) => (Op::Alu, Subop::And),
        (funct7::SUB, funct3::ADD_SUB) => (Op::Alu, Subop::Sub),
        (funct7::SRA, funct3::SRL_SRA) => (Op::Alu, Subop::Sra),
        (rv32m::FUNCT7, f3) if config.mul_div => (Op::MulDiv, mul_div_subop(f3)),
        _ => return None,
    };
    Some(DecodedInstruction::reg_reg(
        op,
        subop,
        word.rd(),
        word.rs1(),
        word.rs2(),
    ))
}

const fn mul_div_subop(f3: u32) -> Subop {
    match f3 {
        m_funct3::MUL => Subop::Mul,
        m_funct3::MULH => Subop::Mulh,
        m_funct3::MULHSU => Subop::Mulhsu,
        m_funct3::MULHU => Subop::Mulhu,
        m_funct3::DIV => Subop::Div,
        m_funct3::DIVU => Subop::Divu,
        m_funct3::REM => Subop::Rem,
        _ => Subop::Remu,
    }
}

/// FENCE ignores its predecessor/successor sets; both forms take no operands.
fn decode_misc_mem(word: u32) -> Option<DecodedInstruction> {
    let subop = match word.funct3() {
        funct3::FENCE => Subop::Fence,
        funct3::FENCE_I => Subop::FenceI,
        _ => return None,
    };
    Some(DecodedInstruction {
        op: Op::MiscMem,
        subop,
        ..DecodedInstruction::default()
    })
}

fn decode_system(word: u32, config: &CoreConfig) -> Option<DecodedInstruction> {
    match word.funct3() {
        sys::PRIV => match word {
            sys::ECALL => Some(DecodedInstruction::system(Subop::Ecall, PrivilegeMode::User)),
            sys::EBREAK => Some(DecodedInstruction::system(Subop::Ebreak, PrivilegeMode::User)),
            sys::MRET => Some(DecodedInstruction::system(Subop::Mret, PrivilegeMode::Machine)),
            sys::WFI => Some(DecodedInstruction::system(Subop::Wfi, PrivilegeMode::Machine)),
            _ => None,
        },
        f3 @ (sys::CSRRW | sys::CSRRS | sys::CSRRC) => {
            Some(decode_csr_instruction(word, f3, false, config))
        }
        f3 @ (sys::CSRRWI | sys::CSRRSI | sys::CSRRCI) => {
            Some(decode_csr_instruction(word, f3 & 0b011, true, config))
        }
        _ => None,
    }
}

/// Builds a CSR instruction. `kind` is the register-form funct3 (1, 2 or 3).
///
/// The embedded `CsrAccess` is evaluated for the most privileged mode, so it
/// flags only accesses that are illegal in every mode; the exec stage re-runs
/// `decode_csr` with the mode it executes in.
fn decode_csr_instruction(
    word: u32,
    kind: u32,
    immediate_form: bool,
    config: &CoreConfig,
) -> DecodedInstruction {
    let rd = word.rd();
    let source = word.rs1();

    let (subop, access) = match kind {
        sys::CSRRW if rd == 0 => (Subop::Csrrw, CsrAccessKind::Write),
        sys::CSRRW => (Subop::Csrrw, CsrAccessKind::ReadWrite),
        sys::CSRRS if source == 0 => (Subop::Csrrs, CsrAccessKind::Read),
        sys::CSRRS => (Subop::Csrrs, CsrAccessKind::ReadSet),
        _ if source == 0 => (Subop::Csrrc, CsrAccessKind::Read),
        _ => (Subop::Csrrc, CsrAccessKind::ReadClear),
    };

    let mut decoded = DecodedInstruction {
        op: Op::Csr,
        subop,
        rd,
        rd_written: true,
        csr_access: decode_csr(word.csr(), access, PrivilegeMode::Debug, config),
        ..DecodedInstruction::default()
    };
    if immediate_form {
        decoded.immediate = i32::from(source);
        decoded.immediate_valid = true;
    } else {
        decoded.rs1 = source;
        decoded.rs1_valid = true;
    }
    decoded
}

/// Applies the rules shared by both decoders to a candidate decode.
///
/// `None` becomes the illegal descriptor. On a narrow register file any used
/// register at or above x16 is illegal. Unused register fields are reported
/// as 0, and x0 operands clear their read/write flags.
pub(crate) fn finalize(
    candidate: Option<DecodedInstruction>,
    raw: u32,
    is_compressed: bool,
    config: &CoreConfig,
) -> DecodedInstruction {
    let Some(mut decoded) = candidate else {
        trace!(raw = format_args!("{raw:#010x}"), is_compressed, "reserved encoding");
        return DecodedInstruction::illegal(is_compressed);
    };

    if config.e32 && uses_upper_registers(&decoded) {
        trace!(raw = format_args!("{raw:#010x}"), is_compressed, "register outside e32 file");
        return DecodedInstruction::illegal(is_compressed);
    }

    if !decoded.rs1_valid {
        decoded.rs1 = 0;
    }
    if !decoded.rs2_valid {
        decoded.rs2 = 0;
    }
    if !decoded.rd_written {
        decoded.rd = 0;
    }

    decoded.rs1_valid &= decoded.rs1 != 0;
    decoded.rs2_valid &= decoded.rs2 != 0;
    decoded.rd_written &= decoded.rd != 0;
    decoded.is_compressed = is_compressed;
    decoded
}

const fn uses_upper_registers(decoded: &DecodedInstruction) -> bool {
    (decoded.rs1_valid && decoded.rs1 >= E32_REGISTER_LIMIT)
        || (decoded.rs2_valid && decoded.rs2 >= E32_REGISTER_LIMIT)
        || (decoded.rd_written && decoded.rd >= E32_REGISTER_LIMIT)
}
