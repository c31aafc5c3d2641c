//! Instruction Disassembler for RV32IMC.
//!
//! Renders a `DecodedInstruction` as assembler text for the command line
//! front-end, logging and test diagnostics. Compressed instructions print as
//! the base instruction they stand for.
//!
//! # Usage
//!
//! ```
//! use rvcore::config::CoreConfig;
//! use rvcore::isa::{decode::decode, disasm::disassemble};
//!
//! let text = disassemble(&decode(0x00A0_0513, &CoreConfig::default()));
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::core::arch::csr::CsrSelect;
use crate::isa::abi::reg_name;
use crate::isa::instruction::{DecodedInstruction, Op, Subop};

/// Disassembles a decoded instruction into a human-readable string.
///
/// Returns `"illegal"` for illegal descriptors.
pub fn disassemble(decoded: &DecodedInstruction) -> String {
    if decoded.illegal {
        return "illegal".to_owned();
    }

    let mn = mnemonic(decoded.subop);
    let rd = reg_name(decoded.rd);
    let rs1 = reg_name(decoded.rs1);
    let rs2 = reg_name(decoded.rs2);
    let imm = decoded.immediate;

    match decoded.op {
        // ── Arithmetic ────────────────────────────────────
        Op::Alu if decoded.immediate_valid => {
            let mn = immediate_mnemonic(decoded.subop);
            format!("{mn} {rd}, {rs1}, {imm}")
        }
        Op::Alu | Op::MulDiv => format!("{mn} {rd}, {rs1}, {rs2}"),

        // ── Control transfer ──────────────────────────────
        Op::Branch => format!("{mn} {rs1}, {rs2}, {imm}"),
        Op::Jal => format!("jal {rd}, {imm}"),
        Op::Jalr => format!("jalr {rd}, {imm}({rs1})"),

        // ── Memory ────────────────────────────────────────
        Op::Mem if is_load(decoded.subop) => {
            format!("{mn} {rd}, {imm}({rs1})")
        }
        Op::Mem => format!("{mn} {rs2}, {imm}({rs1})"),

        // ── Upper immediates ──────────────────────────────
        Op::Lui => format!("lui {rd}, {:#x}", (imm as u32) >> 12),
        Op::Auipc => format!("auipc {rd}, {:#x}", (imm as u32) >> 12),

        // ── System ────────────────────────────────────────
        Op::MiscMem | Op::System => mn.to_owned(),
        Op::Csr => {
            let csr = match decoded.csr_access.select {
                CsrSelect::None => format!("{:#x}", decoded.csr_access.address),
                select => select.name().to_owned(),
            };
            if decoded.immediate_valid {
                format!("{mn}i {rd}, {csr}, {imm}")
            } else {
                format!("{mn} {rd}, {csr}, {rs1}")
            }
        }

        Op::Illegal => "illegal".to_owned(),
    }
}

const fn is_load(subop: Subop) -> bool {
    matches!(
        subop,
        Subop::Lb | Subop::Lh | Subop::Lw | Subop::Lbu | Subop::Lhu
    )
}

/// Register-immediate spelling of an ALU operation.
fn immediate_mnemonic(subop: Subop) -> &'static str {
    match subop {
        Subop::Add => "addi",
        Subop::Slt => "slti",
        Subop::Sltu => "sltiu",
        Subop::Xor => "xori",
        Subop::Or => "ori",
        Subop::And => "andi",
        Subop::Sll => "slli",
        Subop::Srl => "srli",
        Subop::Sra => "srai",
        other => mnemonic(other),
    }
}

/// Assembler mnemonic of a sub-operation.
pub const fn mnemonic(subop: Subop) -> &'static str {
    match subop {
        Subop::None => "",
        Subop::Add => "add",
        Subop::Sub => "sub",
        Subop::Slt => "slt",
        Subop::Sltu => "sltu",
        Subop::Xor => "xor",
        Subop::Or => "or",
        Subop::And => "and",
        Subop::Sll => "sll",
        Subop::Srl => "srl",
        Subop::Sra => "sra",
        Subop::Beq => "beq",
        Subop::Bne => "bne",
        Subop::Blt => "blt",
        Subop::Bge => "bge",
        Subop::Bltu => "bltu",
        Subop::Bgeu => "bgeu",
        Subop::Lb => "lb",
        Subop::Lh => "lh",
        Subop::Lw => "lw",
        Subop::Lbu => "lbu",
        Subop::Lhu => "lhu",
        Subop::Sb => "sb",
        Subop::Sh => "sh",
        Subop::Sw => "sw",
        Subop::Ecall => "ecall",
        Subop::Ebreak => "ebreak",
        Subop::Mret => "mret",
        Subop::Wfi => "wfi",
        Subop::Fence => "fence",
        Subop::FenceI => "fence.i",
        Subop::Csrrw => "csrrw",
        Subop::Csrrs => "csrrs",
        Subop::Csrrc => "csrrc",
        Subop::Mul => "mul",
        Subop::Mulh => "mulh",
        Subop::Mulhsu => "mulhsu",
        Subop::Mulhu => "mulhu",
        Subop::Div => "div",
        Subop::Divu => "divu",
        Subop::Rem => "rem",
        Subop::Remu => "remu",
    }
}
