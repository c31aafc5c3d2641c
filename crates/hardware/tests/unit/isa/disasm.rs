//! Instruction Disassembler Unit Tests.
//!
//! Verifies the assembler text produced for each instruction class, with
//! ABI register names. Compressed encodings print as the base instruction
//! they decode to.

use rstest::rstest;

use crate::common::{b_type, csr_type, i_type, r_type, rv32imc, s_type, u_type};
use rvcore::core::arch::csr;
use rvcore::isa::decode::decode;
use rvcore::isa::disasm::disassemble;
use rvcore::isa::privileged::opcodes as sys;
use rvcore::isa::rv32i::{funct3, opcodes};

fn text(word: u32) -> String {
    disassemble(&decode(word, &rv32imc()))
}

// ══════════════════════════════════════════════════════════
// 1. Base integer
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::add(0x00C5_8533, "add a0, a1, a2")]
#[case::sub(0x40C5_8533, "sub a0, a1, a2")]
#[case::addi(0x00A0_0513, "addi a0, zero, 10")]
#[case::addi_negative(0xFFF0_0513, "addi a0, zero, -1")]
#[case::slli(0x0035_1513, "slli a0, a0, 3")]
#[case::mul(r_type(opcodes::OP_REG, 10, 0, 11, 12, 1), "mul a0, a1, a2")]
#[case::lui(u_type(opcodes::OP_LUI, 10, 0x1234_5000), "lui a0, 0x12345")]
#[case::auipc(u_type(opcodes::OP_AUIPC, 5, 0x1000), "auipc t0, 0x1")]
fn arithmetic(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(text(word), expected);
}

#[rstest]
#[case::lw(i_type(opcodes::OP_LOAD, 10, funct3::LW, 2, -8), "lw a0, -8(sp)")]
#[case::lbu(i_type(opcodes::OP_LOAD, 5, funct3::LBU, 10, 3), "lbu t0, 3(a0)")]
#[case::sw(s_type(opcodes::OP_STORE, funct3::SW, 2, 11, 12), "sw a1, 12(sp)")]
#[case::beq(b_type(opcodes::OP_BRANCH, funct3::BEQ, 5, 6, -4), "beq t0, t1, -4")]
#[case::jalr(i_type(opcodes::OP_JALR, 1, 0, 5, 16), "jalr ra, 16(t0)")]
fn memory_and_control(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(text(word), expected);
}

// ══════════════════════════════════════════════════════════
// 2. Privileged and CSR
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(sys::ECALL, "ecall")]
#[case(sys::EBREAK, "ebreak")]
#[case(sys::MRET, "mret")]
#[case(sys::WFI, "wfi")]
#[case(0x0FF0_000F, "fence")]
#[case(0x0000_100F, "fence.i")]
fn operandless(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(text(word), expected);
}

#[rstest]
#[case(csr_type(csr::MSTATUS, 10, sys::CSRRW, 0), "csrrw zero, mstatus, a0")]
#[case(csr_type(csr::MSTATUS, 8, sys::CSRRSI, 10), "csrrsi a0, mstatus, 8")]
#[case(csr_type(csr::CYCLE, 0, sys::CSRRS, 10), "csrrs a0, cycle, zero")]
#[case(csr_type(0x7C0, 0, sys::CSRRS, 10), "csrrs a0, 0x7c0, zero")]
fn csr_instructions(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(text(word), expected);
}

// ══════════════════════════════════════════════════════════
// 3. Compressed and illegal
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::c_mv(0x852E, "add a0, zero, a1")]
#[case::c_jr(0x8082, "jalr zero, 0(ra)")]
#[case::c_beqz(0xC101, "beq a0, zero, 0")]
#[case::c_jal(0x2FFD, "jal ra, 2046")]
#[case::c_ebreak(0x9002, "ebreak")]
#[case::c_lwsp(0x4532, "lw a0, 12(sp)")]
fn compressed_print_as_base(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(text(word), expected);
}

#[test]
fn illegal_words() {
    assert_eq!(text(0xFFFF_FFFF), "illegal");
    assert_eq!(text(0x0000_0000), "illegal");
}
