//! Compressed immediate reconstruction.
//!
//! Each compressed format scatters its immediate differently. The layouts
//! below list, for every immediate bit range, the instruction bits it comes
//! from. Scaled offsets have their low zero bits implied.

use crate::isa::decode::sign_extend;
use crate::isa::instruction::CompressedBits;

/// CI: C.ADDI, C.LI, C.ANDI.
///
/// `imm[5] = inst[12]`, `imm[4:0] = inst[6:2]`, sign extended.
pub fn ci(inst: u16) -> i32 {
    let raw = (inst.bit(12) << 5) | inst.bits(6, 2);
    sign_extend(u32::from(raw), 6)
}

/// CI shift amount: C.SLLI, C.SRLI, C.SRAI.
///
/// `shamt[4:0] = inst[6:2]`; `inst[12]` (shamt bit 5) must be clear on RV32.
pub fn ci_shamt(inst: u16) -> u8 {
    inst.bits(6, 2) as u8
}

/// CI-lui: C.LUI.
///
/// `imm[17] = inst[12]`, `imm[16:12] = inst[6:2]`, sign extended.
pub fn ci_lui(inst: u16) -> i32 {
    ci(inst) << 12
}

/// CI-addi16sp: C.ADDI16SP.
///
/// `imm[9] = inst[12]`, `imm[4] = inst[6]`, `imm[6] = inst[5]`,
/// `imm[8:7] = inst[4:3]`, `imm[5] = inst[2]`, sign extended.
pub fn ci_addi16sp(inst: u16) -> i32 {
    let raw = (inst.bit(12) << 9)
        | (inst.bits(4, 3) << 7)
        | (inst.bit(5) << 6)
        | (inst.bit(2) << 5)
        | (inst.bit(6) << 4);
    sign_extend(u32::from(raw), 10)
}

/// CI-lwsp: C.LWSP.
///
/// `imm[5] = inst[12]`, `imm[4:2] = inst[6:4]`, `imm[7:6] = inst[3:2]`, zero extended.
pub fn ci_lwsp(inst: u16) -> i32 {
    let raw = (inst.bits(3, 2) << 6) | (inst.bit(12) << 5) | (inst.bits(6, 4) << 2);
    i32::from(raw)
}

/// CSS-swsp: C.SWSP.
///
/// `imm[5:2] = inst[12:9]`, `imm[7:6] = inst[8:7]`, zero extended.
pub fn css_swsp(inst: u16) -> i32 {
    let raw = (inst.bits(8, 7) << 6) | (inst.bits(12, 9) << 2);
    i32::from(raw)
}

/// CIW: C.ADDI4SPN.
///
/// `imm[5:4] = inst[12:11]`, `imm[9:6] = inst[10:7]`, `imm[2] = inst[6]`,
/// `imm[3] = inst[5]`, zero extended.
pub fn ciw(inst: u16) -> i32 {
    let raw = (inst.bits(10, 7) << 6)
        | (inst.bits(12, 11) << 4)
        | (inst.bit(5) << 3)
        | (inst.bit(6) << 2);
    i32::from(raw)
}

/// CL / CS word: C.LW, C.SW.
///
/// `imm[5:3] = inst[12:10]`, `imm[2] = inst[6]`, `imm[6] = inst[5]`, zero extended.
pub fn cl_word(inst: u16) -> i32 {
    let raw = (inst.bit(5) << 6) | (inst.bits(12, 10) << 3) | (inst.bit(6) << 2);
    i32::from(raw)
}

/// CB: C.BEQZ, C.BNEZ.
///
/// `imm[8] = inst[12]`, `imm[4:3] = inst[11:10]`, `imm[7:6] = inst[6:5]`,
/// `imm[2:1] = inst[4:3]`, `imm[5] = inst[2]`, sign extended.
pub fn cb(inst: u16) -> i32 {
    let raw = (inst.bit(12) << 8)
        | (inst.bits(6, 5) << 6)
        | (inst.bit(2) << 5)
        | (inst.bits(11, 10) << 3)
        | (inst.bits(4, 3) << 1);
    sign_extend(u32::from(raw), 9)
}

/// CJ: C.J, C.JAL.
///
/// `imm[11] = inst[12]`, `imm[4] = inst[11]`, `imm[9:8] = inst[10:9]`,
/// `imm[10] = inst[8]`, `imm[6] = inst[7]`, `imm[7] = inst[6]`,
/// `imm[3:1] = inst[5:3]`, `imm[5] = inst[2]`, sign extended.
pub fn cj(inst: u16) -> i32 {
    let raw = (inst.bit(12) << 11)
        | (inst.bit(8) << 10)
        | (inst.bits(10, 9) << 8)
        | (inst.bit(6) << 7)
        | (inst.bit(7) << 6)
        | (inst.bit(2) << 5)
        | (inst.bit(11) << 4)
        | (inst.bits(5, 3) << 1);
    sign_extend(u32::from(raw), 12)
}
