//! Shared helpers for the unit tests.

use rvcore::config::CoreConfig;

// ══════════════════════════════════════════════════════════
// Base encodings
// ══════════════════════════════════════════════════════════

/// Encode an R-type instruction.
pub const fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode an I-type instruction.
pub const fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm_bits = (imm as u32) & 0xFFF;
    imm_bits << 20 | (rs1 & 0x1F) << 15 | (funct3 & 0x7) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode an S-type instruction.
pub const fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    ((v >> 5) & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (v & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode a B-type instruction.
pub const fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    ((v >> 12) & 1) << 31
        | ((v >> 5) & 0x3F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | ((v >> 1) & 0xF) << 8
        | ((v >> 11) & 1) << 7
        | (opcode & 0x7F)
}

/// Encode a U-type instruction. `imm` is the already shifted upper value.
pub const fn u_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    (imm as u32 & 0xFFFF_F000) | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode a J-type instruction.
pub const fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let v = imm as u32;
    ((v >> 20) & 1) << 31
        | ((v >> 1) & 0x3FF) << 21
        | ((v >> 11) & 1) << 20
        | ((v >> 12) & 0xFF) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode a CSR instruction; `src` is rs1 or the 5-bit immediate.
pub const fn csr_type(csr: u16, src: u32, funct3: u32, rd: u32) -> u32 {
    (csr as u32 & 0xFFF) << 20 | (src & 0x1F) << 15 | (funct3 & 0x7) << 12 | (rd & 0x1F) << 7 | 0x73
}

// ══════════════════════════════════════════════════════════
// Configurations
// ══════════════════════════════════════════════════════════

/// RV32IMC with user and debug mode.
pub fn rv32imc() -> CoreConfig {
    CoreConfig::default()
}

/// Narrow register file, otherwise default.
pub fn rv32e() -> CoreConfig {
    CoreConfig {
        e32: true,
        ..CoreConfig::default()
    }
}

/// Machine-mode only core without compressed or multiply support.
pub fn rv32i_machine_only() -> CoreConfig {
    CoreConfig {
        compressed: false,
        mul_div: false,
        user_mode: false,
        debug_enable: false,
        ..CoreConfig::default()
    }
}

/// User mode with user-level interrupts and delegation.
pub fn with_user_interrupts() -> CoreConfig {
    CoreConfig {
        user_interrupts: true,
        ..CoreConfig::default()
    }
}

// ══════════════════════════════════════════════════════════
// Tracing
// ══════════════════════════════════════════════════════════

/// Routes decoder and arbiter logs to the test output. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
