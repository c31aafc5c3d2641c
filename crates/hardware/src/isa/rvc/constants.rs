//! Compressed encoding slots.
//!
//! A 16-bit word is split by its low two bits into quadrants 0..2 (`11`
//! marks a 32-bit word) and by bits 15..13 (`funct3`) into eight slots per
//! quadrant. The floating-point slots have no implementation on this core
//! and always decode illegal.

/// Low-bit patterns selecting the quadrant.
pub const QUADRANT_0: u16 = 0b00;
/// See [`QUADRANT_0`].
pub const QUADRANT_1: u16 = 0b01;
/// See [`QUADRANT_0`].
pub const QUADRANT_2: u16 = 0b10;

/// Quadrant 0: stack-relative address generation and word memory access.
pub mod q0 {
    /// C.ADDI4SPN.
    pub const C_ADDI4SPN: u16 = 0b000;
    /// C.FLD.
    pub const C_FLD: u16 = 0b001;
    /// C.LW.
    pub const C_LW: u16 = 0b010;
    /// C.FLW.
    pub const C_FLW: u16 = 0b011;
    /// No instruction.
    pub const RESERVED: u16 = 0b100;
    /// C.FSD.
    pub const C_FSD: u16 = 0b101;
    /// C.SW.
    pub const C_SW: u16 = 0b110;
    /// C.FSW.
    pub const C_FSW: u16 = 0b111;
}

/// Quadrant 1: immediates, control transfer and the compact ALU group.
pub mod q1 {
    /// C.ADDI, or C.NOP with rd = x0.
    pub const C_ADDI: u16 = 0b000;
    /// C.JAL (RV32 only; RV64 reuses the slot for C.ADDIW).
    pub const C_JAL: u16 = 0b001;
    /// C.LI.
    pub const C_LI: u16 = 0b010;
    /// C.LUI, or C.ADDI16SP when rd = sp.
    pub const C_LUI_ADDI16SP: u16 = 0b011;
    /// Compact ALU group on x8..x15, split by bits 11..10.
    pub const C_MISC_ALU: u16 = 0b100;
    /// C.J.
    pub const C_J: u16 = 0b101;
    /// C.BEQZ.
    pub const C_BEQZ: u16 = 0b110;
    /// C.BNEZ.
    pub const C_BNEZ: u16 = 0b111;

    // Bits 11..10 of C_MISC_ALU.
    /// C.SRLI.
    pub const MISC_SRLI: u16 = 0b00;
    /// C.SRAI.
    pub const MISC_SRAI: u16 = 0b01;
    /// C.ANDI.
    pub const MISC_ANDI: u16 = 0b10;
    /// Register-register ops, split by bits 6..5 with bit 12 clear.
    pub const MISC_REG: u16 = 0b11;

    // Bits 6..5 of MISC_REG.
    /// C.SUB.
    pub const REG_SUB: u16 = 0b00;
    /// C.XOR.
    pub const REG_XOR: u16 = 0b01;
    /// C.OR.
    pub const REG_OR: u16 = 0b10;
    /// C.AND.
    pub const REG_AND: u16 = 0b11;
}

/// Quadrant 2: full-register forms and stack-pointer memory access.
pub mod q2 {
    /// C.SLLI.
    pub const C_SLLI: u16 = 0b000;
    /// C.FLDSP.
    pub const C_FLDSP: u16 = 0b001;
    /// C.LWSP.
    pub const C_LWSP: u16 = 0b010;
    /// C.FLWSP.
    pub const C_FLWSP: u16 = 0b011;
    /// C.JR, C.MV, C.EBREAK, C.JALR and C.ADD, split by bit 12 and the
    /// register fields.
    pub const C_MISC_ALU: u16 = 0b100;
    /// C.FSDSP.
    pub const C_FSDSP: u16 = 0b101;
    /// C.SWSP.
    pub const C_SWSP: u16 = 0b110;
    /// C.FSWSP.
    pub const C_FSWSP: u16 = 0b111;
}
