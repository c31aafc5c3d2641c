//! Base integer encodings.
//!
//! Field values for the 32-bit base instructions. Anything not named here,
//! including the RV64-only `OP-32` spaces and every floating-point opcode,
//! decodes illegal.

/// Major opcodes, bits 6..0.
pub mod opcodes {
    /// Loads.
    pub const OP_LOAD: u32 = 0b000_0011;
    /// FENCE and FENCE.I.
    pub const OP_MISC_MEM: u32 = 0b000_1111;
    /// Register-immediate arithmetic and shifts.
    pub const OP_IMM: u32 = 0b001_0011;
    /// AUIPC.
    pub const OP_AUIPC: u32 = 0b001_0111;
    /// Stores.
    pub const OP_STORE: u32 = 0b010_0011;
    /// Register-register arithmetic; shared with the M extension.
    pub const OP_REG: u32 = 0b011_0011;
    /// LUI.
    pub const OP_LUI: u32 = 0b011_0111;
    /// Conditional branches.
    pub const OP_BRANCH: u32 = 0b110_0011;
    /// JALR.
    pub const OP_JALR: u32 = 0b110_0111;
    /// JAL.
    pub const OP_JAL: u32 = 0b110_1111;
}

/// Minor opcodes, bits 14..12. Meaning depends on the major opcode.
pub mod funct3 {
    // OP_LOAD
    /// Signed byte.
    pub const LB: u32 = 0b000;
    /// Signed halfword.
    pub const LH: u32 = 0b001;
    /// Word.
    pub const LW: u32 = 0b010;
    /// Unsigned byte.
    pub const LBU: u32 = 0b100;
    /// Unsigned halfword.
    pub const LHU: u32 = 0b101;

    // OP_STORE
    /// Byte.
    pub const SB: u32 = 0b000;
    /// Halfword.
    pub const SH: u32 = 0b001;
    /// Word.
    pub const SW: u32 = 0b010;

    // OP_BRANCH
    /// Equal.
    pub const BEQ: u32 = 0b000;
    /// Not equal.
    pub const BNE: u32 = 0b001;
    /// Signed less than.
    pub const BLT: u32 = 0b100;
    /// Signed greater or equal.
    pub const BGE: u32 = 0b101;
    /// Unsigned less than.
    pub const BLTU: u32 = 0b110;
    /// Unsigned greater or equal.
    pub const BGEU: u32 = 0b111;

    // OP_IMM and OP_REG
    /// ADD, ADDI or SUB; funct7 tells ADD from SUB.
    pub const ADD_SUB: u32 = 0b000;
    /// Left shift.
    pub const SLL: u32 = 0b001;
    /// Set if less than, signed.
    pub const SLT: u32 = 0b010;
    /// Set if less than, unsigned.
    pub const SLTU: u32 = 0b011;
    /// XOR.
    pub const XOR: u32 = 0b100;
    /// Logical or arithmetic right shift; funct7 selects.
    pub const SRL_SRA: u32 = 0b101;
    /// OR.
    pub const OR: u32 = 0b110;
    /// AND.
    pub const AND: u32 = 0b111;

    // OP_MISC_MEM
    /// FENCE.
    pub const FENCE: u32 = 0b000;
    /// FENCE.I.
    pub const FENCE_I: u32 = 0b001;

    /// The only defined JALR minor opcode.
    pub const JALR: u32 = 0b000;
}

/// Bits 31..25 of register-register ops and shift immediates.
///
/// On RV32 a shift immediate with bit 25 set (shamt\[5\]) matches none of
/// these and is illegal.
pub mod funct7 {
    /// ADD, SLL, SRL and the logical ops.
    pub const DEFAULT: u32 = 0b000_0000;
    /// SUB.
    pub const SUB: u32 = 0b010_0000;
    /// SRA and SRAI; same bit as `SUB`.
    pub const SRA: u32 = SUB;
}
