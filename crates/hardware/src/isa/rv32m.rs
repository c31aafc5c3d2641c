//! Multiply/divide extension encodings.
//!
//! M instructions live in the `OP_REG` space, selected by `funct7 == FUNCT7`;
//! `funct3` then picks the operation. With `CoreConfig::mul_div` clear the
//! whole group decodes illegal.

/// `funct7` value marking a multiply or divide.
pub const FUNCT7: u32 = 0b000_0001;

/// Operation select within the M group.
pub mod funct3 {
    /// Low word of the signed product.
    pub const MUL: u32 = 0b000;
    /// High word, signed by signed.
    pub const MULH: u32 = 0b001;
    /// High word, signed by unsigned.
    pub const MULHSU: u32 = 0b010;
    /// High word, unsigned by unsigned.
    pub const MULHU: u32 = 0b011;
    /// Signed quotient.
    pub const DIV: u32 = 0b100;
    /// Unsigned quotient.
    pub const DIVU: u32 = 0b101;
    /// Signed remainder.
    pub const REM: u32 = 0b110;
    /// Unsigned remainder.
    pub const REMU: u32 = 0b111;
}
