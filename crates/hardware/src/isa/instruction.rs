//! Instruction encoding and the canonical decoded form.
//!
//! Provides bit extraction traits for 32-bit and 16-bit instruction words and
//! the `DecodedInstruction` bundle that both decoders produce. A decoded
//! instruction carries no reference to the word it came from; the pipeline
//! latches the word separately.

use serde::Serialize;

use crate::core::arch::csr::CsrAccess;
use crate::core::arch::mode::PrivilegeMode;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Offset added to a 3-bit compressed register field (x8-x15).
pub const PRIME_REG_BASE: u8 = 8;

/// Trait for extracting instruction fields from 32-bit encodings.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> u8;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> u8;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> u8;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    ///
    /// Distinguishes ADD/SUB and SRL/SRA, and selects the M extension.
    fn funct7(&self) -> u32;

    /// Extracts the 12-bit CSR address (bits 20-31).
    fn csr(&self) -> u16;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u8 {
        ((self >> 7) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rs1(&self) -> u8 {
        ((self >> 15) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rs2(&self) -> u8 {
        ((self >> 20) & REG_MASK) as u8
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u16 {
        ((self >> 20) & CSR_MASK) as u16
    }
}

/// Trait for extracting fields from 16-bit compressed encodings.
///
/// Register accessors come in two flavours: full 5-bit fields (`rd_full`,
/// `rs2_full`) and 3-bit "prime" fields biased by 8 (`rd_prime`,
/// `rs1_prime`, `rs2_prime`).
pub trait CompressedBits {
    /// Quadrant (bits 1:0).
    fn quadrant(&self) -> u16;

    /// Major opcode within the quadrant (bits 15:13).
    fn opc(&self) -> u16;

    /// Single bit at `pos`.
    fn bit(&self, pos: u32) -> u16;

    /// Bits `hi:lo`, right aligned.
    fn bits(&self, hi: u32, lo: u32) -> u16;

    /// Full destination / first source register (bits 11:7).
    fn rd_full(&self) -> u8;

    /// Full second source register (bits 6:2).
    fn rs2_full(&self) -> u8;

    /// Prime first source / destination register (bits 9:7) plus 8.
    fn rs1_prime(&self) -> u8;

    /// Prime destination / second source register (bits 4:2) plus 8.
    fn rs2_prime(&self) -> u8;
}

impl CompressedBits for u16 {
    #[inline(always)]
    fn quadrant(&self) -> u16 {
        self & 0x3
    }

    #[inline(always)]
    fn opc(&self) -> u16 {
        (self >> 13) & 0x7
    }

    #[inline(always)]
    fn bit(&self, pos: u32) -> u16 {
        (self >> pos) & 1
    }

    #[inline(always)]
    fn bits(&self, hi: u32, lo: u32) -> u16 {
        (self >> lo) & ((1 << (hi - lo + 1)) - 1)
    }

    #[inline(always)]
    fn rd_full(&self) -> u8 {
        self.bits(11, 7) as u8
    }

    #[inline(always)]
    fn rs2_full(&self) -> u8 {
        self.bits(6, 2) as u8
    }

    #[inline(always)]
    fn rs1_prime(&self) -> u8 {
        PRIME_REG_BASE + self.bits(9, 7) as u8
    }

    #[inline(always)]
    fn rs2_prime(&self) -> u8 {
        PRIME_REG_BASE + self.bits(4, 2) as u8
    }
}

/// Instruction class, selecting the execution resource downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Integer register-register or register-immediate arithmetic.
    Alu,
    /// Conditional branch.
    Branch,
    /// Jump and link (PC relative).
    Jal,
    /// Jump and link register.
    Jalr,
    /// Load or store.
    Mem,
    /// Load upper immediate.
    Lui,
    /// Add upper immediate to PC.
    Auipc,
    /// FENCE / FENCE.I.
    MiscMem,
    /// ECALL, EBREAK, MRET, WFI.
    System,
    /// CSR read/modify/write.
    Csr,
    /// Multiply / divide (M extension).
    MulDiv,
    /// No defined instruction.
    #[default]
    Illegal,
}

/// Operation within an [`Op`] class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subop {
    /// No sub-operation (LUI, AUIPC, JAL, JALR, illegal).
    #[default]
    None,

    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,

    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than unsigned.
    Bltu,
    /// Branch if greater or equal unsigned.
    Bgeu,

    /// Load byte.
    Lb,
    /// Load halfword.
    Lh,
    /// Load word.
    Lw,
    /// Load byte unsigned.
    Lbu,
    /// Load halfword unsigned.
    Lhu,
    /// Store byte.
    Sb,
    /// Store halfword.
    Sh,
    /// Store word.
    Sw,

    /// Environment call.
    Ecall,
    /// Breakpoint.
    Ebreak,
    /// Machine-mode trap return.
    Mret,
    /// Wait for interrupt.
    Wfi,

    /// Memory ordering fence.
    Fence,
    /// Instruction stream fence.
    FenceI,

    /// CSR read/write.
    Csrrw,
    /// CSR read and set bits.
    Csrrs,
    /// CSR read and clear bits.
    Csrrc,

    /// Multiply, low word.
    Mul,
    /// Multiply high, signed x signed.
    Mulh,
    /// Multiply high, signed x unsigned.
    Mulhsu,
    /// Multiply high, unsigned x unsigned.
    Mulhu,
    /// Divide (signed).
    Div,
    /// Divide unsigned.
    Divu,
    /// Remainder (signed).
    Rem,
    /// Remainder unsigned.
    Remu,
}

/// Shifter control, meaningful only for shift instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftOp {
    /// Not a shift.
    #[default]
    None,
    /// SLL / SLLI.
    LeftLogical,
    /// SRL / SRLI.
    RightLogical,
    /// SRA / SRAI.
    RightArithmetic,
}

impl ShiftOp {
    /// Shifter control for an ALU sub-operation.
    pub const fn for_subop(subop: Subop) -> Self {
        match subop {
            Subop::Sll => Self::LeftLogical,
            Subop::Srl => Self::RightLogical,
            Subop::Sra => Self::RightArithmetic,
            _ => Self::None,
        }
    }
}

/// Canonical decoded instruction produced by both the base and the
/// compressed decoder.
///
/// Register indices whose operand is unused are reported as 0 with their
/// flag clear, so two decodes of equivalent encodings compare equal field by
/// field. Once `illegal` is set no other field carries meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedInstruction {
    /// Instruction class.
    pub op: Op,
    /// Operation within the class.
    pub subop: Subop,
    /// First source register.
    pub rs1: u8,
    /// `rs1` must be read (false when unused or x0).
    pub rs1_valid: bool,
    /// Second source register.
    pub rs2: u8,
    /// `rs2` must be read (false when unused or x0).
    pub rs2_valid: bool,
    /// Destination register.
    pub rd: u8,
    /// `rd` is written (false when no result or x0).
    pub rd_written: bool,
    /// Sign- or zero-extended immediate.
    pub immediate: i32,
    /// `immediate` is an operand.
    pub immediate_valid: bool,
    /// Shifter control.
    pub shift_op: ShiftOp,
    /// Shift amount for immediate shifts.
    pub immediate_shift: u8,
    /// CSR access descriptor; only meaningful for `Op::Csr`.
    pub csr_access: CsrAccess,
    /// Lowest privilege mode allowed to execute the instruction.
    pub minimum_mode: PrivilegeMode,
    /// Encoding is reserved or undefined.
    pub illegal: bool,
    /// Produced by the compressed decoder (PC advances by 2).
    pub is_compressed: bool,
}

impl Default for DecodedInstruction {
    fn default() -> Self {
        Self {
            op: Op::Illegal,
            subop: Subop::None,
            rs1: 0,
            rs1_valid: false,
            rs2: 0,
            rs2_valid: false,
            rd: 0,
            rd_written: false,
            immediate: 0,
            immediate_valid: false,
            shift_op: ShiftOp::None,
            immediate_shift: 0,
            csr_access: CsrAccess::default(),
            minimum_mode: PrivilegeMode::User,
            illegal: false,
            is_compressed: false,
        }
    }
}

impl DecodedInstruction {
    /// The descriptor every reserved encoding decodes to.
    pub fn illegal(is_compressed: bool) -> Self {
        Self {
            illegal: true,
            is_compressed,
            ..Self::default()
        }
    }

    /// Register-register ALU or multiply/divide operation.
    pub(crate) fn reg_reg(op: Op, subop: Subop, rd: u8, rs1: u8, rs2: u8) -> Self {
        Self {
            op,
            subop,
            rd,
            rd_written: true,
            rs1,
            rs1_valid: true,
            rs2,
            rs2_valid: true,
            shift_op: ShiftOp::for_subop(subop),
            ..Self::default()
        }
    }

    /// Register-immediate ALU operation. Shift immediates carry the shift
    /// amount in both `immediate` and `immediate_shift`.
    pub(crate) fn reg_imm(subop: Subop, rd: u8, rs1: u8, immediate: i32) -> Self {
        let shift_op = ShiftOp::for_subop(subop);
        Self {
            op: Op::Alu,
            subop,
            rd,
            rd_written: true,
            rs1,
            rs1_valid: true,
            immediate,
            immediate_valid: true,
            shift_op,
            immediate_shift: if shift_op == ShiftOp::None {
                0
            } else {
                (immediate & 0x1F) as u8
            },
            ..Self::default()
        }
    }

    /// Load: `rd <- mem[rs1 + immediate]`.
    pub(crate) fn load(subop: Subop, rd: u8, rs1: u8, immediate: i32) -> Self {
        Self {
            op: Op::Mem,
            subop,
            rd,
            rd_written: true,
            rs1,
            rs1_valid: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// Store: `mem[rs1 + immediate] <- rs2`.
    pub(crate) fn store(subop: Subop, rs1: u8, rs2: u8, immediate: i32) -> Self {
        Self {
            op: Op::Mem,
            subop,
            rs1,
            rs1_valid: true,
            rs2,
            rs2_valid: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// Conditional branch to `pc + immediate`.
    pub(crate) fn branch(subop: Subop, rs1: u8, rs2: u8, immediate: i32) -> Self {
        Self {
            op: Op::Branch,
            subop,
            rs1,
            rs1_valid: true,
            rs2,
            rs2_valid: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// JAL to `pc + immediate`, linking into `rd`.
    pub(crate) fn jal(rd: u8, immediate: i32) -> Self {
        Self {
            op: Op::Jal,
            rd,
            rd_written: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// JALR to `rs1 + immediate`, linking into `rd`.
    pub(crate) fn jalr(rd: u8, rs1: u8, immediate: i32) -> Self {
        Self {
            op: Op::Jalr,
            rd,
            rd_written: true,
            rs1,
            rs1_valid: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// LUI / AUIPC with an already shifted U-type immediate.
    pub(crate) fn upper(op: Op, rd: u8, immediate: i32) -> Self {
        Self {
            op,
            rd,
            rd_written: true,
            immediate,
            immediate_valid: true,
            ..Self::default()
        }
    }

    /// Operand-less system instruction.
    pub(crate) fn system(subop: Subop, minimum_mode: PrivilegeMode) -> Self {
        Self {
            op: Op::System,
            subop,
            minimum_mode,
            ..Self::default()
        }
    }

    /// Size in bytes of the encoding this was decoded from.
    pub const fn size(&self) -> u32 {
        if self.is_compressed { 2 } else { 4 }
    }
}
