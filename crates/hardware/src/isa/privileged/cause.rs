//! RISC-V Trap Cause Codes.
//!
//! This module defines the cause codes written to `mcause`/`ucause`. On RV32 the
//! most significant bit (bit 31) indicates whether the trap is an interrupt (1)
//! or an exception (0).

/// Interrupt flag in an RV32 cause value.
pub const INTERRUPT_BIT: u32 = 0x8000_0000;

/// Interrupt definitions (MSB = 1).
pub mod interrupt {
    use super::INTERRUPT_BIT;

    /// User software interrupt.
    pub const USER_SOFTWARE: u32 = INTERRUPT_BIT;

    /// Machine software interrupt.
    pub const MACHINE_SOFTWARE: u32 = INTERRUPT_BIT | 3;

    /// User timer interrupt.
    pub const USER_TIMER: u32 = INTERRUPT_BIT | 4;

    /// Machine timer interrupt.
    pub const MACHINE_TIMER: u32 = INTERRUPT_BIT | 7;

    /// User external interrupt.
    pub const USER_EXTERNAL: u32 = INTERRUPT_BIT | 8;

    /// Machine external interrupt.
    pub const MACHINE_EXTERNAL: u32 = INTERRUPT_BIT | 11;
}

/// Exception definitions (MSB = 0).
pub mod exception {
    /// Instruction address misaligned (0).
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u32 = 0;
    /// Instruction access fault (1).
    pub const INSTRUCTION_ACCESS_FAULT: u32 = 1;
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u32 = 3;
    /// Load address misaligned (4).
    pub const LOAD_ADDRESS_MISALIGNED: u32 = 4;
    /// Load access fault (5).
    pub const LOAD_ACCESS_FAULT: u32 = 5;
    /// Store/AMO address misaligned (6).
    pub const STORE_ADDRESS_MISALIGNED: u32 = 6;
    /// Store/AMO access fault (7).
    pub const STORE_ACCESS_FAULT: u32 = 7;
    /// Environment call from U-mode (8).
    pub const ENVIRONMENT_CALL_FROM_U_MODE: u32 = 8;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
