//! Privileged Architecture Definitions.
//!
//! Defines constants for the RISC-V Privileged Specification that the decoder
//! and trap arbitration unit need: trap cause codes and the fixed encodings of
//! system instructions.
//!
//! # Modules
//!
//! - `cause`: Exception and Interrupt cause codes (RV32 `mcause` layout).
//! - `opcodes`: System instruction opcodes (ECALL, EBREAK, xRET, WFI, CSR funct3).

/// Exception and interrupt cause code definitions.
pub mod cause;

/// System instruction opcodes (ECALL, EBREAK, xRET, WFI, CSR).
pub mod opcodes;
