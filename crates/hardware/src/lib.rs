//! RV32IMC instruction decode and trap arbitration core.
//!
//! This crate models the control path of a small in-order RISC-V core:
//! 1. **ISA:** Decoding of 32-bit base (RV32I/E, M) and 16-bit compressed (C)
//!    words into a single `DecodedInstruction` form, plus a disassembler.
//! 2. **CSRs:** Address decoding and access-legality checks for the
//!    implemented machine, user and debug CSRs.
//! 3. **Traps:** Construction of memory, interrupt and exec trap candidates
//!    and their fixed-priority arbitration.
//! 4. **Configuration:** The feature switches (E32, C, M, user mode, user
//!    interrupts, debug) every unit consults.
//!
//! All units are pure functions of their inputs; nothing here holds state
//! between calls.

/// Common types (traps, configuration errors).
pub mod common;
/// Core feature configuration.
pub mod config;
/// Architectural state definitions and the trap unit.
pub mod core;
/// Instruction set (decode, instruction form, ABI, RV32I/M, RVC, privileged).
pub mod isa;

/// Core configuration; use `CoreConfig::default()` or load from JSON.
pub use crate::config::CoreConfig;
/// Privilege levels, ordered from least to most privileged.
pub use crate::core::arch::mode::PrivilegeMode;
/// Top-level decoder entry point for 16- and 32-bit words.
pub use crate::isa::decode::decode;
/// The decoded instruction descriptor.
pub use crate::isa::instruction::DecodedInstruction;
