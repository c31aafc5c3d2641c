//! # ISA Unit Tests



/// Disassembler output.
pub mod disasm;
