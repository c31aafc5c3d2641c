//! Instruction set definitions and decoding.
//!
//! [`decode::decode`] is the entry point: it dispatches on the low two bits
//! to the base decoder or the compressed decoder and always returns a
//! complete [`instruction::DecodedInstruction`]. Encoding constants live in
//! one module per extension (`rv32i`, `rv32m`, `rvc`, `privileged`).

/// ABI register names.
pub mod abi;

/// Base and top-level instruction decoding.
pub mod decode;

/// Instruction disassembler for diagnostics and the command line.
pub mod disasm;

/// Decoded instruction form and bit extraction utilities.
pub mod instruction;

/// Trap causes and system instruction encodings.
pub mod privileged;

/// Base integer instruction set encodings.
pub mod rv32i;

/// Integer multiply/divide extension encodings.
pub mod rv32m;

/// Compressed (16-bit) instructions.
pub mod rvc;
