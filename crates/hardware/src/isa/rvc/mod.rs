//! 16-bit (RV32C) instructions.
//!
//! Two independent paths turn a compressed word into a descriptor:
//! [`decode::decode_compressed`] reads the fields directly, while
//! [`expand::expand`] rewrites the word as its 32-bit equivalent for the base
//! decoder. Both must agree on every input; the test suite sweeps all 16-bit
//! words to check it.

/// Quadrant and slot numbers.
pub mod constants;

/// Direct decoder for 16-bit instructions.
pub mod decode;

/// Expansion of 16-bit instructions into 32-bit equivalents.
pub mod expand;

/// Immediate descrambling for the compressed formats.
pub mod imm;
