//! # Unit Components
//!
//! Tests organized by library module: configuration loading, the ISA
//! decoders, and the architectural units in `core`.

/// Configuration defaults, derived queries and JSON loading.
pub mod config;

/// CSR decoding, privilege modes and trap arbitration.
pub mod core;

/// Unit tests for the instruction decoders and disassembler.
///
/// This module aggregates tests for:
/// - Base (32-bit) decoding and field extraction.
/// - Compressed (16-bit) decoding, reserved forms and expansion equivalence.
/// - Disassembler text.
pub mod isa;
