//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Maps integer register indices to their standard calling-convention names
//! for disassembly and diagnostics.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: u8 = 0;
/// Register x1 (return address, ra).
pub const REG_RA: u8 = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: u8 = 2;

/// ABI register names for x0–x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: u8) -> &'static str {
    REG_NAMES.get(usize::from(idx)).copied().unwrap_or("x??")
}
