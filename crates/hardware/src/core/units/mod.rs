//! Functional units.

/// Trap arbitration between the memory, interrupt and exec stages.
pub mod trap;
