//! # Core Unit Tests


/// Privilege mode ordering and parsing.
pub mod mode;

/// Trap candidates and arbitration priority.
pub mod trap;
