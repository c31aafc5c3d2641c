//! Core processor control path.
//!
//! Architectural definitions (CSRs, privilege modes, interrupt priority) and
//! the functional units built on them.

/// Architecture-specific components (CSRs, privilege modes, traps).
pub mod arch;

/// Functional units (trap arbitration).
pub mod units;
