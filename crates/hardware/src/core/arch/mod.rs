//! RISC-V architecture-specific components.
//!
//! 1. **CSRs:** Addresses, access kinds and legality decoding.
//! 2. **Modes:** Privilege mode definitions.
//! 3. **Traps:** Interrupt identification and priority.

/// Control and Status Register (CSR) definitions and access logic.
pub mod csr;

/// Privilege mode definitions.
pub mod mode;

/// Interrupt identification and priority.
pub mod trap;
