//! Interrupt Identification Utilities.
//!
//! This module maps interrupt pending bits to architectural traps. It provides:
//! 1. **Interrupt Mapping:** Converts a `mip` bit into its `Trap` variant.
//! 2. **Priority Order:** The fixed order in which simultaneous interrupts are taken.

use crate::common::error::Trap;
use crate::core::arch::csr;

/// Interrupt pending bits in the order they are taken, highest priority first.
pub const INTERRUPT_PRIORITY: [u32; 6] = [
    csr::MIP_MEIP,
    csr::MIP_MSIP,
    csr::MIP_MTIP,
    csr::MIP_UEIP,
    csr::MIP_USIP,
    csr::MIP_UTIP,
];

/// Mask of the user-level interrupt bits.
pub const USER_INTERRUPTS: u32 = csr::MIP_UEIP | csr::MIP_USIP | csr::MIP_UTIP;

/// Trap handler utility functions.
#[derive(Debug)]
pub struct TrapHandler;

impl TrapHandler {
    /// Converts a single interrupt pending bit to its trap.
    ///
    /// Returns `None` for bits that name no implemented interrupt.
    pub const fn irq_to_trap(bit: u32) -> Option<Trap> {
        match bit {
            csr::MIP_USIP => Some(Trap::UserSoftwareInterrupt),
            csr::MIP_MSIP => Some(Trap::MachineSoftwareInterrupt),
            csr::MIP_UTIP => Some(Trap::UserTimerInterrupt),
            csr::MIP_MTIP => Some(Trap::MachineTimerInterrupt),
            csr::MIP_UEIP => Some(Trap::UserExternalInterrupt),
            csr::MIP_MEIP => Some(Trap::MachineExternalInterrupt),
            _ => None,
        }
    }

    /// Returns true if `bit` is a user-level interrupt.
    pub const fn is_user_interrupt(bit: u32) -> bool {
        bit & USER_INTERRUPTS != 0
    }
}
