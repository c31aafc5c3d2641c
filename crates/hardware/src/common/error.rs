//! Trap and configuration error definitions.
//!
//! This module defines the error handling and trap mechanisms for the core. It provides:
//! 1. **Trap Representation:** The architected synchronous exceptions and asynchronous interrupts
//!    with their `mcause` codes and `mtval` payloads.
//! 2. **Configuration Errors:** Failures while loading or validating a `CoreConfig`.

use std::io;

use thiserror::Error;

use crate::isa::privileged::cause::{INTERRUPT_BIT, exception, interrupt};

/// RISC-V trap types representing exceptions and interrupts.
///
/// Traps cause the processor to transfer control to a predefined trap handler.
/// The associated values become the trap value (`mtval`) on entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// The associated value is the misaligned target address.
    #[error("InstructionAddressMisaligned({0:#x})")]
    InstructionAddressMisaligned(u32),

    /// Instruction access fault exception.
    #[error("InstructionAccessFault({0:#x})")]
    InstructionAccessFault(u32),

    /// Illegal instruction exception.
    ///
    /// Raised for reserved encodings, illegal CSR accesses and instructions
    /// above the current privilege. The associated value is the instruction encoding.
    #[error("IllegalInstruction({0:#x})")]
    IllegalInstruction(u32),

    /// Breakpoint exception. The associated value is the program counter.
    #[error("Breakpoint({0:#x})")]
    Breakpoint(u32),

    /// Load address misaligned exception.
    #[error("LoadAddressMisaligned({0:#x})")]
    LoadAddressMisaligned(u32),

    /// Load access fault exception.
    #[error("LoadAccessFault({0:#x})")]
    LoadAccessFault(u32),

    /// Store address misaligned exception.
    #[error("StoreAddressMisaligned({0:#x})")]
    StoreAddressMisaligned(u32),

    /// Store access fault exception.
    #[error("StoreAccessFault({0:#x})")]
    StoreAccessFault(u32),

    /// Environment call from user mode.
    #[error("EnvironmentCallFromUMode")]
    EnvironmentCallFromUMode,

    /// Environment call from machine mode.
    #[error("EnvironmentCallFromMMode")]
    EnvironmentCallFromMMode,

    /// User software interrupt.
    #[error("UserSoftwareInterrupt")]
    UserSoftwareInterrupt,

    /// Machine software interrupt.
    #[error("MachineSoftwareInterrupt")]
    MachineSoftwareInterrupt,

    /// User timer interrupt.
    #[error("UserTimerInterrupt")]
    UserTimerInterrupt,

    /// Machine timer interrupt.
    #[error("MachineTimerInterrupt")]
    MachineTimerInterrupt,

    /// User external interrupt.
    #[error("UserExternalInterrupt")]
    UserExternalInterrupt,

    /// Machine external interrupt.
    #[error("MachineExternalInterrupt")]
    MachineExternalInterrupt,
}

impl Trap {
    /// The `mcause` value, with the interrupt bit set for interrupts.
    pub const fn cause(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
            Self::EnvironmentCallFromUMode => exception::ENVIRONMENT_CALL_FROM_U_MODE,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
            Self::UserSoftwareInterrupt => interrupt::USER_SOFTWARE,
            Self::MachineSoftwareInterrupt => interrupt::MACHINE_SOFTWARE,
            Self::UserTimerInterrupt => interrupt::USER_TIMER,
            Self::MachineTimerInterrupt => interrupt::MACHINE_TIMER,
            Self::UserExternalInterrupt => interrupt::USER_EXTERNAL,
            Self::MachineExternalInterrupt => interrupt::MACHINE_EXTERNAL,
        }
    }

    /// The trap value payload, or 0 for traps that carry none.
    pub const fn value(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(v)
            | Self::InstructionAccessFault(v)
            | Self::IllegalInstruction(v)
            | Self::Breakpoint(v)
            | Self::LoadAddressMisaligned(v)
            | Self::LoadAccessFault(v)
            | Self::StoreAddressMisaligned(v)
            | Self::StoreAccessFault(v) => *v,
            _ => 0,
        }
    }

    /// Returns true for asynchronous interrupts.
    pub const fn is_interrupt(&self) -> bool {
        self.cause() & INTERRUPT_BIT != 0
    }
}

/// Failure loading or validating a core configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The configuration text is not valid JSON for `CoreConfig`.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// User-mode interrupts were requested on a core without user mode.
    #[error("user_interrupts requires user_mode")]
    UserInterruptsWithoutUserMode,
}
