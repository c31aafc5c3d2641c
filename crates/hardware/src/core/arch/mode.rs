//! RISC-V Privilege Modes.
//!
//! This module defines the privilege levels the core can execute in.
//! It implements the following:
//! 1. **Mode Classification:** User (U), Supervisor (S), Machine (M) and Debug (D) modes.
//! 2. **Ordering:** Modes compare by privilege, so `mode >= required` is an access check.
//! 3. **Observability:** Human-readable naming, parsing and display formatting.

use serde::Serialize;

/// RISC-V privilege mode levels.
///
/// Debug mode sits above Machine mode: everything Machine mode may do is also
/// permitted while halted in the debugger, and debug-only CSRs require it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeMode {
    /// User mode (U-mode).
    ///
    /// Lowest privilege level for application code.
    User = 0,

    /// Supervisor mode (S-mode).
    ///
    /// Encoded in CSR addresses; never entered by this core.
    Supervisor = 1,

    /// Machine mode (M-mode).
    ///
    /// Highest architectural privilege level, and the reset mode.
    Machine = 3,

    /// Debug mode (D-mode).
    ///
    /// Entered through a debug halt rather than a trap.
    Debug = 7,
}

impl PrivilegeMode {
    /// Converts a `u8` value to a privilege mode.
    ///
    /// Values that name no mode map to `Machine`.
    pub const fn from_u8(val: u8) -> Self {
        match val {
            0 => Self::User,
            1 => Self::Supervisor,
            7 => Self::Debug,
            _ => Self::Machine,
        }
    }

    /// Converts a privilege mode to its `u8` representation.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the privilege mode.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
            Self::Debug => "Debug",
        }
    }

    /// Parses a one-letter (`u`, `s`, `m`, `d`) or full mode name.
    ///
    /// Matching is case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "u" | "user" => Some(Self::User),
            "s" | "supervisor" => Some(Self::Supervisor),
            "m" | "machine" => Some(Self::Machine),
            "d" | "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
