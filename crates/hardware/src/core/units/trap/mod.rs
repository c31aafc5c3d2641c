//! Trap Arbitration Unit.
//!
//! Every cycle the memory, interrupt and exec stages may each want to divert
//! control flow. This unit turns each stage's state into a `TrapCandidate`
//! and picks a single `TrapRequest`, memory first, then interrupts, then exec.
//!
//! - [`candidates`]: builders for the three candidates.
//! - [`arbiter`]:    the fixed-priority selection.

/// Fixed-priority selection between trap candidates.
pub mod arbiter;

/// Construction of trap candidates from pipeline state.
pub mod candidates;

use serde::Serialize;

use crate::common::error::Trap;
use crate::core::arch::mode::PrivilegeMode;

pub use arbiter::arbitrate;
pub use candidates::{exec_candidate, interrupt_candidate, memory_candidate};

/// A potential trap raised by one pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrapCandidate {
    /// The stage requests a trap or return.
    pub valid: bool,
    /// `mcause` value.
    pub cause: u32,
    /// `mtval` value.
    pub value: u32,
    /// PC of the instruction the trap is taken on.
    pub pc: u32,
    /// Mode the handler runs in.
    pub to_mode: PrivilegeMode,
    /// Trap return (MRET) rather than trap entry.
    pub ret: bool,
    /// Breakpoint enters debug mode instead of a handler.
    pub ebreak_to_dbg: bool,
    /// The instruction in exec is discarded.
    pub flushes_exec: bool,
}

impl Default for TrapCandidate {
    fn default() -> Self {
        Self::none()
    }
}

impl TrapCandidate {
    /// A candidate that requests nothing.
    pub const fn none() -> Self {
        Self {
            valid: false,
            cause: 0,
            value: 0,
            pc: 0,
            to_mode: PrivilegeMode::Machine,
            ret: false,
            ebreak_to_dbg: false,
            flushes_exec: false,
        }
    }

    /// A valid candidate entering the handler for `trap`.
    pub const fn from_trap(
        trap: &Trap,
        pc: u32,
        to_mode: PrivilegeMode,
        flushes_exec: bool,
    ) -> Self {
        Self {
            valid: true,
            cause: trap.cause(),
            value: trap.value(),
            pc,
            to_mode,
            ret: false,
            ebreak_to_dbg: false,
            flushes_exec,
        }
    }
}

/// Stage whose candidate won arbitration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapSource {
    /// Memory-stage abort.
    Memory,
    /// Pending interrupt.
    Interrupt,
    /// Exec-stage exception or return.
    Exec,
}

/// The single trap selected for this cycle.
///
/// At most one `valid_from_*` flag is set; it names the candidate whose
/// fields were copied. With none set the remaining fields are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrapRequest {
    /// `mcause` value.
    pub cause: u32,
    /// `mtval` value.
    pub value: u32,
    /// PC of the instruction the trap is taken on.
    pub pc: u32,
    /// Mode the handler runs in.
    pub to_mode: PrivilegeMode,
    /// Trap return rather than trap entry.
    pub ret: bool,
    /// Breakpoint enters debug mode.
    pub ebreak_to_dbg: bool,
    /// The instruction in exec is discarded.
    pub flushes_exec: bool,
    /// Memory candidate won.
    pub valid_from_memory: bool,
    /// Interrupt candidate won.
    pub valid_from_interrupt: bool,
    /// Exec candidate won.
    pub valid_from_exec: bool,
}

impl TrapRequest {
    /// A request with no winning candidate.
    pub const fn none() -> Self {
        Self {
            cause: 0,
            value: 0,
            pc: 0,
            to_mode: PrivilegeMode::Machine,
            ret: false,
            ebreak_to_dbg: false,
            flushes_exec: false,
            valid_from_memory: false,
            valid_from_interrupt: false,
            valid_from_exec: false,
        }
    }

    /// Returns true if any stage requested a trap.
    pub const fn is_valid(&self) -> bool {
        self.valid_from_memory || self.valid_from_interrupt || self.valid_from_exec
    }

    /// The winning stage, if any.
    pub const fn source(&self) -> Option<TrapSource> {
        if self.valid_from_memory {
            Some(TrapSource::Memory)
        } else if self.valid_from_interrupt {
            Some(TrapSource::Interrupt)
        } else if self.valid_from_exec {
            Some(TrapSource::Exec)
        } else {
            None
        }
    }
}

/// Kind of fault reported by the data memory for the memory-stage access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryAbortKind {
    /// The access completed.
    #[default]
    None,
    /// Load address not naturally aligned.
    LoadMisaligned,
    /// Load rejected by the memory system.
    LoadAccessFault,
    /// Store address not naturally aligned.
    StoreMisaligned,
    /// Store rejected by the memory system.
    StoreAccessFault,
}

/// Memory-stage state relevant to trapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryAbort {
    /// Fault raised by the access.
    pub kind: MemoryAbortKind,
    /// Faulting data address.
    pub address: u32,
    /// PC of the load or store.
    pub pc: u32,
}

/// Interrupt controller state sampled for the instruction about to leave exec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptState {
    /// Current privilege mode.
    pub mode: PrivilegeMode,
    /// `mstatus` (only `MIE` and `UIE` are consulted).
    pub mstatus: u32,
    /// `mie` enable bits.
    pub mie: u32,
    /// `mip` pending bits.
    pub mip: u32,
    /// `mideleg` delegation bits.
    pub mideleg: u32,
    /// PC of the instruction that would be interrupted.
    pub pc: u32,
    /// The instruction in exec may not be interrupted this cycle.
    pub blocked: bool,
}

impl Default for InterruptState {
    fn default() -> Self {
        Self {
            mode: PrivilegeMode::Machine,
            mstatus: 0,
            mie: 0,
            mip: 0,
            mideleg: 0,
            pc: 0,
            blocked: false,
        }
    }
}

/// Exec-stage state relevant to trapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecState {
    /// An instruction occupies the exec stage.
    pub valid: bool,
    /// Its PC.
    pub pc: u32,
    /// Its encoding, reported on illegal-instruction traps.
    pub instruction: u32,
    /// Current privilege mode.
    pub mode: PrivilegeMode,
    /// Target of a taken branch or jump.
    pub target: Option<u32>,
    /// `dcsr.ebreakm`/`ebreaku` for the current mode.
    pub ebreak_to_debug: bool,
}

impl Default for ExecState {
    fn default() -> Self {
        Self {
            valid: false,
            pc: 0,
            instruction: 0,
            mode: PrivilegeMode::Machine,
            target: None,
            ebreak_to_debug: false,
        }
    }
}
