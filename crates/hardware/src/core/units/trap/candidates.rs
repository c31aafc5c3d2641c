//! Trap candidate construction.
//!
//! Each builder inspects one stage's state and returns the trap that stage
//! would take, or `TrapCandidate::none()`.

use tracing::trace;

use super::{ExecState, InterruptState, MemoryAbort, MemoryAbortKind, TrapCandidate};
use crate::common::error::Trap;
use crate::config::CoreConfig;
use crate::core::arch::csr::{self, decode_csr};
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::trap::{INTERRUPT_PRIORITY, TrapHandler};
use crate::isa::instruction::{DecodedInstruction, Op, Subop};

/// Candidate for a faulting memory-stage access.
///
/// Memory aborts always flush the instruction behind them in exec.
pub const fn memory_candidate(abort: &MemoryAbort) -> TrapCandidate {
    let trap = match abort.kind {
        MemoryAbortKind::None => return TrapCandidate::none(),
        MemoryAbortKind::LoadMisaligned => Trap::LoadAddressMisaligned(abort.address),
        MemoryAbortKind::LoadAccessFault => Trap::LoadAccessFault(abort.address),
        MemoryAbortKind::StoreMisaligned => Trap::StoreAddressMisaligned(abort.address),
        MemoryAbortKind::StoreAccessFault => Trap::StoreAccessFault(abort.address),
    };
    TrapCandidate::from_trap(&trap, abort.pc, PrivilegeMode::Machine, true)
}

/// Candidate for the highest-priority interrupt that is pending and enabled.
///
/// Interrupts are never taken in debug mode or while exec blocks them. A
/// machine-level interrupt is enabled below machine mode, or in machine mode
/// with `mstatus.MIE` set. With user interrupts configured, a bit delegated
/// in `mideleg` is instead taken in user mode, and only while running in
/// user mode with `mstatus.UIE` set. The trap value is the interrupted PC.
pub fn interrupt_candidate(state: &InterruptState, config: &CoreConfig) -> TrapCandidate {
    if state.blocked || state.mode == PrivilegeMode::Debug {
        return TrapCandidate::none();
    }

    let pending = state.mip & state.mie;
    let machine_enabled =
        state.mode < PrivilegeMode::Machine || state.mstatus & csr::MSTATUS_MIE != 0;
    let user_enabled = state.mode == PrivilegeMode::User && state.mstatus & csr::MSTATUS_UIE != 0;

    for bit in INTERRUPT_PRIORITY {
        if pending & bit == 0 {
            continue;
        }
        if TrapHandler::is_user_interrupt(bit) && !config.user_interrupts {
            continue;
        }
        let delegated = config.user_interrupts && state.mideleg & bit != 0;
        let (enabled, to_mode) = if delegated {
            (user_enabled, PrivilegeMode::User)
        } else {
            (machine_enabled, PrivilegeMode::Machine)
        };
        if !enabled {
            continue;
        }
        let Some(trap) = TrapHandler::irq_to_trap(bit) else {
            continue;
        };
        let mut candidate = TrapCandidate::from_trap(&trap, state.pc, to_mode, true);
        candidate.value = state.pc;
        return candidate;
    }
    TrapCandidate::none()
}

/// Candidate for the instruction in exec, checked in order: illegal
/// instruction (reserved encoding, illegal CSR access, or insufficient
/// privilege), environment call, breakpoint, trap return, and finally a
/// misaligned control-transfer target.
///
/// CSR legality is re-evaluated for the mode the instruction executes in.
pub fn exec_candidate(
    decoded: &DecodedInstruction,
    state: &ExecState,
    config: &CoreConfig,
) -> TrapCandidate {
    if !state.valid {
        return TrapCandidate::none();
    }

    let csr_illegal = decoded.op == Op::Csr
        && decode_csr(
            decoded.csr_access.address,
            decoded.csr_access.access,
            state.mode,
            config,
        )
        .illegal_access;

    if decoded.illegal || csr_illegal || state.mode < decoded.minimum_mode {
        trace!(pc = format_args!("{:#010x}", state.pc), csr_illegal, "illegal instruction in exec");
        TrapCandidate::from_trap(
            &Trap::IllegalInstruction(state.instruction),
            state.pc,
            PrivilegeMode::Machine,
            false,
        )
    } else if decoded.op == Op::System && decoded.subop == Subop::Ecall {
        let trap = if state.mode == PrivilegeMode::User {
            Trap::EnvironmentCallFromUMode
        } else {
            Trap::EnvironmentCallFromMMode
        };
        TrapCandidate::from_trap(&trap, state.pc, PrivilegeMode::Machine, false)
    } else if decoded.op == Op::System && decoded.subop == Subop::Ebreak {
        let mut candidate = TrapCandidate::from_trap(
            &Trap::Breakpoint(state.pc),
            state.pc,
            PrivilegeMode::Machine,
            false,
        );
        candidate.ebreak_to_dbg = config.debug_enabled() && state.ebreak_to_debug;
        if candidate.ebreak_to_dbg {
            candidate.to_mode = PrivilegeMode::Debug;
        }
        candidate
    } else if decoded.op == Op::System && decoded.subop == Subop::Mret {
        TrapCandidate {
            valid: true,
            pc: state.pc,
            to_mode: PrivilegeMode::Machine,
            ret: true,
            ..TrapCandidate::none()
        }
    } else if let Some(target) = state
        .target
        .filter(|target| target % config.instruction_alignment() != 0)
    {
        TrapCandidate::from_trap(
            &Trap::InstructionAddressMisaligned(target),
            state.pc,
            PrivilegeMode::Machine,
            false,
        )
    } else {
        TrapCandidate::none()
    }
}
