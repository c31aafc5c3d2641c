//! Trap Candidates and Arbitration.
//!
//! Verifies the three candidate builders and the fixed memory > interrupt >
//! exec priority of the arbiter, including the case where every stage
//! raises a trap in the same cycle.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{csr_type, init_tracing, rv32i_machine_only, rv32imc, with_user_interrupts};
use rvcore::common::error::Trap;
use rvcore::config::CoreConfig;
use rvcore::core::arch::csr;
use rvcore::core::arch::mode::PrivilegeMode;
use rvcore::core::units::trap::{
    ExecState, InterruptState, MemoryAbort, MemoryAbortKind, TrapCandidate, TrapRequest,
    TrapSource, arbitrate, exec_candidate, interrupt_candidate, memory_candidate,
};
use rvcore::isa::decode::decode;
use rvcore::isa::privileged::cause::{exception, interrupt};
use rvcore::isa::privileged::opcodes as sys;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn load_fault(address: u32, pc: u32) -> TrapCandidate {
    memory_candidate(&MemoryAbort {
        kind: MemoryAbortKind::LoadAccessFault,
        address,
        pc,
    })
}

fn machine_timer_pending(pc: u32) -> InterruptState {
    InterruptState {
        mode: PrivilegeMode::Machine,
        mstatus: csr::MSTATUS_MIE,
        mie: csr::MIP_MTIP,
        mip: csr::MIP_MTIP,
        pc,
        ..InterruptState::default()
    }
}

fn exec_in(mode: PrivilegeMode, word: u32, config: &CoreConfig) -> TrapCandidate {
    let state = ExecState {
        valid: true,
        pc: 0x200,
        instruction: word,
        mode,
        ..ExecState::default()
    };
    exec_candidate(&decode(word, config), &state, config)
}

fn any_candidate() -> impl Strategy<Value = TrapCandidate> {
    (any::<bool>(), any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>()).prop_map(
        |(valid, cause, value, pc, ret)| TrapCandidate {
            valid,
            cause,
            value,
            pc,
            ret,
            ..TrapCandidate::none()
        },
    )
}

// ══════════════════════════════════════════════════════════
// 1. Arbitration priority
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn highest_priority_valid_candidate_wins(
        memory in any_candidate(),
        irq in any_candidate(),
        exec in any_candidate(),
    ) {
        let request = arbitrate(&memory, &irq, &exec);
        let expected = [(memory, TrapSource::Memory), (irq, TrapSource::Interrupt), (exec, TrapSource::Exec)]
            .into_iter()
            .find(|(candidate, _)| candidate.valid);

        match expected {
            Some((winner, source)) => {
                prop_assert_eq!(request.source(), Some(source));
                prop_assert_eq!(request.cause, winner.cause);
                prop_assert_eq!(request.value, winner.value);
                prop_assert_eq!(request.pc, winner.pc);
                prop_assert_eq!(request.ret, winner.ret);
            }
            None => prop_assert_eq!(request, TrapRequest::none()),
        }
        let flags = [request.valid_from_memory, request.valid_from_interrupt, request.valid_from_exec];
        prop_assert!(flags.iter().filter(|f| **f).count() <= 1);
    }
}

/// A memory fault and a pending interrupt in the same cycle: the fault wins.
#[test]
fn memory_fault_beats_pending_interrupt() {
    init_tracing();
    let memory = load_fault(0x8000_0000, 0x104);
    let irq = interrupt_candidate(&machine_timer_pending(0x108), &rv32imc());
    assert!(irq.valid);

    let request = arbitrate(&memory, &irq, &TrapCandidate::none());
    assert_eq!(request.cause, exception::LOAD_ACCESS_FAULT);
    assert_ne!(request.cause, interrupt::MACHINE_TIMER);
    assert_eq!(request.value, 0x8000_0000);
    assert_eq!(request.pc, 0x104);
    assert!(request.valid_from_memory);
    assert!(!request.valid_from_interrupt);
    assert!(request.flushes_exec);
}

#[test]
fn interrupt_beats_exec_exception() {
    let config = rv32imc();
    let irq = interrupt_candidate(&machine_timer_pending(0x200), &config);
    let exec = exec_in(PrivilegeMode::Machine, sys::ECALL, &config);
    assert!(exec.valid);

    let request = arbitrate(&TrapCandidate::none(), &irq, &exec);
    assert_eq!(request.source(), Some(TrapSource::Interrupt));
    assert_eq!(request.cause, interrupt::MACHINE_TIMER);
}

#[test]
fn exec_alone_is_taken() {
    let config = rv32imc();
    let exec = exec_in(PrivilegeMode::User, sys::ECALL, &config);
    let request = arbitrate(&TrapCandidate::none(), &TrapCandidate::none(), &exec);
    assert_eq!(request.source(), Some(TrapSource::Exec));
    assert_eq!(request.cause, exception::ENVIRONMENT_CALL_FROM_U_MODE);
    assert!(!request.flushes_exec);
}

#[test]
fn nothing_valid_yields_empty_request() {
    let none = TrapCandidate::none();
    let request = arbitrate(&none, &none, &none);
    assert!(!request.is_valid());
    assert_eq!(request.source(), None);
    assert_eq!(request, TrapRequest::none());
}

// ══════════════════════════════════════════════════════════
// 2. Memory candidates
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(MemoryAbortKind::LoadMisaligned, exception::LOAD_ADDRESS_MISALIGNED)]
#[case(MemoryAbortKind::LoadAccessFault, exception::LOAD_ACCESS_FAULT)]
#[case(MemoryAbortKind::StoreMisaligned, exception::STORE_ADDRESS_MISALIGNED)]
#[case(MemoryAbortKind::StoreAccessFault, exception::STORE_ACCESS_FAULT)]
fn memory_aborts_map_to_causes(#[case] kind: MemoryAbortKind, #[case] cause: u32) {
    let candidate = memory_candidate(&MemoryAbort {
        kind,
        address: 0x1003,
        pc: 0x400,
    });
    assert!(candidate.valid);
    assert_eq!(candidate.cause, cause);
    assert_eq!(candidate.value, 0x1003);
    assert_eq!(candidate.pc, 0x400);
    assert_eq!(candidate.to_mode, PrivilegeMode::Machine);
    assert!(candidate.flushes_exec);
}

#[test]
fn completed_access_raises_nothing() {
    assert_eq!(memory_candidate(&MemoryAbort::default()), TrapCandidate::none());
}

// ══════════════════════════════════════════════════════════
// 3. Interrupt candidates
// ══════════════════════════════════════════════════════════

#[test]
fn machine_interrupts_follow_priority_order() {
    let state = InterruptState {
        mstatus: csr::MSTATUS_MIE,
        mie: csr::MIP_MEIP | csr::MIP_MSIP | csr::MIP_MTIP,
        mip: csr::MIP_MSIP | csr::MIP_MTIP,
        pc: 0x80,
        ..InterruptState::default()
    };
    let candidate = interrupt_candidate(&state, &rv32imc());
    assert_eq!(candidate.cause, interrupt::MACHINE_SOFTWARE);
    assert_eq!(candidate.value, 0x80);
    assert_eq!(candidate.pc, 0x80);

    let external = InterruptState {
        mip: state.mip | csr::MIP_MEIP,
        ..state
    };
    assert_eq!(
        interrupt_candidate(&external, &rv32imc()).cause,
        interrupt::MACHINE_EXTERNAL
    );
}

#[test]
fn pending_without_enable_is_ignored() {
    let state = InterruptState {
        mie: 0,
        ..machine_timer_pending(0)
    };
    assert!(!interrupt_candidate(&state, &rv32imc()).valid);
}

#[test]
fn machine_mode_requires_global_enable() {
    let state = InterruptState {
        mstatus: 0,
        ..machine_timer_pending(0)
    };
    assert!(!interrupt_candidate(&state, &rv32imc()).valid);

    // Lower modes take machine interrupts regardless of MIE.
    let user = InterruptState {
        mode: PrivilegeMode::User,
        ..state
    };
    assert!(interrupt_candidate(&user, &rv32imc()).valid);
}

#[rstest]
#[case::blocked_by_exec(InterruptState { blocked: true, ..machine_timer_pending(0) })]
#[case::debug_mode(InterruptState { mode: PrivilegeMode::Debug, ..machine_timer_pending(0) })]
fn interrupts_suppressed(#[case] state: InterruptState) {
    assert_eq!(interrupt_candidate(&state, &rv32imc()), TrapCandidate::none());
}

#[test]
fn user_interrupts_need_configuration() {
    let state = InterruptState {
        mode: PrivilegeMode::User,
        mstatus: csr::MSTATUS_UIE,
        mie: csr::MIP_UTIP,
        mip: csr::MIP_UTIP,
        ..InterruptState::default()
    };
    assert!(!interrupt_candidate(&state, &rv32imc()).valid);

    let taken = interrupt_candidate(&state, &with_user_interrupts());
    assert_eq!(taken.cause, interrupt::USER_TIMER);
    assert_eq!(taken.to_mode, PrivilegeMode::Machine);
}

#[test]
fn delegated_interrupts_go_to_user_mode() {
    let config = with_user_interrupts();
    let state = InterruptState {
        mode: PrivilegeMode::User,
        mstatus: csr::MSTATUS_UIE,
        mie: csr::MIP_UEIP,
        mip: csr::MIP_UEIP,
        mideleg: csr::MIP_UEIP,
        ..InterruptState::default()
    };
    let candidate = interrupt_candidate(&state, &config);
    assert_eq!(candidate.cause, interrupt::USER_EXTERNAL);
    assert_eq!(candidate.to_mode, PrivilegeMode::User);

    // Not taken while in machine mode, nor with UIE clear.
    let in_machine = InterruptState {
        mode: PrivilegeMode::Machine,
        mstatus: csr::MSTATUS_MIE,
        ..state
    };
    assert!(!interrupt_candidate(&in_machine, &config).valid);
    let disabled = InterruptState { mstatus: 0, ..state };
    assert!(!interrupt_candidate(&disabled, &config).valid);
}

#[test]
fn interrupt_causes_carry_interrupt_bit() {
    let candidate = interrupt_candidate(&machine_timer_pending(0), &rv32imc());
    assert!(Trap::MachineTimerInterrupt.is_interrupt());
    assert_eq!(candidate.cause, Trap::MachineTimerInterrupt.cause());
    assert!(candidate.flushes_exec);
}

// ══════════════════════════════════════════════════════════
// 4. Exec candidates
// ══════════════════════════════════════════════════════════

#[test]
fn illegal_instruction_reports_encoding() {
    let word = 0xFFFF_FFFF;
    let candidate = exec_in(PrivilegeMode::Machine, word, &rv32imc());
    assert_eq!(candidate.cause, exception::ILLEGAL_INSTRUCTION);
    assert_eq!(candidate.value, word);
    assert_eq!(candidate.pc, 0x200);
    assert!(!candidate.flushes_exec);
}

/// `csrr a0, mstatus` decodes legal but traps when executed in user mode.
#[test]
fn csr_legality_uses_executing_mode() {
    let config = rv32imc();
    let word = csr_type(csr::MSTATUS, 0, sys::CSRRS, 10);
    assert!(!decode(word, &config).csr_access.illegal_access);

    assert!(!exec_in(PrivilegeMode::Machine, word, &config).valid);
    let user = exec_in(PrivilegeMode::User, word, &config);
    assert_eq!(user.cause, exception::ILLEGAL_INSTRUCTION);
    assert_eq!(user.value, word);
}

#[rstest]
#[case(sys::MRET)]
#[case(sys::WFI)]
fn machine_only_instructions_trap_in_user_mode(#[case] word: u32) {
    let candidate = exec_in(PrivilegeMode::User, word, &rv32imc());
    assert_eq!(candidate.cause, exception::ILLEGAL_INSTRUCTION);
}

#[rstest]
#[case(PrivilegeMode::User, exception::ENVIRONMENT_CALL_FROM_U_MODE)]
#[case(PrivilegeMode::Machine, exception::ENVIRONMENT_CALL_FROM_M_MODE)]
fn ecall_cause_depends_on_mode(#[case] mode: PrivilegeMode, #[case] cause: u32) {
    let candidate = exec_in(mode, sys::ECALL, &rv32imc());
    assert_eq!(candidate.cause, cause);
    assert_eq!(candidate.value, 0);
    assert_eq!(candidate.to_mode, PrivilegeMode::Machine);
}

#[test]
fn ebreak_traps_or_enters_debug() {
    let config = rv32imc();
    let mut state = ExecState {
        valid: true,
        pc: 0x300,
        instruction: sys::EBREAK,
        ..ExecState::default()
    };
    let decoded = decode(sys::EBREAK, &config);

    let trap = exec_candidate(&decoded, &state, &config);
    assert_eq!(trap.cause, exception::BREAKPOINT);
    assert_eq!(trap.value, 0x300);
    assert!(!trap.ebreak_to_dbg);

    state.ebreak_to_debug = true;
    let halt = exec_candidate(&decoded, &state, &config);
    assert!(halt.ebreak_to_dbg);
    assert_eq!(halt.to_mode, PrivilegeMode::Debug);

    let no_debug = rv32i_machine_only();
    let decoded = decode(sys::EBREAK, &no_debug);
    assert!(!exec_candidate(&decoded, &state, &no_debug).ebreak_to_dbg);
}

#[test]
fn mret_is_a_return() {
    let candidate = exec_in(PrivilegeMode::Machine, sys::MRET, &rv32imc());
    assert!(candidate.valid);
    assert!(candidate.ret);
    assert_eq!(candidate.cause, 0);
    assert_eq!(candidate.to_mode, PrivilegeMode::Machine);
}

#[rstest]
#[case::halfword_with_c(rv32imc(), 0x102, false)]
#[case::halfword_without_c(rv32i_machine_only(), 0x102, true)]
#[case::word_without_c(rv32i_machine_only(), 0x104, false)]
#[case::odd_with_c(rv32imc(), 0x101, true)]
fn misaligned_targets(#[case] config: CoreConfig, #[case] target: u32, #[case] traps: bool) {
    let jal = 0x0000_006F;
    let state = ExecState {
        valid: true,
        pc: 0x100,
        instruction: jal,
        target: Some(target),
        ..ExecState::default()
    };
    let candidate = exec_candidate(&decode(jal, &config), &state, &config);
    assert_eq!(candidate.valid, traps);
    if traps {
        assert_eq!(candidate.cause, exception::INSTRUCTION_ADDRESS_MISALIGNED);
        assert_eq!(candidate.value, target);
    }
}

#[test]
fn empty_exec_stage_raises_nothing() {
    let config = rv32imc();
    let state = ExecState::default();
    assert!(!exec_candidate(&decode(0xFFFF_FFFF, &config), &state, &config).valid);
}

#[test]
fn ordinary_instruction_raises_nothing() {
    assert!(!exec_in(PrivilegeMode::User, 0x00A0_0513, &rv32imc()).valid);
}
