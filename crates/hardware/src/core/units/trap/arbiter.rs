//! Fixed-priority trap selection.

use tracing::debug;

use super::{TrapCandidate, TrapRequest, TrapSource};

/// Selects the trap taken this cycle: memory, then interrupt, then exec.
///
/// Only the winner's fields are copied and only its `valid_from_*` flag is
/// set. With no valid candidate the request is empty.
pub fn arbitrate(
    memory: &TrapCandidate,
    interrupt: &TrapCandidate,
    exec: &TrapCandidate,
) -> TrapRequest {
    let (winner, source) = if memory.valid {
        (memory, TrapSource::Memory)
    } else if interrupt.valid {
        (interrupt, TrapSource::Interrupt)
    } else if exec.valid {
        (exec, TrapSource::Exec)
    } else {
        return TrapRequest::none();
    };

    debug!(
        ?source,
        cause = format_args!("{:#x}", winner.cause),
        pc = format_args!("{:#010x}", winner.pc),
        ret = winner.ret,
        "trap selected"
    );

    TrapRequest {
        cause: winner.cause,
        value: winner.value,
        pc: winner.pc,
        to_mode: winner.to_mode,
        ret: winner.ret,
        ebreak_to_dbg: winner.ebreak_to_dbg,
        flushes_exec: winner.flushes_exec,
        valid_from_memory: source == TrapSource::Memory,
        valid_from_interrupt: source == TrapSource::Interrupt,
        valid_from_exec: source == TrapSource::Exec,
    }
}
