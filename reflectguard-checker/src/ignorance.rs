//! Decides whether a receiver has escaped local reasoning and must be
//! abstained on rather than traced further.
//!
//! A receiver is ignored if any of its referrers is a caller-vetoed
//! instruction, returns it, or passes it as a non-receiver call argument.
//! The backward checker has no counterpart to this filter; see
//! `DESIGN.md` for why.

use crate::call_matcher::IgnoreFn;
use crate::ssa::{Function, InstrId, Instruction};

/// `true` if `recv` escapes local reasoning through any of its referrers.
pub fn is_ignored(func: &Function, recv: InstrId, ignore: Option<&IgnoreFn<'_>>) -> bool {
    func.referrers(recv).iter().any(|&referrer| {
        ignore.is_some_and(|f| f(referrer)) || is_returned(func, referrer, recv) || is_non_receiver_arg(func, referrer, recv)
    })
}

fn is_returned(func: &Function, instr: InstrId, recv: InstrId) -> bool {
    matches!(func.instr(instr), Instruction::Return(r) if r.results.contains(&recv))
}

fn is_non_receiver_arg(func: &Function, instr: InstrId, recv: InstrId) -> bool {
    let Instruction::Call(call) = func.instr(instr) else {
        return false;
    };
    let non_receiver_args = if call.has_receiver { call.args.get(1..).unwrap_or(&[]) } else { &call.args[..] };
    non_receiver_args.contains(&recv)
}
