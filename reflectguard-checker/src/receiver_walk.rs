//! Shared in-block scanning logic used by the forward, backward, and
//! equality checkers. Each owns its own traversal (successors, predecessors,
//! predecessors-with-comparison) but all three scan a block's instruction
//! slice for a call to one of a set of methods on a receiver the same way.

use crate::call_matcher::{is_call_to, IgnoreFn};
use crate::identity::unwrap_deref;
use crate::ssa::{Function, InstrId, Instruction, MethodId, UnOp};

/// Tracks the receiver being traced, rebinding it through one level of
/// indirection as the walk crosses a `*recv` dereference.
pub(crate) struct ReceiverWalk<'f> {
    pub(crate) func: &'f Function,
    pub(crate) methods: &'f [MethodId],
    pub(crate) ignore: Option<&'f IgnoreFn<'f>>,
    pub(crate) recv: InstrId,
}

impl<'f> ReceiverWalk<'f> {
    /// Scans `instrs` in order; before each comparison, rebinds `recv`
    /// through one level of dereference if the current receiver is itself
    /// a `*x` instruction. Returns `true` on the first matching call.
    pub(crate) fn matched_in_slice(&mut self, instrs: &[InstrId]) -> bool {
        self.matched_index_in_slice(instrs).is_some()
    }

    /// Same scan as [`Self::matched_in_slice`], but returns the position of
    /// the first match within `instrs` — used by the equality checker to
    /// locate the guard call it must then trace forward to its comparison.
    pub(crate) fn matched_index_in_slice(&mut self, instrs: &[InstrId]) -> Option<usize> {
        for (i, &instr) in instrs.iter().enumerate() {
            self.rebind_through_deref();
            for &method in self.methods {
                if is_call_to(self.func, instr, method, Some(self.recv), self.ignore) {
                    return Some(i);
                }
            }
        }
        None
    }

    fn rebind_through_deref(&mut self) {
        if matches!(self.func.instr(self.recv), Instruction::UnOp(u) if u.op == UnOp::Deref) {
            if let Some(inner) = unwrap_deref(self.func, self.recv) {
                self.recv = inner;
            }
        }
    }
}
