//! Thin, observable wrappers over the forward, backward, and equality
//! checkers. Carries no state beyond its inputs — every call instantiates
//! a fresh traversal.

use reflectguard_core::errors::{ErrorCode, QueryError};
use reflectguard_core::traits::{NullObserver, QueryObserver, QueryOutcome};

use crate::call_matcher::{self, IgnoreFn};
use crate::ssa::{BlockId, ComparisonTarget, Function, InstrId, Instruction, MethodId, TypeId};
use crate::{backward, equality, forward};

/// Either way of pointing at the receiver a backward query traces: the
/// value produced at a block/index position (type-checked against `ty`),
/// or an already-known value — mirroring the two incompatible
/// `FromBefore` signatures the source carried side by side.
pub enum ReceiverRef {
    AtPosition { index: usize, ty: TypeId },
    Value { index: usize, recv: InstrId },
}

/// `Called(instr, recv?, method)`: `true` iff `instr` is a static call to
/// `method`, and — when `recv` is supplied — argument 0 matches it under
/// the receiver identity oracle.
pub fn called(func: &Function, instr: InstrId, recv: Option<InstrId>, method: MethodId) -> bool {
    call_matcher::is_call_to(func, instr, method, recv, None)
}

/// `ReturnReceiverIfCalled(instr, method)`: argument 0 of `instr` when it
/// matches `method`, regardless of what that argument actually is.
pub fn return_receiver_if_called(func: &Function, instr: InstrId, method: MethodId) -> Option<InstrId> {
    if !call_matcher::is_call_to(func, instr, method, None, None) {
        return None;
    }
    let Instruction::Call(call) = func.instr(instr) else {
        return None;
    };
    call.has_receiver.then(|| call.args.first().copied()).flatten()
}

/// `CalledFrom(block, i, receiverType, methods...)`: forward, type-keyed.
pub fn called_from(
    func: &Function,
    block: BlockId,
    index: usize,
    receiver_ty: TypeId,
    methods: &[MethodId],
    ignore: Option<&IgnoreFn<'_>>,
    observer: Option<&dyn QueryObserver>,
) -> (bool, bool) {
    report(observer, "CalledFrom", forward::called_from_typed(func, block, index, receiver_ty, methods, ignore))
}

/// `CalledFromAfter(block, i, receiverValue, methods...)`: forward,
/// value-keyed — the receiver is supplied directly rather than re-derived
/// from `(block, index)`, so it skips the type pre-filter.
pub fn called_from_after(
    func: &Function,
    block: BlockId,
    index: usize,
    receiver: InstrId,
    methods: &[MethodId],
    ignore: Option<&IgnoreFn<'_>>,
    observer: Option<&dyn QueryObserver>,
) -> (bool, bool) {
    report(observer, "CalledFromAfter", forward::called_from_value(func, block, index, receiver, methods, ignore))
}

/// `CalledFromBefore(block, i, receiverValue|Type, methods...)`: backward.
pub fn called_from_before(
    func: &Function,
    block: BlockId,
    receiver: ReceiverRef,
    methods: &[MethodId],
    ignore: Option<&IgnoreFn<'_>>,
    observer: Option<&dyn QueryObserver>,
) -> (bool, bool) {
    let result = match receiver {
        ReceiverRef::AtPosition { index, ty } => backward::called_from_before_typed(func, block, index, ty, methods, ignore),
        ReceiverRef::Value { index, recv } => backward::called_from_before_value(func, block, index, recv, methods, ignore),
    };
    report(observer, "CalledFromBefore", result)
}

/// `CalledBeforeAndEqualTo(block, receiverValue, method, object)`.
#[allow(clippy::too_many_arguments)]
pub fn called_before_and_equal_to(
    func: &Function,
    block: BlockId,
    receiver: InstrId,
    guard: MethodId,
    object: ComparisonTarget,
    ignore: Option<&IgnoreFn<'_>>,
    observer: Option<&dyn QueryObserver>,
) -> bool {
    let result = equality::before_and_equal_to(func, block, receiver, guard, object, ignore);
    notify(observer, "CalledBeforeAndEqualTo", if result { QueryOutcome::Proven } else { QueryOutcome::Disproven });
    result
}

fn report(observer: Option<&dyn QueryObserver>, name: &str, result: Result<bool, QueryError>) -> (bool, bool) {
    match result {
        Ok(called) => {
            notify(observer, name, if called { QueryOutcome::Proven } else { QueryOutcome::Disproven });
            (called, true)
        }
        Err(err) => {
            notify(observer, name, QueryOutcome::Abstained(err));
            (false, false)
        }
    }
}

fn notify(observer: Option<&dyn QueryObserver>, name: &str, outcome: QueryOutcome) {
    match outcome {
        QueryOutcome::Proven => tracing::debug!(query = name, "proven"),
        QueryOutcome::Disproven => tracing::debug!(query = name, "disproven"),
        QueryOutcome::Abstained(err) => tracing::warn!(query = name, code = err.error_code(), reason = %err, "abstained"),
    }
    match observer {
        Some(observer) => observer.on_outcome(name, outcome),
        None => NullObserver.on_outcome(name, outcome),
    }
}
