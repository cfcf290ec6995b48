//! Decides whether a single instruction is a call to a specific method,
//! optionally on a specific receiver.

use crate::identity::same_receiver;
use crate::ssa::{Function, InstrId, Instruction, MethodId};

/// Caller-supplied veto: instructions this returns `true` for never match,
/// regardless of callee or receiver (e.g. "skip calls inside generated
/// code").
pub type IgnoreFn<'a> = dyn Fn(InstrId) -> bool + 'a;

/// `true` if `instr` is a static call to `expected`, and — when `receiver`
/// is supplied and `expected`'s signature declares a receiver parameter —
/// argument 0 of the call is the same receiver per [`same_receiver`].
///
/// A call whose signature declares a receiver but supplies zero arguments
/// never matches when a receiver was asked for; a call with no declared
/// receiver matches on callee identity alone, independent of `receiver`.
pub fn is_call_to(
    func: &Function,
    instr: InstrId,
    expected: MethodId,
    receiver: Option<InstrId>,
    ignore: Option<&IgnoreFn<'_>>,
) -> bool {
    if let Some(ignore) = ignore {
        if ignore(instr) {
            return false;
        }
    }
    let Instruction::Call(call) = func.instr(instr) else {
        return false;
    };
    let Some(callee) = call.callee else {
        return false;
    };
    if callee != expected {
        return false;
    }
    if let Some(recv) = receiver {
        if call.has_receiver {
            let Some(&arg0) = call.args.first() else {
                return false;
            };
            if !same_receiver(func, arg0, recv) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::FunctionBuilder;

    #[test]
    fn matches_callee_and_receiver() {
        let mut b = FunctionBuilder::new();
        let mut interner = crate::ssa::EntityInterner::new();
        let m = interner.intern_method("reflect.Value.Addr");
        let blk = b.block();
        let recv = b.value(blk, None);
        let call = b.call(blk, Some(m), true, &[recv], None);
        let func = b.finish();
        assert!(is_call_to(&func, call, m, Some(recv), None));
    }

    #[test]
    fn rejects_wrong_receiver() {
        let mut b = FunctionBuilder::new();
        let mut interner = crate::ssa::EntityInterner::new();
        let m = interner.intern_method("reflect.Value.Addr");
        let blk = b.block();
        let recv = b.value(blk, None);
        let other = b.value(blk, None);
        let call = b.call(blk, Some(m), true, &[recv], None);
        let func = b.finish();
        assert!(!is_call_to(&func, call, m, Some(other), None));
    }

    #[test]
    fn receiverless_callee_ignores_receiver_arg() {
        let mut b = FunctionBuilder::new();
        let mut interner = crate::ssa::EntityInterner::new();
        let m = interner.intern_method("reflect.ValueOf");
        let blk = b.block();
        let arg = b.value(blk, None);
        let unrelated = b.value(blk, None);
        let call = b.call(blk, Some(m), false, &[arg], None);
        let func = b.finish();
        assert!(is_call_to(&func, call, m, Some(unrelated), None));
    }

    #[test]
    fn ignore_hook_vetoes_match() {
        let mut b = FunctionBuilder::new();
        let mut interner = crate::ssa::EntityInterner::new();
        let m = interner.intern_method("reflect.Value.Addr");
        let blk = b.block();
        let recv = b.value(blk, None);
        let call = b.call(blk, Some(m), true, &[recv], None);
        let func = b.finish();
        let ignore: &IgnoreFn<'_> = &|_| true;
        assert!(!is_call_to(&func, call, m, Some(recv), Some(ignore)));
    }
}
