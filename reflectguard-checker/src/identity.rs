//! Decides whether two SSA values denote the same logical receiver,
//! tolerating one level of pointer indirection and single-hop
//! referrer-set proximity.

use crate::ssa::{Function, InstrId, Instruction, UnOp};

/// `true` if `a` and `b` are the same receiver as far as the checker can
/// tell without inter-procedural or alias analysis:
///
/// 1. identical value,
/// 2. one side is a one-level `*other` dereference of the other, or
/// 3. one appears in the other's referrer set (a single-hop use-def
///    neighbor), checked both directions.
pub fn same_receiver(func: &Function, a: InstrId, b: InstrId) -> bool {
    if a == b {
        return true;
    }
    if unwrap_deref(func, a) == Some(b) || unwrap_deref(func, b) == Some(a) {
        return true;
    }
    func.referrers(a).contains(&b) || func.referrers(b).contains(&a)
}

/// Unwraps one level of pointer indirection: `*UnOp(Deref, x)` -> `x`.
/// Returns `None` for anything else, including a chain of two derefs —
/// the oracle only tolerates a single hop.
pub fn unwrap_deref(func: &Function, v: InstrId) -> Option<InstrId> {
    match func.instr(v) {
        Instruction::UnOp(u) if u.op == UnOp::Deref => Some(u.x),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::FunctionBuilder;

    #[test]
    fn identical_value_matches() {
        let mut b = FunctionBuilder::new();
        let blk = b.block();
        let v = b.value(blk, None);
        let func = b.finish();
        assert!(same_receiver(&func, v, v));
    }

    #[test]
    fn single_deref_matches_either_direction() {
        let mut b = FunctionBuilder::new();
        let blk = b.block();
        let v = b.value(blk, None);
        let deref = b.unop(blk, crate::ssa::UnOp::Deref, v, None);
        let func = b.finish();
        assert!(same_receiver(&func, v, deref));
        assert!(same_receiver(&func, deref, v));
    }

    #[test]
    fn double_deref_does_not_match() {
        let mut b = FunctionBuilder::new();
        let blk = b.block();
        let v = b.value(blk, None);
        let d1 = b.unop(blk, crate::ssa::UnOp::Deref, v, None);
        let d2 = b.unop(blk, crate::ssa::UnOp::Deref, d1, None);
        let func = b.finish();
        assert!(!same_receiver(&func, v, d2));
    }

    #[test]
    fn referrer_neighbor_matches() {
        let mut b = FunctionBuilder::new();
        let blk = b.block();
        let v = b.value(blk, None);
        // a call using v as an argument becomes v's referrer.
        let call = b.call(blk, None, false, &[v], None);
        let func = b.finish();
        assert!(same_receiver(&func, v, call));
        assert!(same_receiver(&func, call, v));
    }

    #[test]
    fn unrelated_values_do_not_match() {
        let mut b = FunctionBuilder::new();
        let blk = b.block();
        let v1 = b.value(blk, None);
        let v2 = b.value(blk, None);
        let func = b.finish();
        assert!(!same_receiver(&func, v1, v2));
    }
}
