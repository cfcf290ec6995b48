//! Decides whether a method in `methods` is called on a receiver along
//! *every* predecessor path reaching a point in the CFG.
//!
//! Symmetric to [`crate::forward`] with two deliberate differences: it
//! scans `block.instrs[..index]` instead of the tail, and a revisited
//! block returns `true` instead of `false` — a back-edge is assumed to
//! already satisfy the property, since without that assumption no loop
//! could ever prove a backward query. There is no ignorance-filter step:
//! the source's backward ignorance check was permanently disabled, and
//! backward soundness is already bounded by this cycle policy (see
//! `DESIGN.md`).

use reflectguard_core::errors::QueryError;
use rustc_hash::FxHashSet;

use crate::call_matcher::IgnoreFn;
use crate::receiver_walk::ReceiverWalk;
use crate::ssa::{BlockId, Function, InstrId, MethodId, TypeId};

/// Type-keyed entry: the receiver is the value produced at `(block, index)`
/// and must match `receiver_ty`.
pub fn called_from_before_typed(
    func: &Function,
    block: BlockId,
    index: usize,
    receiver_ty: TypeId,
    methods: &[MethodId],
    ignore: Option<&IgnoreFn<'_>>,
) -> Result<bool, QueryError> {
    let Some(b) = func.try_block(block) else {
        return Err(QueryError::NilBlock);
    };
    let Some(&recv) = b.instrs.get(index) else {
        return Err(QueryError::IndexOutOfRange);
    };
    if func.instr(recv).value_type() != Some(receiver_ty) {
        return Err(QueryError::ReceiverTypeMismatch);
    }
    called_from_before_value(func, block, index, recv, methods, ignore)
}

/// Value-keyed entry: the receiver is supplied directly (e.g. argument 0
/// of the observed call), and `index` marks where in `block` to start
/// scanning backward from — exclusive, i.e. `block.instrs[..index]`.
pub fn called_from_before_value(
    func: &Function,
    block: BlockId,
    index: usize,
    recv: InstrId,
    methods: &[MethodId],
    ignore: Option<&IgnoreFn<'_>>,
) -> Result<bool, QueryError> {
    if methods.is_empty() {
        return Err(QueryError::EmptyMethodSet);
    }
    let Some(b) = func.try_block(block) else {
        return Err(QueryError::NilBlock);
    };
    if index > b.instrs.len() {
        return Err(QueryError::IndexOutOfRange);
    }

    let mut walk = ReceiverWalk { func, methods, ignore, recv };
    let head = &func.block(block).instrs[..index];
    if walk.matched_in_slice(head) {
        return Ok(true);
    }
    let mut visited = FxHashSet::default();
    Ok(all_preds(&mut walk, &mut visited, block))
}

/// `true` iff every predecessor path into `block` matches. Revisiting a
/// block returns `true` — the opposite policy from
/// [`crate::forward::all_succs`].
pub(crate) fn all_preds(walk: &mut ReceiverWalk<'_>, visited: &mut FxHashSet<BlockId>, block: BlockId) -> bool {
    if !visited.insert(block) {
        return true;
    }
    let func = walk.func;
    let preds = &func.block(block).preds;
    if preds.is_empty() {
        return false;
    }
    preds.clone().iter().all(|&p| {
        let instrs = &func.block(p).instrs;
        walk.matched_in_slice(instrs) || all_preds(walk, visited, p)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::{EntityInterner, FunctionBuilder};

    #[test]
    fn guard_in_same_block_before_index_proves() {
        let mut b = FunctionBuilder::new();
        let mut interner = EntityInterner::new();
        let guard = interner.intern_method("CanAddr");
        let observed = interner.intern_method("Addr");

        let blk = b.block();
        let v = b.value(blk, None);
        b.call(blk, Some(guard), true, &[v], None);
        let observed_call = b.call(blk, Some(observed), true, &[v], None);
        let func = b.finish();

        let idx = func.block(blk).instrs.iter().position(|&id| id == observed_call).unwrap();
        let result = called_from_before_value(&func, blk, idx, v, &[guard], None).unwrap();
        assert!(result);
    }

    #[test]
    fn missing_guard_disproves() {
        let mut b = FunctionBuilder::new();
        let mut interner = EntityInterner::new();
        let guard = interner.intern_method("CanAddr");
        let observed = interner.intern_method("Addr");

        let blk = b.block();
        let v = b.value(blk, None);
        let observed_call = b.call(blk, Some(observed), true, &[v], None);
        let func = b.finish();

        let idx = func.block(blk).instrs.iter().position(|&id| id == observed_call).unwrap();
        let result = called_from_before_value(&func, blk, idx, v, &[guard], None).unwrap();
        assert!(!result);
    }

    #[test]
    fn back_edge_is_assumed_satisfied() {
        let mut b = FunctionBuilder::new();
        let mut interner = EntityInterner::new();
        let guard = interner.intern_method("CanAddr");

        // A block whose only predecessor is itself and that never calls
        // the guard: forward would disprove this, backward's opposite
        // cycle policy assumes the back-edge already satisfies it.
        let blk = b.block();
        let v = b.value(blk, None);
        b.connect(blk, blk);
        let func = b.finish();

        let result = called_from_before_value(&func, blk, 0, v, &[guard], None).unwrap();
        assert!(result);
    }

    #[test]
    fn entry_block_with_no_predecessors_and_no_match_disproves() {
        let mut b = FunctionBuilder::new();
        let mut interner = EntityInterner::new();
        let guard = interner.intern_method("CanAddr");
        let entry = b.block();
        let v = b.value(entry, None);
        let func = b.finish();
        let result = called_from_before_value(&func, entry, 0, v, &[guard], None).unwrap();
        assert!(!result);
    }
}
