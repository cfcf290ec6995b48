//! Decides whether a method in `methods` is called on a receiver along
//! *every* successor path reaching a point in the CFG, including the
//! remainder of the starting block.

use reflectguard_core::errors::QueryError;
use rustc_hash::FxHashSet;

use crate::call_matcher::IgnoreFn;
use crate::ignorance::is_ignored;
use crate::receiver_walk::ReceiverWalk;
use crate::ssa::{BlockId, Function, InstrId, MethodId, TypeId};

/// `CalledFrom`: type-keyed. The receiver is the value produced at
/// `(block, index)` itself, which must match `receiver_ty` (the
/// conservative pre-filter).
pub fn called_from_typed(
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
    called_from_value(func, block, index, recv, methods, ignore)
}

/// `CalledFromAfter`: value-keyed. The receiver is supplied directly, and
/// `index` only marks where in `block` to resume scanning (the tail
/// `block.instrs[index + 1..]`, then successors).
///
/// Returns `Ok(true)`/`Ok(false)` for proven/disproven; `Err(_)` for
/// abstention, naming why.
pub fn called_from_value(
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
    if index >= b.instrs.len() {
        return Err(QueryError::IndexOutOfRange);
    }
    if is_ignored(func, recv, ignore) {
        return Err(QueryError::EscapedReceiver);
    }

    let mut walk = ReceiverWalk { func, methods, ignore, recv };
    let tail = &func.block(block).instrs[index + 1..];
    if walk.matched_in_slice(tail) {
        return Ok(true);
    }
    let mut visited = FxHashSet::default();
    Ok(all_succs(&mut walk, &mut visited, block))
}

/// `true` iff every successor path from `block` eventually matches.
/// Revisiting a block (a back-edge) returns `false` — a cycle with no
/// internal match never "proves" the property, the opposite policy from
/// [`crate::backward::all_preds`].
fn all_succs(walk: &mut ReceiverWalk<'_>, visited: &mut FxHashSet<BlockId>, block: BlockId) -> bool {
    if !visited.insert(block) {
        return false;
    }
    let func = walk.func;
    let succs = &func.block(block).succs;
    if succs.is_empty() {
        return false;
    }
    succs.clone().iter().all(|&s| {
        let instrs = &func.block(s).instrs;
        walk.matched_in_slice(instrs) || all_succs(walk, visited, s)
    })
}
