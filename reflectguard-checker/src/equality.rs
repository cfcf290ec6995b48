//! Like [`crate::backward`], but additionally requires that along every
//! predecessor path the guard
//! call's result was compared to a specific constant or type, and that the
//! branch taken toward the target block is the one where the equality
//! holds.

use rustc_hash::FxHashSet;

use crate::call_matcher::IgnoreFn;
use crate::identity::unwrap_deref;
use crate::receiver_walk::ReceiverWalk;
use crate::ssa::{BinOp, BlockId, ComparisonTarget, Function, InstrId, Instruction, MethodId};

/// `true` iff every predecessor path reaching `block` calls `guard` on
/// `recv` and branches toward `block` along the edge where the guard's
/// result compared equal to `object`.
pub fn before_and_equal_to(
    func: &Function,
    block: BlockId,
    recv: InstrId,
    guard: MethodId,
    object: ComparisonTarget,
    ignore: Option<&IgnoreFn<'_>>,
) -> bool {
    let recv = unwrap_deref(func, recv).unwrap_or(recv);
    let methods = [guard];
    let mut visited = FxHashSet::default();
    all_preds_and_equal_to(func, &mut visited, block, recv, &methods, object, ignore)
}

fn all_preds_and_equal_to(
    func: &Function,
    visited: &mut FxHashSet<BlockId>,
    target: BlockId,
    recv: InstrId,
    methods: &[MethodId],
    object: ComparisonTarget,
    ignore: Option<&IgnoreFn<'_>>,
) -> bool {
    let preds = func.block(target).preds.clone();
    preds.iter().all(|&p| pred_satisfies(func, visited, p, target, recv, methods, object, ignore))
}

#[allow(clippy::too_many_arguments)]
fn pred_satisfies(
    func: &Function,
    visited: &mut FxHashSet<BlockId>,
    pred: BlockId,
    target: BlockId,
    recv: InstrId,
    methods: &[MethodId],
    object: ComparisonTarget,
    ignore: Option<&IgnoreFn<'_>>,
) -> bool {
    if !visited.insert(pred) {
        return true;
    }
    let mut walk = ReceiverWalk { func, methods, ignore, recv };
    let instrs = func.block(pred).instrs.clone();
    match walk.matched_index_in_slice(&instrs) {
        Some(idx) => satisfies_equality(func, instrs[idx], target, object),
        None => all_preds_and_equal_to(func, visited, pred, recv, methods, object, ignore),
    }
}

/// `true` if some referrer of the guard call's result `call` is an
/// `==`/`!=` comparison against `object` whose `If`-branch toward `target`
/// is the equality branch.
fn satisfies_equality(func: &Function, call: InstrId, target: BlockId, object: ComparisonTarget) -> bool {
    func.referrers(call).iter().any(|&r| {
        let Instruction::BinOp(binop) = func.instr(r) else {
            return false;
        };
        if !matches!(binop.op, BinOp::Eq | BinOp::Ne) {
            return false;
        }
        let other = if binop.x == call {
            binop.y
        } else if binop.y == call {
            binop.x
        } else {
            return false;
        };
        if !target_is_same(func, other, object) {
            return false;
        }
        equality_branch_reaches(func, r, binop.op, target)
    })
}

/// `true` if some `If` referrer of `binop` has, for `op`, its equality
/// branch reaching `target` (`target` itself or a transitive successor).
fn equality_branch_reaches(func: &Function, binop: InstrId, op: BinOp, target: BlockId) -> bool {
    func.referrers(binop).iter().any(|&r| {
        let Instruction::If(if_instr) = func.instr(r) else {
            return false;
        };
        if if_instr.cond != binop {
            return false;
        }
        let if_block = func.block_of(r);
        let succs = &func.block(if_block).succs;
        let (Some(&then_path), Some(&else_path)) = (succs.first(), succs.get(1)) else {
            return false;
        };
        let equality_path = match op {
            BinOp::Eq => then_path,
            BinOp::Ne => else_path,
            BinOp::Other => return false,
        };
        is_succ_of(func, target, equality_path)
    })
}

/// Sameness for the comparison's other operand: unwrap one level of
/// indirection, then match against a named reference's target.
fn target_is_same(func: &Function, operand: InstrId, object: ComparisonTarget) -> bool {
    let operand = unwrap_deref(func, operand).unwrap_or(operand);
    matches!(func.instr(operand), Instruction::Ref(r) if r.target == object)
}

/// `true` if `target` is `from` or reachable from `from` by following
/// `succs` transitively.
fn is_succ_of(func: &Function, target: BlockId, from: BlockId) -> bool {
    let mut visited = FxHashSet::default();
    let mut stack = vec![from];
    while let Some(b) = stack.pop() {
        if b == target {
            return true;
        }
        if !visited.insert(b) {
            continue;
        }
        stack.extend(func.block(b).succs.iter().copied());
    }
    false
}
