//! End-to-end guard-precedence scenarios, driven through the public
//! façade rather than the internal checkers directly.

use reflectguard_checker::ssa::{BinOp, ComparisonTarget, EntityInterner, FunctionBuilder};
use reflectguard_checker::{called_before_and_equal_to, called_from, called_from_before, ReceiverRef};

#[test]
fn s1_straight_line_guarded_has_no_violation() {
    // v := make(); v.CanAddr(); if !v.CanAddr() { return }; v.Addr()
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let can_addr = interner.intern_method("CanAddr");
    let addr = interner.intern_method("Addr");
    let ty = interner.intern_type("reflect.Value");

    let blk = b.block();
    let v = b.value(blk, Some(ty));
    b.call(blk, Some(can_addr), true, &[v], None);
    b.call(blk, Some(addr), true, &[v], None);
    let func = b.finish();

    let v_index = func.block(blk).instrs.iter().position(|&id| id == v).unwrap();
    let (called, ok) = called_from(&func, blk, v_index, ty, &[can_addr], None, None);
    assert!(ok && called, "Addr should be reached only after CanAddr");
}

#[test]
fn s2_unguarded_reports_violation() {
    // v := make(); v.Addr()
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let can_addr = interner.intern_method("CanAddr");
    let ty = interner.intern_type("reflect.Value");

    let blk = b.block();
    let v = b.value(blk, Some(ty));
    b.call(blk, None, true, &[v], None); // Addr(), not statically matched to CanAddr
    let func = b.finish();

    let v_index = func.block(blk).instrs.iter().position(|&id| id == v).unwrap();
    let (called, ok) = called_from(&func, blk, v_index, ty, &[can_addr], None, None);
    assert!(ok && !called, "CanAddr should be called before calling Addr");
}

#[test]
fn s3_both_branches_guard_has_no_violation() {
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let open = interner.intern_method("open");
    let ty = interner.intern_type("handle");

    let entry = b.block();
    let then_blk = b.block();
    let else_blk = b.block();
    let join = b.block();

    let v = b.value(entry, Some(ty));
    let cond = b.value(entry, None);
    b.if_(entry, cond);
    b.connect(entry, then_blk);
    b.connect(entry, else_blk);
    b.call(then_blk, Some(open), true, &[v], None);
    b.connect(then_blk, join);
    b.call(else_blk, Some(open), true, &[v], None);
    b.connect(else_blk, join);
    let func = b.finish();

    let v_index = func.block(entry).instrs.iter().position(|&id| id == v).unwrap();
    let (called, ok) = called_from(&func, entry, v_index, ty, &[open], None, None);
    assert!(ok && called);
}

#[test]
fn s4_one_branch_misses_reports_violation() {
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let open = interner.intern_method("open");
    let close = interner.intern_method("close");
    let ty = interner.intern_type("handle");

    let entry = b.block();
    let then_blk = b.block();
    let else_blk = b.block();
    let join = b.block();

    let v = b.value(entry, Some(ty));
    let cond = b.value(entry, None);
    b.if_(entry, cond);
    b.connect(entry, then_blk);
    b.connect(entry, else_blk);
    b.call(then_blk, Some(open), true, &[v], None);
    b.connect(then_blk, join);
    b.call(else_blk, Some(close), true, &[v], None);
    b.connect(else_blk, join);
    let close_in_join = b.call(join, Some(close), true, &[v], None);
    let func = b.finish();

    // Backward from `close` in the join block: "open" must have been
    // called on every predecessor path, but the else branch only calls
    // "close", so the query disproves.
    let close_index = func.block(join).instrs.iter().position(|&id| id == close_in_join).unwrap();
    let (called, ok) = called_from_before(
        &func,
        join,
        ReceiverRef::Value { index: close_index, recv: v },
        &[open],
        None,
        None,
    );
    assert!(ok && !called, "open should be called before doing anything else");
}

#[test]
fn s5_equality_with_wrong_constant_reports_violation() {
    // if v.Kind() == Interface { v.SetPointer(p) }
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let kind = interner.intern_method("Kind");
    let interface = interner.intern_const("Interface");
    let unsafe_pointer = interner.intern_const("UnsafePointer");

    let entry = b.block();
    let then_blk = b.block();
    let else_blk = b.block();

    let v = b.value(entry, None);
    let kind_call = b.call(entry, Some(kind), true, &[v], None);
    let constant = b.reference(entry, ComparisonTarget::Const(interface));
    let cmp = b.binop(entry, BinOp::Eq, kind_call, constant);
    b.if_(entry, cmp);
    b.connect(entry, then_blk);
    b.connect(entry, else_blk);
    b.call(then_blk, None, true, &[v], None); // SetPointer(p)
    let func = b.finish();

    let proven = called_before_and_equal_to(&func, then_blk, v, kind, ComparisonTarget::Const(unsafe_pointer), None, None);
    assert!(!proven, "Kind should have been compared to UnsafePointer, not Interface");
}

#[test]
fn s6_inequality_early_return_has_no_violation_on_reach_path() {
    // if v.err() != io.EOF { return }
    // v.doSomethingSpecial()
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let err = interner.intern_method("err");
    let eof = interner.intern_const("io.EOF");

    let entry = b.block();
    let return_blk = b.block();
    let continue_blk = b.block();

    let v = b.value(entry, None);
    let err_call = b.call(entry, Some(err), true, &[v], None);
    let eof_ref = b.reference(entry, ComparisonTarget::Const(eof));
    let cmp = b.binop(entry, BinOp::Ne, err_call, eof_ref);
    b.if_(entry, cmp);
    b.connect(entry, return_blk);
    b.connect(entry, continue_blk);
    b.ret(return_blk, &[]);
    b.call(continue_blk, None, true, &[v], None); // doSomethingSpecial()
    let func = b.finish();

    let proven = called_before_and_equal_to(&func, continue_blk, v, err, ComparisonTarget::Const(eof), None, None);
    assert!(proven, "reaching continue_blk implies err() != io.EOF took the false branch, i.e. err() == io.EOF");
}

