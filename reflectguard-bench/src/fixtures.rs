//! Synthetic SSA fixtures for benchmarks: generated `Function` graphs of
//! increasing size, built with [`reflectguard_checker::ssa::FunctionBuilder`].
//! Deterministic: same seed -> same graph shape.

use reflectguard_checker::ssa::{
    BinOp, BlockId, ComparisonTarget, ConstId, EntityInterner, Function, FunctionBuilder, InstrId,
    MethodId, TypeId,
};

/// Fixture size presets. Here they size the number of diamonds (forward and
/// backward benches) or predecessor blocks (equality benches) chained into
/// one generated function, rather than files on disk.
#[derive(Debug, Clone, Copy)]
pub enum FixtureSize {
    /// ~10 diamonds/blocks — unit test scale
    Micro,
    /// ~100 diamonds/blocks — small function
    Small,
    /// ~1K diamonds/blocks — large generated function
    Medium,
    /// ~10K diamonds/blocks — pathological function
    Large,
}

impl FixtureSize {
    pub fn chain_len(&self) -> usize {
        match self {
            Self::Micro => 10,
            Self::Small => 100,
            Self::Medium => 1_000,
            Self::Large => 10_000,
        }
    }

    /// Extra opaque instructions sprinkled into each generated block, so a
    /// benchmark isn't just walking near-empty blocks.
    pub fn noise_per_block(&self) -> usize {
        match self {
            Self::Micro => 2,
            Self::Small => 4,
            Self::Medium => 4,
            Self::Large => 4,
        }
    }
}

/// A generated function plus the handles a benchmark needs to drive
/// [`reflectguard_checker::called_from`] / `called_from_before` against it.
pub struct GuardChainFixture {
    pub func: Function,
    pub entry: BlockId,
    pub tail: BlockId,
    pub receiver: InstrId,
    pub receiver_index: usize,
    pub receiver_ty: TypeId,
    pub guard: MethodId,
}

/// Builds a chain of `if`/`else` diamonds, each calling `guard` on the
/// shared receiver on *both* branches before rejoining. Forward and
/// backward queries anchored anywhere at or after the first diamond should
/// prove `guard` was called.
///
/// `miss_at`, when `Some(i)`, drops the guard call from diamond `i`'s else
/// branch, producing a function the checkers should disprove instead —
/// benchmarking the non-matching path, which walks every
/// predecessor/successor rather than stopping at the first match.
pub fn generate_guard_chain(size: FixtureSize, seed: u64, miss_at: Option<usize>) -> GuardChainFixture {
    let mut rng = SimpleRng::new(seed);
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let guard = interner.intern_method("guard");
    let ty = interner.intern_type("fixture.Receiver");

    let entry = b.block();
    let receiver = b.value(entry, Some(ty));
    add_noise(&mut b, entry, size.noise_per_block(), &mut rng);

    let mut prev_join = entry;
    for i in 0..size.chain_len() {
        let then_blk = b.block();
        let else_blk = b.block();
        let join = b.block();

        let cond = b.value(prev_join, None);
        b.if_(prev_join, cond);
        b.connect(prev_join, then_blk);
        b.connect(prev_join, else_blk);

        b.call(then_blk, Some(guard), true, &[receiver], None);
        add_noise(&mut b, then_blk, size.noise_per_block(), &mut rng);
        b.connect(then_blk, join);

        if miss_at != Some(i) {
            b.call(else_blk, Some(guard), true, &[receiver], None);
        }
        add_noise(&mut b, else_blk, size.noise_per_block(), &mut rng);
        b.connect(else_blk, join);

        prev_join = join;
    }

    let func = b.finish();
    GuardChainFixture {
        func,
        entry,
        tail: prev_join,
        receiver,
        receiver_index: 0,
        receiver_ty: ty,
        guard,
    }
}

/// A generated function plus the handles a benchmark needs to drive
/// [`reflectguard_checker::called_before_and_equal_to`] against it.
pub struct EqualityChainFixture {
    pub func: Function,
    pub block: BlockId,
    pub receiver: InstrId,
    pub guard: MethodId,
    pub object: ComparisonTarget,
    pub wrong_object: ComparisonTarget,
}

/// Builds one comparison (`guard(receiver) == want`) guarding a long,
/// otherwise unremarkable chain of blocks. Querying `before_and_equal_to`
/// from the far end of the chain walks every intervening predecessor before
/// reaching the one block that actually compares, and back again to confirm
/// the equality branch reaches the query site.
pub fn generate_equality_chain(size: FixtureSize, seed: u64) -> EqualityChainFixture {
    let mut rng = SimpleRng::new(seed);
    let mut b = FunctionBuilder::new();
    let mut interner = EntityInterner::new();
    let kind = interner.intern_method("kind");
    let want: ConstId = interner.intern_const("fixture.Want");
    let other: ConstId = interner.intern_const("fixture.Other");

    let entry = b.block();
    let receiver = b.value(entry, None);
    let kind_call = b.call(entry, Some(kind), true, &[receiver], None);
    let constant = b.reference(entry, ComparisonTarget::Const(want));
    let cmp = b.binop(entry, BinOp::Eq, kind_call, constant);
    b.if_(entry, cmp);

    let first = b.block();
    b.connect(entry, first); // succs[0]: the equality (then) branch
    let dead = b.block();
    b.connect(entry, dead); // succs[1]: never reached by the query

    add_noise(&mut b, first, size.noise_per_block(), &mut rng);
    let mut prev = first;
    let mut target = first;
    for _ in 1..size.chain_len().max(1) {
        let next = b.block();
        add_noise(&mut b, next, size.noise_per_block(), &mut rng);
        b.connect(prev, next);
        prev = next;
        target = next;
    }

    let func = b.finish();
    EqualityChainFixture {
        func,
        block: target,
        receiver,
        guard: kind,
        object: ComparisonTarget::Const(want),
        wrong_object: ComparisonTarget::Const(other),
    }
}

fn add_noise(b: &mut FunctionBuilder, block: BlockId, count: usize, rng: &mut SimpleRng) {
    for _ in 0..count {
        if rng.next_u64() % 2 == 0 {
            b.value(block, None);
        } else {
            b.call(block, None, false, &[], None);
        }
    }
}

/// Simple deterministic PRNG (xorshift64) for reproducible fixtures.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: if seed == 0 { 1 } else { seed } }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}
