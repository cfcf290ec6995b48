//! The checker's own SSA representation: an arena of instructions addressed
//! by newtype indices, plus the basic-block graph that threads them
//! together. Nothing here parses source — a real front-end would build one
//! of these per analyzed function and hand it to the checker.

use lasso::{Rodeo, Spur};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Index of a basic block within a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// Index of an instruction within a [`Function`]'s instruction arena.
///
/// Also serves as that instruction's SSA value identity: any instruction
/// that produces a value is referenced elsewhere by its `InstrId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrId(pub u32);

/// A statically resolved method or function identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(Spur);

/// A type identity (the receiver type a guard/observed pair is declared on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(Spur);

/// A named-constant identity (the right-hand side of a `BeforeAndEqualTo`
/// comparison, e.g. `reflect.UnsafePointer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstId(Spur);

/// Either side of an equality comparison's "other operand": a type
/// designator or a named constant. Unifies the two so callers of
/// `BeforeAndEqualTo` don't need to know which one a guard rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonTarget {
    Type(TypeId),
    Const(ConstId),
}

/// Interns the three disjoint entity namespaces. Methods, types, and
/// constants never compare equal across namespaces even if their source
/// names collide.
///
/// Entities are interned by qualified name (e.g. `"reflect.Value.Addr"`),
/// which is adequate for a single hand-built SSA graph but is a
/// simplification relative to a real front-end: that would assign each
/// declaration site its own token at parse time, so two distinct methods
/// could never collide on name alone. Callers constructing fixtures should
/// qualify names enough to avoid accidental aliasing.
#[derive(Debug, Default)]
pub struct EntityInterner {
    methods: Rodeo<Spur>,
    types: Rodeo<Spur>,
    consts: Rodeo<Spur>,
}

impl EntityInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_method(&mut self, name: &str) -> MethodId {
        MethodId(self.methods.get_or_intern(name))
    }

    pub fn intern_type(&mut self, name: &str) -> TypeId {
        TypeId(self.types.get_or_intern(name))
    }

    pub fn intern_const(&mut self, name: &str) -> ConstId {
        ConstId(self.consts.get_or_intern(name))
    }
}

/// Comparison operator recorded on a [`BinOpInstr`]. Only equality and
/// inequality matter to the checker; everything else is `Other` and never
/// participates in a `BeforeAndEqualTo` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    Ne,
    Other,
}

/// Unary operator recorded on a [`UnOpInstr`]. `Deref` is the one-level
/// pointer indirection the receiver identity oracle unwraps; `Other` covers
/// every unary op the checker doesn't care about (negation, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Deref,
    Other,
}

/// A static or resolved call. `callee` is `None` when the front-end
/// couldn't resolve the callee statically (e.g. an interface dispatch) —
/// the call matcher always rejects those since it can only compare
/// entities it knows.
#[derive(Debug, Clone)]
pub struct CallInstr {
    pub callee: Option<MethodId>,
    /// `true` when the callee's signature declares a receiver parameter,
    /// in which case `args[0]` is that receiver.
    pub has_receiver: bool,
    pub args: SmallVec<[InstrId; 4]>,
    /// Type of the value this call produces, if it produces one that
    /// matters to a receiver-identity pre-filter (e.g. a constructor call).
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct ReturnInstr {
    pub results: SmallVec<[InstrId; 2]>,
}

#[derive(Debug, Clone, Copy)]
pub struct BinOpInstr {
    pub op: BinOp,
    pub x: InstrId,
    pub y: InstrId,
}

#[derive(Debug, Clone, Copy)]
pub struct IfInstr {
    pub cond: InstrId,
}

#[derive(Debug, Clone, Copy)]
pub struct UnOpInstr {
    pub op: UnOp,
    pub x: InstrId,
    pub ty: Option<TypeId>,
}

/// A reference to a named object: a type designator or a named constant.
/// Produced as a value so it can sit on one side of a `BinOpInstr`.
#[derive(Debug, Clone, Copy)]
pub struct RefInstr {
    pub target: ComparisonTarget,
}

/// Catch-all for value-producing instructions with no structure the
/// checker inspects beyond their type: parameters, field loads, phi nodes,
/// allocations. "Any instruction may additionally be a value" is modeled
/// by this variant rather than a separate trait, since every other
/// variant already carries its own value identity (its `InstrId`).
#[derive(Debug, Clone, Copy)]
pub struct OpaqueValueInstr {
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub enum Instruction {
    Call(CallInstr),
    Return(ReturnInstr),
    BinOp(BinOpInstr),
    If(IfInstr),
    UnOp(UnOpInstr),
    Ref(RefInstr),
    Value(OpaqueValueInstr),
}

impl Instruction {
    /// The type of the value this instruction produces, if any and if the
    /// checker tracks it. `Return` and `If` never produce values.
    pub fn value_type(&self) -> Option<TypeId> {
        match self {
            Instruction::Call(c) => c.ty,
            Instruction::UnOp(u) => u.ty,
            Instruction::Value(v) => v.ty,
            Instruction::Return(_) | Instruction::BinOp(_) | Instruction::If(_) | Instruction::Ref(_) => None,
        }
    }
}

/// A basic block: an ordered instruction list plus its direct successors
/// and predecessors. Successor order matters — callers relying on
/// then/else branch selection (the equality checker) expect index 0 to be
/// the `If`'s true edge and index 1 its false edge, matching how the
/// builder wires them.
#[derive(Debug, Clone, Default)]
pub struct BasicBlock {
    pub instrs: Vec<InstrId>,
    pub succs: Vec<BlockId>,
    pub preds: Vec<BlockId>,
}

/// One function's SSA graph: the instruction arena, the block graph, and
/// the referrer sets the identity oracle and ignorance filter use to do
/// single-hop use-def lookups without re-scanning every block.
#[derive(Debug, Clone, Default)]
pub struct Function {
    blocks: Vec<BasicBlock>,
    instrs: Vec<Instruction>,
    referrers: FxHashMap<InstrId, SmallVec<[InstrId; 4]>>,
    instr_block: FxHashMap<InstrId, BlockId>,
}

impl Function {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0 as usize]
    }

    /// Fallible counterpart of [`Self::block`] for façade entry points,
    /// which must abstain rather than panic on a malformed `BlockId`.
    pub fn try_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0 as usize)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn instr(&self, id: InstrId) -> &Instruction {
        &self.instrs[id.0 as usize]
    }

    pub fn instr_count(&self) -> usize {
        self.instrs.len()
    }

    /// Every instruction recorded as having used `value` as an operand, in
    /// the order they were added. Empty slice if `value` has no referrers.
    pub fn referrers(&self, value: InstrId) -> &[InstrId] {
        self.referrers.get(&value).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The block that owns `id`. Used by the equality checker to find an
    /// `If`'s block so it can read that block's `succs`.
    pub fn block_of(&self, id: InstrId) -> BlockId {
        self.instr_block[&id]
    }

    pub(crate) fn push_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::default());
        id
    }

    pub(crate) fn push_instr(&mut self, block: BlockId, instr: Instruction) -> InstrId {
        for operand in operands_of(&instr) {
            self.referrers.entry(operand).or_default().push(InstrId(self.instrs.len() as u32));
        }
        let id = InstrId(self.instrs.len() as u32);
        self.instrs.push(instr);
        self.blocks[block.0 as usize].instrs.push(id);
        self.instr_block.insert(id, block);
        id
    }

    pub(crate) fn connect(&mut self, from: BlockId, to: BlockId) {
        self.blocks[from.0 as usize].succs.push(to);
        self.blocks[to.0 as usize].preds.push(from);
    }
}

fn operands_of(instr: &Instruction) -> SmallVec<[InstrId; 4]> {
    match instr {
        Instruction::Call(c) => c.args.clone(),
        Instruction::Return(r) => r.results.clone(),
        Instruction::BinOp(b) => SmallVec::from_slice(&[b.x, b.y]),
        Instruction::If(i) => SmallVec::from_slice(&[i.cond]),
        Instruction::UnOp(u) => SmallVec::from_slice(&[u.x]),
        Instruction::Ref(_) | Instruction::Value(_) => SmallVec::new(),
    }
}
