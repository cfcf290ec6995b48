//! Fixture construction for synthetic SSA graphs.
//!
//! Nothing in the checker itself needs this — it exists so tests and
//! `reflectguard-bench` can build small, deterministic functions without
//! hand-indexing the instruction arena.

use smallvec::SmallVec;

use super::types::{
    BinOp, BinOpInstr, BlockId, CallInstr, ComparisonTarget, Function, IfInstr, InstrId,
    Instruction, MethodId, OpaqueValueInstr, RefInstr, ReturnInstr, TypeId, UnOp, UnOpInstr,
};

/// Builds one [`Function`] one block and instruction at a time.
#[derive(Debug, Default)]
pub struct FunctionBuilder {
    func: Function,
}

impl FunctionBuilder {
    pub fn new() -> Self {
        Self { func: Function::new() }
    }

    /// Appends a new, unconnected block and returns its id.
    pub fn block(&mut self) -> BlockId {
        self.func.push_block()
    }

    /// Records a CFG edge `from -> to`. Call in the order you want
    /// `succs`/`preds` populated — the equality checker relies on the
    /// first edge added from an `If` block being its true branch.
    pub fn connect(&mut self, from: BlockId, to: BlockId) {
        self.func.connect(from, to);
    }

    pub fn call(
        &mut self,
        block: BlockId,
        callee: Option<MethodId>,
        has_receiver: bool,
        args: &[InstrId],
        ty: Option<TypeId>,
    ) -> InstrId {
        self.func.push_instr(
            block,
            Instruction::Call(CallInstr {
                callee,
                has_receiver,
                args: SmallVec::from_slice(args),
                ty,
            }),
        )
    }

    pub fn ret(&mut self, block: BlockId, results: &[InstrId]) -> InstrId {
        self.func.push_instr(
            block,
            Instruction::Return(ReturnInstr { results: SmallVec::from_slice(results) }),
        )
    }

    pub fn binop(&mut self, block: BlockId, op: BinOp, x: InstrId, y: InstrId) -> InstrId {
        self.func.push_instr(block, Instruction::BinOp(BinOpInstr { op, x, y }))
    }

    pub fn if_(&mut self, block: BlockId, cond: InstrId) -> InstrId {
        self.func.push_instr(block, Instruction::If(IfInstr { cond }))
    }

    pub fn unop(&mut self, block: BlockId, op: UnOp, x: InstrId, ty: Option<TypeId>) -> InstrId {
        self.func.push_instr(block, Instruction::UnOp(UnOpInstr { op, x, ty }))
    }

    pub fn reference(&mut self, block: BlockId, target: ComparisonTarget) -> InstrId {
        self.func.push_instr(block, Instruction::Ref(RefInstr { target }))
    }

    pub fn value(&mut self, block: BlockId, ty: Option<TypeId>) -> InstrId {
        self.func.push_instr(block, Instruction::Value(OpaqueValueInstr { ty }))
    }

    pub fn finish(self) -> Function {
        self.func
    }
}
