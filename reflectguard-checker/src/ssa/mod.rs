//! The data model: SSA functions, instructions, and the entity namespaces
//! they reference.

pub mod builder;
pub mod types;

pub use builder::FunctionBuilder;
pub use types::{
    BasicBlock, BinOp, BinOpInstr, BlockId, CallInstr, ComparisonTarget, ConstId, EntityInterner,
    Function, IfInstr, InstrId, Instruction, MethodId, OpaqueValueInstr, RefInstr, ReturnInstr,
    TypeId, UnOp, UnOpInstr,
};
