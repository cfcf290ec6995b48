//! SSA-level call-precedence checker: a reachability engine over an SSA
//! control-flow graph that decides whether a guarded method has been
//! called on a receiver along every path reaching an observed call site,
//! optionally requiring the guard's result to have been compared to a
//! specific constant or type.
//!
//! The SSA-producing front end, the rule harness that drives this engine
//! with concrete (method, guard, constant) triples, and diagnostic
//! rendering are all out of scope — see [`ssa::builder`] for how a caller
//! builds the graph this crate queries.

pub mod backward;
pub mod call_matcher;
pub mod equality;
pub mod forward;
pub mod identity;
pub mod ignorance;
pub mod query;
pub mod ssa;

mod receiver_walk;

pub use query::{called, called_before_and_equal_to, called_from, called_from_after, called_from_before, return_receiver_if_called, ReceiverRef};
