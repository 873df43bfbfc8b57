//! # QUBO encoders
//!
//! One encoder per graph problem. Each one picks a penalty weight `p` from the input, large
//! enough that breaking any constraint costs more than the objective can ever gain, and then adds
//! the constraint penalties and the objective into a [`QuboBuilder`](crate::qubo::QuboBuilder).
//!
//! - [`apsp`]: shortest path between a chosen source and target
//! - [`community`]: modularity style community assignment
//! - [`isomorphism`]: edge preserving vertex bijection

pub mod apsp;
pub mod community;
pub mod isomorphism;

pub use apsp::create_qubo_apsp;
pub use community::create_qubo_cd;
pub use isomorphism::create_qubo_gi;
