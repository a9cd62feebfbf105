//! A crate for working with fixed-width bit-vector expressions.
//!
//! The core is a hash-consed expression DAG (`base::BvBase`) over
//! packed node references (`nid::NID`), a propagation-based local
//! search engine that hunts for satisfying assignments by walking the
//! DAG from falsified roots down to inputs (`prop::PropSolver`), and an
//! SMT-LIB v2 printer (`smt`).

#![allow(clippy::many_single_char_names)]

#[macro_use] extern crate log;

/// Bit-vector values: arbitrary-width unsigned integers.
pub mod bv;
pub use bv::BV;

/// Node IDs (packed references into a BvBase).
pub mod nid;
pub use nid::NID;

/// Expression nodes: kinds, sorts, per-node data.
pub mod node;

/// The expression base: hash-consing, refcounts, builders.
pub mod base;
pub use base::BvBase;

/// Engine and printer options.
pub mod opt;

/// Deterministic random number generation.
pub mod rng;

/// Candidate models (node id -> bit-vector assignment).
pub mod model;

/// Propagation-based local-search solver.
pub mod prop;
pub use prop::{PropSolver, Status};

/// SMT-LIB v2 output.
pub mod smt;
