//! Crossing-minimization node ordering for layered graph layouts.
//!
//! Given a directed graph whose nodes already carry ranks, this crate assigns every
//! node a left-to-right position within its rank so that edges between adjacent ranks
//! cross as little as the heuristic can manage. Exact minimization is NP-hard; the
//! approach here is the classic one from layered drawing pipelines: barycenter sweeps
//! of alternating direction scored by an exact bilayer crossing counter, with
//! "must be left of" constraints repaired by merging conflicting nodes into compound
//! units (Forster, "A Fast and Simple Heuristic for Constrained Two-Level Crossing
//! Reduction").
//!
//! Rank assignment, coordinate assignment, and edge routing are out of scope; the
//! caller brings a ranked graph and takes back per-node `order` values.

pub use remora_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod types;
pub use types::{NodeLabel, OrderNode, Relationship};

mod init_order;
pub use init_order::init_order;

mod barycenter;
pub use barycenter::{BarycenterEntry, barycenter, order_layer};

mod resolve;
pub use resolve::{Resolved, Unit, find_violation, resolve_conflicts};

mod cross_count;
pub use cross_count::{bilayer_cross_count, cross_count};

mod sweep;
pub use sweep::sweep;

mod ordering;
pub use ordering::{OrderOptions, order};

pub mod util;
