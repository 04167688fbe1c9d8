//! Small algorithms over the container.
//!
//! Constraint graphs fed to the ordering phase must be acyclic; `topsort` and
//! `is_acyclic` let callers check that up front instead of discovering it mid-run.

use crate::Graph;
use std::collections::VecDeque;
use std::fmt;

/// The graph contains at least one directed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError;

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("graph contains at least one directed cycle")
    }
}

impl std::error::Error for CycleError {}

/// Topological order via Kahn's algorithm.
///
/// Zero-indegree nodes are seeded in insertion order and processed FIFO, so the result
/// is deterministic for a fixed construction sequence.
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Result<Vec<String>, CycleError>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let ids = g.node_ids();
    let mut indegree: rustc_hash::FxHashMap<&str, usize> = rustc_hash::FxHashMap::default();
    for v in &ids {
        indegree.insert(v.as_str(), g.in_degree(v));
    }

    let mut queue: VecDeque<&str> = ids
        .iter()
        .map(|v| v.as_str())
        .filter(|v| indegree[v] == 0)
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    while let Some(v) = queue.pop_front() {
        out.push(v.to_string());
        for w in g.successors(v) {
            let deg = indegree
                .get_mut(w)
                .expect("successor missing from indegree map");
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(w);
            }
        }
    }

    if out.len() != ids.len() {
        return Err(CycleError);
    }
    Ok(out)
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    topsort(g).is_ok()
}
