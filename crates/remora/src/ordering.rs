//! Top-level controller for the ordering phase.

use crate::OrderNode;
use crate::graphlib::Graph;
use crate::init_order::init_order;
use crate::sweep::sweep;
use std::time::Instant;
use tracing::debug;

/// Knobs for [`order`]. `debug_level` is purely observational: `>= 2` emits a run
/// summary, `>= 3` additionally emits per-round crossing counts, all through `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct OrderOptions {
    /// Maximum number of sweep rounds.
    pub iterations: usize,
    pub debug_level: u8,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            iterations: 24,
            debug_level: 0,
        }
    }
}

/// Order every layer of `g` under the constraint graph `cg`, where a constraint edge
/// `(u, v)` requires `u` to end up left of `v`.
///
/// Runs up to `opts.iterations` alternating sweeps, keeping the lowest-crossing
/// layering seen and giving up after 4 consecutive rounds without improvement. The
/// winning layering is returned, and each node's 0-based index within its layer is
/// written back through [`OrderNode::set_order`].
///
/// Deterministic for a fixed node insertion order; no minimality guarantee.
pub fn order<N, E, G, CN, CE, CG>(
    g: &mut Graph<N, E, G>,
    cg: &Graph<CN, CE, CG>,
    opts: OrderOptions,
) -> Vec<Vec<String>>
where
    N: Default + OrderNode + 'static,
    E: Default + 'static,
    G: Default,
    CN: Default + Clone + 'static,
    CE: Default + Clone + 'static,
    CG: Default + Clone,
{
    let start = Instant::now();

    let mut layering = init_order(g);
    let mut best_layering = layering.clone();
    let mut best_cc = usize::MAX;

    let mut i = 0;
    let mut last_best = 0;
    while last_best < 4 && i < opts.iterations {
        let cc = sweep(g, cg, i, &mut layering);
        if cc < best_cc {
            best_layering = layering.clone();
            best_cc = cc;
            last_best = 0;
        }
        if opts.debug_level >= 3 {
            debug!(iteration = i, cross_count = best_cc, "ordering sweep");
        }
        i += 1;
        last_best += 1;
    }

    for layer in &best_layering {
        for (idx, v) in layer.iter().enumerate() {
            g.node_mut(v)
                .expect("layering names a node absent from the graph")
                .set_order(idx);
        }
    }

    if opts.debug_level >= 2 {
        debug!(
            iterations = i,
            cross_count = best_cc,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ordering phase complete"
        );
    }

    best_layering
}
