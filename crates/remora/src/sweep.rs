//! One directional pass over the layering.

use crate::barycenter::order_layer;
use crate::cross_count::bilayer_cross_count;
use crate::graphlib::Graph;
use crate::types::Relationship;

/// Reorder every layer against its already-updated neighbor, in place, and return the
/// sum of the bilayer crossing counts along the sweep direction.
///
/// Even iterations descend: layer `i` is reordered against fixed layer `i - 1` through
/// the in-edge relation. Odd iterations ascend symmetrically through out-edges.
pub fn sweep<N, E, G, CN, CE, CG>(
    g: &Graph<N, E, G>,
    cg: &Graph<CN, CE, CG>,
    iter: usize,
    layering: &mut [Vec<String>],
) -> usize
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
    CN: Default + Clone + 'static,
    CE: Default + Clone + 'static,
    CG: Default + Clone,
{
    let mut cc = 0;
    if iter % 2 == 0 {
        for i in 1..layering.len() {
            let reordered = order_layer(
                g,
                cg,
                &layering[i - 1],
                &layering[i],
                Relationship::InEdges,
            );
            layering[i] = reordered;
            cc += bilayer_cross_count(g, &layering[i - 1], &layering[i]);
        }
    } else {
        for i in (0..layering.len().saturating_sub(1)).rev() {
            let reordered = order_layer(
                g,
                cg,
                &layering[i + 1],
                &layering[i],
                Relationship::OutEdges,
            );
            layering[i] = reordered;
            cc += bilayer_cross_count(g, &layering[i], &layering[i + 1]);
        }
    }
    cc
}
