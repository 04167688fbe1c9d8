//! Helpers shared across the ordering phase.

use crate::OrderNode;
use crate::graphlib::Graph;
use rustc_hash::FxHashMap as HashMap;

/// Position of every node within `layer`, keyed by id.
pub(crate) fn layer_pos(layer: &[String]) -> HashMap<&str, usize> {
    let mut pos: HashMap<&str, usize> = HashMap::default();
    for (i, v) in layer.iter().enumerate() {
        pos.insert(v.as_str(), i);
    }
    pos
}

/// Rebuild a layering from the `rank` and `order` values written on the graph.
///
/// The inverse of the optimizer's write-back: layer index is the rank, and nodes within
/// a layer are sorted by their recorded order.
pub fn build_layer_matrix<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + OrderNode + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut max_rank: i32 = i32::MIN;
    let mut ranks: HashMap<i32, Vec<(usize, String)>> = HashMap::default();
    for v in g.nodes() {
        let Some(node) = g.node(v) else { continue };
        let Some(rank) = node.rank() else { continue };
        let order = node.order().unwrap_or(0);
        ranks.entry(rank).or_default().push((order, v.to_string()));
        max_rank = max_rank.max(rank);
    }

    if max_rank == i32::MIN {
        return Vec::new();
    }

    let mut out: Vec<Vec<String>> = Vec::with_capacity((max_rank + 1).max(0) as usize);
    for rank in 0..=max_rank {
        let mut entries = ranks.remove(&rank).unwrap_or_default();
        entries.sort_by_key(|(o, _)| *o);
        out.push(entries.into_iter().map(|(_, v)| v).collect());
    }
    out
}
