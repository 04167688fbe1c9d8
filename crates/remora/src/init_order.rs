use crate::OrderNode;
use crate::graphlib::Graph;

/// Initial layering: nodes bucketed by rank, keeping the graph's insertion order within
/// each bucket.
///
/// That insertion order is the determinism anchor for the whole phase: two runs over
/// graphs built in the same sequence produce the same result.
///
/// Every node must carry a non-negative rank; a missing or negative rank is a caller
/// defect and fails immediately.
pub fn init_order<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + OrderNode + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut layering: Vec<Vec<String>> = Vec::new();
    for v in g.nodes() {
        let rank = g
            .node(v)
            .and_then(|n| n.rank())
            .expect("node is missing a rank");
        assert!(rank >= 0, "node has a negative rank");

        let idx = rank as usize;
        if idx >= layering.len() {
            layering.resize_with(idx + 1, Vec::new);
        }
        layering[idx].push(v.to_string());
    }
    layering
}
