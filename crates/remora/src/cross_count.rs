//! Exact crossing counts between ordered layers.
//!
//! Derived from W. Barth et al., "Bilayer Cross Counting", JGAA 8(2) 179-194 (2004):
//! the number of crossings between two ordered layers equals the number of inversions
//! in the south-position sequence of the north layer's edges, and the inversions are
//! counted with an accumulator tree in O((E + |south|) log |south|).

use crate::graphlib::Graph;
use crate::util::layer_pos;

/// Total crossings of a full layering: the sum over successive layer pairs.
///
/// Pure; usable as an oracle against any layering of `g`.
pub fn cross_count<N, E, G>(g: &Graph<N, E, G>, layering: &[Vec<String>]) -> usize
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut cc = 0;
    for i in 1..layering.len() {
        cc += bilayer_cross_count(g, &layering[i - 1], &layering[i]);
    }
    cc
}

/// Exact number of edge crossings between the adjacent ordered layers `north` and
/// `south`, counting edges from `north` into `south`.
pub fn bilayer_cross_count<N, E, G>(g: &Graph<N, E, G>, north: &[String], south: &[String]) -> usize
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if south.is_empty() {
        return 0;
    }

    let south_pos = layer_pos(south);

    // South endpoints in north order, with each node's own targets sorted: edges that
    // share an origin never count against each other.
    let mut indices: Vec<usize> = Vec::new();
    for v in north {
        let mut node_indices: Vec<usize> = g
            .successors(v)
            .into_iter()
            .map(|w| {
                *south_pos
                    .get(w)
                    .expect("edge target missing from the south layer")
            })
            .collect();
        node_indices.sort_unstable();
        indices.extend(node_indices);
    }

    // Accumulator tree over the next power of two >= |south| leaves. Inserting a
    // position and summing the counts to its right while walking up yields the number
    // of earlier-inserted, larger positions, i.e. inversions.
    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0;
    for i in indices {
        let mut index = i + first_index;
        tree[index] += 1;
        while index > 0 {
            if index % 2 == 1 {
                cc += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
    }

    cc
}
