//! Barycenter weights and the constrained single-layer ordering pass.

use crate::graphlib::Graph;
use crate::resolve::{Unit, resolve_conflicts};
use crate::types::Relationship;
use crate::util::layer_pos;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    /// Mean position within the fixed layer of `v`'s relation neighbors, or `None`
    /// when `v` has none.
    pub barycenter: Option<f64>,
    /// Number of relation neighbors; `None` iff `barycenter` is.
    pub weight: Option<f64>,
}

/// Barycenter weight of every movable node against the fixed layer.
///
/// Every relation neighbor of a movable node must sit in the fixed layer; anything
/// else means the caller handed this pass non-adjacent ranks.
pub fn barycenter<N, E, G>(
    g: &Graph<N, E, G>,
    fixed: &[String],
    movable: &[String],
    relationship: Relationship,
) -> Vec<BarycenterEntry>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let fixed_pos = layer_pos(fixed);

    movable
        .iter()
        .map(|v| {
            let neighbors = match relationship {
                Relationship::InEdges => g.predecessors(v),
                Relationship::OutEdges => g.successors(v),
            };
            if neighbors.is_empty() {
                return BarycenterEntry {
                    v: v.clone(),
                    barycenter: None,
                    weight: None,
                };
            }

            let mut sum: f64 = 0.0;
            for u in &neighbors {
                let p = *fixed_pos
                    .get(u)
                    .expect("relation neighbor missing from the fixed layer");
                sum += p as f64;
            }
            let degree = neighbors.len() as f64;
            BarycenterEntry {
                v: v.clone(),
                barycenter: Some(sum / degree),
                weight: Some(degree),
            }
        })
        .collect()
}

/// Reorder `movable` against `fixed` under the constraint graph: Forster's constrained
/// two-layer barycenter heuristic, one local-improvement pass.
///
/// Constraint edges touching nodes outside `movable` are irrelevant here and dropped
/// with the induced-subgraph restriction. The restricted constraints, the unit arena,
/// and all other working state live and die inside this call.
pub fn order_layer<N, E, G, CN, CE, CG>(
    g: &Graph<N, E, G>,
    cg: &Graph<CN, CE, CG>,
    fixed: &[String],
    movable: &[String],
    relationship: Relationship,
) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
    CN: Default + Clone + 'static,
    CE: Default + Clone + 'static,
    CG: Default + Clone,
{
    let pos = layer_pos(movable);
    let entries = barycenter(g, fixed, movable, relationship);

    let cg = cg.filter_nodes(|v| pos.contains_key(v));

    let units: Vec<Unit> = entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| Unit::single(e.v, e.barycenter, e.weight, i))
        .collect();
    let constraints: Vec<(usize, usize)> = cg
        .edges()
        .map(|e| (pos[e.v.as_str()], pos[e.w.as_str()]))
        .collect();

    let mut resolved = resolve_conflicts(units, &constraints);

    resolved.units.sort_by(|x, y| {
        // Unconstrained units take the reference's -1 weight, sorting ahead of every
        // real barycenter (positions are never negative).
        let x_bc = x.barycenter.unwrap_or(-1.0);
        let y_bc = y.barycenter.unwrap_or(-1.0);
        if x_bc < y_bc {
            Ordering::Less
        } else if x_bc > y_bc {
            Ordering::Greater
        } else {
            x.pos.cmp(&y.pos)
        }
    });

    let mut out: Vec<String> = Vec::with_capacity(movable.len());
    for unit in resolved.units {
        out.extend(unit.members);
    }
    out
}
