//! Constraint violation search and repair.
//!
//! A constraint edge `(s, t)` demands that `s` end up left of `t`. The barycenter pass
//! attests that order only when `s`'s weight is strictly smaller, so any edge whose
//! source weighs at least as much as its target is violated and the two endpoints are
//! merged into one compound unit that moves as a block.
//!
//! Units live in an index-addressed arena: a merge retires its two operands and appends
//! the compound at a fresh index, and constraints are plain index pairs rewired onto
//! the compound. Nothing is deleted mid-scan, so there is no iterator invalidation to
//! reason about, and the arena is discarded with the layer-ordering call that built it.

use rustc_hash::FxHashSet as HashSet;

/// One ordering unit: a single node, or the compound formed by merging the endpoints of
/// violated constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Mean fixed-layer position of the unit's relation neighbors; `None` when the unit
    /// has no such neighbors. An unconstrained unit compares below every real
    /// barycenter (legitimate positions are non-negative).
    pub barycenter: Option<f64>,
    /// Total neighbor-relation degree of the unit's members; `None` iff `barycenter`
    /// is. Drives the weighted average when units merge.
    pub weight: Option<f64>,
    /// Tie-break position: the smallest original index among the members.
    pub pos: usize,
    /// Member node ids, left to right. Merging concatenates source members before
    /// target members.
    pub members: Vec<String>,
}

impl Unit {
    pub fn single(
        v: impl Into<String>,
        barycenter: Option<f64>,
        weight: Option<f64>,
        pos: usize,
    ) -> Self {
        Self {
            barycenter,
            weight,
            pos,
            members: vec![v.into()],
        }
    }
}

/// Outcome of resolution: the surviving units and the constraints rewired onto them
/// (index pairs into `units`). Re-running [`find_violation`] over a `Resolved` always
/// yields `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub units: Vec<Unit>,
    pub constraints: Vec<(usize, usize)>,
}

/// Repeatedly find one violated constraint and merge its endpoints until none remains.
///
/// `constraints` are index pairs into `units`. Each repair retires two units and
/// appends one, so at most `units.len() - 1` repairs run.
pub fn resolve_conflicts(units: Vec<Unit>, constraints: &[(usize, usize)]) -> Resolved {
    let mut arena: Vec<Option<Unit>> = units.into_iter().map(Some).collect();
    let mut edges: Vec<(usize, usize)> = constraints.to_vec();

    loop {
        let violation = {
            let slots: Vec<Option<&Unit>> = arena.iter().map(|s| s.as_ref()).collect();
            scan(&slots, &edges)
        };
        let Some((s, t)) = violation else {
            break;
        };

        let left = arena[s].take().expect("violation source already merged");
        let right = arena[t].take().expect("violation target already merged");
        let compound = merge_units(left, right);

        let m = arena.len();
        arena.push(Some(compound));
        rewire(&mut edges, s, t, m);
    }

    // Compact live slots; constraints follow their endpoints to the new indices.
    let mut remap: Vec<Option<usize>> = vec![None; arena.len()];
    let mut out_units: Vec<Unit> = Vec::new();
    for (i, slot) in arena.into_iter().enumerate() {
        if let Some(unit) = slot {
            remap[i] = Some(out_units.len());
            out_units.push(unit);
        }
    }
    let out_constraints = edges
        .into_iter()
        .map(|(a, b)| {
            (
                remap[a].expect("constraint source not live"),
                remap[b].expect("constraint target not live"),
            )
        })
        .collect();

    Resolved {
        units: out_units,
        constraints: out_constraints,
    }
}

/// First violated constraint in a deterministic topological scan, or `None`.
///
/// Zero-indegree units are seeded in ascending index order and popped from the end;
/// when a unit's last incoming constraint has been delivered, its incoming constraints
/// are checked in delivery order. Which violation is found first is a tie-break
/// heuristic, not a correctness requirement, but it must be stable.
pub fn find_violation(units: &[Unit], constraints: &[(usize, usize)]) -> Option<(usize, usize)> {
    let slots: Vec<Option<&Unit>> = units.iter().map(Some).collect();
    scan(&slots, constraints)
}

fn scan(slots: &[Option<&Unit>], edges: &[(usize, usize)]) -> Option<(usize, usize)> {
    let n = slots.len();
    let mut indegree: Vec<usize> = vec![0; n];
    let mut outs: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (ei, &(s, t)) in edges.iter().enumerate() {
        debug_assert!(slots[s].is_some() && slots[t].is_some(), "constraint endpoint retired");
        indegree[t] += 1;
        outs[s].push(ei);
    }

    let mut active: Vec<usize> = (0..n)
        .filter(|&i| slots[i].is_some() && indegree[i] == 0)
        .collect();
    let mut delivered: Vec<Vec<usize>> = vec![Vec::new(); n];

    while let Some(u) = active.pop() {
        for &ei in &delivered[u] {
            let (s, _) = edges[ei];
            let source = slots[s].expect("delivered constraint from retired unit");
            let target = slots[u].expect("active unit retired");
            if violated(source.barycenter, target.barycenter) {
                return Some(edges[ei]);
            }
        }
        for &ei in &outs[u] {
            let (_, t) = edges[ei];
            delivered[t].push(ei);
            indegree[t] -= 1;
            if indegree[t] == 0 {
                active.push(t);
            }
        }
    }

    None
}

// The reference ordering treats "no neighbors" as a weight of -1, below every real
// barycenter. The tagged form has to reproduce those comparisons exactly: a source
// outweighs an unconstrained target, an unconstrained source never outweighs a real
// target, and two unconstrained endpoints tie (which violates `>=`).
fn violated(source: Option<f64>, target: Option<f64>) -> bool {
    match (source, target) {
        (Some(s), Some(t)) => s >= t,
        (None, Some(_)) => false,
        (_, None) => true,
    }
}

// Degree-weighted average of the endpoints. Unconstrained operands carry no degree and
// contribute nothing; merging two of them yields another unconstrained unit.
fn merge_units(source: Unit, target: Unit) -> Unit {
    let mut sum: f64 = 0.0;
    let mut weight: f64 = 0.0;
    if let (Some(b), Some(w)) = (source.barycenter, source.weight) {
        if w != 0.0 {
            sum += b * w;
            weight += w;
        }
    }
    if let (Some(b), Some(w)) = (target.barycenter, target.weight) {
        if w != 0.0 {
            sum += b * w;
            weight += w;
        }
    }

    let mut members = source.members;
    members.extend(target.members);

    let (barycenter, weight) = if weight != 0.0 {
        (Some(sum / weight), Some(weight))
    } else {
        (None, None)
    };

    Unit {
        barycenter,
        weight,
        pos: source.pos.min(target.pos),
        members,
    }
}

// Point every constraint formerly incident to `s` or `t` at the compound `m`, dropping
// the self-loops and duplicates this produces.
fn rewire(edges: &mut Vec<(usize, usize)>, s: usize, t: usize, m: usize) {
    let old = std::mem::take(edges);
    let mut seen: HashSet<(usize, usize)> = HashSet::default();
    for (mut a, mut b) in old {
        if a == s || a == t {
            a = m;
        }
        if b == s || b == t {
            b = m;
        }
        if a == b {
            continue;
        }
        if seen.insert((a, b)) {
            edges.push((a, b));
        }
    }
}
