//! Directed graph containers used by `remora`.
//!
//! The ordering phase consumes two graph shapes through the same container: the layered
//! graph being ordered (nodes carry rank/order labels) and the constraint graph whose
//! edge `(u, v)` means "u must end up left of v". Both are directed simple graphs, so
//! this crate intentionally supports nothing else: no multigraphs, no compound nodes.
//!
//! Node iteration follows insertion order. Callers rely on that: the ordering heuristic
//! is only deterministic because `nodes()` replays the order in which nodes were added.

use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};

pub mod alg;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Identity of a directed edge. With multigraphs out of scope, the endpoint pair is the
/// whole key.
#[derive(Debug, Clone)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
    }
}

// Borrowed-key lookups into the edge index without allocating a fresh EdgeKey.
#[derive(Clone, Copy, Hash)]
struct EdgeKeyView<'a> {
    v: &'a str,
    w: &'a str,
}

impl hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

/// Directed simple graph with node labels `N`, edge labels `E`, and a graph label `G`.
///
/// Neighbor queries (`predecessors`, `successors`, `in_edges`, `out_edges`) are served
/// from per-node adjacency lists maintained on every mutation. The ordering sweeps call
/// them once per node per pass, so scanning the edge list per query would make a single
/// sweep O(V * E).
pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    graph_label: G,
    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Successor / predecessor ids per node, in edge insertion order.
    outs: HashMap<String, Vec<String>>,
    ins: HashMap<String, Vec<String>>,
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new() -> Self {
        Self {
            graph_label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            outs: HashMap::default(),
            ins: HashMap::default(),
        }
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };

        self.nodes.remove(idx);
        for i in idx..self.nodes.len() {
            let node_id = self.nodes[i].id.as_str();
            if let Some(v) = self.node_index.get_mut(node_id) {
                *v = i;
            }
        }

        // Unlink the node from its neighbors' adjacency, then drop incident edges.
        if let Some(ws) = self.outs.remove(id) {
            for w in ws {
                if let Some(ins) = self.ins.get_mut(&w) {
                    ins.retain(|u| u != id);
                }
            }
        }
        if let Some(us) = self.ins.remove(id) {
            for u in us {
                if let Some(outs) = self.outs.get_mut(&u) {
                    outs.retain(|w| w != id);
                }
            }
        }

        let mut removed_any_edge = false;
        for e in &self.edges {
            if e.key.v == id || e.key.w == id {
                removed_any_edge = true;
                let _ = self.edge_index.remove_entry(&e.key);
            }
        }
        if removed_any_edge {
            self.edges.retain(|e| e.key.v != id && e.key.w != id);
            for (i, e) in self.edges.iter().enumerate() {
                if let Some(v) = self.edge_index.get_mut(&e.key) {
                    *v = i;
                }
            }
        }

        true
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), Some(label))
    }

    fn set_edge_inner(&mut self, v: String, w: String, label: Option<E>) -> &mut Self {
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let key = EdgeKey { v, w };
        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.outs
            .entry(key.v.clone())
            .or_default()
            .push(key.w.clone());
        self.ins
            .entry(key.w.clone())
            .or_default()
            .push(key.v.clone());

        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index.contains_key(&EdgeKeyView { v, w })
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        let idx = *self.edge_index.get(&EdgeKeyView { v, w })?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str) -> Option<&mut E> {
        let idx = *self.edge_index.get(&EdgeKeyView { v, w })?;
        Some(&mut self.edges[idx].label)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        let Some(idx) = self.edge_index.get(&EdgeKeyView { v, w }).copied() else {
            return false;
        };

        let _ = self.edge_index.remove_entry(&self.edges[idx].key);
        self.edges.remove(idx);
        for i in idx..self.edges.len() {
            let k = &self.edges[i].key;
            if let Some(pos) = self.edge_index.get_mut(k) {
                *pos = i;
            }
        }

        if let Some(ws) = self.outs.get_mut(v) {
            ws.retain(|x| x != w);
        }
        if let Some(us) = self.ins.get_mut(w) {
            us.retain(|x| x != v);
        }
        true
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        self.outs
            .get(v)
            .map(|ws| ws.iter().map(|w| w.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        self.ins
            .get(v)
            .map(|us| us.iter().map(|u| u.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.outs
            .get(v)
            .map(|ws| {
                ws.iter()
                    .map(|w| EdgeKey::new(v.to_string(), w.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.ins
            .get(v)
            .map(|us| {
                us.iter()
                    .map(|u| EdgeKey::new(u.clone(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.outs.get(v).map(|ws| ws.len()).unwrap_or(0)
    }

    pub fn in_degree(&self, v: &str) -> usize {
        self.ins.get(v).map(|us| us.len()).unwrap_or(0)
    }

    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| self.in_degree(&n.id) == 0)
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| self.out_degree(&n.id) == 0)
            .map(|n| n.id.as_str())
            .collect()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default + Clone,
{
    /// Induced subgraph over the nodes accepted by `predicate`, as an independent copy.
    ///
    /// Surviving nodes keep their relative insertion order; an edge survives only if
    /// both endpoints do.
    pub fn filter_nodes(&self, mut predicate: impl FnMut(&str) -> bool) -> Self {
        let mut out: Self = Graph::new();
        out.set_graph(self.graph_label.clone());

        for n in &self.nodes {
            if predicate(&n.id) {
                out.set_node(n.id.clone(), n.label.clone());
            }
        }
        for e in &self.edges {
            if out.has_node(&e.key.v) && out.has_node(&e.key.w) {
                out.set_edge_with_label(e.key.v.clone(), e.key.w.clone(), e.label.clone());
            }
        }
        out
    }
}
