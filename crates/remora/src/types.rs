//! Label contract and shared types for the ordering phase.

/// Which neighbor relation a sweep reads: in-edges when descending (the fixed layer is
/// above the movable one), out-edges when ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    InEdges,
    OutEdges,
}

/// What the ordering phase needs from a node label: a readable rank and a writable
/// order slot.
pub trait OrderNode {
    fn rank(&self) -> Option<i32>;
    fn order(&self) -> Option<usize>;
    fn set_order(&mut self, order: usize);
}

/// Minimal node label for graphs that carry nothing beyond rank and order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeLabel {
    pub rank: Option<i32>,
    pub order: Option<usize>,
}

impl NodeLabel {
    pub fn at_rank(rank: i32) -> Self {
        Self {
            rank: Some(rank),
            order: None,
        }
    }
}

impl OrderNode for NodeLabel {
    fn rank(&self) -> Option<i32> {
        self.rank
    }

    fn order(&self) -> Option<usize> {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }
}
