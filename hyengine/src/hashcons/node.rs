use hyterm::op::Op;
use hyterm::sort::Sort;
use num_bigint::BigInt;
use smallvec::SmallVec;
use strum::EnumIs;

/// Handle of a node in a [`HashConsEngine`](super::HashConsEngine).
///
/// Identifiers are allocated sequentially and never reused, so a child always has a smaller
/// identifier than its parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
pub enum NodeKind {
    /// Uninterpreted constant or function.
    Symbol(String),
    /// Bound parameter.
    Param(String),
    /// Literal. Bit-vectors are stored unsigned, booleans as 0 or 1.
    Value(BigInt),
    App {
        op: Op,
        children: SmallVec<NodeId, 4>,
    },
}

/// A node together with its logical sort. Two nodes with equal data are the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeData {
    pub kind: NodeKind,
    pub sort: Sort,
}

impl NodeData {
    pub fn op(&self) -> Option<&Op> {
        match &self.kind {
            NodeKind::App { op, .. } => Some(op),
            _ => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::App { children, .. } => children,
            _ => &[],
        }
    }

    pub fn value(&self) -> Option<&BigInt> {
        match &self.kind {
            NodeKind::Value(v) => Some(v),
            _ => None,
        }
    }
}
