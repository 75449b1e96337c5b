//! Boundary between the term layer and a solving engine.
//!
//! An engine owns opaque node handles and may rewrite any construction into an existing
//! node. Everything the adapters need from it is listed in [`Engine`]; node identity in
//! particular goes through [`Engine::same_node`] rather than handle comparison so adapters
//! stay portable across handle representations.
use hyterm::error::TermResult;
use hyterm::op::Op;
use hyterm::sort::{Sort, SortKind};
use num_bigint::BigInt;

/// Operations consumed from a solving engine.
///
/// All construction methods are synchronous. The engine is shared by every term built from
/// it; interleaving constructions from several threads on one instance is the caller's
/// responsibility.
pub trait Engine: Send + Sync + 'static {
    /// Opaque node handle, meaningful only for the instance that created it.
    type Node: Clone + Send + Sync + std::fmt::Debug + 'static;

    fn mk_symbol(&self, name: &str, sort: &Sort) -> TermResult<Self::Node>;

    fn mk_param(&self, name: &str, sort: &Sort) -> TermResult<Self::Node>;

    fn mk_value(&self, value: &BigInt, sort: &Sort) -> TermResult<Self::Node>;

    fn mk_bool(&self, value: bool) -> TermResult<Self::Node>;

    /// Build `op(children)`. The engine may return any node it deems equivalent, including
    /// one of `children`.
    fn mk_term(&self, op: &Op, children: &[Self::Node]) -> TermResult<Self::Node>;

    /// Engine-internal identifier of a node.
    fn node_id(&self, node: &Self::Node) -> u64;

    /// Whether two handles designate the same underlying node.
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool {
        self.node_id(a) == self.node_id(b)
    }

    /// Symbol attached to a node, if any.
    fn symbol(&self, node: &Self::Node) -> Option<String>;

    /// Attach `symbol` to `node` unless it already carries one. Returns whether the symbol
    /// was attached.
    fn set_symbol(&self, node: &Self::Node, symbol: &str) -> bool;

    fn is_value(&self, node: &Self::Node) -> bool;

    fn is_param(&self, node: &Self::Node) -> bool;

    /// Uninterpreted constants and functions.
    fn is_uninterpreted_const(&self, node: &Self::Node) -> bool;

    /// Sort as the engine sees it, possibly aliased.
    fn sort_of(&self, node: &Self::Node) -> Sort;

    fn print_value_as(&self, node: &Self::Node, kind: SortKind) -> TermResult<String>;

    fn to_int(&self, node: &Self::Node) -> TermResult<u64>;

    /// Native rendering of a node.
    fn dump(&self, node: &Self::Node) -> String;
}
