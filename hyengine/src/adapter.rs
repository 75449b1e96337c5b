//! Terms backed directly by engine nodes.
//!
//! An [`AdapterTerm`] owns a node handle together with the operator and children it was
//! built from. Engines may answer a construction with the node of one of the children
//! (e.g. `(and x x)` becomes `x`); construction detects this and adopts the child's
//! identity so that operator, children and node always describe the same logical term.
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use hyterm::error::TermResult;
use hyterm::op::Op;
use hyterm::sort::{Sort, SortKind};
use hyterm::term::iter::{SliceTermIter, TermIter};
use hyterm::term::{AbsTerm, Term, TermVec};
use log::{debug, trace};
use once_cell::sync::OnceCell;

use crate::engine::Engine;

pub struct AdapterTerm<E: Engine> {
    engine: Arc<E>,
    node: E::Node,
    children: Arc<[Term]>,
    op: Option<Op>,
    is_sym: bool,
    repr: OnceCell<String>,
}

impl<E: Engine> AdapterTerm<E> {
    /// Wrap `node`, which the engine returned when asked for `op(children)`.
    ///
    /// If the engine collapsed the construction onto one of `children`, the term takes over
    /// that child's node, operator and children. When several children qualify the first
    /// one, in operand order, wins. A collapse onto some other literal, symbol or parameter
    /// drops the requested operator and children, so leaf nodes never carry either.
    pub fn new(
        engine: Arc<E>,
        node: E::Node,
        children: TermVec,
        op: Option<Op>,
        is_sym: bool,
    ) -> Self {
        let mut term = Self {
            engine,
            node,
            children: children.into(),
            op,
            is_sym,
            repr: OnceCell::new(),
        };
        term.reconcile();
        term.annotate();
        term
    }

    /// Engine node behind this term.
    #[inline]
    pub fn node(&self) -> &E::Node {
        &self.node
    }

    #[inline]
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Children after reconciliation.
    #[inline]
    pub fn children(&self) -> &[Term] {
        &self.children
    }

    /// Downcast `term` to an adapter term of the same engine instance.
    pub fn same_engine<'a>(&self, term: &'a Term) -> Option<&'a AdapterTerm<E>> {
        term.downcast_ref::<AdapterTerm<E>>()
            .filter(|t| Arc::ptr_eq(&t.engine, &self.engine))
    }

    fn reconcile(&mut self) {
        let adopted = self.children.iter().find_map(|c| {
            self.same_engine(c)
                .filter(|c| self.engine.same_node(&self.node, &c.node))
                .map(|c| (c.node.clone(), c.children.clone(), c.op.clone(), c.is_sym))
        });

        if let Some((node, children, op, is_sym)) = adopted {
            debug!(
                "Engine rewrote `{}` with {} children onto a child node {}",
                self.op.as_ref().map(|o| o.to_string()).unwrap_or_default(),
                self.children.len(),
                self.engine.node_id(&node)
            );
            self.node = node;
            self.children = children;
            self.op = op;
            self.is_sym = is_sym;
        } else if !self.children.is_empty() && self.is_leaf() {
            debug!(
                "Engine rewrote `{}` with {} children onto leaf node {}",
                self.op.as_ref().map(|o| o.to_string()).unwrap_or_default(),
                self.children.len(),
                self.engine.node_id(&self.node)
            );
            self.children = Arc::from(Vec::new());
            self.op = None;
            self.is_sym = self.engine.is_uninterpreted_const(&self.node);
        }
    }

    /// Literals, symbols and parameters have neither operator nor children.
    fn is_leaf(&self) -> bool {
        self.engine.is_value(&self.node)
            || self.engine.is_param(&self.node)
            || self.engine.is_uninterpreted_const(&self.node)
    }

    /// Give structured nodes a readable symbol. Nodes shared by several terms keep the first
    /// symbol they received.
    fn annotate(&self) {
        if self.children.is_empty()
            || self.is_leaf()
            || self.engine.symbol(&self.node).is_some()
        {
            return;
        }
        let Some(op) = &self.op else {
            return;
        };

        let mut symbol = String::from("(");
        symbol.push_str(&op.to_string());
        for c in self.children.iter() {
            symbol.push(' ');
            symbol.push_str(&c.repr());
        }
        symbol.push(')');

        if self.engine.set_symbol(&self.node, &symbol) {
            trace!(
                "Annotated node {} with `{}`",
                self.engine.node_id(&self.node),
                symbol
            );
        }
    }
}

impl<E: Engine> std::fmt::Debug for AdapterTerm<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterTerm")
            .field("node", &self.node)
            .field("op", &self.op)
            .field("children", &self.children.len())
            .field("is_sym", &self.is_sym)
            .finish()
    }
}

impl<E: Engine> AbsTerm for AdapterTerm<E> {
    fn get_op(&self) -> Option<Op> {
        self.op.clone()
    }

    fn get_sort(&self) -> Sort {
        self.engine.sort_of(&self.node)
    }

    fn is_symbol(&self) -> bool {
        self.is_sym || self.engine.is_param(&self.node)
    }

    fn is_param(&self) -> bool {
        self.engine.is_param(&self.node)
    }

    fn is_symbolic_const(&self) -> bool {
        self.engine.is_uninterpreted_const(&self.node) && !self.get_sort().is_function()
    }

    fn is_value(&self) -> bool {
        self.engine.is_value(&self.node)
    }

    fn repr(&self) -> String {
        self.repr
            .get_or_init(|| {
                self.engine
                    .symbol(&self.node)
                    .unwrap_or_else(|| self.engine.dump(&self.node))
            })
            .clone()
    }

    fn to_int(&self) -> TermResult<u64> {
        self.engine.to_int(&self.node)
    }

    fn print_value_as(&self, kind: SortKind) -> TermResult<String> {
        self.engine.print_value_as(&self.node, kind)
    }

    fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.engine.node_id(&self.node).hash(&mut hasher);
        hasher.finish()
    }

    fn compare(&self, other: &Term) -> bool {
        let Some(other) = self.same_engine(other) else {
            return false;
        };

        self.op == other.op
            && self.engine.same_node(&self.node, &other.node)
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a == b)
    }

    fn begin(&self) -> TermIter {
        SliceTermIter::begin(&self.children)
    }

    fn end(&self) -> TermIter {
        SliceTermIter::end(&self.children)
    }
}
