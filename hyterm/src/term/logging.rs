//! Engine-independent wrapper terms.
//!
//! A [`LoggingTerm`] pairs a wrapped term (whatever the underlying engine produced) with
//! the operator, sort and children the caller asked for. Engines may simplify a fresh
//! construction into some other node; the wrapper keeps answering with the requested shape.
//!
//! Role
//! - Equality, rendering and classification are computed from the recorded state.
//! - Hashing, integer extraction, raw rendering and value printing are forwarded to the
//!   wrapped term.
//!
//! Construction modes
//! - [`LoggingTerm::structural`]: operator applied to children, rendered lazily as
//!   `(op child_1 ... child_n)`.
//! - [`LoggingTerm::symbol`]: symbols and bound parameters, with a representation fixed up
//!   front.
//! - [`LoggingTerm::value`]: literals, rendered by the wrapped term.
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::TermResult;
use crate::op::Op;
use crate::sort::{Sort, SortKind};
use crate::term::iter::{SliceTermIter, TermIter};
use crate::term::{AbsTerm, Term, TermVec};

#[derive(Debug)]
pub struct LoggingTerm {
    wrapped: Term,
    sort: Sort,
    op: Option<Op>,
    children: Arc<[Term]>,
    repr: OnceCell<String>,
    raw_repr: OnceCell<String>,
    is_sym: bool,
    is_par: bool,
}

impl LoggingTerm {
    /// Wrap an application of `op` to `children`. The representation is computed on first
    /// request.
    pub fn structural(wrapped: Term, sort: Sort, op: Op, children: TermVec) -> Self {
        Self {
            wrapped,
            sort,
            op: Some(op),
            children: children.into(),
            repr: OnceCell::new(),
            raw_repr: OnceCell::new(),
            is_sym: false,
            is_par: false,
        }
    }

    /// Wrap a literal. Rendering is left to the wrapped term's value printer.
    pub fn value(wrapped: Term, sort: Sort) -> Self {
        Self {
            wrapped,
            sort,
            op: None,
            children: Arc::from(Vec::new()),
            repr: OnceCell::new(),
            raw_repr: OnceCell::new(),
            is_sym: false,
            is_par: false,
        }
    }

    /// Wrap a symbol (`is_sym`) or a bound parameter (`!is_sym`) with a fixed
    /// representation.
    pub fn symbol(wrapped: Term, sort: Sort, repr: impl Into<String>, is_sym: bool) -> Self {
        Self {
            wrapped,
            sort,
            op: None,
            children: Arc::from(Vec::new()),
            repr: OnceCell::with_value(repr.into()),
            raw_repr: OnceCell::new(),
            is_sym,
            is_par: !is_sym,
        }
    }

    /// Term produced by the underlying layer.
    #[inline]
    pub fn wrapped(&self) -> &Term {
        &self.wrapped
    }

    /// Recorded children, in construction order.
    #[inline]
    pub fn children(&self) -> &[Term] {
        &self.children
    }

    /// Whether the textual form has already been computed.
    #[inline]
    pub fn is_repr_cached(&self) -> bool {
        self.repr.get().is_some()
    }

    /// Native rendering of the wrapped term, which may reflect engine simplifications.
    pub fn raw_repr(&self) -> String {
        self.raw_repr.get_or_init(|| self.wrapped.repr()).clone()
    }

    fn compute_repr(&self) -> String {
        // Values come from the engine (e.g. model values) and cannot be rebuilt here.
        if self.op.is_none() && self.is_value() {
            return self
                .wrapped
                .print_value_as(self.sort.kind())
                .unwrap_or_else(|err| panic!("engine failed to print value {:?}: {err}", self));
        }

        let Some(op) = &self.op else {
            panic!(
                "structural term without operator nor value: {:?} (symbols must carry their representation)",
                self.wrapped
            );
        };

        let mut repr = String::from("(");
        repr.push_str(&op.to_string());
        for c in self.children.iter() {
            repr.push(' ');
            repr.push_str(&c.repr());
        }
        repr.push(')');
        repr
    }
}

impl AbsTerm for LoggingTerm {
    fn get_op(&self) -> Option<Op> {
        self.op.clone()
    }

    fn get_sort(&self) -> Sort {
        self.sort.clone()
    }

    fn is_symbol(&self) -> bool {
        self.is_sym || self.is_par
    }

    fn is_param(&self) -> bool {
        self.op.is_none() && self.is_par
    }

    fn is_symbolic_const(&self) -> bool {
        self.is_sym && !self.sort.is_function()
    }

    fn is_value(&self) -> bool {
        // The engine may have turned a non-value into a value, so the recorded op decides.
        self.op.is_none() && self.wrapped.is_value()
    }

    /// # Panics
    /// If the term has no operator and is neither a symbol nor a value.
    fn repr(&self) -> String {
        self.repr.get_or_init(|| self.compute_repr()).clone()
    }

    fn to_int(&self) -> TermResult<u64> {
        self.wrapped.to_int()
    }

    fn print_value_as(&self, kind: SortKind) -> TermResult<String> {
        self.wrapped.print_value_as(kind)
    }

    fn hash_code(&self) -> u64 {
        self.wrapped.hash_code()
    }

    fn compare(&self, other: &Term) -> bool {
        let Some(other) = other.downcast_ref::<LoggingTerm>() else {
            return false;
        };

        if self.op != other.op {
            return false;
        }

        // The recorded sort is authoritative: engines may alias distinct sorts.
        if self.wrapped != other.wrapped || self.sort != other.sort {
            return false;
        }

        // Most expensive check last.
        self.children.len() == other.children.len()
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
