//! The term capability and the shared [`Term`] handle.
//!
//! Role
//! - [`AbsTerm`] is the surface every term variant implements (engine adapters, logging
//!   wrappers, ...). Consumers only ever talk to it through [`Term`].
//! - [`Term`] is a reference-counted handle: cloning it shares the node, so a term DAG
//!   never duplicates common subterms and no parent can mutate a shared child.
//!
//! Equality semantics
//! - `Term == Term` is the structural [`AbsTerm::compare`] of the variant, not pointer
//!   identity, and `Hash` forwards to [`AbsTerm::hash_code`]. Variants must keep both
//!   consistent: `compare(a, b)` implies `hash_code(a) == hash_code(b)`.
pub mod iter;
pub mod logging;

use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::error::TermResult;
use crate::op::Op;
use crate::sort::{Sort, SortKind};
use crate::term::iter::TermIter;

/// Capability interface implemented by each term variant.
pub trait AbsTerm: DowncastSync + std::fmt::Debug {
    /// Operator of the term, `None` for symbols and values.
    fn get_op(&self) -> Option<Op>;

    fn get_sort(&self) -> Sort;

    /// Symbols, functions and bound parameters are all symbols.
    fn is_symbol(&self) -> bool;

    fn is_param(&self) -> bool;

    /// A symbol whose sort is not a function sort.
    fn is_symbolic_const(&self) -> bool;

    /// A literal produced by the engine.
    fn is_value(&self) -> bool;

    /// Textual form of the term. Once computed it never changes.
    fn repr(&self) -> String;

    /// Literal as an unsigned 64-bit integer.
    fn to_int(&self) -> TermResult<u64>;

    /// Render a value the way literals of sort kind `kind` are written.
    fn print_value_as(&self, kind: SortKind) -> TermResult<String>;

    fn hash_code(&self) -> u64;

    /// Structural equality against another term. Never fails: comparing with a term of an
    /// unrelated variant yields `false`.
    fn compare(&self, other: &Term) -> bool;

    /// Cursor on the first child.
    fn begin(&self) -> TermIter;

    /// Cursor one past the last child.
    fn end(&self) -> TermIter;
}
impl_downcast!(sync AbsTerm);

/// Shared handle on a term.
#[derive(Clone)]
pub struct Term(Arc<dyn AbsTerm>);

/// Ordered children of a term.
pub type TermVec = Vec<Term>;

impl Term {
    pub fn new<T: AbsTerm>(term: T) -> Self {
        Term(Arc::new(term))
    }

    /// Whether both handles point to the very same term object.
    #[inline]
    pub fn ptr_eq(&self, other: &Term) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Concrete variant behind the handle.
    #[inline]
    pub fn downcast_ref<T: AbsTerm>(&self) -> Option<&T> {
        self.0.as_ref().downcast_ref::<T>()
    }

    #[inline]
    pub fn is<T: AbsTerm>(&self) -> bool {
        self.0.as_ref().is::<T>()
    }

    /// Iterate over the children, from [`AbsTerm::begin`] to [`AbsTerm::end`].
    pub fn children(&self) -> TermIter {
        self.0.begin()
    }

    pub fn num_children(&self) -> usize {
        let end = self.0.end();
        let mut cursor = self.0.begin();
        let mut count = 0;
        while cursor != end {
            cursor.advance();
            count += 1;
        }
        count
    }
}

impl Deref for Term {
    type Target = dyn AbsTerm;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.compare(other)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash_code());
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.repr())
    }
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

/// Structural comparison of two optional terms; an absent term equals nothing.
pub fn compare_opt(a: Option<&Term>, b: Option<&Term>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
