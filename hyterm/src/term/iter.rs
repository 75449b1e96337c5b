//! Type-erased cursors over the children of a term.
//!
//! Every term variant hands out a [`TermIter`], whatever storage it keeps its children in,
//! so traversal code is the same for all layers. A cursor is forward-only and finite; to
//! restart, ask the owning term for a fresh [`AbsTerm::begin`](crate::term::AbsTerm::begin).
//!
//! Example
//! ```
//! use hyterm::term::iter::{SliceTermIter, TermIter};
//! use hyterm::term::Term;
//! use std::sync::Arc;
//!
//! let children: Arc<[Term]> = Arc::from(Vec::new());
//! let begin = SliceTermIter::begin(&children);
//! let end = SliceTermIter::end(&children);
//! assert!(begin == end);
//! assert_eq!(begin.count(), 0);
//! ```
use std::sync::Arc;

use downcast_rs::{Downcast, impl_downcast};

use crate::term::Term;

/// Concrete cursor implementation behind a [`TermIter`].
pub trait TermIterBase: Downcast + std::fmt::Debug {
    /// Term under the cursor, `None` once past the end.
    fn current(&self) -> Option<Term>;

    /// Move to the next child.
    fn advance(&mut self);

    fn clone_box(&self) -> Box<dyn TermIterBase>;

    /// Position equality against a cursor of the same concrete kind. Cursors of different
    /// kinds are never equal.
    fn equal(&self, other: &dyn TermIterBase) -> bool;
}
impl_downcast!(TermIterBase);

/// Copyable, comparable cursor over an ordered sequence of terms.
///
/// `TermIter` is also an [`Iterator`] yielding the remaining children.
#[derive(Debug)]
pub struct TermIter(Box<dyn TermIterBase>);

impl TermIter {
    pub fn new<I: TermIterBase>(inner: I) -> Self {
        TermIter(Box::new(inner))
    }

    /// Term under the cursor without advancing.
    #[inline]
    pub fn get(&self) -> Option<Term> {
        self.0.current()
    }

    /// Pre-increment.
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        self.0.advance();
        self
    }

    /// Post-increment: advance and return a copy of the previous position.
    pub fn post_advance(&mut self) -> TermIter {
        let previous = self.clone();
        self.0.advance();
        previous
    }
}

impl Clone for TermIter {
    fn clone(&self) -> Self {
        TermIter(self.0.clone_box())
    }
}

impl PartialEq for TermIter {
    fn eq(&self, other: &Self) -> bool {
        self.0.equal(other.0.as_ref())
    }
}

impl Iterator for TermIter {
    type Item = Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.0.current()?;
        self.0.advance();
        Some(term)
    }
}

/// Cursor over children stored in a shared slice.
#[derive(Debug, Clone)]
pub struct SliceTermIter {
    items: Arc<[Term]>,
    pos: usize,
}

impl SliceTermIter {
    pub fn begin(items: &Arc<[Term]>) -> TermIter {
        TermIter::new(SliceTermIter {
            items: Arc::clone(items),
            pos: 0,
        })
    }

    pub fn end(items: &Arc<[Term]>) -> TermIter {
        TermIter::new(SliceTermIter {
            items: Arc::clone(items),
            pos: items.len(),
        })
    }
}

impl TermIterBase for SliceTermIter {
    fn current(&self) -> Option<Term> {
        self.items.get(self.pos).cloned()
    }

    fn advance(&mut self) {
        debug_assert!(self.pos < self.items.len(), "advancing past the end");
        self.pos = (self.pos + 1).min(self.items.len());
    }

    fn clone_box(&self) -> Box<dyn TermIterBase> {
        Box::new(self.clone())
    }

    fn equal(&self, other: &dyn TermIterBase) -> bool {
        other
            .downcast_ref::<SliceTermIter>()
            .is_some_and(|o| Arc::ptr_eq(&self.items, &o.items) && self.pos == o.pos)
    }
}
