//! Hyterm: engine-independent logical terms for hyperion.
//!
//! Solving engines hand out opaque node handles and are free to rewrite a freshly built
//! node into an existing one. This crate provides the stable, engine-agnostic view on top
//! of them: operators, sorts, children, textual forms, hashing and structural equality.
//!
//! Layout
//!  - [`sort`] and [`op`]: the sort and operator vocabularies, with [`infer`] computing
//!    result sorts engine-independently.
//!  - [`term`]: the [`AbsTerm`](term::AbsTerm) capability, the shared [`Term`](term::Term)
//!    handle, child cursors and the [`LoggingTerm`](term::logging::LoggingTerm) wrapper.
//!  - [`factory`]: construction surfaces, including the [`LoggingFactory`](factory::LoggingFactory)
//!    that records the caller's intended shape for every term.
//!
//! Engine adapters live in the `hyengine` crate.

/// Construction surfaces for terms.
pub mod factory;
/// Errors shared by every term layer.
pub mod error;
/// Result sort computation.
pub mod infer;
/// Operators.
pub mod op;
/// Sorts.
pub mod sort;
/// Term capability, handles, cursors and logging wrappers.
pub mod term;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::error::{TermError, TermResult};
    pub use crate::factory::{LoggingFactory, TermFactory};
    pub use crate::infer::infer_sort;
    pub use crate::op::{Op, PrimOp};
    pub use crate::sort::{Sort, SortKind};
    pub use crate::term::iter::{SliceTermIter, TermIter, TermIterBase};
    pub use crate::term::logging::LoggingTerm;
    pub use crate::term::{AbsTerm, Term, TermVec};
}
