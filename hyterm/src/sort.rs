//! Sorts of logical terms.
//!
//! A [`Sort`] is an immutable, cheap-to-clone value. Composite sorts share their
//! components through `Arc`, so cloning never copies a sort tree.
//!
//! Example
//! ```
//! use hyterm::sort::{Sort, SortKind};
//!
//! let bv8 = Sort::bit_vec(8).unwrap();
//! let mem = Sort::array(bv8.clone(), bv8.clone());
//! assert_eq!(mem.kind(), SortKind::Array);
//! assert_eq!(mem.to_string(), "(Array (_ BitVec 8) (_ BitVec 8))");
//! ```
use std::sync::Arc;

use strum::{Display, EnumIs, EnumIter};

use crate::error::{TermError, TermResult};

/// Coarse classification of a [`Sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIs, EnumIter)]
pub enum SortKind {
    Bool,
    BitVec,
    Int,
    Array,
    Function,
    Uninterpreted,
}

/// The type of a term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
pub enum Sort {
    /// Booleans.
    Bool,

    /// Fixed-width bit-vectors. The width is never zero.
    BitVec(u32),

    /// Mathematical integers.
    Int,

    /// Arrays from an index sort to an element sort.
    Array(Arc<(Sort, Sort)>),

    /// Function sorts: the domain sorts followed by the codomain sort (always at least two
    /// entries).
    Function(Arc<[Sort]>),

    /// A named uninterpreted sort.
    Uninterpreted(Arc<str>),
}

impl Sort {
    /// Bit-vector sort of the given width.
    pub fn bit_vec(width: u32) -> TermResult<Self> {
        if width == 0 {
            return Err(TermError::InvalidSort(
                "bit-vector width must be strictly positive".to_string(),
            ));
        }
        Ok(Sort::BitVec(width))
    }

    /// Array sort `(Array index element)`.
    pub fn array(index: Sort, element: Sort) -> Self {
        Sort::Array(Arc::new((index, element)))
    }

    /// Function sort `(-> domain... codomain)`.
    pub fn function<I>(domain: I, codomain: Sort) -> TermResult<Self>
    where
        I: IntoIterator<Item = Sort>,
    {
        let mut sorts: Vec<Sort> = domain.into_iter().collect();
        if sorts.is_empty() {
            return Err(TermError::InvalidSort(
                "function sorts need at least one domain sort".to_string(),
            ));
        }
        if sorts.iter().chain([&codomain]).any(Sort::is_function) {
            return Err(TermError::InvalidSort(
                "function sorts cannot take or return functions".to_string(),
            ));
        }
        sorts.push(codomain);
        Ok(Sort::Function(sorts.into()))
    }

    /// Named uninterpreted sort.
    pub fn uninterpreted(name: impl AsRef<str>) -> Self {
        Sort::Uninterpreted(Arc::from(name.as_ref()))
    }

    /// Coarse kind of this sort.
    pub fn kind(&self) -> SortKind {
        match self {
            Sort::Bool => SortKind::Bool,
            Sort::BitVec(_) => SortKind::BitVec,
            Sort::Int => SortKind::Int,
            Sort::Array(_) => SortKind::Array,
            Sort::Function(_) => SortKind::Function,
            Sort::Uninterpreted(_) => SortKind::Uninterpreted,
        }
    }

    /// Width of a bit-vector sort.
    #[inline]
    pub fn width(&self) -> Option<u32> {
        match self {
            Sort::BitVec(w) => Some(*w),
            _ => None,
        }
    }

    pub fn array_index(&self) -> Option<&Sort> {
        match self {
            Sort::Array(parts) => Some(&parts.0),
            _ => None,
        }
    }

    pub fn array_element(&self) -> Option<&Sort> {
        match self {
            Sort::Array(parts) => Some(&parts.1),
            _ => None,
        }
    }

    /// Domain sorts of a function sort, empty for any other sort.
    pub fn domain(&self) -> &[Sort] {
        match self {
            Sort::Function(sorts) => &sorts[..sorts.len() - 1],
            _ => &[],
        }
    }

    pub fn codomain(&self) -> Option<&Sort> {
        match self {
            Sort::Function(sorts) => sorts.last(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::BitVec(w) => write!(f, "(_ BitVec {})", w),
            Sort::Int => write!(f, "Int"),
            Sort::Array(parts) => write!(f, "(Array {} {})", parts.0, parts.1),
            Sort::Function(sorts) => {
                write!(f, "(->")?;
                for s in sorts.iter() {
                    write!(f, " {}", s)?;
                }
                write!(f, ")")
            }
            Sort::Uninterpreted(name) => write!(f, "{}", name),
        }
    }
}
