//! Operator vocabulary.
//!
//! An [`Op`] pairs a [`PrimOp`] with its integer indices (e.g. the bounds of an
//! `extract`). Terms without structure (symbols and values) carry no operator at
//! all, which is modelled as `Option<Op>::None` throughout the crate.
//!
//! Example
//! ```
//! use hyterm::op::{Op, PrimOp};
//!
//! let ext = Op::indexed(PrimOp::Extract, [7, 0]).unwrap();
//! assert_eq!(ext.to_string(), "(_ extract 7 0)");
//! assert_eq!(Op::from(PrimOp::BVAdd).to_string(), "bvadd");
//! ```
use smallvec::SmallVec;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{TermError, TermResult};

/// Arity used for operators accepting any number of children above their minimum.
pub const UNBOUNDED_ARITY: usize = usize::MAX;

/// Primitive operators, printed using their SMT-LIB names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
pub enum PrimOp {
    // Core
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "xor")]
    Xor,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "=>")]
    Implies,
    #[strum(serialize = "ite")]
    Ite,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "distinct")]
    Distinct,

    // Uninterpreted functions
    #[strum(serialize = "apply")]
    Apply,

    // Integer arithmetic
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "neg")]
    Negate,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,

    // Bit-vectors
    #[strum(serialize = "concat")]
    Concat,
    #[strum(serialize = "extract")]
    Extract,
    #[strum(serialize = "zero_extend")]
    ZeroExtend,
    #[strum(serialize = "sign_extend")]
    SignExtend,
    #[strum(serialize = "repeat")]
    Repeat,
    #[strum(serialize = "rotate_left")]
    RotateLeft,
    #[strum(serialize = "rotate_right")]
    RotateRight,
    #[strum(serialize = "bvnot")]
    BVNot,
    #[strum(serialize = "bvneg")]
    BVNeg,
    #[strum(serialize = "bvand")]
    BVAnd,
    #[strum(serialize = "bvor")]
    BVOr,
    #[strum(serialize = "bvxor")]
    BVXor,
    #[strum(serialize = "bvadd")]
    BVAdd,
    #[strum(serialize = "bvsub")]
    BVSub,
    #[strum(serialize = "bvmul")]
    BVMul,
    #[strum(serialize = "bvudiv")]
    BVUdiv,
    #[strum(serialize = "bvurem")]
    BVUrem,
    #[strum(serialize = "bvshl")]
    BVShl,
    #[strum(serialize = "bvlshr")]
    BVLshr,
    #[strum(serialize = "bvashr")]
    BVAshr,
    #[strum(serialize = "bvult")]
    BVUlt,
    #[strum(serialize = "bvule")]
    BVUle,
    #[strum(serialize = "bvugt")]
    BVUgt,
    #[strum(serialize = "bvuge")]
    BVUge,
    #[strum(serialize = "bvslt")]
    BVSlt,
    #[strum(serialize = "bvsle")]
    BVSle,
    #[strum(serialize = "bvsgt")]
    BVSgt,
    #[strum(serialize = "bvsge")]
    BVSge,

    // Arrays
    #[strum(serialize = "select")]
    Select,
    #[strum(serialize = "store")]
    Store,
}

impl PrimOp {
    /// Minimum and maximum number of children, inclusive.
    pub const fn arity(self) -> (usize, usize) {
        use PrimOp::*;
        match self {
            Not | Negate | BVNot | BVNeg | Extract | ZeroExtend | SignExtend | Repeat
            | RotateLeft | RotateRight => (1, 1),
            Implies | Lt | Le | Gt | Ge | BVUlt | BVUle | BVUgt | BVUge | BVSlt | BVSle
            | BVSgt | BVSge | BVSub | BVUdiv | BVUrem | BVShl | BVLshr | BVAshr | Select => (2, 2),
            Ite | Store => (3, 3),
            Minus => (1, 2),
            And | Or | Xor | Equal | Distinct | Plus | Mult | Concat | BVAnd | BVOr | BVXor
            | BVAdd | BVMul => (2, UNBOUNDED_ARITY),
            Apply => (2, UNBOUNDED_ARITY),
        }
    }

    /// Number of integer indices carried by the operator.
    pub const fn num_indices(self) -> usize {
        match self {
            PrimOp::Extract => 2,
            PrimOp::ZeroExtend
            | PrimOp::SignExtend
            | PrimOp::Repeat
            | PrimOp::RotateLeft
            | PrimOp::RotateRight => 1,
            _ => 0,
        }
    }

    /// Whether reordering the children of a binary application preserves its meaning.
    pub const fn is_commutative(self) -> bool {
        use PrimOp::*;
        matches!(
            self,
            And | Or | Xor | Equal | Distinct | Plus | Mult | BVAnd | BVOr | BVXor | BVAdd | BVMul
        )
    }
}

/// A primitive operator together with its indices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Op {
    pub prim_op: PrimOp,
    indices: SmallVec<u64, 2>,
}

impl Op {
    /// Build an indexed operator, checking the number of indices.
    pub fn indexed<I>(prim_op: PrimOp, indices: I) -> TermResult<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let indices: SmallVec<u64, 2> = indices.into_iter().collect();
        if indices.len() != prim_op.num_indices() {
            return Err(TermError::InvalidIndices {
                op: prim_op.to_string(),
                expected: prim_op.num_indices(),
                found: indices.len(),
            });
        }
        Ok(Self { prim_op, indices })
    }

    #[inline]
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Check that the operator carries as many indices as its primitive requires.
    pub fn check_indices(&self) -> TermResult<()> {
        if self.indices.len() != self.prim_op.num_indices() {
            return Err(TermError::InvalidIndices {
                op: self.prim_op.to_string(),
                expected: self.prim_op.num_indices(),
                found: self.indices.len(),
            });
        }
        Ok(())
    }

    /// Check that `num_children` children are acceptable for this operator.
    pub fn check_arity(&self, num_children: usize) -> TermResult<()> {
        let (min, max) = self.prim_op.arity();
        if num_children < min || num_children > max {
            return Err(TermError::InvalidArity {
                op: self.to_string(),
                min,
                max,
                found: num_children,
            });
        }
        Ok(())
    }
}

impl From<PrimOp> for Op {
    /// Operator without indices. Indexed primitives built this way are rejected by
    /// [`Op::check_indices`] when applied; use [`Op::indexed`] instead.
    fn from(prim_op: PrimOp) -> Self {
        Self {
            prim_op,
            indices: SmallVec::new(),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.indices.is_empty() {
            write!(f, "{}", self.prim_op)
        } else {
            write!(f, "(_ {}", self.prim_op)?;
            for idx in self.indices.iter() {
                write!(f, " {}", idx)?;
            }
            write!(f, ")")
        }
    }
}
