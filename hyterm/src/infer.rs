//! Engine-independent sort computation.
//!
//! [`infer_sort`] gives the sort an application of an operator to children of the given
//! sorts must have, or the construction error an engine is expected to report for it.
use crate::error::{SortList, TermError, TermResult};
use crate::op::{Op, PrimOp};
use crate::sort::Sort;

fn mismatch(op: &Op, reason: impl Into<String>, sorts: &[Sort]) -> TermError {
    TermError::SortMismatch {
        op: op.to_string(),
        reason: reason.into(),
        found: SortList(sorts.to_vec()),
    }
}

fn all_equal(sorts: &[Sort]) -> bool {
    sorts.windows(2).all(|w| w[0] == w[1])
}

fn bv_width(op: &Op, sorts: &[Sort]) -> TermResult<u32> {
    match sorts.first() {
        Some(Sort::BitVec(w)) if all_equal(sorts) => Ok(*w),
        _ => Err(mismatch(op, "expected bit-vectors of equal width", sorts)),
    }
}

fn index(op: &Op, i: usize) -> TermResult<u32> {
    let value = *op.indices().get(i).ok_or_else(|| TermError::InvalidIndices {
        op: op.prim_op.to_string(),
        expected: op.prim_op.num_indices(),
        found: op.indices().len(),
    })?;
    u32::try_from(value).map_err(|_| TermError::ValueOutOfRange {
        value: value.to_string(),
        target: "a bit-vector width".to_string(),
    })
}

/// Compute the sort of `op` applied to children of sorts `sorts`.
pub fn infer_sort(op: &Op, sorts: &[Sort]) -> TermResult<Sort> {
    op.check_arity(sorts.len())?;
    op.check_indices()?;

    use PrimOp::*;
    match op.prim_op {
        And | Or | Xor | Not | Implies => {
            if sorts.iter().all(Sort::is_bool) {
                Ok(Sort::Bool)
            } else {
                Err(mismatch(op, "expected Bool children", sorts))
            }
        }
        Ite => {
            if !sorts[0].is_bool() {
                return Err(mismatch(op, "condition must be Bool", sorts));
            }
            if sorts[1] != sorts[2] {
                return Err(mismatch(op, "branches must have the same sort", sorts));
            }
            Ok(sorts[1].clone())
        }
        Equal | Distinct => {
            if all_equal(sorts) {
                Ok(Sort::Bool)
            } else {
                Err(mismatch(op, "operands must have the same sort", sorts))
            }
        }
        Apply => {
            let Some(codomain) = sorts[0].codomain() else {
                return Err(mismatch(op, "first child must be a function", sorts));
            };
            if sorts[0].domain() != &sorts[1..] {
                return Err(mismatch(op, "arguments do not match the function domain", sorts));
            }
            Ok(codomain.clone())
        }
        Plus | Minus | Negate | Mult => {
            if sorts.iter().all(Sort::is_int) {
                Ok(Sort::Int)
            } else {
                Err(mismatch(op, "expected Int children", sorts))
            }
        }
        Lt | Le | Gt | Ge => {
            if sorts.iter().all(Sort::is_int) {
                Ok(Sort::Bool)
            } else {
                Err(mismatch(op, "expected Int children", sorts))
            }
        }
        Concat => {
            let mut total: u64 = 0;
            for s in sorts {
                match s {
                    Sort::BitVec(w) => total += *w as u64,
                    _ => return Err(mismatch(op, "expected bit-vector children", sorts)),
                }
            }
            let total = u32::try_from(total).map_err(|_| TermError::ValueOutOfRange {
                value: total.to_string(),
                target: "a bit-vector width".to_string(),
            })?;
            Sort::bit_vec(total)
        }
        Extract => {
            let width = bv_width(op, sorts)?;
            let (high, low) = (index(op, 0)?, index(op, 1)?);
            if high < low || high >= width {
                return Err(mismatch(
                    op,
                    format!("extract bounds [{high}:{low}] invalid for width {width}"),
                    sorts,
                ));
            }
            Sort::bit_vec(high - low + 1)
        }
        ZeroExtend | SignExtend => {
            let width = bv_width(op, sorts)?;
            let extra = index(op, 0)?;
            let total = width.checked_add(extra).ok_or_else(|| TermError::ValueOutOfRange {
                value: format!("{width} + {extra}"),
                target: "a bit-vector width".to_string(),
            })?;
            Sort::bit_vec(total)
        }
        Repeat => {
            let width = bv_width(op, sorts)?;
            let times = index(op, 0)?;
            let total = width.checked_mul(times).ok_or_else(|| TermError::ValueOutOfRange {
                value: format!("{width} * {times}"),
                target: "a bit-vector width".to_string(),
            })?;
            Sort::bit_vec(total)
        }
        RotateLeft | RotateRight | BVNot | BVNeg | BVAnd | BVOr | BVXor | BVAdd | BVSub
        | BVMul | BVUdiv | BVUrem | BVShl | BVLshr | BVAshr => {
            bv_width(op, sorts).map(Sort::BitVec)
        }
        BVUlt | BVUle | BVUgt | BVUge | BVSlt | BVSle | BVSgt | BVSge => {
            bv_width(op, sorts).map(|_| Sort::Bool)
        }
        Select => match &sorts[0] {
            Sort::Array(parts) if parts.0 == sorts[1] => Ok(parts.1.clone()),
            _ => Err(mismatch(op, "expected an array and a matching index", sorts)),
        },
        Store => match &sorts[0] {
            Sort::Array(parts) if parts.0 == sorts[1] && parts.1 == sorts[2] => {
                Ok(sorts[0].clone())
            }
            _ => Err(mismatch(
                op,
                "expected an array, a matching index and a matching element",
                sorts,
            )),
        },
    }
}
