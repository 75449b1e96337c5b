//! Local simplifications applied while building nodes.
//!
//! Every rule answers with an existing node (or a boolean literal) and never builds a new
//! application, so rewriting cannot loop.
use hyterm::error::TermResult;
use hyterm::op::{Op, PrimOp};
use hyterm::sort::Sort;
use num_bigint::Sign;

use super::{HashConsEngine, NodeData, NodeId};
use crate::engine::Engine;

fn is_zero(data: &NodeData) -> bool {
    data.value().is_some_and(|v| v.sign() == Sign::NoSign)
}

fn as_bool(data: &NodeData) -> Option<bool> {
    match (&data.sort, data.value()) {
        (Sort::Bool, Some(v)) => Some(v.sign() != Sign::NoSign),
        _ => None,
    }
}

/// Simplify `op(children)`, returning the node it reduces to if a rule applies.
pub(super) fn simplify(
    engine: &HashConsEngine,
    op: &Op,
    children: &[NodeId],
) -> TermResult<Option<NodeId>> {
    use PrimOp::*;
    let result = match op.prim_op {
        // (not (not x)) -> x, likewise for bvnot and bvneg
        Not | BVNot | BVNeg => {
            let child = engine.data(children[0])?;
            match child.op() {
                Some(inner) if inner == op => Some(child.children()[0]),
                _ => None,
            }
        }
        And | Or | BVAnd | BVOr => {
            if children.windows(2).all(|w| w[0] == w[1]) {
                Some(children[0])
            } else {
                None
            }
        }
        Ite => match as_bool(&engine.data(children[0])?) {
            Some(true) => Some(children[1]),
            Some(false) => Some(children[2]),
            None if children[1] == children[2] => Some(children[1]),
            None => None,
        },
        Equal if children.len() == 2 && children[0] == children[1] => {
            Some(engine.mk_bool(true)?)
        }
        BVAdd if children.len() == 2 => {
            if is_zero(&engine.data(children[1])?) {
                Some(children[0])
            } else if is_zero(&engine.data(children[0])?) {
                Some(children[1])
            } else {
                None
            }
        }
        Extract => {
            let width = engine.data(children[0])?.sort.width();
            match (op.indices(), width) {
                ([hi, 0], Some(w)) if *hi + 1 == u64::from(w) => Some(children[0]),
                _ => None,
            }
        }
        _ => None,
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn double_negation() {
        let e = HashConsEngine::default();
        let x = e.mk_symbol("x", &Sort::Bool).unwrap();
        let not = Op::from(PrimOp::Not);
        let nx = e.mk_term(&not, &[x]).unwrap();
        assert_eq!(e.mk_term(&not, &[nx]).unwrap(), x);

        let v = e.mk_symbol("v", &Sort::BitVec(8)).unwrap();
        let neg = Op::from(PrimOp::BVNeg);
        let bvnot = Op::from(PrimOp::BVNot);
        let nv = e.mk_term(&neg, &[v]).unwrap();
        assert_eq!(e.mk_term(&neg, &[nv]).unwrap(), v);
        assert_ne!(e.mk_term(&bvnot, &[nv]).unwrap(), v);
    }

    #[test]
    fn idempotence_and_trivial_equality() {
        let e = HashConsEngine::default();
        let x = e.mk_symbol("x", &Sort::Bool).unwrap();
        assert_eq!(e.mk_term(&Op::from(PrimOp::And), &[x, x, x]).unwrap(), x);
        assert_eq!(e.mk_term(&Op::from(PrimOp::Or), &[x, x]).unwrap(), x);
        let eq = e.mk_term(&Op::from(PrimOp::Equal), &[x, x]).unwrap();
        assert_eq!(eq, e.mk_bool(true).unwrap());
    }

    #[test]
    fn ite_rules() {
        let e = HashConsEngine::default();
        let c = e.mk_symbol("c", &Sort::Bool).unwrap();
        let a = e.mk_symbol("a", &Sort::Int).unwrap();
        let b = e.mk_symbol("b", &Sort::Int).unwrap();
        let ite = Op::from(PrimOp::Ite);
        let t = e.mk_bool(true).unwrap();
        let f = e.mk_bool(false).unwrap();
        assert_eq!(e.mk_term(&ite, &[t, a, b]).unwrap(), a);
        assert_eq!(e.mk_term(&ite, &[f, a, b]).unwrap(), b);
        assert_eq!(e.mk_term(&ite, &[c, b, b]).unwrap(), b);
        let kept = e.mk_term(&ite, &[c, a, b]).unwrap();
        assert!(![a, b, c].contains(&kept));
    }

    #[test]
    fn bit_vector_identities() {
        let e = HashConsEngine::default();
        let x = e.mk_symbol("x", &Sort::BitVec(8)).unwrap();
        let zero = e.mk_value(&BigInt::from(0), &Sort::BitVec(8)).unwrap();
        let add = Op::from(PrimOp::BVAdd);
        assert_eq!(e.mk_term(&add, &[x, zero]).unwrap(), x);
        assert_eq!(e.mk_term(&add, &[zero, x]).unwrap(), x);

        let full = Op::indexed(PrimOp::Extract, [7, 0]).unwrap();
        assert_eq!(e.mk_term(&full, &[x]).unwrap(), x);
        let low = Op::indexed(PrimOp::Extract, [3, 0]).unwrap();
        assert_ne!(e.mk_term(&low, &[x]).unwrap(), x);
    }

    #[test]
    fn rewriting_can_be_disabled() {
        let e = HashConsEngine::new(EngineConfig::default().with_rewrite(false));
        let x = e.mk_symbol("x", &Sort::Bool).unwrap();
        assert_ne!(e.mk_term(&Op::from(PrimOp::And), &[x, x]).unwrap(), x);
    }
}
