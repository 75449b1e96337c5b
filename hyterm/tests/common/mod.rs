//! Minimal in-test engine: hash-consed terms, Bool reported as `(_ BitVec 1)` and
//! double negations collapsed onto the inner operand.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use hyterm::prelude::*;
use num_bigint::BigInt;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StubKind {
    Symbol(String),
    Param(String),
    Value(BigInt),
    App,
}

#[derive(Debug)]
pub struct StubTerm {
    pub id: u64,
    pub op: Option<Op>,
    pub logical_sort: Sort,
    pub children: Arc<[Term]>,
    pub kind: StubKind,
    pub value_prints: Arc<AtomicUsize>,
}

impl AbsTerm for StubTerm {
    fn get_op(&self) -> Option<Op> {
        self.op.clone()
    }

    fn get_sort(&self) -> Sort {
        match self.logical_sort {
            Sort::Bool => Sort::BitVec(1),
            ref s => s.clone(),
        }
    }

    fn is_symbol(&self) -> bool {
        matches!(self.kind, StubKind::Symbol(_) | StubKind::Param(_))
    }

    fn is_param(&self) -> bool {
        matches!(self.kind, StubKind::Param(_))
    }

    fn is_symbolic_const(&self) -> bool {
        matches!(self.kind, StubKind::Symbol(_)) && !self.logical_sort.is_function()
    }

    fn is_value(&self) -> bool {
        matches!(self.kind, StubKind::Value(_))
    }

    fn repr(&self) -> String {
        match &self.kind {
            StubKind::Symbol(n) | StubKind::Param(n) => n.clone(),
            StubKind::Value(v) => format!("#stub{}", v),
            StubKind::App => {
                let mut s = format!("(stub-{}", self.op.as_ref().unwrap());
                for c in self.children.iter() {
                    s.push(' ');
                    s.push_str(&c.repr());
                }
                s.push(')');
                s
            }
        }
    }

    fn to_int(&self) -> TermResult<u64> {
        match &self.kind {
            StubKind::Value(v) => u64::try_from(v).map_err(|_| TermError::ValueOutOfRange {
                value: v.to_string(),
                target: "u64".to_string(),
            }),
            _ => Err(TermError::NotAValue(self.repr())),
        }
    }

    fn print_value_as(&self, kind: SortKind) -> TermResult<String> {
        let StubKind::Value(v) = &self.kind else {
            return Err(TermError::NotAValue(self.repr()));
        };
        self.value_prints.fetch_add(1, Ordering::SeqCst);
        Ok(match kind {
            SortKind::Bool => (if *v == BigInt::from(0) { "false" } else { "true" }).to_string(),
            SortKind::BitVec => {
                let width = self.get_sort().width().unwrap() as usize;
                format!("#b{:0>width$}", v.to_str_radix(2), width = width)
            }
            _ => v.to_string(),
        })
    }

    fn hash_code(&self) -> u64 {
        self.id.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }

    fn compare(&self, other: &Term) -> bool {
        other
            .downcast_ref::<StubTerm>()
            .is_some_and(|o| o.id == self.id)
    }

    fn begin(&self) -> TermIter {
        SliceTermIter::begin(&self.children)
    }

    fn end(&self) -> TermIter {
        SliceTermIter::end(&self.children)
    }
}

type Key = (Option<Op>, Vec<u64>, StubKind, Sort);

#[derive(Default)]
pub struct StubFactory {
    next_id: AtomicU64,
    nodes: Mutex<HashMap<Key, Term>>,
    pub value_prints: Arc<AtomicUsize>,
}

impl StubFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn stub(term: &Term) -> &StubTerm {
        term.downcast_ref::<StubTerm>().expect("stub term")
    }

    fn node(&self, op: Option<Op>, children: &[Term], kind: StubKind, sort: Sort) -> Term {
        let key: Key = (
            op.clone(),
            children.iter().map(|c| Self::stub(c).id).collect(),
            kind.clone(),
            sort.clone(),
        );
        self.nodes
            .lock()
            .entry(key)
            .or_insert_with(|| {
                Term::new(StubTerm {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    op,
                    logical_sort: sort,
                    children: children.to_vec().into(),
                    kind,
                    value_prints: self.value_prints.clone(),
                })
            })
            .clone()
    }
}

impl TermFactory for StubFactory {
    fn make_symbol(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        Ok(self.node(None, &[], StubKind::Symbol(name.to_string()), sort.clone()))
    }

    fn make_param(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        Ok(self.node(None, &[], StubKind::Param(name.to_string()), sort.clone()))
    }

    fn make_value(&self, value: &BigInt, sort: &Sort) -> TermResult<Term> {
        Ok(self.node(None, &[], StubKind::Value(value.clone()), sort.clone()))
    }

    fn make_bool(&self, value: bool) -> TermResult<Term> {
        self.make_value(&BigInt::from(value as u8), &Sort::Bool)
    }

    fn make_term(&self, op: &Op, children: &[Term]) -> TermResult<Term> {
        let sorts: Vec<Sort> = children
            .iter()
            .map(|c| Self::stub(c).logical_sort.clone())
            .collect();
        let sort = infer_sort(op, &sorts)?;

        if op.prim_op == PrimOp::Not {
            let inner = Self::stub(&children[0]);
            if inner.op.as_ref().is_some_and(|o| o.prim_op == PrimOp::Not) {
                return Ok(inner.children[0].clone());
            }
        }

        Ok(self.node(Some(op.clone()), children, StubKind::App, sort))
    }
}

pub fn bv(width: u32) -> Sort {
    Sort::bit_vec(width).unwrap()
}
