//! Factory handing out [`AdapterTerm`]s for one engine instance.
use std::collections::HashMap;
use std::sync::Arc;

use hyterm::error::{TermError, TermResult};
use hyterm::factory::TermFactory;
use hyterm::op::Op;
use hyterm::sort::Sort;
use hyterm::term::{Term, TermVec};
use log::{debug, trace};
use num_bigint::BigInt;
use parking_lot::Mutex;

use crate::adapter::AdapterTerm;
use crate::engine::Engine;

/// Builds adapter terms over a shared engine.
///
/// The session remembers the term it created for every engine node. When the engine answers
/// a construction with a node that already has a term, whether that node is a child, a
/// deeper descendant or unrelated, the existing term is returned. Nodes therefore never get
/// two adapter terms with diverging operators within a session.
pub struct AdapterSession<E: Engine> {
    engine: Arc<E>,
    registry: Mutex<HashMap<u64, Term>>,
}

impl<E: Engine> AdapterSession<E> {
    pub fn new(engine: E) -> Self {
        Self::with_shared(Arc::new(engine))
    }

    /// Session over an engine shared with other sessions.
    pub fn with_shared(engine: Arc<E>) -> Self {
        Self {
            engine,
            registry: Mutex::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Number of engine nodes with a term in this session.
    pub fn num_nodes(&self) -> usize {
        self.registry.lock().len()
    }

    /// Engine node of a term built by this session's engine.
    pub fn node_of(&self, term: &Term) -> TermResult<E::Node> {
        term.downcast_ref::<AdapterTerm<E>>()
            .filter(|t| Arc::ptr_eq(t.engine(), &self.engine))
            .map(|t| t.node().clone())
            .ok_or_else(|| TermError::ForeignTerm(term.repr()))
    }

    fn register(&self, node: E::Node, children: TermVec, op: Option<Op>, is_sym: bool) -> Term {
        let id = self.engine.node_id(&node);
        let mut registry = self.registry.lock();
        if let Some(existing) = registry.get(&id) {
            if existing.get_op() != op {
                debug!(
                    "Engine answered `{}` with existing node {} (`{}`)",
                    op.as_ref().map(|o| o.to_string()).unwrap_or_default(),
                    id,
                    existing
                );
            } else {
                trace!("Reusing term of node {}", id);
            }
            return existing.clone();
        }

        let term = Term::new(AdapterTerm::new(
            self.engine.clone(),
            node,
            children,
            op,
            is_sym,
        ));
        registry.insert(id, term.clone());
        term
    }
}

impl<E: Engine> TermFactory for AdapterSession<E> {
    fn make_symbol(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        let node = self.engine.mk_symbol(name, sort)?;
        Ok(self.register(node, Vec::new(), None, true))
    }

    fn make_param(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        let node = self.engine.mk_param(name, sort)?;
        Ok(self.register(node, Vec::new(), None, false))
    }

    fn make_value(&self, value: &BigInt, sort: &Sort) -> TermResult<Term> {
        let node = self.engine.mk_value(value, sort)?;
        Ok(self.register(node, Vec::new(), None, false))
    }

    fn make_bool(&self, value: bool) -> TermResult<Term> {
        let node = self.engine.mk_bool(value)?;
        Ok(self.register(node, Vec::new(), None, false))
    }

    fn make_term(&self, op: &Op, children: &[Term]) -> TermResult<Term> {
        let nodes = children
            .iter()
            .map(|c| self.node_of(c))
            .collect::<TermResult<Vec<_>>>()?;
        let node = self.engine.mk_term(op, &nodes)?;
        Ok(self.register(node, children.to_vec(), Some(op.clone()), false))
    }
}
