//! Term construction surfaces.
//!
//! [`TermFactory`] is what an underlying layer (typically an engine adapter session) offers
//! to build terms. [`LoggingFactory`] sits on top of any factory and hands out
//! [`LoggingTerm`]s recording the requested operator, sort and children, whatever the
//! underlying layer did with the request.
use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use num_bigint::BigInt;
use parking_lot::Mutex;

use crate::error::{TermError, TermResult};
use crate::infer::infer_sort;
use crate::op::Op;
use crate::sort::Sort;
use crate::term::logging::LoggingTerm;
use crate::term::{Term, TermVec};

/// Construction interface of a term layer.
pub trait TermFactory: Send + Sync {
    /// Fresh uninterpreted constant (or function, for function sorts).
    fn make_symbol(&self, name: &str, sort: &Sort) -> TermResult<Term>;

    /// Fresh bound parameter.
    fn make_param(&self, name: &str, sort: &Sort) -> TermResult<Term>;

    /// Literal of the given sort.
    fn make_value(&self, value: &BigInt, sort: &Sort) -> TermResult<Term>;

    fn make_bool(&self, value: bool) -> TermResult<Term>;

    /// Application of `op` to `children`. Malformed requests are rejected, never repaired.
    fn make_term(&self, op: &Op, children: &[Term]) -> TermResult<Term>;
}

/// Factory producing [`LoggingTerm`]s on top of another factory.
///
/// Terms are deduplicated: building a term structurally equal to one already handed out
/// returns the existing handle.
///
/// The dedup and symbol tables hold strong handles, so every term built through the factory
/// stays alive until the factory itself is dropped.
pub struct LoggingFactory<F> {
    inner: F,
    symbols: Mutex<HashMap<String, Term>>,
    table: Mutex<HashSet<Term>>,
}

impl<F: TermFactory> LoggingFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            symbols: Mutex::new(HashMap::new()),
            table: Mutex::new(HashSet::new()),
        }
    }

    /// Underlying factory.
    #[inline]
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Symbol or parameter previously created under `name`.
    pub fn get_symbol(&self, name: &str) -> Option<Term> {
        self.symbols.lock().get(name).cloned()
    }

    /// Number of distinct terms handed out so far.
    pub fn num_terms(&self) -> usize {
        self.table.lock().len()
    }

    fn intern(&self, term: LoggingTerm) -> Term {
        let candidate = Term::new(term);
        let mut table = self.table.lock();
        if let Some(existing) = table.get(&candidate) {
            trace!("Reusing existing term {}", existing);
            return existing.clone();
        }
        table.insert(candidate.clone());
        candidate
    }

    fn new_symbol(&self, name: &str, sort: &Sort, is_sym: bool) -> TermResult<Term> {
        let mut symbols = self.symbols.lock();
        if symbols.contains_key(name) {
            return Err(TermError::DuplicateSymbol(name.to_string()));
        }

        let wrapped = if is_sym {
            self.inner.make_symbol(name, sort)?
        } else {
            self.inner.make_param(name, sort)?
        };
        let term = self.intern(LoggingTerm::symbol(wrapped, sort.clone(), name, is_sym));
        debug!(
            "New {} `{}` of sort {}",
            if is_sym { "symbol" } else { "parameter" },
            name,
            sort
        );
        symbols.insert(name.to_string(), term.clone());
        Ok(term)
    }

    fn unwrap_children(children: &[Term]) -> TermResult<TermVec> {
        children
            .iter()
            .map(|c| {
                c.downcast_ref::<LoggingTerm>()
                    .map(|lt| lt.wrapped().clone())
                    .ok_or_else(|| TermError::ForeignTerm(c.repr()))
            })
            .collect()
    }
}

impl<F: TermFactory> TermFactory for LoggingFactory<F> {
    fn make_symbol(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        self.new_symbol(name, sort, true)
    }

    fn make_param(&self, name: &str, sort: &Sort) -> TermResult<Term> {
        self.new_symbol(name, sort, false)
    }

    fn make_value(&self, value: &BigInt, sort: &Sort) -> TermResult<Term> {
        let wrapped = self.inner.make_value(value, sort)?;
        Ok(self.intern(LoggingTerm::value(wrapped, sort.clone())))
    }

    fn make_bool(&self, value: bool) -> TermResult<Term> {
        let wrapped = self.inner.make_bool(value)?;
        Ok(self.intern(LoggingTerm::value(wrapped, Sort::Bool)))
    }

    fn make_term(&self, op: &Op, children: &[Term]) -> TermResult<Term> {
        let wrapped_children = Self::unwrap_children(children)?;
        let sorts: Vec<Sort> = children.iter().map(|c| c.get_sort()).collect();
        let sort = infer_sort(op, &sorts)?;

        let wrapped = self.inner.make_term(op, &wrapped_children)?;
        if wrapped.get_op().as_ref() != Some(op) {
            debug!(
                "Underlying layer rewrote `{}` applied to {} children into `{}`",
                op,
                children.len(),
                wrapped
            );
        }

        Ok(self.intern(LoggingTerm::structural(
            wrapped,
            sort,
            op.clone(),
            children.to_vec(),
        )))
    }
}
