//! Reference engine: hash-consed nodes with light rewriting.
//!
//! Behaves like the bit-vector engines hyterm is meant to sit on: structurally equal
//! constructions share one node, a handful of local simplifications may answer a
//! construction with an existing node, and `Bool` is reported as a one-bit bit-vector.
//! Each behavior can be switched off through [`EngineConfig`].
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};

use hyterm::error::{TermError, TermResult};
use hyterm::infer::infer_sort;
use hyterm::op::Op;
use hyterm::sort::{Sort, SortKind};
use log::{debug, info, trace};
use num_bigint::{BigInt, Sign};
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use smallvec::{SmallVec, smallvec};

use crate::config::EngineConfig;
use crate::engine::Engine;

pub mod node;
mod rewrite;

pub use node::{NodeData, NodeId, NodeKind};

pub struct HashConsEngine {
    config: EngineConfig,
    nodes: RwLock<Vec<NodeData>>,
    inverse_lookup: RwLock<BTreeMap<u64, SmallVec<NodeId, 1>>>,
    symbols: RwLock<HashMap<NodeId, String>>,
    names: Mutex<HashSet<String>>,
}

impl Default for HashConsEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl HashConsEngine {
    fn hash_node(data: &NodeData) -> u64 {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        hasher.finish()
    }

    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            // INFO: Always lock nodes before inverse_lookup to avoid deadlock
            nodes: Default::default(),
            inverse_lookup: Default::default(),
            symbols: Default::default(),
            names: Default::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of distinct nodes created so far.
    pub fn num_nodes(&self) -> usize {
        self.nodes.read_recursive().len()
    }

    /// Borrow the data of a node. The guard must be released before building new nodes.
    pub fn get(&self, id: NodeId) -> Option<MappedRwLockReadGuard<'_, NodeData>> {
        let nodes = self.nodes.read_recursive();
        RwLockReadGuard::try_map(nodes, |nodes| nodes.get(id.index())).ok()
    }

    /// Owned copy of a node's data. Nodes of other engine instances are foreign.
    fn data(&self, id: NodeId) -> TermResult<NodeData> {
        self.nodes
            .read_recursive()
            .get(id.index())
            .cloned()
            .ok_or_else(|| TermError::ForeignTerm(id.to_string()))
    }

    /// Return the node equal to `data`, creating it if needed.
    fn search_or_insert(&self, data: NodeData) -> NodeId {
        let h = Self::hash_node(&data);

        let mut nodes = self.nodes.upgradable_read();
        let mut inverse_lookup = self.inverse_lookup.upgradable_read();

        if let Some(candidates) = inverse_lookup.get(&h) {
            for id in candidates {
                if nodes[id.index()] == data {
                    trace!("Hash-consed onto existing node {}", id);
                    return *id;
                }
            }
        }

        // NOTE: Ordering of upgrade matters, nodes first
        nodes.with_upgraded(|nodes| {
            inverse_lookup.with_upgraded(|inverse_lookup| {
                let id = NodeId(nodes.len() as u64);
                if let Some(list) = inverse_lookup.get_mut(&h) {
                    info!(
                        "Detected an hash collision on hash 0x{:016x} between {} and {:?}",
                        h, id, list
                    );
                    list.push(id);
                } else {
                    inverse_lookup.insert(h, smallvec![id]);
                }
                debug!("New node {} of sort {}", id, data.sort);
                nodes.push(data);
                id
            })
        })
    }

    fn check_sort(&self, sort: &Sort) -> TermResult<()> {
        match sort {
            Sort::BitVec(0) => Err(TermError::InvalidSort(
                "bit-vectors must be at least one bit wide".to_string(),
            )),
            Sort::BitVec(w) if *w > self.config.max_bv_width => Err(TermError::Unsupported(
                format!(
                    "bit-vectors wider than {} bits (got {})",
                    self.config.max_bv_width, w
                ),
            )),
            Sort::Array(parts) => {
                self.check_sort(&parts.0)?;
                self.check_sort(&parts.1)
            }
            Sort::Function(_) => {
                for s in sort.domain() {
                    self.check_sort(s)?;
                }
                match sort.codomain() {
                    Some(codomain) => self.check_sort(codomain),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    fn declare(&self, name: &str, sort: &Sort, kind: NodeKind) -> TermResult<NodeId> {
        let mut names = self.names.lock();
        if names.contains(name) {
            return Err(TermError::DuplicateSymbol(name.to_string()));
        }
        self.check_sort(sort)?;

        let id = self.search_or_insert(NodeData {
            kind,
            sort: sort.clone(),
        });
        self.symbols.write().insert(id, name.to_string());
        names.insert(name.to_string());
        debug!("Declared `{}` of sort {} as node {}", name, sort, id);
        Ok(id)
    }

    /// Sort reported to clients, with `Bool` aliased when configured.
    fn alias(&self, sort: &Sort) -> Sort {
        if !self.config.alias_bool_to_bv1 {
            return sort.clone();
        }
        match sort {
            Sort::Bool => Sort::BitVec(1),
            Sort::Array(parts) => Sort::array(self.alias(&parts.0), self.alias(&parts.1)),
            Sort::Function(sorts) => Sort::Function(sorts.iter().map(|s| self.alias(s)).collect()),
            _ => sort.clone(),
        }
    }

    fn write_node(&self, nodes: &[NodeData], id: NodeId, out: &mut String) {
        let Some(data) = nodes.get(id.index()) else {
            out.push_str(&id.to_string());
            return;
        };
        match &data.kind {
            NodeKind::Symbol(name) | NodeKind::Param(name) => out.push_str(name),
            NodeKind::Value(v) => {
                let sort = self.alias(&data.sort);
                match format_value(v, &data.sort, sort.kind()) {
                    Some(text) => out.push_str(&text),
                    None => out.push_str(&v.to_string()),
                }
            }
            NodeKind::App { op, children } => {
                out.push('(');
                out.push_str(&op.to_string());
                for c in children.iter() {
                    out.push(' ');
                    self.write_node(nodes, *c, out);
                }
                out.push(')');
            }
        }
    }
}

/// Render literal `v` of logical sort `sort` as a value of kind `kind`.
fn format_value(v: &BigInt, sort: &Sort, kind: SortKind) -> Option<String> {
    match (kind, sort) {
        (SortKind::Bool, Sort::Bool | Sort::BitVec(1)) => Some(
            if v.sign() == Sign::NoSign {
                "false"
            } else {
                "true"
            }
            .to_string(),
        ),
        (SortKind::BitVec, Sort::Bool) => Some(format!("#b{}", v)),
        (SortKind::BitVec, Sort::BitVec(w)) => Some(format!(
            "#b{:0>width$}",
            v.to_str_radix(2),
            width = *w as usize
        )),
        (SortKind::Int, Sort::Int) => Some(if v.sign() == Sign::Minus {
            format!("(- {})", v.magnitude())
        } else {
            v.to_string()
        }),
        _ => None,
    }
}

impl Engine for HashConsEngine {
    type Node = NodeId;

    fn mk_symbol(&self, name: &str, sort: &Sort) -> TermResult<NodeId> {
        self.declare(name, sort, NodeKind::Symbol(name.to_string()))
    }

    fn mk_param(&self, name: &str, sort: &Sort) -> TermResult<NodeId> {
        self.declare(name, sort, NodeKind::Param(name.to_string()))
    }

    fn mk_value(&self, value: &BigInt, sort: &Sort) -> TermResult<NodeId> {
        self.check_sort(sort)?;
        let out_of_range = || TermError::ValueOutOfRange {
            value: value.to_string(),
            target: sort.to_string(),
        };

        let value = match sort {
            Sort::Bool => {
                if *value != BigInt::from(0u8) && *value != BigInt::from(1u8) {
                    return Err(out_of_range());
                }
                value.clone()
            }
            Sort::BitVec(w) => {
                let modulus = BigInt::from(1u8) << *w;
                let lowest = -(&modulus >> 1usize);
                if *value >= modulus || *value < lowest {
                    return Err(out_of_range());
                }
                if value.sign() == Sign::Minus {
                    value + &modulus
                } else {
                    value.clone()
                }
            }
            Sort::Int => value.clone(),
            _ => {
                return Err(TermError::Unsupported(format!(
                    "literals of sort {}",
                    sort
                )));
            }
        };

        Ok(self.search_or_insert(NodeData {
            kind: NodeKind::Value(value),
            sort: sort.clone(),
        }))
    }

    fn mk_bool(&self, value: bool) -> TermResult<NodeId> {
        self.mk_value(&BigInt::from(value as u8), &Sort::Bool)
    }

    fn mk_term(&self, op: &Op, children: &[NodeId]) -> TermResult<NodeId> {
        let sorts = {
            let nodes = self.nodes.read_recursive();
            children
                .iter()
                .map(|c| {
                    nodes
                        .get(c.index())
                        .map(|d| d.sort.clone())
                        .ok_or_else(|| TermError::ForeignTerm(c.to_string()))
                })
                .collect::<TermResult<Vec<_>>>()?
        };
        let sort = infer_sort(op, &sorts)?;
        self.check_sort(&sort)?;

        if self.config.rewrite {
            if let Some(id) = rewrite::simplify(self, op, children)? {
                debug!("Rewrote `{}` over {:?} into node {}", op, children, id);
                return Ok(id);
            }
        }

        let mut children: SmallVec<NodeId, 4> = children.iter().copied().collect();
        if self.config.normalize_commutative && op.prim_op.is_commutative() {
            children.sort_unstable();
        }

        Ok(self.search_or_insert(NodeData {
            kind: NodeKind::App {
                op: op.clone(),
                children,
            },
            sort,
        }))
    }

    fn node_id(&self, node: &NodeId) -> u64 {
        node.raw()
    }

    fn symbol(&self, node: &NodeId) -> Option<String> {
        self.symbols.read().get(node).cloned()
    }

    fn set_symbol(&self, node: &NodeId, symbol: &str) -> bool {
        match self.symbols.write().entry(*node) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(symbol.to_string());
                true
            }
        }
    }

    fn is_value(&self, node: &NodeId) -> bool {
        self.data(*node).is_ok_and(|d| d.kind.is_value())
    }

    fn is_param(&self, node: &NodeId) -> bool {
        self.data(*node).is_ok_and(|d| d.kind.is_param())
    }

    fn is_uninterpreted_const(&self, node: &NodeId) -> bool {
        self.data(*node).is_ok_and(|d| d.kind.is_symbol())
    }

    /// # Panics
    /// If `node` was not created by this engine.
    fn sort_of(&self, node: &NodeId) -> Sort {
        let nodes = self.nodes.read_recursive();
        self.alias(&nodes[node.index()].sort)
    }

    fn print_value_as(&self, node: &NodeId, kind: SortKind) -> TermResult<String> {
        let data = self.data(*node)?;
        let Some(v) = data.value() else {
            return Err(TermError::NotAValue(self.dump(node)));
        };
        format_value(v, &data.sort, kind).ok_or_else(|| TermError::IncompatibleSortKind {
            term: self.dump(node),
            kind,
        })
    }

    fn to_int(&self, node: &NodeId) -> TermResult<u64> {
        let data = self.data(*node)?;
        let Some(v) = data.value() else {
            return Err(TermError::NotAValue(self.dump(node)));
        };
        u64::try_from(v).map_err(|_| TermError::ValueOutOfRange {
            value: v.to_string(),
            target: "u64".to_string(),
        })
    }

    fn dump(&self, node: &NodeId) -> String {
        let nodes = self.nodes.read_recursive();
        let mut out = String::new();
        self.write_node(&nodes, *node, &mut out);
        out
    }
}
