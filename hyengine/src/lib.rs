//! Hyengine: solving-engine adapters for hyterm.
//!
//! Engines are free to rewrite a construction into any node they consider equivalent,
//! including one of its own children. The adapters in this crate keep the operator, the
//! children and the engine node of every term consistent with each other regardless.
//!
//! Layout
//!  - [`engine`]: the [`Engine`](engine::Engine) boundary consumed by the adapters.
//!  - [`adapter`]: [`AdapterTerm`](adapter::AdapterTerm), reconciling engine rewrites.
//!  - [`session`]: a [`TermFactory`](hyterm::factory::TermFactory) over one engine.
//!  - [`hashcons`]: a hash-consing reference engine, configured through [`config`].
//!
//! ```
//! use hyengine::prelude::*;
//! use hyterm::prelude::*;
//!
//! let session = AdapterSession::new(HashConsEngine::default());
//! let terms = LoggingFactory::new(session);
//!
//! let x = terms.make_symbol("x", &Sort::Bool).unwrap();
//! let and = terms.make_term(&Op::from(PrimOp::And), &[x.clone(), x.clone()]).unwrap();
//!
//! // The engine folded the conjunction, the term still reads as requested.
//! assert_eq!(and.repr(), "(and x x)");
//! let logged = and.downcast_ref::<LoggingTerm>().unwrap();
//! assert_eq!(logged.raw_repr(), "x");
//! ```

/// Adapter terms over engine nodes.
pub mod adapter;
/// Reference engine configuration.
pub mod config;
/// The engine boundary.
pub mod engine;
/// Hash-consing reference engine.
pub mod hashcons;
/// Term factory over an engine.
pub mod session;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::adapter::AdapterTerm;
    pub use crate::config::EngineConfig;
    pub use crate::engine::Engine;
    pub use crate::hashcons::{HashConsEngine, NodeId};
    pub use crate::session::AdapterSession;
}
