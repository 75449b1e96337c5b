use hyterm::error::{TermError, TermResult};
use serde::{Deserialize, Serialize};

/// Options of the reference engine.
///
/// Every field has a default, so a configuration file only needs to list what it changes:
///
/// ```toml
/// rewrite = false
/// max_bv_width = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Apply local simplifications while building terms.
    pub rewrite: bool,
    /// Report `Bool` as a one-bit bit-vector, like bit-vector engines do.
    pub alias_bool_to_bv1: bool,
    /// Order the children of commutative operators so that permutations share a node.
    pub normalize_commutative: bool,
    /// Widest bit-vector sort accepted.
    pub max_bv_width: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rewrite: true,
            alias_bool_to_bv1: true,
            normalize_commutative: true,
            max_bv_width: 128 * 1024,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> TermResult<Self> {
        toml::from_str(content).map_err(|e| TermError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> TermResult<String> {
        toml::to_string(self).map_err(|e| TermError::Config(e.to_string()))
    }

    pub fn with_rewrite(mut self, rewrite: bool) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn with_bool_alias(mut self, alias: bool) -> Self {
        self.alias_bool_to_bv1 = alias;
        self
    }

    pub fn with_commutative_normalization(mut self, normalize: bool) -> Self {
        self.normalize_commutative = normalize;
        self
    }

    pub fn with_max_bv_width(mut self, width: u32) -> Self {
        self.max_bv_width = width;
        self
    }
}
