//! Rule set configuration
//!
//! Rules can be declared in YAML and registered on a [`Filtration`] in one
//! go.
//!
//! # Example
//!
//! ```yaml
//! rules:
//!   - fields: name,email
//!     filters: trim|lower
//!
//!   - fields: missing
//!     filters: trim
//!     default: " def val "
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::filter::parse_chain;
use crate::filtration::Filtration;
use crate::registry;
use crate::value::{Map, Value};

/// A single rule declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Comma-separated field paths
    pub fields: String,

    /// `|` separated filter chain
    pub filters: String,

    /// Value used when a field is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// An ordered list of rule declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules, applied in order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RuleSet {
    /// Parse a rule set from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a rule set from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let set = Self::from_yaml(&contents)?;
        tracing::debug!(path = %path.display(), rules = set.rules.len(), "rule set loaded");
        Ok(set)
    }

    /// Filter names that are neither built in nor an alias of one.
    ///
    /// Such filters pass values through unchanged at run time.
    pub fn unknown_filters(&self) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| parse_chain(&rule.filters))
            .map(|spec| spec.name)
            .filter(|name| !registry::is_known(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Register every rule on `filtration`
    pub fn apply_to(&self, filtration: &mut Filtration) -> Result<()> {
        for rule in &self.rules {
            let added = filtration.add_rule(&rule.fields, rule.filters.as_str())?;
            if let Some(default) = &rule.default {
                added.set_default(default.clone());
            }
        }
        Ok(())
    }

    /// Build a filtration over `raw` with every rule registered
    pub fn filtration(&self, raw: Map) -> Result<Filtration> {
        let mut filtration = Filtration::new(raw);
        self.apply_to(&mut filtration)?;
        Ok(filtration)
    }
}
