//! Filtration engine
//!
//! A [`Filtration`] holds a raw document and a list of [`Rule`]s. Running
//! [`Filtration::filtering`] applies every rule in registration order and
//! writes the results to a separate clean document; the raw document is
//! never modified.
//!
//! # Example
//!
//! ```rust
//! use sieve_core::{Filtration, Map, Value};
//!
//! let mut raw = Map::new();
//! raw.insert("name".into(), Value::from(" inhere "));
//! raw.insert("age".into(), Value::from(" 89 "));
//!
//! let mut f = Filtration::new(raw);
//! f.add_rule("name", "trim|ucFirst").unwrap();
//! f.add_rule("age", "trim|int").unwrap();
//! f.filtering().unwrap();
//!
//! assert_eq!(f.string("name"), "Inhere");
//! assert_eq!(f.int("age"), 89);
//! ```

use serde::de::DeserializeOwned;
use std::fmt;

use crate::convert;
use crate::error::{Error, FilterError, Result};
use crate::filter::{FilterSpec, parse_chain};
use crate::path::get_by_path;
use crate::strings::split_trimmed;
use crate::value::{Map, Value};

/// A custom rule function
pub type CustomFn = Box<dyn Fn(Value) -> std::result::Result<Value, FilterError> + Send + Sync>;

/// What a rule is built from
pub enum RuleSpec {
    /// A `|` separated filter chain, e.g. `trim|substr:0,2`
    Chain(String),
    /// A single custom function
    Custom(CustomFn),
}

impl RuleSpec {
    /// Wrap a closure as a rule spec
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value) -> std::result::Result<Value, FilterError> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(f))
    }
}

impl From<&str> for RuleSpec {
    fn from(chain: &str) -> Self {
        Self::Chain(chain.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(chain: String) -> Self {
        Self::Chain(chain)
    }
}

impl From<&String> for RuleSpec {
    fn from(chain: &String) -> Self {
        Self::Chain(chain.clone())
    }
}

/// The transformation a rule applies
pub enum RuleBody {
    /// Ordered filter chain
    Chain(Vec<FilterSpec>),
    /// Custom function
    Custom(CustomFn),
}

impl fmt::Debug for RuleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chain(filters) => f.debug_tuple("Chain").field(filters).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Field paths bound to a filter chain or custom function
#[derive(Debug)]
pub struct Rule {
    fields: Vec<String>,
    body: RuleBody,
    default: Option<Value>,
}

impl Rule {
    /// Build a rule for a comma-separated list of field paths.
    ///
    /// Fails with [`Error::Construction`] when the field list or the filter
    /// chain is empty.
    pub fn new(fields: &str, spec: impl Into<RuleSpec>) -> Result<Self> {
        let fields = split_trimmed(fields, ",");
        if fields.is_empty() {
            return Err(Error::construction("field list is empty"));
        }

        let body = match spec.into() {
            RuleSpec::Chain(chain) => {
                let filters = parse_chain(&chain);
                if filters.is_empty() {
                    return Err(Error::construction(format!(
                        "filter chain for '{}' is empty",
                        fields.join(",")
                    )));
                }
                RuleBody::Chain(filters)
            }
            RuleSpec::Custom(f) => RuleBody::Custom(f),
        };

        Ok(Self {
            fields,
            body,
            default: None,
        })
    }

    /// Value used when a field is missing from the document
    pub fn set_default(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Field paths this rule applies to
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Rule body
    pub fn body(&self) -> &RuleBody {
        &self.body
    }

    /// Filters of a chain rule; empty for custom rules
    pub fn filters(&self) -> &[FilterSpec] {
        match &self.body {
            RuleBody::Chain(filters) => filters,
            RuleBody::Custom(_) => &[],
        }
    }

    /// Default value, if any
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Run the chain (stopping at the first error) or the custom function
    pub fn apply(&self, value: Value) -> std::result::Result<Value, FilterError> {
        match &self.body {
            RuleBody::Chain(filters) => filters.iter().try_fold(value, |v, filter| filter.apply(v)),
            RuleBody::Custom(f) => f(value),
        }
    }
}

/// Raw data, rules, and the clean data they produce
#[derive(Debug, Default)]
pub struct Filtration {
    raw: Map,
    clean: Map,
    rules: Vec<Rule>,
    filtered: bool,
    error: Option<FilterError>,
}

impl Filtration {
    /// Create a filtration over `raw`
    pub fn new(raw: Map) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Merge `data` into the raw document
    pub fn load_data(&mut self, data: Map) -> &mut Self {
        self.raw.extend(data);
        self
    }

    /// Add a rule; see [`Rule::new`]
    pub fn add_rule(&mut self, fields: &str, spec: impl Into<RuleSpec>) -> Result<&mut Rule> {
        let rule = Rule::new(fields, spec)?;
        let index = self.rules.len();
        self.rules.push(rule);
        Ok(&mut self.rules[index])
    }

    /// Add a rule backed by a custom function
    pub fn add_custom_rule<F>(&mut self, fields: &str, f: F) -> Result<&mut Rule>
    where
        F: Fn(Value) -> std::result::Result<Value, FilterError> + Send + Sync + 'static,
    {
        self.add_rule(fields, RuleSpec::custom(f))
    }

    /// Add several `(fields, chain)` rules in order
    pub fn add_rules<I, K, V>(&mut self, rules: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RuleSpec>,
    {
        for (fields, spec) in rules {
            self.add_rule(fields.as_ref(), spec)?;
        }
        Ok(self)
    }

    /// Registered rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Apply all rules and fill the clean document.
    ///
    /// The pass stops at the first failing filter, leaving whatever was
    /// written so far. Repeated calls return the cached outcome until one of
    /// the reset methods is called.
    pub fn filtering(&mut self) -> std::result::Result<(), FilterError> {
        if self.filtered {
            return self.error.clone().map_or(Ok(()), Err);
        }
        self.filtered = true;

        for rule in &self.rules {
            for field in rule.fields() {
                let current = get_by_path(field, &self.clean)
                    .or_else(|| get_by_path(field, &self.raw))
                    .or(rule.default_value())
                    .cloned();

                let Some(value) = current else {
                    tracing::debug!(field = %field, "field absent, rule skipped");
                    continue;
                };

                match rule.apply(value) {
                    Ok(out) => {
                        tracing::debug!(field = %field, "rule applied");
                        self.clean.insert(field.clone(), out);
                    }
                    Err(err) => {
                        tracing::warn!(field = %field, error = %err, "filtering aborted");
                        self.error = Some(err.clone());
                        return Err(err);
                    }
                }
            }
        }

        Ok(())
    }

    /// Alias of [`Filtration::filtering`]
    pub fn sanitize(&mut self) -> std::result::Result<(), FilterError> {
        self.filtering()
    }

    /// Whether a filtering pass has run since the last reset
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Whether filtering ran and succeeded
    pub fn is_ok(&self) -> bool {
        self.filtered && self.error.is_none()
    }

    /// Error of the last filtering pass
    pub fn err(&self) -> Option<&FilterError> {
        self.error.as_ref()
    }

    /// Look up a path in the raw document only
    pub fn raw(&self, path: &str) -> Option<&Value> {
        get_by_path(path, &self.raw)
    }

    /// Look up a path in the clean document only
    pub fn safe(&self, path: &str) -> Option<&Value> {
        get_by_path(path, &self.clean)
    }

    /// Look up a path in the clean document, falling back to raw
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.safe(path).or_else(|| self.raw(path))
    }

    /// Like [`Filtration::get`], with [`Value::Null`] for missing paths
    pub fn must_get(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or_default()
    }

    /// Clean value as an integer, `0` if absent or not convertible
    pub fn int(&self, path: &str) -> i64 {
        self.safe(path).map(convert::must_int).unwrap_or_default()
    }

    /// Clean value as a 64-bit integer; same as [`Filtration::int`]
    pub fn int64(&self, path: &str) -> i64 {
        self.safe(path).map(convert::must_int64).unwrap_or_default()
    }

    /// Clean value as an unsigned integer, `0` if absent or not convertible
    pub fn uint(&self, path: &str) -> u64 {
        self.safe(path).map(convert::must_uint).unwrap_or_default()
    }

    /// Clean value as a float, `0.0` if absent or not convertible
    pub fn float(&self, path: &str) -> f64 {
        self.safe(path).map(convert::must_float).unwrap_or_default()
    }

    /// Clean value as a boolean, `false` if absent or not convertible
    pub fn bool(&self, path: &str) -> bool {
        self.safe(path).map(convert::must_bool).unwrap_or_default()
    }

    /// Clean value as a string, empty if absent or not a scalar
    pub fn string(&self, path: &str) -> String {
        self.safe(path).map(convert::must_string).unwrap_or_default()
    }

    /// The raw document
    pub fn raw_data(&self) -> &Map {
        &self.raw
    }

    /// The clean document
    pub fn clean_data(&self) -> &Map {
        &self.clean
    }

    /// Drop all rules and the clean document
    pub fn reset_rules(&mut self) {
        self.rules.clear();
        self.clean.clear();
        self.reset_state();
    }

    /// Drop the clean document, and the raw one too if `reset_raw`
    pub fn reset_data(&mut self, reset_raw: bool) {
        if reset_raw {
            self.raw.clear();
        }
        self.clean.clear();
        self.reset_state();
    }

    /// Drop rules and both documents
    pub fn clear(&mut self) {
        self.rules.clear();
        self.raw.clear();
        self.clean.clear();
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.filtered = false;
        self.error = None;
    }

    /// Deserialize the clean document into `T` via JSON
    pub fn bind_struct<T: DeserializeOwned>(&self) -> Result<T> {
        let doc = serde_json::to_value(&self.clean)?;
        Ok(serde_json::from_value(doc)?)
    }
}
