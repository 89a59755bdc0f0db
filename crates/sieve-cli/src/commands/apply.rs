//! Apply a filter chain to a single value

use anyhow::{Context, Result};
use sieve_core::{Rule, Value, registry};

/// Run the apply command
pub fn run(chain: &str, value: &str) -> Result<()> {
    let rule = Rule::new("value", chain).context("Invalid filter chain")?;

    for spec in rule.filters() {
        if !registry::is_known(&spec.name) {
            tracing::warn!("Unknown filter '{}' leaves the value unchanged", spec.name);
        }
    }

    let out = rule.apply(Value::from(value)).context("Filter failed")?;
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
