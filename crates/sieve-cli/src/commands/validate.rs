//! Validate rule set command

use anyhow::{Context, Result, bail};
use sieve_core::RuleSet;

/// Run the validate command
pub fn run(rules_path: &str) -> Result<()> {
    tracing::info!("Validating rule set: {}", rules_path);

    let rules = RuleSet::load(rules_path).context("Failed to load rule set")?;
    rules
        .filtration(Default::default())
        .context("Invalid rule")?;

    tracing::info!("✓ Rules: {}", rules.rules.len());

    let unknown = rules.unknown_filters();
    if !unknown.is_empty() {
        bail!("Unknown filters: {}", unknown.join(", "));
    }

    tracing::info!("✓ Rule set is valid");
    Ok(())
}
