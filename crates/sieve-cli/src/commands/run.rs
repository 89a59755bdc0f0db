//! Apply a rule set to a JSON document

use anyhow::{Context, Result};
use sieve_core::{Map, RuleSet};
use std::io::Read;

fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Run the run command
pub fn run(rules_path: &str, input: Option<&str>, pretty: bool) -> Result<()> {
    tracing::info!("Loading rules from {}", rules_path);

    let rules = RuleSet::load(rules_path).context("Failed to load rule set")?;
    let raw: Map =
        serde_json::from_str(&read_input(input)?).context("Input must be a JSON object")?;

    let mut filtration = rules.filtration(raw).context("Invalid rule")?;
    filtration.filtering().context("Filtering failed")?;

    let clean = filtration.clean_data();
    let output = if pretty {
        serde_json::to_string_pretty(clean)?
    } else {
        serde_json::to_string(clean)?
    };
    println!("{}", output);

    tracing::info!("✓ {} fields filtered", clean.len());
    Ok(())
}
