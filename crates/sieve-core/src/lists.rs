//! List filters

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::FilterError;
use crate::strings;
use crate::value::Value;

fn dedup<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Remove duplicate entries from an int or string list.
///
/// The first occurrence of each entry is kept. Any other value is returned
/// unchanged.
pub fn unique(value: Value) -> Value {
    match value {
        Value::IntList(items) => Value::IntList(dedup(items)),
        Value::StrList(items) => Value::StrList(dedup(items)),
        other => other,
    }
}

/// Trim every entry of a string list
pub fn trim_strings(items: &[String], cutset: Option<&str>) -> Vec<String> {
    items
        .iter()
        .map(|item| strings::trim(item, cutset))
        .collect()
}

/// Parse every entry of a string list as an integer
pub fn strings_to_ints(items: &[String]) -> Result<Vec<i64>, FilterError> {
    items
        .iter()
        .map(|item| {
            item.parse::<i64>()
                .map_err(|e| FilterError::conversion(item, "int", e.to_string()))
        })
        .collect()
}
