//! Dotted path lookup into nested documents

use crate::value::{Map, Value};

/// Look up `path` in `map`.
///
/// A flat key equal to the whole path wins. Otherwise `"top.sub.leaf"`
/// descends one segment at a time and fails when a segment is missing or
/// an intermediate value is not a map.
pub fn get_by_path<'a>(path: &str, map: &'a Map) -> Option<&'a Value> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    let (top, rest) = path.split_once('.')?;
    rest.split('.')
        .try_fold(map.get(top)?, |item, key| item.as_map()?.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Map {
        serde_json::from_value(json!({
            "key1": "2",
            "sub": {"k0": "v0", "deep": {"k1": 1}},
            "flat.key": "flat",
            "list": ["a"],
        }))
        .unwrap()
    }

    #[test]
    fn test_top_level() {
        let doc = doc();
        assert_eq!(get_by_path("key1", &doc), Some(&Value::from("2")));
        assert_eq!(get_by_path("not-exist", &doc), None);
    }

    #[test]
    fn test_nested() {
        let doc = doc();
        assert_eq!(get_by_path("sub.k0", &doc), Some(&Value::from("v0")));
        assert_eq!(get_by_path("sub.deep.k1", &doc), Some(&Value::Int(1)));
        assert_eq!(get_by_path("sub.not-exist", &doc), None);
        assert_eq!(get_by_path("sub.k0.more", &doc), None);
        assert_eq!(get_by_path("list.0", &doc), None);
    }

    #[test]
    fn test_flat_key_wins() {
        let doc = doc();
        assert_eq!(get_by_path("flat.key", &doc), Some(&Value::from("flat")));
    }
}
