//! Built-in filter names
//!
//! Two compile-time tables: aliases mapping alternate spellings to the
//! canonical filter name, and the set of filters that accept values of any
//! type. Every other filter only takes strings.

use phf::{phf_map, phf_set};

static ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "toInt" => "int",
    "toUint" => "uint",
    "toInt64" => "int64",
    "toFloat" => "float",
    "toBool" => "bool",
    "camel" => "camelCase",
    "snake" => "snakeCase",
    "ltrim" => "trimLeft",
    "rtrim" => "trimRight",
    "lcFirst" => "lowerFirst",
    "ucFirst" => "upperFirst",
    "ucWord" => "upperWord",
    "distinct" => "unique",
    "trimList" => "trimStrings",
    "trimSpace" => "trim",
    "uppercase" => "upper",
    "lowercase" => "lower",
    "escapeJs" => "escapeJS",
    "escapeHtml" => "escapeHTML",
    "urlEncode" => "URLEncode",
    "encodeUrl" => "URLEncode",
    "urlDecode" => "URLDecode",
    "decodeUrl" => "URLDecode",
    "str2ints" => "strToInts",
    "str2arr" => "strToSlice",
    "str2list" => "strToSlice",
    "str2array" => "strToSlice",
    "strToArr" => "strToSlice",
    "str2time" => "strToTime",
    "strings2ints" => "stringsToInts",
};

static UNRESTRICTED: phf::Set<&'static str> = phf_set! {
    "int",
    "uint",
    "int64",
    "float",
    "unique",
    "trimStrings",
    "stringsToInts",
};

static STRING_FILTERS: phf::Set<&'static str> = phf_set! {
    "bool",
    "trim",
    "trimLeft",
    "trimRight",
    "title",
    "email",
    "substr",
    "lower",
    "upper",
    "lowerFirst",
    "upperFirst",
    "upperWord",
    "snakeCase",
    "camelCase",
    "URLEncode",
    "URLDecode",
    "escapeJS",
    "escapeHTML",
    "strToInts",
    "strToSlice",
    "strToTime",
};

/// Resolve a filter name to its canonical form.
///
/// Unknown names are returned unchanged.
pub fn name(name: &str) -> &str {
    ALIASES.get(name).copied().unwrap_or(name)
}

/// Whether the canonical filter accepts values of any type
pub fn is_unrestricted(canonical: &str) -> bool {
    UNRESTRICTED.contains(canonical)
}

/// Whether `name` (or the filter it aliases) is a built-in filter
pub fn is_known(name: &str) -> bool {
    let canonical = self::name(name);
    UNRESTRICTED.contains(canonical) || STRING_FILTERS.contains(canonical)
}

/// All canonical filter names, sorted
pub fn filters() -> Vec<&'static str> {
    let mut names: Vec<_> = UNRESTRICTED
        .iter()
        .chain(STRING_FILTERS.iter())
        .copied()
        .collect();
    names.sort_unstable();
    names
}

/// All `(alias, canonical)` pairs, sorted by alias
pub fn aliases() -> Vec<(&'static str, &'static str)> {
    let mut pairs: Vec<_> = ALIASES.entries().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_resolves_alias() {
        assert_eq!(name("str2time"), "strToTime");
        assert_eq!(name("ucFirst"), "upperFirst");
        assert_eq!(name("some"), "some");
    }

    #[test]
    fn test_every_alias_targets_a_filter() {
        for (alias, canonical) in aliases() {
            assert!(is_known(canonical), "{alias} -> {canonical}");
        }
    }

    #[test]
    fn test_is_known() {
        assert!(is_known("trim"));
        assert!(is_known("toInt"));
        assert!(!is_known("nope"));
    }

    #[test]
    fn test_unrestricted() {
        assert!(is_unrestricted("int"));
        assert!(is_unrestricted("unique"));
        assert!(!is_unrestricted("trim"));
        assert!(!is_unrestricted("toInt"));
    }
}
