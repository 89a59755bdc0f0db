//! Filter dispatch
//!
//! [`apply`] resolves a filter name, checks the value type the filter
//! needs, and runs it. Filters are declared as `name` or `name:args`
//! (`substr:0,2`, `str2arr:;`) and chained with `|`.

use crate::convert;
use crate::error::FilterError;
use crate::lists;
use crate::registry;
use crate::strings;
use crate::time;
use crate::value::Value;

type Result<T> = std::result::Result<T, FilterError>;

/// A filter name plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Filter name as written (may be an alias)
    pub name: String,
    /// Parsed arguments
    pub args: Vec<String>,
}

impl FilterSpec {
    /// Parse `name` or `name:args`
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(':') {
            Some((name, args)) => Self {
                name: name.trim().to_string(),
                args: parse_args(args),
            },
            None => Self {
                name: spec.trim().to_string(),
                args: Vec::new(),
            },
        }
    }

    /// Run this filter on `value`
    pub fn apply(&self, value: Value) -> Result<Value> {
        apply(&self.name, value, &self.args)
    }
}

/// Parse a filter argument string.
///
/// A single character is kept as one literal argument, so a separator like
/// `,` survives. Anything longer is split on commas, trimmed, and empty
/// pieces are dropped.
pub fn parse_args(args: &str) -> Vec<String> {
    match args.chars().count() {
        0 => Vec::new(),
        1 => vec![args.to_string()],
        _ => strings::split_trimmed(args, ","),
    }
}

/// Parse a `|` separated filter chain such as `trim|substr:0,2`
pub fn parse_chain(chain: &str) -> Vec<FilterSpec> {
    chain
        .split('|')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(FilterSpec::parse)
        .collect()
}

fn arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str)
}

/// Apply a filter by name.
///
/// Numeric coercions and the list filters take values of any type; every
/// other filter requires a string and fails with
/// [`FilterError::InvalidInput`] otherwise. Unknown filter names return the
/// value unchanged.
pub fn apply(name: &str, value: impl Into<Value>, args: &[String]) -> Result<Value> {
    let value = value.into();
    let canonical = registry::name(name);

    if registry::is_unrestricted(canonical) {
        return apply_unrestricted(name, canonical, value, args);
    }

    let s = match value {
        Value::Str(s) => s,
        other => {
            return Err(FilterError::invalid_input(
                name,
                format!("only used for string values, got {}", other.type_name()),
            ));
        }
    };

    apply_string(name, canonical, s, args)
}

fn apply_unrestricted(name: &str, canonical: &str, value: Value, args: &[String]) -> Result<Value> {
    let expect_str_list = |other: &Value| {
        FilterError::invalid_input(
            name,
            format!("expected a string list, got {}", other.type_name()),
        )
    };

    match canonical {
        "int" | "int64" => convert::to_int(&value).map(Value::Int),
        "uint" => convert::to_uint(&value).map(Value::Uint),
        "float" => convert::to_float(&value).map(Value::Float),
        "unique" => Ok(lists::unique(value)),
        "trimStrings" => match value {
            Value::StrList(items) => Ok(Value::StrList(lists::trim_strings(&items, arg(args, 0)))),
            other => Err(expect_str_list(&other)),
        },
        "stringsToInts" => match value {
            Value::StrList(items) => lists::strings_to_ints(&items).map(Value::IntList),
            other => Err(expect_str_list(&other)),
        },
        _ => Ok(value),
    }
}

fn substr(name: &str, s: &str, args: &[String]) -> Result<Value> {
    let Some(pos) = arg(args, 0) else {
        return Err(FilterError::invalid_input(
            name,
            "requires a start position, e.g. substr:0,2",
        ));
    };

    let pos = convert::to_int(&Value::from(pos))?;
    let len = arg(args, 1)
        .map(|len| convert::to_int(&Value::from(len)))
        .transpose()?;

    Ok(Value::Str(strings::substr(s, pos, len)))
}

fn apply_string(name: &str, canonical: &str, s: String, args: &[String]) -> Result<Value> {
    let first = arg(args, 0);

    let out = match canonical {
        "bool" => Value::Bool(convert::parse_bool(&s)?),
        "trim" => Value::Str(strings::trim(&s, first)),
        "trimLeft" => Value::Str(strings::trim_left(&s, first)),
        "trimRight" => Value::Str(strings::trim_right(&s, first)),
        "title" => Value::Str(strings::title(&s)),
        "email" => Value::Str(strings::email(&s)),
        "substr" => substr(name, &s, args)?,
        "lower" => Value::Str(s.to_lowercase()),
        "upper" => Value::Str(s.to_uppercase()),
        "lowerFirst" => Value::Str(strings::lower_first(&s)),
        "upperFirst" => Value::Str(strings::upper_first(&s)),
        "upperWord" => Value::Str(strings::upper_word(&s)),
        "snakeCase" => Value::Str(strings::snake_case(&s, first)),
        "camelCase" => Value::Str(strings::camel_case(&s, first)),
        "URLEncode" => Value::Str(strings::url_encode(&s)),
        "URLDecode" => Value::Str(strings::url_decode(&s)),
        "escapeJS" => Value::Str(strings::escape_js(&s)),
        "escapeHTML" => Value::Str(strings::escape_html(&s)),
        "strToInts" => Value::IntList(strings::str_to_ints(&s, first)?),
        "strToSlice" => Value::StrList(strings::str_to_slice(&s, first)),
        "strToTime" => Value::Time(time::str_to_time(&s, first)?),
        _ => {
            tracing::warn!(filter = name, "unknown filter, value passed through unchanged");
            Value::Str(s)
        }
    };

    Ok(out)
}
