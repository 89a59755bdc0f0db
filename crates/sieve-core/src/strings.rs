//! String filters
//!
//! Trimming, case conversion, escaping and splitting. All functions are
//! pure and never fail except [`str_to_ints`], which converts each piece.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::convert;
use crate::error::FilterError;
use crate::value::Value;

static TO_SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[A-Z][a-z]").expect("Invalid regex pattern"));

static TO_CAMEL: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [" ", "-", "_"]
        .into_iter()
        .map(|sep| (sep, camel_regex(sep).expect("Invalid regex pattern")))
        .collect()
});

fn camel_regex(sep: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?:{})+[a-zA-Z]", regex::escape(sep)))
}

/// Trim whitespace, or the characters of `cutset` when given
pub fn trim(s: &str, cutset: Option<&str>) -> String {
    match cutset {
        Some(set) if !set.is_empty() => s.trim_matches(|c: char| set.contains(c)).to_string(),
        _ => s.trim().to_string(),
    }
}

/// Trim the left side; `cutset` defaults to a single space
pub fn trim_left(s: &str, cutset: Option<&str>) -> String {
    let set = cutset.unwrap_or(" ");
    s.trim_start_matches(|c: char| set.contains(c)).to_string()
}

/// Trim the right side; `cutset` defaults to a single space
pub fn trim_right(s: &str, cutset: Option<&str>) -> String {
    let set = cutset.unwrap_or(" ");
    s.trim_end_matches(|c: char| set.contains(c)).to_string()
}

/// Map every letter to its title case
pub fn title(s: &str) -> String {
    s.to_uppercase()
}

/// Upper-case the first character if it is an ASCII lowercase letter
pub fn upper_first(s: &str) -> String {
    match s.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.push(c.to_ascii_uppercase());
            out.push_str(&s[1..]);
            out
        }
        _ => s.to_string(),
    }
}

/// Lower-case the first character if it is an ASCII uppercase letter
pub fn lower_first(s: &str) -> String {
    match s.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let mut out = String::with_capacity(s.len());
            out.push(c.to_ascii_lowercase());
            out.push_str(&s[1..]);
            out
        }
        _ => s.to_string(),
    }
}

/// Upper-case the first letter of every space separated word
pub fn upper_word(s: &str) -> String {
    s.split(' ').map(upper_first).collect::<Vec<_>>().join(" ")
}

/// Convert to snake case: `"RangePrice"` -> `"range_price"`.
///
/// `sep` replaces the default `_`.
pub fn snake_case(s: &str, sep: Option<&str>) -> String {
    let sep = sep.filter(|s| !s.is_empty()).unwrap_or("_");
    let replaced = TO_SNAKE.replace_all(s, |caps: &Captures| {
        format!("{sep}{}", lower_first(&caps[0]))
    });
    replaced.trim_start_matches(sep).to_string()
}

/// Convert to camel case: `"range_price"` -> `"rangePrice"`.
///
/// `sep` replaces the default `_`. Strings without the separator are
/// returned unchanged.
pub fn camel_case(s: &str, sep: Option<&str>) -> String {
    let sep = sep.filter(|s| !s.is_empty()).unwrap_or("_");
    if !s.contains(sep) {
        return s.to_string();
    }

    let compiled;
    let rgx = match TO_CAMEL.get(sep) {
        Some(rgx) => rgx,
        None => match camel_regex(sep) {
            Ok(rgx) => {
                compiled = rgx;
                &compiled
            }
            Err(_) => return s.to_string(),
        },
    };

    rgx.replace_all(s, |caps: &Captures| {
        upper_first(caps[0].trim_start_matches(sep))
    })
    .into_owned()
}

/// Clean up an email address.
///
/// Surrounding whitespace is removed and the domain (after the last `@`)
/// is lower-cased. The local part keeps its case.
pub fn email(s: &str) -> String {
    let s = s.trim();
    match s.rfind('@') {
        Some(at) => format!("{}@{}", &s[..at], s[at + 1..].to_lowercase()),
        None => s.to_string(),
    }
}

/// Cut a substring by code point position.
///
/// A negative `pos` counts from the end. `len` of `None` runs to the end.
/// Out of range positions yield an empty string.
pub fn substr(s: &str, pos: i64, len: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let total = chars.len() as i64;

    let start = if pos < 0 { (total + pos).max(0) } else { pos };
    if start >= total {
        return String::new();
    }

    let end = match len {
        Some(l) if l <= 0 => return String::new(),
        Some(l) => start.saturating_add(l).min(total),
        None => total,
    };

    chars[start as usize..end as usize].iter().collect()
}

/// Query-escape everything after the first `?`
pub fn url_encode(s: &str) -> String {
    match s.find('?') {
        Some(pos) => {
            let query = urlencoding::encode(&s[pos + 1..]).replace("%20", "+");
            format!("{}{}", &s[..=pos], query)
        }
        None => s.to_string(),
    }
}

/// Un-escape everything after the first `?`; malformed input is returned as is
pub fn url_decode(s: &str) -> String {
    let Some(pos) = s.find('?') else {
        return s.to_string();
    };

    let query = &s[pos + 1..];
    if !has_valid_escapes(query) {
        return s.to_string();
    }

    let with_spaces = query.replace('+', " ");
    match urlencoding::decode(&with_spaces) {
        Ok(query) => format!("{}{}", &s[..=pos], query),
        Err(_) => s.to_string(),
    }
}

fn has_valid_escapes(query: &str) -> bool {
    let bytes = query.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

/// Escape text for embedding in HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\0' => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for embedding in a JavaScript string literal
pub fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '<' | '>' | '&' | '=' => out.push_str(&format!("\\u{:04X}", c as u32)),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04X}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}

/// Split on `sep`, trim every piece and drop the empty ones
pub(crate) fn split_trimmed(s: &str, sep: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }

    s.split(sep)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a string into a list; `sep` defaults to `,`
pub fn str_to_slice(s: &str, sep: Option<&str>) -> Vec<String> {
    split_trimmed(s, sep.unwrap_or(","))
}

/// Split a string into a list and convert each piece to an integer
pub fn str_to_ints(s: &str, sep: Option<&str>) -> Result<Vec<i64>, FilterError> {
    str_to_slice(s, sep)
        .into_iter()
        .map(|piece| convert::to_int(&Value::Str(piece)))
        .collect()
}
