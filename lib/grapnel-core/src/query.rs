//! Query-string building.
//!
//! [`build_query_string`] is a pure helper with no request state: it joins
//! `key=value` pairs with `&`, expands list values to repeated pairs, and
//! skips absent or empty values. No percent-encoding is applied; callers
//! owning unusual values should encode them first.

use std::fmt::Write as _;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// A single value; skipped when empty.
    One(String),
    /// A list of values, expanded to repeated `key=value` pairs in order.
    Many(Vec<String>),
    /// An absent value, always skipped.
    Skip,
}

impl From<&str> for QueryParam {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for QueryParam {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for QueryParam {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Skip, Into::into)
    }
}

/// Build a `&`-joined query string from ordered key/value pairs.
///
/// There is no leading separator. Keys with [`QueryParam::Skip`] or an
/// empty [`QueryParam::One`] value are omitted; [`QueryParam::Many`] values
/// expand to one pair per element, in element order. An empty input yields
/// an empty string.
///
/// # Example
///
/// ```
/// use grapnel_core::{QueryParam, build_query_string};
///
/// let query = build_query_string([
///     ("a", "1".into()),
///     ("b", vec!["2", "3"].into()),
///     ("c", "".into()),
///     ("d", QueryParam::Skip),
/// ]);
/// assert_eq!(query, "a=1&b=2&b=3");
/// ```
pub fn build_query_string<K, I>(params: I) -> String
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, QueryParam)>,
{
    let mut result = String::new();
    for (key, param) in params {
        match param {
            QueryParam::Skip => {}
            QueryParam::One(value) => {
                if !value.is_empty() {
                    push_pair(&mut result, key.as_ref(), &value);
                }
            }
            QueryParam::Many(values) => {
                for value in &values {
                    push_pair(&mut result, key.as_ref(), value);
                }
            }
        }
    }
    result
}

fn push_pair(result: &mut String, key: &str, value: &str) {
    if !result.is_empty() {
        result.push('&');
    }
    // Writing to a String cannot fail
    let _ = write!(result, "{key}={value}");
}
