//! Path templates with named placeholders.
//!
//! `{name}` expands to the percent-encoded value of `name`. `{+name}` is a
//! reserved expansion that leaves `/` and other reserved characters intact.
//! Every placeholder must resolve to a non-empty value, and no expanded path
//! segment may be `.` or `..`.

use crate::error::{Error, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Everything except RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Like [`SEGMENT`], but keeps reserved characters.
const RESERVED: &AsciiSet = &SEGMENT
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b'%');

/// Placeholder values keyed by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Values {
    inner: HashMap<String, String>,
}

impl Values {
    /// Create an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Set a value only when present.
    pub fn set_opt<T>(&mut self, name: impl Into<String>, value: Option<T>)
    where
        T: Into<String>,
    {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Expand `template` against `values`.
///
/// # Errors
///
/// Returns [`Error::Template`] if a placeholder is unterminated or has an
/// empty name, if a value is missing or empty, if a value would expand to a
/// `.` or `..` segment, or if the template has an unmatched `}`.
pub fn expand(template: &str, values: &Values) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let literal = &rest[..start];
        if literal.contains('}') {
            return Err(unmatched_brace(template));
        }
        out.push_str(literal);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            Error::Template(format!("unterminated placeholder in `{template}`"))
        })?;

        let expr = &after[..end];
        let (reserved, name) = match expr.strip_prefix('+') {
            Some(name) => (true, name),
            None => (false, expr),
        };
        if name.is_empty() {
            return Err(Error::Template(format!(
                "empty placeholder name in `{template}`"
            )));
        }

        let value = values
            .get(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::Template(format!("unresolved placeholder `{name}` in `{template}`"))
            })?;

        if is_dot_segment(value, reserved) {
            return Err(Error::Template(format!(
                "placeholder `{name}` expands to a dot segment in `{template}`"
            )));
        }

        let set = if reserved { RESERVED } else { SEGMENT };
        out.extend(utf8_percent_encode(value, set));

        rest = &after[end + 1..];
    }

    if rest.contains('}') {
        return Err(unmatched_brace(template));
    }
    out.push_str(rest);
    Ok(out)
}

// The URL parser collapses `.` and `..` (encoded or not), which would route
// the request to another endpoint.
fn is_dot_segment(value: &str, reserved: bool) -> bool {
    if reserved {
        // `%` passes through reserved expansion, so `%2e%2e` is a dot segment too.
        value.split('/').any(|segment| {
            matches!(
                &*percent_decode_str(segment).decode_utf8_lossy(),
                "." | ".."
            )
        })
    } else {
        matches!(value, "." | "..")
    }
}

fn unmatched_brace(template: &str) -> Error {
    Error::Template(format!("unmatched `}}` in `{template}`"))
}
