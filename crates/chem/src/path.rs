//! dot-notation attribute paths
//!
//! `default_attributes.client.ldap_server:final_value` is turned into
//! ```json
//! { "default_attributes": { "client": { "ldap_server": "final_value" } } }
//! ```
//!
//! - `.` separates keys, `\.` is a literal dot inside a key
//! - the first unescaped `:` separates path and value, everything after it is taken verbatim
//! - `[]` marks a list: `a.[].b:v` becomes `{ "a": [ { "b": "v" } ] }`
//!   and a trailing `[]` appends the value itself: `a.[]:v` becomes `{ "a": [ "v" ] }`
//!
//! Without a `:value` the value is [UNDEFINED].
use crate::value::{Object, Value};

/// Value used when the path does not carry one
pub const UNDEFINED: &str = "undefined";

/// Reserved key that marks a list
pub const LIST_MARKER: &str = "[]";

/// A patch built from a single attribute path
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePatch {
    /// Single branch skeleton, the deepest node holds [AttributePatch::value]
    pub patch: Object,
    pub value: String,
    /// No `:value` was given and [UNDEFINED] was used instead
    pub defaulted: bool,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PathError {
    #[error("Attribute path `{0}` starts with a list marker, but documents are objects")]
    ListAtRoot(String),
}

/// Parse `path[:value]` into a patch
pub fn parse_path(text: &str) -> Result<AttributePatch, PathError> {
    let (path, value) = split_unescaped(text, ':');
    let defaulted = value.is_none();
    let value = value.unwrap_or(UNDEFINED).to_string();

    let (first, _) = split_unescaped(path, '.');
    if unescape(first) == LIST_MARKER {
        return Err(PathError::ListAtRoot(path.to_string()));
    }

    let mut root = Value::Object(Object::new());
    build(path, Value::String(value.clone()), &mut root);

    let Value::Object(patch) = root else {
        unreachable!("root of an attribute patch is always an object");
    };

    tracing::debug!(path, %value, defaulted, "parsed attribute path");

    Ok(AttributePatch {
        patch,
        value,
        defaulted,
    })
}

/// Peel off one token of `keys` and attach it to `target`
///
/// `target` is an array exactly when the current token is [LIST_MARKER].
fn build(keys: &str, leaf: Value, target: &mut Value) {
    let (token, rest) = split_unescaped(keys, '.');
    let key = unescape(token);

    let Some(rest) = rest else {
        // one.two.three
        //         ^^^^^ last element gets the value
        attach(target, key, leaf);
        return;
    };

    let (next, _) = split_unescaped(rest, '.');
    let child = if unescape(next) == LIST_MARKER {
        Value::Array(Vec::new())
    } else {
        Value::Object(Object::new())
    };

    tracing::trace!(%key, rest, child = child.kind(), "path token");

    let child = attach(target, key, child);
    build(rest, leaf, child);
}

/// Insert `child` under `key` or, for lists, append it
fn attach(target: &mut Value, key: String, child: Value) -> &mut Value {
    match target {
        Value::Array(array) => {
            array.push(child);
            let last = array.len() - 1;
            &mut array[last]
        }
        Value::Object(object) => {
            let (index, _) = object.insert_full(key, child);
            &mut object[index]
        }
        _ => unreachable!("attribute patches only nest objects and arrays"),
    }
}

/// Split at the first `separator` that is not preceded by a backslash
///
/// Returns the text unchanged and `None` when there is no such separator.
pub(crate) fn split_unescaped(text: &str, separator: char) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        if c == '\\' {
            escaped = true;
        } else if c == separator {
            return (&text[..index], Some(&text[index + c.len_utf8()..]));
        }
    }

    (text, None)
}

/// Remove escape characters: `a\.b` becomes `a.b`
pub(crate) fn unescape(token: &str) -> String {
    let mut key = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            // a dangling backslash at the end is dropped
            if let Some(escaped) = chars.next() {
                key.push(escaped);
            }
        } else {
            key.push(c);
        }
    }
    key
}
