//! RFC-6901 JSON Pointers: the `instance_path` carried on every error record,
//! and the pointer-walk used to resolve same-document `$ref`s.
use crate::schemas::{id_of, Draft};
use serde_json::Value;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChunk {
    Property(Box<str>),
    Index(usize),
}

impl From<&str> for PathChunk {
    fn from(value: &str) -> Self {
        PathChunk::Property(value.into())
    }
}

impl From<usize> for PathChunk {
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// A pointer into the instance or the schema, built incrementally while
/// recursing and rendered RFC-6901-escaped on `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JSONPointer(Vec<PathChunk>);

impl JSONPointer {
    pub(crate) fn push(&self, chunk: impl Into<PathChunk>) -> JSONPointer {
        let mut chunks = self.0.clone();
        chunks.push(chunk.into());
        JSONPointer(chunks)
    }

    pub fn as_slice(&self) -> &[PathChunk] {
        &self.0
    }
}

/// RFC-6901 token escaping (`~` -> `~0`, `/` -> `~1`), shared by `JSONPointer`'s
/// `Display` impl and the ID index, which builds pointer strings by hand.
pub(crate) fn escape_token(token: &str) -> String {
    if token.contains('~') || token.contains('/') {
        token.replace('~', "~0").replace('/', "~1")
    } else {
        token.to_string()
    }
}

impl fmt::Display for JSONPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "");
        }
        for chunk in &self.0 {
            write!(f, "/")?;
            match chunk {
                PathChunk::Property(name) => write!(f, "{}", escape_token(name))?,
                PathChunk::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct PointerError(pub String);

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unresolvable JSON pointer: {}", self.0)
    }
}

impl std::error::Error for PointerError {}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Rejects `+`-prefixed or zero-padded array indices (other than the literal `"0"`),
/// matching the source grammar's array-index token rule.
fn parse_index(token: &str) -> Option<usize> {
    if token == "0" {
        return Some(0);
    }
    if token.starts_with('0') || token.starts_with('+') {
        return None;
    }
    token.parse().ok()
}

/// Evaluates a `/`-delimited, RFC-6901-escaped pointer against `root`, returning
/// the target value, or a `PointerError` if any segment fails to resolve.
pub(crate) fn evaluate<'a>(pointer: &str, root: &'a Value) -> Result<&'a Value, PointerError> {
    let mut current = root;
    if pointer.is_empty() {
        return Ok(current);
    }
    let pointer = pointer.strip_prefix('/').unwrap_or(pointer);
    for raw_token in pointer.split('/') {
        let token = unescape(raw_token);
        current = match current {
            Value::Object(map) => map
                .get(&token)
                .ok_or_else(|| PointerError(pointer.to_string()))?,
            Value::Array(items) => {
                let index =
                    parse_index(&token).ok_or_else(|| PointerError(pointer.to_string()))?;
                items
                    .get(index)
                    .ok_or_else(|| PointerError(pointer.to_string()))?
            }
            _ => return Err(PointerError(pointer.to_string())),
        };
    }
    Ok(current)
}

/// Walks `pointer` against `root`, collecting every `$id`/`id` encountered along
/// the path (in traversal order) and joining them onto `base` per spec §4.B,
/// so a same-document fragment pointer resolves to the correct absolute URI
/// even when it passes through nested `$id`-bearing subschemas.
pub(crate) fn pointer_uri(
    draft: Draft,
    base: &Url,
    root: &Value,
    pointer: &str,
) -> Result<Url, PointerError> {
    let mut scope = base.clone();
    let mut current = root;
    if let Some(id) = id_of(draft, current) {
        if let Ok(joined) = scope.join(id) {
            scope = joined;
        }
    }
    if pointer.is_empty() {
        return Ok(scope);
    }
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    for raw_token in trimmed.split('/') {
        let token = unescape(raw_token);
        current = match current {
            Value::Object(map) => map
                .get(&token)
                .ok_or_else(|| PointerError(pointer.to_string()))?,
            Value::Array(items) => {
                let index =
                    parse_index(&token).ok_or_else(|| PointerError(pointer.to_string()))?;
                items
                    .get(index)
                    .ok_or_else(|| PointerError(pointer.to_string()))?
            }
            _ => return Err(PointerError(pointer.to_string())),
        };
        if let Some(id) = id_of(draft, current) {
            if let Ok(joined) = scope.join(id) {
                scope = joined;
            }
        }
    }
    Ok(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_pointer_to_string() {
        let pointer = JSONPointer::default()
            .push("properties")
            .push("a/b")
            .push(0usize);
        assert_eq!(pointer.to_string(), "/properties/a~1b/0");
    }

    #[test]
    fn empty_pointer_is_empty_string() {
        assert_eq!(JSONPointer::default().to_string(), "");
    }

    #[test]
    fn evaluate_walks_object_and_array() {
        let root = json!({"a": [1, {"b": 2}]});
        assert_eq!(evaluate("/a/1/b", &root).unwrap(), &json!(2));
    }

    #[test]
    fn evaluate_rejects_leading_zero_index() {
        let root = json!({"a": [1, 2]});
        assert!(evaluate("/a/01", &root).is_err());
    }

    #[test]
    fn evaluate_missing_key_errors() {
        let root = json!({"a": 1});
        assert!(evaluate("/b", &root).is_err());
    }
}
