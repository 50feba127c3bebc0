//! Component C: a one-time, memoized index of every `$id`-bearing subschema
//! reachable from a root document, built by a pre-order walk that descends
//! only into `definitions`/`$defs` (not into applicator subschemas such as
//! `properties` or `allOf`), per spec §4.C.
//!
//! The index maps the fully-qualified `$id` URI to the RFC-6901 pointer path
//! (relative to its own root) of the subschema it names, rather than to the
//! subschema itself — the root document already owns that `Value`, and
//! re-evaluating a pointer on lookup is cheap and keeps `IdIndex` free of a
//! borrow back into whatever document it was built against.
use crate::pointer::escape_token;
use crate::schemas::{id_of, Draft};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Default)]
pub(crate) struct IdIndex {
    cell: OnceCell<HashMap<String, String>>,
}

impl IdIndex {
    pub(crate) fn get_or_build(&self, draft: Draft, base: &Url, root: &Value) -> &HashMap<String, String> {
        self.cell.get_or_init(|| {
            let mut map = HashMap::new();
            walk(draft, base, root, "", &mut map);
            map
        })
    }
}

fn walk(draft: Draft, scope: &Url, schema: &Value, path: &str, map: &mut HashMap<String, String>) {
    if let Value::Array(items) = schema {
        // Tuple-form `definitions` entry: recurse element-wise with the
        // current (unchanged) base, per spec §4.C.
        for (index, item) in items.iter().enumerate() {
            let child_path = format!("{}/{}", path, index);
            walk(draft, scope, item, &child_path, map);
        }
        return;
    }

    let object = match schema.as_object() {
        Some(object) => object,
        None => return,
    };

    let scope = match id_of(draft, schema).and_then(|id| scope.join(id).ok()) {
        Some(joined) => {
            map.insert(joined.to_string(), path.to_string());
            joined
        }
        None => scope.clone(),
    };

    // draft-2019-style `$defs` is outside this engine's draft set, but schemas
    // migrating forward sometimes carry both; indexing it is harmless and the
    // walk remains definitions-only in spirit (no descent into applicators).
    for key in ["definitions", "$defs"] {
        if let Some(defs) = object.get(key).and_then(Value::as_object) {
            for (name, value) in defs {
                let child_path = format!("{}/{}/{}", path, key, escape_token(name));
                walk(draft, &scope, value, &child_path, map);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::evaluate;
    use serde_json::json;

    #[test]
    fn indexes_nested_definitions_only() {
        let root = json!({
            "$id": "http://example.com/root.json",
            "definitions": {
                "a": {"$id": "a.json", "type": "string"}
            },
            "properties": {
                "p": {"$id": "should-not-be-indexed.json"}
            }
        });
        let base = Url::parse("http://example.com/root.json").unwrap();
        let index = IdIndex::default();
        let built = index.get_or_build(Draft::Draft7, &base, &root);
        let path = built.get("http://example.com/a.json").expect("indexed");
        assert_eq!(evaluate(path, &root).unwrap(), &json!({"$id": "a.json", "type": "string"}));
        assert!(!built.contains_key("http://example.com/should-not-be-indexed.json"));
    }

    #[test]
    fn indexes_tuple_form_definitions_element_wise() {
        let root = json!({
            "$id": "http://example.com/root.json",
            "definitions": {
                "tuple": [
                    {"$id": "first.json", "type": "string"},
                    {"$id": "second.json", "type": "integer"}
                ]
            }
        });
        let base = Url::parse("http://example.com/root.json").unwrap();
        let index = IdIndex::default();
        let built = index.get_or_build(Draft::Draft7, &base, &root);
        let first = built.get("http://example.com/first.json").expect("indexed");
        let second = built.get("http://example.com/second.json").expect("indexed");
        assert_eq!(evaluate(first, &root).unwrap(), &json!({"$id": "first.json", "type": "string"}));
        assert_eq!(evaluate(second, &root).unwrap(), &json!({"$id": "second.json", "type": "integer"}));
    }

    #[test]
    fn memoizes_across_calls() {
        let root = json!({"$id": "http://example.com/root.json"});
        let base = Url::parse("http://example.com/root.json").unwrap();
        let index = IdIndex::default();
        let first = index.get_or_build(Draft::Draft7, &base, &root) as *const _;
        let second = index.get_or_build(Draft::Draft7, &base, &root) as *const _;
        assert_eq!(first, second);
    }
}
