//! Draft dialects and the handful of places their semantics diverge.
use serde_json::Value;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Draft {
    Draft4,
    Draft6,
    Draft7,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Draft7
    }
}

/// Get the `Draft` from a JSON Schema `$schema` URL.
pub fn draft_from_url(url: &str) -> Option<Draft> {
    match url {
        "http://json-schema.org/draft-07/schema#" => Some(Draft::Draft7),
        "http://json-schema.org/draft-06/schema#" => Some(Draft::Draft6),
        "http://json-schema.org/draft-04/schema#" => Some(Draft::Draft4),
        _ => None,
    }
}

/// Get the `Draft` from a schema's own `$schema` keyword, if present and recognized.
pub fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema
        .as_object()
        .and_then(|object| object.get("$schema"))
        .and_then(Value::as_str)
        .and_then(draft_from_url)
}

/// `$id` is spelled `id` under draft-04.
pub(crate) fn id_of(draft: Draft, schema: &Value) -> Option<&str> {
    let object = schema.as_object()?;
    let key = if draft == Draft::Draft4 { "id" } else { "$id" };
    object.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"$schema": "http://json-schema.org/draft-07/schema#"}), Some(Draft::Draft7))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-06/schema#"}), Some(Draft::Draft6))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Some(Draft::Draft4))]
    #[test_case(json!({"$schema": "http://example.com/custom/schema#"}), None)]
    fn test_draft_from_schema(schema: Value, draft: Option<Draft>) {
        assert_eq!(draft_from_schema(&schema), draft);
    }

    #[test]
    fn test_id_of_draft4() {
        let schema = json!({"id": "http://example.com/"});
        assert_eq!(id_of(Draft::Draft4, &schema), Some("http://example.com/"));
        assert_eq!(id_of(Draft::Draft6, &schema), None);
    }
}
