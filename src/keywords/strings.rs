//! String assertions: `maxLength`/`minLength`/`pattern`/`contentEncoding`/
//! `contentMediaType`. Grounded in the teacher's `max_length.rs`/
//! `min_length.rs`/`pattern.rs` and `content.rs`, folded into one function
//! since this engine validates inline rather than through compiled nodes.
use crate::error::{JsonSchemaError, ValidationError, ValidationErrorKind};
use crate::keywords::content::{check_media_type, decode, ContentDecodeError};
use crate::options::Handle;
use crate::pointer::JSONPointer;
use serde_json::{Map, Value};

pub(crate) fn validate(
    handle: &Handle,
    data: &str,
    instance: &Value,
    schema: &Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let mut errors = Vec::new();
    let char_count = data.chars().count() as u64;

    if let Some(limit) = schema.get("maxLength").and_then(Value::as_u64) {
        if char_count > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("maxLength"),
                instance.clone(),
                ValidationErrorKind::MaxLength { limit },
            ));
        }
    }
    if let Some(limit) = schema.get("minLength").and_then(Value::as_u64) {
        if char_count < limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("minLength"),
                instance.clone(),
                ValidationErrorKind::MinLength { limit },
            ));
        }
    }
    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        let compiled = handle.compiled_pattern(pattern)?;
        if !compiled.is_match(data) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("pattern"),
                instance.clone(),
                ValidationErrorKind::Pattern {
                    pattern: pattern.to_string(),
                },
            ));
        }
    }

    // contentEncoding/contentMediaType may be used independently; a payload
    // is decoded at most once and the decoded bytes (or the raw string, if
    // there is no encoding) are what `contentMediaType` validates.
    let encoding = schema.get("contentEncoding").and_then(Value::as_str);
    let media_type = schema.get("contentMediaType").and_then(Value::as_str);

    let decoded: Option<Vec<u8>> = if let Some(encoding) = encoding {
        match decode(encoding, data) {
            Ok(bytes) => Some(bytes),
            Err(ContentDecodeError::Malformed(_)) => {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("contentEncoding"),
                    instance.clone(),
                    ValidationErrorKind::ContentEncoding {
                        content_encoding: encoding.to_string(),
                    },
                ));
                None
            }
            Err(ContentDecodeError::NotImplemented(message)) => {
                return Err(JsonSchemaError::NotImplemented(message));
            }
        }
    } else {
        None
    };

    if let Some(media_type) = media_type {
        // If the encoding itself failed to decode, there is nothing sensible
        // left to feed to the media-type check; the contentEncoding error
        // already reported the failure.
        if encoding.is_none() || decoded.is_some() {
            let bytes: &[u8] = decoded.as_deref().unwrap_or_else(|| data.as_bytes());
            if !check_media_type(media_type, bytes)? {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("contentMediaType"),
                    instance.clone(),
                    ValidationErrorKind::ContentMediaType {
                        content_media_type: media_type.to_string(),
                    },
                ));
            }
        }
    }

    Ok(errors)
}
