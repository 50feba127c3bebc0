//! `maximum`/`minimum`/`exclusiveMaximum`/`exclusiveMinimum`/`multipleOf`.
//! Grounded in the teacher's `maximum.rs` / `minimum.rs` / `multiple_of.rs`,
//! with the draft-04 boolean-paired `exclusiveMaximum`/`exclusiveMinimum`
//! shim from `keywords/legacy/maximum_draft_4.rs` / `minimum_draft_4.rs`
//! folded in (SPEC_FULL.md §3). The `integer` type-mismatch pre-check lives
//! in the type dispatcher, not here: by the time `validate` is called, the
//! instance is already known to match the `type` keyword that selected it.
use crate::error::{ValidationError, ValidationErrorKind};
use crate::pointer::JSONPointer;
use crate::schemas::Draft;
use serde_json::{Map, Value};

/// `instance_value / multiple_of` should be an integer, up to host float
/// precision. Ported from the teacher's `MultipleOfFloatValidator::is_valid`.
fn is_multiple_of(instance_value: f64, multiple_of: f64) -> bool {
    let remainder = (instance_value / multiple_of) % 1.0;
    remainder < f64::EPSILON && remainder < (1.0 - f64::EPSILON)
}

/// Numeric assertions (spec §4.E "Numeric validation"), applied to any
/// schema whose type-specific dispatch selected the numeric branch (`number`
/// or `integer`). Draft-04 pairs `exclusiveMaximum`/`exclusiveMinimum` with
/// the sibling `maximum`/`minimum` as booleans rather than standalone limits.
pub(crate) fn validate(
    draft: Draft,
    data: f64,
    instance: &Value,
    schema: &Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let maximum = schema.get("maximum").and_then(Value::as_f64);
    let minimum = schema.get("minimum").and_then(Value::as_f64);

    if draft == Draft::Draft4 {
        let exclusive_maximum = matches!(schema.get("exclusiveMaximum"), Some(Value::Bool(true)));
        let exclusive_minimum = matches!(schema.get("exclusiveMinimum"), Some(Value::Bool(true)));
        if let Some(limit) = maximum {
            let exceeds = if exclusive_maximum {
                data >= limit
            } else {
                data > limit
            };
            if exceeds {
                let kind = if exclusive_maximum {
                    ValidationErrorKind::ExclusiveMaximum { limit }
                } else {
                    ValidationErrorKind::Maximum { limit }
                };
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("maximum"),
                    instance.clone(),
                    kind,
                ));
            }
        }
        if let Some(limit) = minimum {
            let exceeds = if exclusive_minimum {
                data <= limit
            } else {
                data < limit
            };
            if exceeds {
                let kind = if exclusive_minimum {
                    ValidationErrorKind::ExclusiveMinimum { limit }
                } else {
                    ValidationErrorKind::Minimum { limit }
                };
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("minimum"),
                    instance.clone(),
                    kind,
                ));
            }
        }
    } else {
        if let Some(limit) = maximum {
            if data > limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("maximum"),
                    instance.clone(),
                    ValidationErrorKind::Maximum { limit },
                ));
            }
        }
        if let Some(limit) = minimum {
            if data < limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("minimum"),
                    instance.clone(),
                    ValidationErrorKind::Minimum { limit },
                ));
            }
        }
        if let Some(limit) = schema.get("exclusiveMaximum").and_then(Value::as_f64) {
            if data >= limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("exclusiveMaximum"),
                    instance.clone(),
                    ValidationErrorKind::ExclusiveMaximum { limit },
                ));
            }
        }
        if let Some(limit) = schema.get("exclusiveMinimum").and_then(Value::as_f64) {
            if data <= limit {
                errors.push(ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("exclusiveMinimum"),
                    instance.clone(),
                    ValidationErrorKind::ExclusiveMinimum { limit },
                ));
            }
        }
    }

    if let Some(multiple_of) = schema.get("multipleOf").and_then(Value::as_f64) {
        if !is_multiple_of(data, multiple_of) {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("multipleOf"),
                instance.clone(),
                ValidationErrorKind::MultipleOf { multiple_of },
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(draft: Draft, schema: Value, data: f64) -> Vec<ValidationError> {
        let object = schema.as_object().unwrap().clone();
        validate(
            draft,
            data,
            &json!(data),
            &object,
            &JSONPointer::default(),
            &JSONPointer::default(),
        )
    }

    #[test]
    fn multiple_of_accepts_fractional_multiple() {
        assert!(run(Draft::Draft7, json!({"multipleOf": 2.5}), 10.0).is_empty());
    }

    #[test]
    fn multiple_of_rejects_non_multiple() {
        assert_eq!(run(Draft::Draft7, json!({"multipleOf": 3}), 10.0).len(), 1);
    }

    #[test]
    fn exclusive_maximum_boundary() {
        assert_eq!(run(Draft::Draft7, json!({"exclusiveMaximum": 5}), 5.0).len(), 1);
        assert!(run(Draft::Draft7, json!({"exclusiveMaximum": 5}), 4.999).is_empty());
    }

    #[test]
    fn draft4_exclusive_maximum_pairs_with_maximum() {
        let schema = json!({"maximum": 5, "exclusiveMaximum": true});
        assert_eq!(run(Draft::Draft4, schema.clone(), 5.0).len(), 1);
        assert!(matches!(
            run(Draft::Draft4, schema, 5.0)[0].kind,
            ValidationErrorKind::ExclusiveMaximum { .. }
        ));
    }

    #[test]
    fn draft4_maximum_without_exclusive_flag_is_inclusive() {
        let schema = json!({"maximum": 5});
        assert!(run(Draft::Draft4, schema, 5.0).is_empty());
    }
}
