//! Array assertions and applicators: `maxItems`/`minItems`/`uniqueItems`,
//! `items`/`additionalItems`, `contains`. Grounded in the teacher's
//! `max_items.rs`/`min_items.rs`/`unique_items.rs`/`items.rs`/
//! `additional_items.rs`/`contains.rs`.
use crate::context::Context;
use crate::error::{JsonSchemaError, ValidationError, ValidationErrorKind};
use crate::helpers::equal;
use crate::options::Handle;
use crate::pointer::JSONPointer;
use crate::resolver::Document;
use crate::validator::validate_node;
use serde_json::{Map, Value};

/// O(n^2) structural-equality scan, matching spec §8's "two values are equal
/// iff they are structurally equal" (no hashing — this core has no adjacency
/// requirement on `uniqueItems`' cost and stays dependency-light).
fn is_unique(items: &[Value]) -> bool {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if equal(a, b) {
                return false;
            }
        }
    }
    true
}

pub(crate) fn validate(
    handle: &Handle,
    document: &Document<'_>,
    items: &[Value],
    instance: &Value,
    schema: &Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let mut errors = Vec::new();
    let len = items.len() as u64;

    if let Some(limit) = schema.get("maxItems").and_then(Value::as_u64) {
        if len > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("maxItems"),
                instance.clone(),
                ValidationErrorKind::MaxItems { limit },
            ));
        }
    }
    if let Some(limit) = schema.get("minItems").and_then(Value::as_u64) {
        if len < limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("minItems"),
                instance.clone(),
                ValidationErrorKind::MinItems { limit },
            ));
        }
    }
    if matches!(schema.get("uniqueItems"), Some(Value::Bool(true))) && !is_unique(items) {
        errors.push(ValidationError::new(
            instance_path.clone(),
            schema_path.push("uniqueItems"),
            instance.clone(),
            ValidationErrorKind::UniqueItems,
        ));
    }

    if let Some(contains_schema) = schema.get("contains") {
        let contains_path = schema_path.push("contains");
        let mut branch_errors = Vec::new();
        let mut found = false;
        for (index, item) in items.iter().enumerate() {
            let item_path = instance_path.push(index);
            let item_errors = validate_node(
                handle,
                document,
                item,
                contains_schema,
                item_path,
                contains_path.clone(),
                ctx,
            )?;
            if item_errors.is_empty() {
                found = true;
                break;
            }
            branch_errors.extend(item_errors);
        }
        if !found {
            errors.push(
                ValidationError::new(
                    instance_path.clone(),
                    contains_path,
                    instance.clone(),
                    ValidationErrorKind::Contains,
                )
                .with_subschemas(branch_errors),
            );
        }
    }

    match (schema.get("items"), schema.get("additionalItems")) {
        (Some(Value::Array(tuple)), additional) => {
            let items_path = schema_path.push("items");
            for (index, item) in items.iter().enumerate() {
                let item_path = instance_path.push(index);
                if let Some(subschema) = tuple.get(index) {
                    errors.extend(validate_node(
                        handle,
                        document,
                        item,
                        subschema,
                        item_path,
                        items_path.push(index),
                        ctx,
                    )?);
                } else if let Some(additional_schema) = additional {
                    errors.extend(validate_node(
                        handle,
                        document,
                        item,
                        additional_schema,
                        item_path,
                        schema_path.push("additionalItems"),
                        ctx,
                    )?);
                }
            }
        }
        (Some(single_schema), _) => {
            let items_path = schema_path.push("items");
            for (index, item) in items.iter().enumerate() {
                errors.extend(validate_node(
                    handle,
                    document,
                    item,
                    single_schema,
                    instance_path.push(index),
                    items_path.clone(),
                    ctx,
                )?);
            }
        }
        (None, _) => {}
    }

    Ok(errors)
}
