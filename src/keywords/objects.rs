//! Object assertions and applicators: `maxProperties`/`minProperties`/
//! `required`, `properties`/`patternProperties`/`additionalProperties`/
//! `propertyNames`/`dependencies`. Grounded in the teacher's
//! `max_properties.rs`/`min_properties.rs`/`required.rs`/`properties.rs`/
//! `pattern_properties.rs`/`additional_properties.rs`/`property_names.rs`/
//! `dependencies.rs`.
use crate::context::Context;
use crate::error::{JsonSchemaError, ValidationError, ValidationErrorKind};
use crate::options::Handle;
use crate::pointer::JSONPointer;
use crate::resolver::Document;
use crate::validator::validate_node;
use serde_json::{Map, Value};

pub(crate) fn validate(
    handle: &Handle,
    document: &Document<'_>,
    object: &Map<String, Value>,
    instance: &Value,
    schema: &Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let mut errors = Vec::new();

    if let Some(dependencies) = schema.get("dependencies").and_then(Value::as_object) {
        let dependencies_path = schema_path.push("dependencies");
        for (key, value) in dependencies {
            if !object.contains_key(key) {
                continue;
            }
            let branch_path = dependencies_path.push(key.as_str());
            match value {
                Value::Array(required) => {
                    for name in required {
                        if let Some(name) = name.as_str() {
                            if !object.contains_key(name) {
                                errors.push(ValidationError::new(
                                    instance_path.clone(),
                                    branch_path.clone(),
                                    instance.clone(),
                                    ValidationErrorKind::Required {
                                        property: name.to_string(),
                                    },
                                ));
                            }
                        }
                    }
                }
                _ => {
                    errors.extend(validate_node(
                        handle,
                        document,
                        instance,
                        value,
                        instance_path.clone(),
                        branch_path,
                        ctx,
                    )?);
                }
            }
        }
    }

    let count = object.len() as u64;
    if let Some(limit) = schema.get("maxProperties").and_then(Value::as_u64) {
        if count > limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("maxProperties"),
                instance.clone(),
                ValidationErrorKind::MaxProperties { limit },
            ));
        }
    }
    if let Some(limit) = schema.get("minProperties").and_then(Value::as_u64) {
        if count < limit {
            errors.push(ValidationError::new(
                instance_path.clone(),
                schema_path.push("minProperties"),
                instance.clone(),
                ValidationErrorKind::MinProperties { limit },
            ));
        }
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required {
            if let Some(name) = name.as_str() {
                if !object.contains_key(name) {
                    errors.push(ValidationError::new(
                        instance_path.clone(),
                        schema_path.push("required"),
                        instance.clone(),
                        ValidationErrorKind::Required {
                            property: name.to_string(),
                        },
                    ));
                }
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    let pattern_properties = schema.get("patternProperties").and_then(Value::as_object);
    let additional_properties = schema.get("additionalProperties");
    let property_names_schema = schema.get("propertyNames");

    for (key, value) in object {
        let property_path = instance_path.push(key.as_str());

        if let Some(property_names_schema) = property_names_schema {
            errors.extend(validate_node(
                handle,
                document,
                &Value::String(key.clone()),
                property_names_schema,
                instance_path.clone(),
                schema_path.push("propertyNames"),
                ctx,
            )?);
        }

        let mut matched = false;

        if let Some(subschema) = properties.and_then(|props| props.get(key)) {
            errors.extend(validate_node(
                handle,
                document,
                value,
                subschema,
                property_path.clone(),
                schema_path.push("properties").push(key.as_str()),
                ctx,
            )?);
            matched = true;
        }

        if let Some(pattern_properties) = pattern_properties {
            for (pattern, subschema) in pattern_properties {
                let compiled = handle.compiled_pattern(pattern)?;
                if compiled.is_match(key) {
                    errors.extend(validate_node(
                        handle,
                        document,
                        value,
                        subschema,
                        property_path.clone(),
                        schema_path.push("patternProperties").push(pattern.as_str()),
                        ctx,
                    )?);
                    matched = true;
                }
            }
        }

        if !matched {
            if let Some(additional_schema) = additional_properties {
                errors.extend(validate_node(
                    handle,
                    document,
                    value,
                    additional_schema,
                    property_path,
                    schema_path.push("additionalProperties"),
                    ctx,
                )?);
            }
        }
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_reports_missing_keys() {
        let handle = Handle::compile(json!({"required": ["a", "b"]})).unwrap();
        assert!(handle.is_valid(&json!({"a": 1, "b": 2})));
        assert!(!handle.is_valid(&json!({"a": 1})));
    }

    #[test]
    fn dependencies_array_form_is_required() {
        let handle = Handle::compile(json!({
            "dependencies": {"one": ["two"]}
        }))
        .unwrap();
        assert!(handle.is_valid(&json!({"two": 1})));
        assert!(!handle.is_valid(&json!({"one": 1})));
        assert!(handle.is_valid(&json!({"one": 1, "two": 2})));
    }

    #[test]
    fn dependencies_schema_form_validates_whole_instance() {
        let handle = Handle::compile(json!({
            "dependencies": {"one": {"minProperties": 2}}
        }))
        .unwrap();
        assert!(!handle.is_valid(&json!({"one": 1})));
        assert!(handle.is_valid(&json!({"one": 1, "two": 2})));
    }

    #[test]
    fn mixed_applicators_scenario_from_spec() {
        let handle = Handle::compile(json!({
            "properties": {
                "one": {"type": "string", "maxLength": 5, "minLength": 3, "pattern": "\\w+"},
                "two": {"type": "integer", "minimum": 10, "maximum": 100, "multipleOf": 5}
            },
            "required": ["one"],
            "additionalProperties": {"type": "string"},
            "propertyNames": {"pattern": "\\w+"},
            "dependencies": {"one": ["two"], "two": {"minProperties": 1}}
        }))
        .unwrap();
        let instance = json!({"one": "value", "two": 100, "three": [1, 2], "123": "x"});
        let errors: Vec<_> = handle.validate(&instance).unwrap().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].instance_path.to_string(), "/three");
        assert!(matches!(errors[0].kind, ValidationErrorKind::Type { .. }));
    }
}
