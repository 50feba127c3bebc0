//! Component E: the recursive, keyword-driven validator, plus the `$ref`
//! resolution logic of Component D. Grounded in the teacher's
//! `validator.rs` and `keywords/ref_.rs`, but reshaped into a single
//! recursive walk: rather than compiling a tree of `Validator` trait objects
//! once and replaying it per instance, `validate_node` walks schema and
//! instance together on every call, matching this specification's literal
//! `validate(data, schema, pointer, parent_uri) -> lazy sequence of errors`.
use crate::context::{Context, MAX_REF_DEPTH};
use crate::error::{
    error, no_error, ErrorIterator, JsonSchemaError, TypeKind, ValidationError, ValidationErrorKind,
};
use crate::helpers::equal;
use crate::keywords::{arrays, composite, numeric, objects, strings};
use crate::options::{Handle, KeywordOutcome};
use crate::pointer::{evaluate, pointer_uri, JSONPointer};
use crate::primitive_type::{matches_type, runtime_type, PrimitiveType};
use crate::resolver::{split_fragment, Document};
use serde_json::Value;
use std::convert::TryFrom;

/// The public entry point backing `Handle::validate`: walks `instance`
/// against the handle's root schema from the root pointer and the handle's
/// own base URI.
pub(crate) fn validate<'a>(handle: &'a Handle, instance: &'a Value) -> Result<ErrorIterator<'a>, JsonSchemaError> {
    let document = handle.root_document();
    let ctx = Context::new(&handle.base, handle.draft);
    let errors = validate_node(
        handle,
        &document,
        instance,
        &handle.schema,
        JSONPointer::default(),
        JSONPointer::default(),
        &ctx,
    )?;
    Ok(Box::new(errors.into_iter()))
}

/// Validates `instance` against `schema`, recursively, returning every error
/// produced (spec §4.E: "non-short-circuiting... the stream is fully
/// enumerable"). `document` is the "current document" `$ref`s without a
/// fragment-external document hop resolve against; `ctx` carries the active
/// base URI and draft.
pub(crate) fn validate_node(
    handle: &Handle,
    document: &Document<'_>,
    instance: &Value,
    schema: &Value,
    instance_path: JSONPointer,
    schema_path: JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    match schema {
        Value::Bool(true) => Ok(Vec::new()),
        Value::Bool(false) => Ok(vec![ValidationError::new(
            instance_path,
            schema_path,
            instance.clone(),
            ValidationErrorKind::FalseSchema,
        )]),
        Value::Object(map) => {
            let ctx = ctx.push(schema);
            let schema = map;

            if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
                return resolve_ref(
                    handle,
                    document,
                    instance,
                    reference,
                    &instance_path,
                    &schema_path,
                    &ctx,
                );
            }

            let mut errors = Vec::new();

            if handle.validate_formats {
                if let (Some(format), Value::String(data)) = (schema.get("format").and_then(Value::as_str), instance) {
                    errors.extend(validate_format(handle, format, data, instance, &instance_path, &schema_path));
                }
            }

            for (keyword, check) in &handle.keywords {
                if let Some(keyword_schema) = schema.get(keyword) {
                    let keyword_path = schema_path.push(keyword.as_str());
                    match check.as_ref()(keyword_schema, instance, &instance_path) {
                        KeywordOutcome::Bool(true) => {}
                        KeywordOutcome::Bool(false) => errors.push(ValidationError::new(
                            instance_path.clone(),
                            keyword_path,
                            instance.clone(),
                            ValidationErrorKind::Custom {
                                keyword: keyword.clone(),
                                message: format!("'{}' failed", keyword),
                            },
                        )),
                        KeywordOutcome::Errors(keyword_errors) => errors.extend(keyword_errors),
                    }
                }
            }

            if let Some(options) = schema.get("enum").and_then(Value::as_array) {
                if !options.iter().any(|option| equal(option, instance)) {
                    errors.push(ValidationError::new(
                        instance_path.clone(),
                        schema_path.push("enum"),
                        instance.clone(),
                        ValidationErrorKind::Enum {
                            options: Value::Array(options.clone()),
                        },
                    ));
                }
            }

            if let Some(expected) = schema.get("const") {
                if !equal(expected, instance) {
                    errors.push(ValidationError::new(
                        instance_path.clone(),
                        schema_path.push("const"),
                        instance.clone(),
                        ValidationErrorKind::Const {
                            expected_value: expected.clone(),
                        },
                    ));
                }
            }

            if let Some(Value::Array(branches)) = schema.get("allOf") {
                errors.extend(composite::all_of(
                    handle,
                    document,
                    branches,
                    instance,
                    &instance_path,
                    &schema_path,
                    &ctx,
                )?);
            }
            if let Some(Value::Array(branches)) = schema.get("anyOf") {
                errors.extend(composite::any_of(
                    handle,
                    document,
                    branches,
                    instance,
                    &instance_path,
                    &schema_path,
                    &ctx,
                )?);
            }
            if let Some(Value::Array(branches)) = schema.get("oneOf") {
                errors.extend(composite::one_of(
                    handle,
                    document,
                    branches,
                    instance,
                    &instance_path,
                    &schema_path,
                    &ctx,
                )?);
            }
            if let Some(subschema) = schema.get("not") {
                errors.extend(composite::not(
                    handle,
                    document,
                    subschema,
                    instance,
                    &instance_path,
                    &schema_path,
                    &ctx,
                )?);
            }
            if let Some(if_schema) = schema.get("if") {
                errors.extend(composite::if_then_else(
                    handle,
                    document,
                    if_schema,
                    schema.get("then"),
                    schema.get("else"),
                    instance,
                    &instance_path,
                    &schema_path,
                    &ctx,
                )?);
            }

            errors.extend(validate_type_specific(
                handle,
                document,
                instance,
                schema,
                &instance_path,
                &schema_path,
                &ctx,
            )?);

            Ok(errors)
        }
        // A non-boolean, non-object schema node (e.g. `null`) is malformed;
        // spec.md does not define this case, so it is treated as vacuously
        // true rather than raising, matching the teacher's permissive parse.
        _ => Ok(Vec::new()),
    }
}

fn validate_format(
    handle: &Handle,
    format: &str,
    data: &str,
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
) -> Vec<ValidationError> {
    use crate::options::FormatCheck;

    let valid = match handle.formats.get(format) {
        Some(FormatCheck::Disabled) => return Vec::new(),
        Some(FormatCheck::Enabled(check)) => check(data),
        None => match crate::keywords::format::builtin(format) {
            Some(check) => check(data),
            None => return Vec::new(),
        },
    };
    if valid {
        Vec::new()
    } else {
        vec![ValidationError::new(
            instance_path.clone(),
            schema_path.push("format"),
            instance.clone(),
            ValidationErrorKind::Format {
                format: format.to_string(),
            },
        )]
    }
}

fn validate_type_specific(
    handle: &Handle,
    document: &Document<'_>,
    instance: &Value,
    schema: &serde_json::Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    match schema.get("type") {
        None => validate_by_runtime_type(handle, document, instance, schema, instance_path, schema_path, ctx),
        Some(Value::String(name)) => match PrimitiveType::try_from(name.as_str()) {
            Ok(type_name) => {
                if matches_type(type_name, instance) {
                    validate_as_type(handle, document, type_name, instance, schema, instance_path, schema_path, ctx)
                } else {
                    Ok(vec![ValidationError::new(
                        instance_path.clone(),
                        schema_path.push("type"),
                        instance.clone(),
                        ValidationErrorKind::Type {
                            kind: TypeKind::Single(type_name),
                        },
                    )])
                }
            }
            Err(()) => Ok(Vec::new()),
        },
        Some(Value::Array(names)) => {
            let candidates: Vec<PrimitiveType> = names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|name| PrimitiveType::try_from(name).ok())
                .collect();
            match candidates.iter().find(|candidate| matches_type(**candidate, instance)) {
                Some(matched) => {
                    validate_as_type(handle, document, *matched, instance, schema, instance_path, schema_path, ctx)
                }
                None => Ok(vec![ValidationError::new(
                    instance_path.clone(),
                    schema_path.push("type"),
                    instance.clone(),
                    ValidationErrorKind::Type {
                        kind: TypeKind::Multiple,
                    },
                )]),
            }
        }
        Some(_) => Ok(Vec::new()),
    }
}

/// No `type` keyword: dispatch purely on `instance`'s runtime class (spec
/// §4.E step 12, "absent" branch). Null and boolean instances carry no
/// further type-specific constraints.
fn validate_by_runtime_type(
    handle: &Handle,
    document: &Document<'_>,
    instance: &Value,
    schema: &serde_json::Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    match runtime_type(instance) {
        PrimitiveType::Null | PrimitiveType::Boolean => Ok(Vec::new()),
        type_name => validate_as_type(handle, document, type_name, instance, schema, instance_path, schema_path, ctx),
    }
}

/// Runs the keyword family for `type_name` against `instance`, which is
/// already known to match that type.
fn validate_as_type(
    handle: &Handle,
    document: &Document<'_>,
    type_name: PrimitiveType,
    instance: &Value,
    schema: &serde_json::Map<String, Value>,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    match (type_name, instance) {
        (PrimitiveType::Integer, Value::Number(n)) | (PrimitiveType::Number, Value::Number(n)) => {
            let data = n.as_f64().unwrap_or(0.0);
            Ok(numeric::validate(ctx.draft, data, instance, schema, instance_path, schema_path))
        }
        (PrimitiveType::String, Value::String(data)) => {
            strings::validate(handle, data, instance, schema, instance_path, schema_path)
        }
        (PrimitiveType::Array, Value::Array(items)) => {
            arrays::validate(handle, document, items, instance, schema, instance_path, schema_path, ctx)
        }
        (PrimitiveType::Object, Value::Object(object)) => {
            objects::validate(handle, document, object, instance, schema, instance_path, schema_path, ctx)
        }
        _ => Ok(Vec::new()),
    }
}

/// Component D: resolves `$ref` against the current document/base, per
/// spec §4.D's four branches.
fn resolve_ref(
    handle: &Handle,
    document: &Document<'_>,
    instance: &Value,
    reference: &str,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    if ctx.ref_depth >= MAX_REF_DEPTH {
        return Err(JsonSchemaError::RefCycle(reference.to_string()));
    }

    let ref_uri = ctx
        .scope
        .join(reference)
        .map_err(|err| JsonSchemaError::RefError(err.to_string()))?;

    // A `$ref` with no fragment at all (e.g. `"http://a/y"`) must not be
    // treated as a pointer-fragment ref: only a fragment that is empty or
    // begins with `/` is a well-formed JSON pointer fragment.
    let is_pointer_fragment = matches!(ref_uri.fragment(), Some(fragment) if fragment.is_empty() || fragment.starts_with('/'));

    if is_pointer_fragment {
        if reference.starts_with('#') {
            // Same-document fragment: walk the pointer against the current
            // document's own root.
            let (_, fragment) = split_fragment(&ref_uri);
            let target = evaluate(&fragment, document.root)
                .map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
            let new_base = pointer_uri(ctx.draft, &document.base, document.root, &fragment)
                .map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
            let child_ctx = Context::with_scope(new_base, ctx.draft, ctx.ref_depth + 1);
            return validate_node(
                handle,
                document,
                instance,
                target,
                instance_path.clone(),
                schema_path.clone(),
                &child_ctx,
            );
        }

        // External document + fragment: fetch the external root, then walk
        // the fragment against it.
        let (base, fragment) = split_fragment(&ref_uri);
        let external = handle.resolver_cache.fetch(handle.resolver.as_ref(), base.as_str())?;
        let target = evaluate(&fragment, &external.root).map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
        let new_base = pointer_uri(ctx.draft, &external.base, &external.root, &fragment)
            .map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
        let external_document = Document::new(&external.root, &external.ids, external.base.clone());
        let child_ctx = Context::with_scope(new_base, ctx.draft, ctx.ref_depth + 1);
        return validate_node(
            handle,
            &external_document,
            instance,
            target,
            instance_path.clone(),
            schema_path.clone(),
            &child_ctx,
        );
    }

    // Not a pointer fragment: try the current document's ID index first.
    let ids = document.ids.get_or_build(ctx.draft, &document.base, document.root);
    if let Some(path) = ids.get(ref_uri.as_str()) {
        let target = evaluate(path, document.root).map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
        let child_ctx = Context::with_scope(ref_uri, ctx.draft, ctx.ref_depth + 1);
        return validate_node(
            handle,
            document,
            instance,
            target,
            instance_path.clone(),
            schema_path.clone(),
            &child_ctx,
        );
    }

    // Fall back to the resolver callback, then re-run the ID-index lookup
    // against whatever document it returns, defaulting to the fetched root.
    let external = handle.resolver_cache.fetch(handle.resolver.as_ref(), ref_uri.as_str())?;
    let external_ids = external.ids.get_or_build(ctx.draft, &external.base, &external.root);
    let target = match external_ids.get(ref_uri.as_str()) {
        Some(path) => evaluate(path, &external.root).map_err(|err| JsonSchemaError::RefError(err.to_string()))?,
        None => &external.root,
    };
    let external_document = Document::new(&external.root, &external.ids, external.base.clone());
    let child_ctx = Context::with_scope(ref_uri, ctx.draft, ctx.ref_depth + 1);
    validate_node(
        handle,
        &external_document,
        instance,
        target,
        instance_path.clone(),
        schema_path.clone(),
        &child_ctx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn boolean_schemas() {
        let handle = Handle::compile(json!(true)).unwrap();
        assert!(handle.is_valid(&json!("anything")));
        let handle = Handle::compile(json!(false)).unwrap();
        let errors: Vec<_> = handle.validate(&json!(1)).unwrap().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, ValidationErrorKind::FalseSchema));
    }

    #[test]
    fn empty_schema_is_vacuously_valid() {
        let handle = Handle::compile(json!({})).unwrap();
        assert!(handle.is_valid(&json!(42)));
        assert!(handle.is_valid(&json!(null)));
    }

    #[test]
    fn ref_to_local_definition() {
        let handle = Handle::compile(json!({
            "$ref": "#/definitions/x",
            "definitions": {"x": {"type": "integer"}}
        }))
        .unwrap();
        let errors: Vec<_> = handle.validate(&json!("hello")).unwrap().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, ValidationErrorKind::Type { .. }));
    }

    #[test]
    fn ref_through_id_rebasing() {
        let handle = Handle::compile(json!({
            "$id": "http://a/",
            "definitions": {"x": {"$id": "y", "type": "integer"}},
            "$ref": "http://a/y"
        }))
        .unwrap();
        let errors: Vec<_> = handle.validate(&json!(1.5)).unwrap().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, ValidationErrorKind::Type { .. }));
    }

    #[test]
    fn ref_sibling_keywords_are_ignored() {
        let handle = Handle::compile(json!({
            "$ref": "#/definitions/x",
            "definitions": {"x": {"type": "integer"}},
            "maximum": 0
        }))
        .unwrap();
        assert!(handle.is_valid(&json!(5)));
    }

    #[test]
    fn unknown_ref_is_exceptional() {
        let handle = Handle::compile(json!({"$ref": "http://example.com/missing.json"})).unwrap();
        let err = handle.validate(&json!(1)).unwrap_err();
        assert!(matches!(err, JsonSchemaError::UnknownRef(_)));
    }

    #[test]
    fn user_defined_keyword_reports_custom_error() {
        let handle = crate::options::HandleOptions::new()
            .with_keyword(
                "even",
                std::sync::Arc::new(|_schema: &Value, instance: &Value, _pointer: &JSONPointer| {
                    KeywordOutcome::Bool(instance.as_i64().map_or(false, |n| n % 2 == 0))
                }),
            )
            .compile(json!({"even": true}))
            .unwrap();
        assert!(handle.is_valid(&json!(4)));
        assert!(!handle.is_valid(&json!(3)));
    }

    #[test]
    fn user_defined_keyword_can_return_errors_verbatim() {
        let handle = crate::options::HandleOptions::new()
            .with_keyword(
                "even",
                std::sync::Arc::new(|_schema: &Value, instance: &Value, pointer: &JSONPointer| {
                    if instance.as_i64().map_or(false, |n| n % 2 == 0) {
                        KeywordOutcome::Bool(true)
                    } else {
                        KeywordOutcome::Errors(vec![ValidationError::new(
                            pointer.clone(),
                            JSONPointer::default(),
                            instance.clone(),
                            ValidationErrorKind::Custom {
                                keyword: "even".to_string(),
                                message: "not even".to_string(),
                            },
                        )])
                    }
                }),
            )
            .compile(json!({"even": true}))
            .unwrap();
        let errors: Vec<_> = handle.validate(&json!(3)).unwrap().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].instance_path, JSONPointer::default());
    }

    #[test]
    fn no_error_and_error_helpers_wrap_single_items() {
        assert_eq!(no_error().count(), 0);
        let err = ValidationError::new(
            JSONPointer::default(),
            JSONPointer::default(),
            json!(1),
            ValidationErrorKind::FalseSchema,
        );
        assert_eq!(error(err).count(), 1);
    }
}
