//! End-to-end scenarios exercised against the public `Handle` API, mirroring
//! the teacher's `tests/test_suite.rs` placement (top-level `tests/`, one
//! file per externally observable surface) but hand-written rather than
//! sourced from an external test-suite corpus, since this core does not ship
//! or depend on one.
use jsonschema_core::{Draft, Handle, HandleOptions, ValidationErrorKind};
use serde_json::json;
use test_case::test_case;

#[test]
fn nested_composites_flatten_branch_errors() {
    let handle = Handle::compile(json!({
        "allOf": [
            {"type": "integer", "maximum": 1},
            {"type": "integer", "maximum": 10}
        ]
    }))
    .unwrap();
    let errors: Vec<_> = handle.validate(&json!(11)).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ValidationErrorKind::AllOf));
    let subschemas = errors[0].subschemas.as_ref().unwrap();
    assert_eq!(subschemas.len(), 2);
}

#[test]
fn object_with_mixed_applicators() {
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
fn one_of_exactly_one_law() {
    let handle = Handle::compile(json!({
        "oneOf": [{"type": "integer"}, {"type": "number"}]
    }))
    .unwrap();
    let errors: Vec<_> = handle.validate(&json!(3)).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ValidationErrorKind::OneOfMultipleValid));
}

#[test_case(json!(5), false; "below minimum")]
#[test_case(json!("x"), true; "else branch is a string")]
#[test_case(json!(true), false; "else branch rejects booleans")]
fn if_then_else(instance: serde_json::Value, valid: bool) {
    let handle = Handle::compile(json!({
        "if": {"type": "integer"},
        "then": {"minimum": 10},
        "else": {"type": "string"}
    }))
    .unwrap();
    assert_eq!(handle.is_valid(&instance), valid);
}

#[test]
fn valid_iff_empty_error_sequence() {
    let handle = Handle::compile(json!({"type": "string", "minLength": 3})).unwrap();
    for instance in [json!("ok"), json!("longer"), json!(1), json!(null)] {
        let is_valid = handle.is_valid(&instance);
        let is_empty = handle.validate(&instance).unwrap().next().is_none();
        assert_eq!(is_valid, is_empty);
    }
}

#[test]
fn true_and_false_schemas() {
    let always = Handle::compile(json!(true)).unwrap();
    assert!(always.validate(&json!("anything")).unwrap().next().is_none());

    let never = Handle::compile(json!(false)).unwrap();
    let errors: Vec<_> = never.validate(&json!(1)).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ValidationErrorKind::FalseSchema));
}

#[test]
fn empty_schema_accepts_everything() {
    let handle = Handle::compile(json!({})).unwrap();
    assert!(handle.is_valid(&json!(1)));
    assert!(handle.is_valid(&json!("x")));
    assert!(handle.is_valid(&json!(null)));
}

#[test]
fn composite_errors_always_carry_subschemas() {
    let handle = Handle::compile(json!({
        "anyOf": [{"type": "integer"}, {"type": "boolean"}]
    }))
    .unwrap();
    let errors: Vec<_> = handle.validate(&json!("x")).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].subschemas.is_some());

    let handle = Handle::compile(json!({"minLength": 3})).unwrap();
    let errors: Vec<_> = handle.validate(&json!("x")).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].subschemas.is_none());
}

#[test]
fn double_negation_is_equivalent_to_the_original_schema() {
    let schema = json!({"type": "integer", "maximum": 5});
    let negated = json!({"not": {"not": schema}});
    let plain = Handle::compile(schema).unwrap();
    let twice_negated = Handle::compile(negated).unwrap();
    for instance in [json!(1), json!(10), json!("x")] {
        assert_eq!(plain.is_valid(&instance), twice_negated.is_valid(&instance));
    }
}

#[test]
fn draft4_uses_boolean_paired_exclusive_maximum() {
    let handle = HandleOptions::new()
        .with_draft(Draft::Draft4)
        .compile(json!({"maximum": 5, "exclusiveMaximum": true}))
        .unwrap();
    assert!(!handle.is_valid(&json!(5)));
    assert!(handle.is_valid(&json!(4)));
}

#[cfg(feature = "net-http")]
#[test]
fn http_resolver_fetches_external_refs() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/schema.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "integer"}"#)
        .create();
    let ref_uri = format!("{}/schema.json", server.url());

    let handle = HandleOptions::new()
        .with_net_http_resolver()
        .compile(json!({"$ref": ref_uri}))
        .unwrap();
    let errors: Vec<_> = handle.validate(&json!("not an integer")).unwrap().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ValidationErrorKind::Type { .. }));
}
