//! `allOf`/`anyOf`/`oneOf`/`not`/`if`-`then`-`else`. Grounded in the
//! teacher's `all_of.rs`/`any_of.rs`/`one_of.rs`/`not.rs`/`if_.rs`, adapted to
//! this engine's inline recursive walk: each branch is validated by a direct
//! call into [`validate_node`] rather than a precompiled validator list.
use crate::context::Context;
use crate::error::{JsonSchemaError, ValidationError, ValidationErrorKind};
use crate::options::Handle;
use crate::pointer::JSONPointer;
use crate::resolver::Document;
use crate::validator::validate_node;
use serde_json::Value;

pub(crate) fn all_of(
    handle: &Handle,
    document: &Document<'_>,
    branches: &[Value],
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let keyword_path = schema_path.push("allOf");
    let mut subschemas = Vec::new();
    for (index, branch) in branches.iter().enumerate() {
        subschemas.extend(validate_node(
            handle,
            document,
            instance,
            branch,
            instance_path.clone(),
            keyword_path.push(index),
            ctx,
        )?);
    }
    if subschemas.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![ValidationError::new(
            instance_path.clone(),
            keyword_path,
            instance.clone(),
            ValidationErrorKind::AllOf,
        )
        .with_subschemas(subschemas)])
    }
}

pub(crate) fn any_of(
    handle: &Handle,
    document: &Document<'_>,
    branches: &[Value],
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let keyword_path = schema_path.push("anyOf");
    let mut subschemas = Vec::new();
    for (index, branch) in branches.iter().enumerate() {
        let branch_errors = validate_node(
            handle,
            document,
            instance,
            branch,
            instance_path.clone(),
            keyword_path.push(index),
            ctx,
        )?;
        if branch_errors.is_empty() {
            return Ok(Vec::new());
        }
        subschemas.extend(branch_errors);
    }
    Ok(vec![ValidationError::new(
        instance_path.clone(),
        keyword_path,
        instance.clone(),
        ValidationErrorKind::AnyOf,
    )
    .with_subschemas(subschemas)])
}

pub(crate) fn one_of(
    handle: &Handle,
    document: &Document<'_>,
    branches: &[Value],
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let keyword_path = schema_path.push("oneOf");
    let mut valid_indices = Vec::new();
    let mut subschemas = Vec::new();
    for (index, branch) in branches.iter().enumerate() {
        let branch_errors = validate_node(
            handle,
            document,
            instance,
            branch,
            instance_path.clone(),
            keyword_path.push(index),
            ctx,
        )?;
        if branch_errors.is_empty() {
            valid_indices.push(index);
        } else {
            subschemas.extend(branch_errors);
        }
    }
    match valid_indices.len() {
        1 => Ok(Vec::new()),
        0 => Ok(vec![ValidationError::new(
            instance_path.clone(),
            keyword_path,
            instance.clone(),
            ValidationErrorKind::OneOfNotValid,
        )
        .with_subschemas(subschemas)]),
        _ => Ok(vec![ValidationError::new(
            instance_path.clone(),
            keyword_path,
            instance.clone(),
            ValidationErrorKind::OneOfMultipleValid,
        )
        .with_subschemas(Vec::new())]),
    }
}

pub(crate) fn not(
    handle: &Handle,
    document: &Document<'_>,
    subschema: &Value,
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let keyword_path = schema_path.push("not");
    let branch_errors = validate_node(
        handle,
        document,
        instance,
        subschema,
        instance_path.clone(),
        keyword_path.clone(),
        ctx,
    )?;
    if branch_errors.is_empty() {
        Ok(vec![ValidationError::new(
            instance_path.clone(),
            keyword_path,
            instance.clone(),
            ValidationErrorKind::Not {
                schema: subschema.clone(),
            },
        )])
    } else {
        Ok(Vec::new())
    }
}

/// `if`/`then`/`else` (spec §4.E step 11). `if` failures never surface as
/// user-visible errors; only the `then`/`else` branch that was actually
/// selected can produce errors.
pub(crate) fn if_then_else(
    handle: &Handle,
    document: &Document<'_>,
    if_schema: &Value,
    then_schema: Option<&Value>,
    else_schema: Option<&Value>,
    instance: &Value,
    instance_path: &JSONPointer,
    schema_path: &JSONPointer,
    ctx: &Context<'_>,
) -> Result<Vec<ValidationError>, JsonSchemaError> {
    let if_errors = validate_node(
        handle,
        document,
        instance,
        if_schema,
        instance_path.clone(),
        schema_path.push("if"),
        ctx,
    )?;
    if if_errors.is_empty() {
        if let Some(then_schema) = then_schema {
            return validate_node(
                handle,
                document,
                instance,
                then_schema,
                instance_path.clone(),
                schema_path.push("then"),
                ctx,
            );
        }
    } else if let Some(else_schema) = else_schema {
        return validate_node(
            handle,
            document,
            instance,
            else_schema,
            instance_path.clone(),
            schema_path.push("else"),
            ctx,
        );
    }
    Ok(Vec::new())
}
