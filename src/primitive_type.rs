//! The seven JSON type names used by the `type` keyword and type-mismatch errors.
use serde_json::Value;
use std::{convert::TryFrom, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

/// Whether a float carries a zero fractional part, i.e. would also satisfy `type: integer`.
#[inline]
pub(crate) fn is_integer_value(value: f64) -> bool {
    value.fract() == 0.0
}

/// The runtime class of `data`, used to pick the type-specific validation branch
/// when the schema does not name a `type` (spec §4.E, step 12).
pub(crate) fn runtime_type(instance: &Value) -> PrimitiveType {
    match instance {
        Value::Null => PrimitiveType::Null,
        Value::Bool(_) => PrimitiveType::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                PrimitiveType::Integer
            } else if let Some(f) = n.as_f64() {
                if is_integer_value(f) {
                    PrimitiveType::Integer
                } else {
                    PrimitiveType::Number
                }
            } else {
                PrimitiveType::Number
            }
        }
        Value::String(_) => PrimitiveType::String,
        Value::Array(_) => PrimitiveType::Array,
        Value::Object(_) => PrimitiveType::Object,
    }
}

/// Does `instance` satisfy the given `type` name, per spec §4.E's type-specific dispatch?
/// `integer` additionally accepts floats with a zero fractional part.
pub(crate) fn matches_type(type_name: PrimitiveType, instance: &Value) -> bool {
    match type_name {
        PrimitiveType::Integer => match instance {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().map_or(false, is_integer_value)
            }
            _ => false,
        },
        PrimitiveType::Number => instance.is_number(),
        PrimitiveType::String => instance.is_string(),
        PrimitiveType::Boolean => instance.is_boolean(),
        PrimitiveType::Array => instance.is_array(),
        PrimitiveType::Object => instance.is_object(),
        PrimitiveType::Null => instance.is_null(),
    }
}
