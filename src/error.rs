//! Two tiers of failure: `CompilationError` for a malformed schema document,
//! and `ValidationError`/`JsonSchemaError` for what can go wrong once a
//! `Handle` actually walks an instance.
use crate::pointer::JSONPointer;
use crate::primitive_type::PrimitiveType;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug)]
pub struct CompilationError {
    message: Cow<'static, str>,
}

impl CompilationError {
    pub(crate) fn new(message: impl Into<Cow<'static, str>>) -> Self {
        CompilationError {
            message: message.into(),
        }
    }
}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompilationError {}

impl From<url::ParseError> for CompilationError {
    fn from(err: url::ParseError) -> Self {
        CompilationError::new(Cow::Owned(format!("invalid URL: {}", err)))
    }
}

impl From<regex::Error> for CompilationError {
    fn from(err: regex::Error) -> Self {
        CompilationError::new(Cow::Owned(format!("invalid regex: {}", err)))
    }
}

/// Failures that abort a `validate` call outright rather than being reported
/// as an instance failure — spec §7's exceptional-error set.
#[derive(Debug)]
pub enum JsonSchemaError {
    /// A `$ref` pointed at a URI the resolver could not locate and no
    /// resolver callback (or the default one) could fetch.
    UnknownRef(String),
    /// The resolver callback itself raised an error fetching a reference.
    RefError(String),
    /// A keyword value this engine does not implement support for was used
    /// (e.g. an unrecognized `contentEncoding`/`contentMediaType` pair).
    NotImplemented(String),
    /// A malformed schema construct discovered only once the relevant
    /// keyword is evaluated — an uncompilable `pattern` regex, or a `$ref`
    /// target that is not itself a valid schema (not an object or boolean).
    SchemaError(String),
    /// Following `$ref`s would recurse indefinitely.
    RefCycle(String),
}

impl fmt::Display for JsonSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSchemaError::UnknownRef(uri) => write!(f, "unknown reference: '{}'", uri),
            JsonSchemaError::RefError(message) => write!(f, "error resolving reference: {}", message),
            JsonSchemaError::NotImplemented(what) => write!(f, "not implemented: {}", what),
            JsonSchemaError::SchemaError(uri) => write!(f, "invalid schema at '{}'", uri),
            JsonSchemaError::RefCycle(uri) => write!(f, "reference cycle detected at '{}'", uri),
        }
    }
}

impl std::error::Error for JsonSchemaError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple,
}

/// The keyword-specific detail of a `ValidationError`.
#[derive(Debug, Clone)]
pub enum ValidationErrorKind {
    AllOf,
    AnyOf,
    Const { expected_value: Value },
    Contains,
    ContentEncoding { content_encoding: String },
    ContentMediaType { content_media_type: String },
    Custom { keyword: String, message: String },
    Enum { options: Value },
    ExclusiveMaximum { limit: f64 },
    ExclusiveMinimum { limit: f64 },
    FalseSchema,
    Format { format: String },
    MaxItems { limit: u64 },
    MaxLength { limit: u64 },
    MaxProperties { limit: u64 },
    Maximum { limit: f64 },
    MinItems { limit: u64 },
    MinLength { limit: u64 },
    MinProperties { limit: u64 },
    Minimum { limit: f64 },
    MultipleOf { multiple_of: f64 },
    Not { schema: Value },
    OneOfMultipleValid,
    OneOfNotValid,
    Pattern { pattern: String },
    Required { property: String },
    Type { kind: TypeKind },
    UniqueItems,
}

/// A single reported instance failure, per spec §3's Error Record shape.
/// Composite keywords (`allOf`/`anyOf`/`oneOf`/`contains`) attach their
/// children lazily via `subschemas` rather than eagerly flattening them.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub instance_path: JSONPointer,
    pub schema_path: JSONPointer,
    pub instance: Value,
    pub kind: ValidationErrorKind,
    pub subschemas: Option<Vec<ValidationError>>,
}

impl ValidationError {
    pub(crate) fn new(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: Value,
        kind: ValidationErrorKind,
    ) -> Self {
        ValidationError {
            instance_path,
            schema_path,
            instance,
            kind,
            subschemas: None,
        }
    }

    pub(crate) fn with_subschemas(mut self, subschemas: Vec<ValidationError>) -> Self {
        self.subschemas = Some(subschemas);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::AllOf => write!(f, "'{}' is not valid under all of the given schemas", self.instance),
            ValidationErrorKind::AnyOf => write!(f, "'{}' is not valid under any of the given schemas", self.instance),
            ValidationErrorKind::Const { expected_value } => {
                write!(f, "'{}' was expected to equal '{}'", self.instance, expected_value)
            }
            ValidationErrorKind::Contains => write!(f, "'{}' does not contain items matching the given schema", self.instance),
            ValidationErrorKind::ContentEncoding { content_encoding } => {
                write!(f, "'{}' is not valid under the '{}' content encoding", self.instance, content_encoding)
            }
            ValidationErrorKind::ContentMediaType { content_media_type } => {
                write!(f, "'{}' is not valid '{}' content", self.instance, content_media_type)
            }
            ValidationErrorKind::Custom { keyword, message } => {
                write!(f, "'{}' failed keyword '{}': {}", self.instance, keyword, message)
            }
            ValidationErrorKind::Enum { options } => write!(f, "'{}' is not one of '{}'", self.instance, options),
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                write!(f, "{} is greater than or equal to the maximum of {}", self.instance, limit)
            }
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                write!(f, "{} is less than or equal to the minimum of {}", self.instance, limit)
            }
            ValidationErrorKind::FalseSchema => write!(f, "False schema does not allow '{}'", self.instance),
            ValidationErrorKind::Format { format } => write!(f, "'{}' is not a '{}'", self.instance, format),
            ValidationErrorKind::MaxItems { limit } => write!(f, "{} is longer than {} item(s)", self.instance, limit),
            ValidationErrorKind::MaxLength { limit } => write!(f, "{} is longer than {} character(s)", self.instance, limit),
            ValidationErrorKind::MaxProperties { limit } => {
                write!(f, "{} has more than {} properties", self.instance, limit)
            }
            ValidationErrorKind::Maximum { limit } => write!(f, "{} is greater than the maximum of {}", self.instance, limit),
            ValidationErrorKind::MinItems { limit } => write!(f, "{} has fewer than {} item(s)", self.instance, limit),
            ValidationErrorKind::MinLength { limit } => write!(f, "{} is shorter than {} character(s)", self.instance, limit),
            ValidationErrorKind::MinProperties { limit } => {
                write!(f, "{} has fewer than {} properties", self.instance, limit)
            }
            ValidationErrorKind::Minimum { limit } => write!(f, "{} is less than the minimum of {}", self.instance, limit),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.instance, multiple_of)
            }
            ValidationErrorKind::Not { schema } => write!(f, "'{}' is not allowed for '{}'", schema, self.instance),
            ValidationErrorKind::OneOfMultipleValid => write!(f, "'{}' is valid under more than one of the given schemas", self.instance),
            ValidationErrorKind::OneOfNotValid => write!(f, "'{}' is not valid under any of the given schemas", self.instance),
            ValidationErrorKind::Pattern { pattern } => write!(f, "'{}' does not match '{}'", self.instance, pattern),
            ValidationErrorKind::Required { property } => write!(f, "'{}' is a required property", property),
            ValidationErrorKind::Type { kind } => match kind {
                TypeKind::Single(primitive_type) => {
                    write!(f, "'{}' is not of type '{}'", self.instance, primitive_type)
                }
                TypeKind::Multiple => write!(f, "'{}' is not of the expected types", self.instance),
            },
            ValidationErrorKind::UniqueItems => write!(f, "'{}' has non-unique elements", self.instance),
        }
    }
}

pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError> + 'a>;

pub(crate) fn no_error<'a>() -> ErrorIterator<'a> {
    Box::new(None.into_iter())
}

pub(crate) fn error<'a>(err: ValidationError) -> ErrorIterator<'a> {
    Box::new(Some(err).into_iter())
}
