//! Component: the configuration/construction surface, in the style of the
//! teacher's `CompilationOptions` builder. `HandleOptions` accumulates
//! settings; `compile()` (or one of the per-draft shortcuts) turns them,
//! plus a root schema document, into an immutable `Handle`.
use crate::error::{ErrorIterator, JsonSchemaError, ValidationError};
use crate::id_index::IdIndex;
use crate::keywords::format::FormatChecker;
use crate::pointer::JSONPointer;
use crate::resolver::{DefaultResolver, Document, RefResolver, ResolverCache};
use crate::schemas::{draft_from_schema, Draft};
use crate::validator;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// A user-registered format check, or an instruction to disable a built-in one.
pub enum FormatCheck {
    Enabled(FormatChecker),
    Disabled,
}

/// The tagged return type a user-defined keyword callable produces (spec §9:
/// "Implement as a tagged return type"): a plain pass/fail, which the walker
/// turns into a synthesized error on failure, or a structured list of errors
/// that is appended verbatim.
pub enum KeywordOutcome {
    Bool(bool),
    Errors(Vec<ValidationError>),
}

/// A user-defined keyword callable: given the keyword's schema value, the
/// instance, and the current instance pointer (spec §3's
/// `(data, schema, pointer) -> bool | list<error>`), returns a
/// [`KeywordOutcome`].
pub type KeywordCheck = Arc<dyn Fn(&Value, &Value, &JSONPointer) -> KeywordOutcome + Send + Sync>;

#[derive(Default)]
pub struct HandleOptions {
    draft: Option<Draft>,
    formats: HashMap<String, FormatCheck>,
    keywords: HashMap<String, KeywordCheck>,
    resolver: Option<Arc<dyn RefResolver>>,
    validate_formats: bool,
}

impl HandleOptions {
    pub fn new() -> Self {
        HandleOptions {
            validate_formats: true,
            ..Default::default()
        }
    }

    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_format(mut self, name: impl Into<String>, check: FormatCheck) -> Self {
        self.formats.insert(name.into(), check);
        self
    }

    pub fn with_keyword(mut self, name: impl Into<String>, check: KeywordCheck) -> Self {
        self.keywords.insert(name.into(), check);
        self
    }

    pub fn with_resolver(mut self, resolver: impl RefResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    #[cfg(feature = "net-http")]
    pub fn with_net_http_resolver(mut self) -> Self {
        self.resolver = Some(Arc::new(crate::resolver::HttpResolver::default()));
        self
    }

    pub fn without_format_validation(mut self) -> Self {
        self.validate_formats = false;
        self
    }

    pub fn compile(self, schema: Value) -> Result<Handle, crate::error::CompilationError> {
        let draft = self
            .draft
            .or_else(|| draft_from_schema(&schema))
            .unwrap_or_default();
        let base = crate::schemas::id_of(draft, &schema)
            .and_then(|id| Url::parse(id).ok())
            .unwrap_or_else(|| Url::parse(DOCUMENT_PROTOCOL).expect("static URL is valid"));
        Ok(Handle {
            draft,
            schema,
            base,
            formats: self.formats,
            keywords: self.keywords,
            resolver: self.resolver.unwrap_or_else(|| Arc::new(DefaultResolver)),
            validate_formats: self.validate_formats,
            id_index: IdIndex::default(),
            resolver_cache: ResolverCache::default(),
            regex_cache: Mutex::new(HashMap::new()),
        })
    }
}

/// The base URI assumed for a schema document with no `$id`/`id` of its own,
/// matching the teacher's `validator::DOCUMENT_PROTOCOL`.
pub(crate) const DOCUMENT_PROTOCOL: &str = "json-schema:///";

/// An immutable, compiled-free handle on a root schema document. Pure aside
/// from the lazily, exactly-once computed `id_index` and `resolver_cache`,
/// which are safe to share across threads (spec §5's concurrency model).
pub struct Handle {
    pub(crate) draft: Draft,
    pub(crate) schema: Value,
    pub(crate) base: Url,
    pub(crate) formats: HashMap<String, FormatCheck>,
    pub(crate) keywords: HashMap<String, KeywordCheck>,
    pub(crate) resolver: Arc<dyn RefResolver>,
    pub(crate) validate_formats: bool,
    pub(crate) id_index: IdIndex,
    pub(crate) resolver_cache: ResolverCache,
    pub(crate) regex_cache: Mutex<HashMap<String, Arc<Regex>>>,
}

impl Handle {
    pub fn compile(schema: Value) -> Result<Handle, crate::error::CompilationError> {
        HandleOptions::new().compile(schema)
    }

    pub fn draft4(schema: Value) -> Result<Handle, crate::error::CompilationError> {
        HandleOptions::new().with_draft(Draft::Draft4).compile(schema)
    }

    pub fn draft6(schema: Value) -> Result<Handle, crate::error::CompilationError> {
        HandleOptions::new().with_draft(Draft::Draft6).compile(schema)
    }

    pub fn draft7(schema: Value) -> Result<Handle, crate::error::CompilationError> {
        HandleOptions::new().with_draft(Draft::Draft7).compile(schema)
    }

    /// The root document's own "current document" view: its schema and its
    /// (lazily built) ID index, per spec §4.D.
    pub(crate) fn root_document(&self) -> Document<'_> {
        Document::new(&self.schema, &self.id_index, self.base.clone())
    }

    /// A memoized compiled `Regex` for `pattern`, shared across validations
    /// against this handle (spec §5: "regex compilation may be memoized per
    /// schema handle on first use"). Compilation failures surface as
    /// `SchemaError` the moment the owning keyword is evaluated, not at
    /// `compile()` time.
    pub(crate) fn compiled_pattern(&self, pattern: &str) -> Result<Arc<Regex>, JsonSchemaError> {
        if let Some(existing) = self.regex_cache.lock().get(pattern) {
            return Ok(Arc::clone(existing));
        }
        let compiled = Arc::new(
            Regex::new(pattern)
                .map_err(|err| JsonSchemaError::SchemaError(format!("invalid regex '{}': {}", pattern, err)))?,
        );
        self.regex_cache
            .lock()
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Lazily streamed validation errors for `instance` against the root
    /// schema. `Err` surfaces one of spec §7's exceptional failures — a bad
    /// `$ref`, an unsupported `contentEncoding`, an uncompilable regex —
    /// which abort the walk outright rather than being reported as a
    /// `ValidationError`.
    pub fn validate<'a>(&'a self, instance: &'a Value) -> Result<ErrorIterator<'a>, JsonSchemaError> {
        validator::validate(self, instance)
    }

    /// Convenience shortcut: is `instance` valid? An exceptional failure
    /// while walking the schema is treated as "not valid" — callers that need
    /// to distinguish the two should use [`Handle::validate`] directly.
    pub fn is_valid(&self, instance: &Value) -> bool {
        match self.validate(instance) {
            Ok(mut errors) => errors.next().is_none(),
            Err(_) => false,
        }
    }
}

/// Top-level convenience function mirroring the teacher's crate-level
/// `is_valid` shortcut.
pub fn is_valid(schema: &Value, instance: &Value) -> Result<bool, crate::error::CompilationError> {
    let handle = Handle::compile(schema.clone())?;
    Ok(handle.is_valid(instance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiles_and_validates_trivial_schema() {
        let handle = Handle::compile(json!({"type": "string"})).unwrap();
        assert!(handle.is_valid(&json!("hello")));
        assert!(!handle.is_valid(&json!(1)));
    }

    #[test]
    fn detects_draft_from_schema() {
        let handle = Handle::compile(json!({
            "$schema": "http://json-schema.org/draft-04/schema#"
        }))
        .unwrap();
        assert_eq!(handle.draft, Draft::Draft4);
    }
}
