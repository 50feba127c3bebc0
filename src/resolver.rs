//! Component D: resolving a `$ref` URI to the schema document it names.
//!
//! Four branches, tried in order, per spec §4.D:
//! 1. a same-document fragment pointer (`#/...`) — walked directly against root;
//! 2. a fragment against an already-fetched external document;
//! 3. a hit in the root's ID index;
//! 4. falling back to the resolver callback, then re-running the ID index
//!    lookup against whatever document it returns.
use crate::error::JsonSchemaError;
use crate::id_index::IdIndex;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// The "current document" a `$ref`'s same-document fragment and ID-index
/// lookups are evaluated against. Starts out as the handle's own root schema;
/// crossing into an externally-resolved document swaps it for that document's
/// root and its own (separately memoized) ID index, per spec §4.D.
pub(crate) struct Document<'d> {
    pub(crate) root: &'d Value,
    pub(crate) ids: &'d IdIndex,
    pub(crate) base: Url,
}

impl<'d> Document<'d> {
    pub(crate) fn new(root: &'d Value, ids: &'d IdIndex, base: Url) -> Self {
        Document { root, ids, base }
    }
}

/// A schema document fetched through the resolver callback, wrapped the way
/// spec §4.D's "wrap it in a new Schema Handle (sharing policies)" describes —
/// just enough state (the document and its own lazily-built ID index) to
/// resolve further refs against it, without re-threading format/keyword
/// policies that do not vary per document.
pub(crate) struct ExternalDocument {
    pub(crate) root: Value,
    pub(crate) ids: IdIndex,
    pub(crate) base: Url,
}

impl Default for ExternalDocument {
    fn default() -> Self {
        ExternalDocument {
            root: Value::Null,
            ids: IdIndex::default(),
            base: Url::parse(crate::options::DOCUMENT_PROTOCOL).expect("valid base URL"),
        }
    }
}

/// A pluggable callback that fetches the document named by `uri`.
pub trait RefResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> Result<Value, JsonSchemaError>;
}

/// The resolver installed when none is configured: every external reference
/// is an `UnknownRef`.
pub(crate) struct DefaultResolver;

impl RefResolver for DefaultResolver {
    fn resolve(&self, uri: &str) -> Result<Value, JsonSchemaError> {
        Err(JsonSchemaError::UnknownRef(uri.to_string()))
    }
}

/// The well-known `"net/http"` resolver: fetches external schema documents
/// over blocking HTTP(S). Gated behind the `net-http` feature, same as the
/// teacher gates its `reqwest`-backed resolver.
#[cfg(feature = "net-http")]
pub struct HttpResolver {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "net-http")]
impl Default for HttpResolver {
    fn default() -> Self {
        HttpResolver {
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(feature = "net-http")]
impl RefResolver for HttpResolver {
    fn resolve(&self, uri: &str) -> Result<Value, JsonSchemaError> {
        log::debug!("fetching external schema document from {}", uri);
        let response = self
            .client
            .get(uri)
            .send()
            .map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
        response
            .json()
            .map_err(|err| JsonSchemaError::RefError(err.to_string()))
    }
}

/// Caches documents fetched through the resolver callback for the lifetime of
/// a `Handle`, so repeated `$ref`s to the same external URI only fetch once
/// (spec §9's "avoid redundant fetches" design note).
#[derive(Default)]
pub(crate) struct ResolverCache {
    documents: Mutex<HashMap<String, Arc<ExternalDocument>>>,
}

impl ResolverCache {
    pub(crate) fn fetch(
        &self,
        resolver: &dyn RefResolver,
        uri: &str,
    ) -> Result<Arc<ExternalDocument>, JsonSchemaError> {
        if let Some(existing) = self.documents.lock().get(uri) {
            return Ok(Arc::clone(existing));
        }
        let root = resolver.resolve(uri)?;
        let base = Url::parse(uri).map_err(|err| JsonSchemaError::RefError(err.to_string()))?;
        let document = Arc::new(ExternalDocument {
            root,
            ids: IdIndex::default(),
            base,
        });
        self.documents
            .lock()
            .insert(uri.to_string(), Arc::clone(&document));
        Ok(document)
    }
}

/// Splits a reference URI into its base document URI and fragment (the part
/// after `#`, unescaped-per-pointer-token form is handled by the caller).
pub(crate) fn split_fragment(uri: &Url) -> (Url, String) {
    let fragment = uri.fragment().unwrap_or("").to_string();
    let mut base = uri.clone();
    base.set_fragment(None);
    (base, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolver_raises_unknown_ref() {
        let resolver = DefaultResolver;
        let err = resolver.resolve("http://example.com/missing.json").unwrap_err();
        assert!(matches!(err, JsonSchemaError::UnknownRef(_)));
    }

    #[test]
    fn split_fragment_separates_base_and_fragment() {
        let url = Url::parse("http://example.com/root.json#/definitions/a").unwrap();
        let (base, fragment) = split_fragment(&url);
        assert_eq!(base.as_str(), "http://example.com/root.json");
        assert_eq!(fragment, "/definitions/a");
    }

    struct StubResolver {
        calls: Mutex<u32>,
    }

    impl RefResolver for StubResolver {
        fn resolve(&self, _uri: &str) -> Result<Value, JsonSchemaError> {
            *self.calls.lock() += 1;
            Ok(serde_json::json!({"type": "string"}))
        }
    }

    #[test]
    fn cache_fetches_once_per_uri() {
        let resolver = StubResolver {
            calls: Mutex::new(0),
        };
        let cache = ResolverCache::default();
        cache.fetch(&resolver, "http://example.com/a.json").unwrap();
        cache.fetch(&resolver, "http://example.com/a.json").unwrap();
        assert_eq!(*resolver.calls.lock(), 1);
    }
}
