//! # jsonschema-core
//!
//! A core validation engine for JSON Schema drafts 4, 6, and 7: given a root
//! schema document, produces the complete, non-short-circuiting set of
//! validation errors an instance violates.
//!
//! ## Usage
//! ```rust
//! use jsonschema_core::Handle;
//! use serde_json::json;
//!
//! let schema = json!({"maxLength": 5});
//! let handle = Handle::compile(schema).expect("valid schema");
//! assert!(handle.is_valid(&json!("foo")));
//! assert!(!handle.is_valid(&json!("too long")));
//! ```
//!
//! Pick a draft explicitly when the schema document doesn't carry its own
//! `$schema`:
//! ```rust
//! use jsonschema_core::Handle;
//! use serde_json::json;
//!
//! let handle = Handle::draft4(json!({"type": "integer"})).unwrap();
//! for error in handle.validate(&json!("not an integer")).unwrap() {
//!     println!("{}", error);
//! }
//! ```
mod context;
pub mod error;
mod helpers;
mod id_index;
mod keywords;
mod options;
pub mod pointer;
pub mod primitive_type;
mod resolver;
pub mod schemas;
mod validator;

pub use error::{CompilationError, ErrorIterator, JsonSchemaError, TypeKind, ValidationError, ValidationErrorKind};
pub use options::{is_valid, FormatCheck, Handle, HandleOptions, KeywordCheck, KeywordOutcome};
pub use pointer::{JSONPointer, PathChunk};
pub use resolver::RefResolver;
#[cfg(feature = "net-http")]
pub use resolver::HttpResolver;
pub use schemas::Draft;
