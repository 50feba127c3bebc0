//! The state threaded through every recursive `validate` call: the current
//! base URI (for resolving relative `$ref`s and rebasing on `$id`) and the
//! active draft. Unlike the teacher's `CompilationContext`, which only exists
//! during a one-time compile pass, this context is threaded through the live
//! per-instance walk itself, since this engine has no separate compile phase.
use crate::schemas::{id_of, Draft};
use serde_json::Value;
use std::borrow::Cow;
use url::Url;

/// The default cap on the number of `$ref` hops a single `validate` call may
/// follow before it is treated as a cycle, per spec §4.D's "at least 32".
pub(crate) const MAX_REF_DEPTH: u32 = 32;

#[derive(Debug, Clone)]
pub(crate) struct Context<'a> {
    pub(crate) scope: Cow<'a, Url>,
    pub(crate) draft: Draft,
    /// Number of `$ref` hops already followed to reach this point, used to
    /// detect unbounded reference cycles (spec §4.D's "Cycle safety").
    pub(crate) ref_depth: u32,
}

impl<'a> Context<'a> {
    pub(crate) fn new(scope: &'a Url, draft: Draft) -> Self {
        Context {
            scope: Cow::Borrowed(scope),
            draft,
            ref_depth: 0,
        }
    }

    /// Builds a context around an owned scope, used when `$ref` resolution
    /// computes a brand new base URI (rather than rebasing via `push`).
    pub(crate) fn with_scope(scope: Url, draft: Draft, ref_depth: u32) -> Context<'static> {
        Context {
            scope: Cow::Owned(scope),
            draft,
            ref_depth,
        }
    }

    /// Rebases the scope if `schema` carries an `$id`/`id`, matching the
    /// teacher's `CompilationContext::push`.
    pub(crate) fn push(&self, schema: &Value) -> Context<'static> {
        match id_of(self.draft, schema).and_then(|id| self.scope.join(id).ok()) {
            Some(joined) => Context {
                scope: Cow::Owned(joined),
                draft: self.draft,
                ref_depth: self.ref_depth,
            },
            None => Context {
                scope: Cow::Owned(self.scope.clone().into_owned()),
                draft: self.draft,
                ref_depth: self.ref_depth,
            },
        }
    }
}
