//! Rewrite chain for malformed OpenAPI YAML documents.
//!
//! The document is never parsed. Every rewrite is a narrow textual
//! substitution over the full text, and the rewrites run in a fixed order,
//! each one re-scanning whatever the previous one produced.
//!
//! This crate owns *what* gets rewritten. Listing directories, writing files
//! and reporting belong to `oasfix-core`.

mod context;
mod error;
mod rules;
mod scan;
mod template;

use tracing::debug;

pub use context::{DEFAULT_LICENSE_URL, DEFAULT_VENDOR_URL, RewriteContext};
pub use error::RewriteError;
pub use rules::{Rewrite, RewriteMeta, builtin_rewrites, rewrite_metas};

/// Result of running the full chain over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    /// Ids of the rewrites that changed the text, in pipeline order.
    pub applied: Vec<&'static str>,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Run every builtin rewrite over `content`, in order.
///
/// Fails as a whole if any single rewrite fails; callers only persist the
/// result of a successful run.
pub fn rewrite_document(
    ctx: &RewriteContext,
    content: &str,
) -> Result<RewriteOutcome, RewriteError> {
    let mut current = content.to_string();
    let mut applied = Vec::new();

    for rewrite in builtin_rewrites() {
        let id = rewrite.meta().id;
        let next = rewrite.apply(ctx, &current)?;
        if next.as_ref() == current.as_str() {
            continue;
        }

        debug!(rewrite = id, method = %ctx.method_name, "rewrite changed document");
        applied.push(id);
        current = next.into_owned();
    }

    Ok(RewriteOutcome {
        content: current,
        applied,
    })
}
