//! Error types for the rewrite chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    /// A document without `paths:` needs a `components:` or `schemas:` key to
    /// split on before a `paths:` section can be synthesized.
    #[error("no `paths:` section and no `components:` or `schemas:` key to anchor one")]
    MissingSectionAnchor,

    /// A pattern built from configured input failed to compile.
    #[error("invalid pattern for rewrite `{rewrite}`: {source}")]
    Pattern {
        rewrite: &'static str,
        #[source]
        source: regex::Error,
    },
}
