//! Per-file error type.
//!
//! A `FileError` is reported and recorded, never propagated: the batch moves
//! on to the next file. Tool-level failures (listing the directory) use
//! `anyhow` and abort the run.

use oasfix_rewrite::RewriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0:#}")]
    Read(anyhow::Error),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("{0:#}")]
    Write(anyhow::Error),
}

impl FileError {
    /// Short token for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Read(_) => "read",
            FileError::Rewrite(_) => "rewrite",
            FileError::Write(_) => "write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileError;
    use anyhow::Context;
    use oasfix_rewrite::RewriteError;

    #[test]
    fn read_error_shows_context_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("Is a directory")).context("read x.yaml");
        let err = FileError::Read(err.unwrap_err());
        assert_eq!(err.to_string(), "read x.yaml: Is a directory");
        assert_eq!(err.kind(), "read");
    }

    #[test]
    fn rewrite_error_is_transparent() {
        let err = FileError::from(RewriteError::MissingSectionAnchor);
        assert_eq!(err.to_string(), RewriteError::MissingSectionAnchor.to_string());
        assert_eq!(err.kind(), "rewrite");
    }
}
