//! Port traits abstracting all I/O away from the pipeline.

use crate::error::FileError;
use camino::{Utf8Path, Utf8PathBuf};
use oasfix_types::{FileOutcome, FixSummary};

/// Where documents live.
pub trait DocumentStore {
    /// Entries directly inside `dir` whose names end with `extension`, in a
    /// deterministic order.
    fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>>;

    fn read(&self, path: &Utf8Path) -> anyhow::Result<String>;

    fn write(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}

/// Receives progress as the batch runs.
pub trait StatusSink {
    /// A file went through the chain. `patch` is set for changed files in
    /// dry-run mode.
    fn file_done(&mut self, outcome: &FileOutcome, patch: Option<&str>);

    fn file_failed(&mut self, file_name: &str, error: &FileError);

    fn finished(&mut self, summary: &FixSummary);
}
