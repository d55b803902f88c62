//! Batch pipeline, independent of clap and of the real filesystem.
//!
//! All I/O goes through the port traits; the binary wires in the filesystem
//! and console adapters.

use crate::error::FileError;
use crate::ports::{DocumentStore, StatusSink};
use crate::settings::FixSettings;
use camino::Utf8Path;
use chrono::Utc;
use diffy::PatchFormatter;
use oasfix_rewrite::rewrite_document;
use oasfix_types::{FileOutcome, FileStatus, OasfixReport, ToolInfo};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Outcome of `run_batch`.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub report: OasfixReport,

    /// Concatenated patch for every changed file. Empty when nothing changed.
    pub patch: String,
}

/// Run the rewrite chain over every matching document in `settings.dir`.
///
/// Only a failure to list the directory is returned as an error. Anything
/// that goes wrong with a single file is reported to `sink`, recorded in the
/// report, and the batch moves on.
pub fn run_batch(
    settings: &FixSettings,
    store: &dyn DocumentStore,
    sink: &mut dyn StatusSink,
    tool: ToolInfo,
) -> anyhow::Result<BatchOutcome> {
    let mut report = OasfixReport::new(tool, settings.dir.clone(), settings.dry_run);
    report.run.started_at = Some(Utc::now());

    let paths = store.list(&settings.dir, &settings.extension)?;
    debug!(dir = %settings.dir, count = paths.len(), "documents listed");

    let mut patch = String::new();
    for path in paths {
        let file_name = path.file_name().unwrap_or(path.as_str()).to_string();

        match fix_one(settings, store, &path, &file_name) {
            Ok((outcome, file_patch)) => {
                let shown = settings.dry_run.then_some(file_patch.as_str());
                sink.file_done(&outcome, shown.filter(|p| !p.is_empty()));
                patch.push_str(&file_patch);
                report.push(outcome);
            }
            Err(err) => {
                warn!(file = %path, kind = err.kind(), "failed to fix document: {}", err);
                sink.file_failed(&file_name, &err);
                report.push(FileOutcome::failed(path, err.to_string()));
            }
        }
    }

    report.run.ended_at = Some(Utc::now());
    sink.finished(&report.summary);
    info!(
        files = report.summary.files_seen,
        fixed = report.summary.fixed,
        failed = report.summary.failed,
        "batch finished"
    );

    Ok(BatchOutcome { report, patch })
}

fn fix_one(
    settings: &FixSettings,
    store: &dyn DocumentStore,
    path: &Utf8Path,
    file_name: &str,
) -> Result<(FileOutcome, String), FileError> {
    let before = store.read(path).map_err(FileError::Read)?;

    let ctx = settings.rewrite_context(file_name);
    let rewritten = rewrite_document(&ctx, &before)?;

    let sha256_before = sha256_hex(before.as_bytes());
    if !rewritten.changed() {
        debug!(file = %path, "document already clean");
        return Ok((
            FileOutcome {
                path: path.to_path_buf(),
                status: FileStatus::Unchanged,
                rewrites: vec![],
                error: None,
                sha256_before: Some(sha256_before.clone()),
                sha256_after: Some(sha256_before),
            },
            String::new(),
        ));
    }

    if !settings.dry_run {
        store
            .write(path, &rewritten.content)
            .map_err(FileError::Write)?;
    }

    let file_patch = render_patch(path, &before, &rewritten.content);
    Ok((
        FileOutcome {
            path: path.to_path_buf(),
            status: FileStatus::Fixed,
            rewrites: rewritten.applied.iter().map(|id| id.to_string()).collect(),
            error: None,
            sha256_before: Some(sha256_before),
            sha256_after: Some(sha256_hex(rewritten.content.as_bytes())),
        },
        file_patch,
    ))
}

/// Unified diff of one file with git-style headers. Empty when `old == new`.
pub fn render_patch(path: &Utf8Path, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(old, new);
    let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy repeats its own ---/+++ header; keep only the hunks.
    let hunks = formatted
        .find("\n@@")
        .map_or(formatted.as_str(), |i| &formatted[i + 1..]);
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
