use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OasfixReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    /// Directory that was scanned.
    pub directory: Utf8PathBuf,

    /// True when nothing was written to disk.
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub files: Vec<FileOutcome>,

    pub summary: FixSummary,
}

impl OasfixReport {
    pub fn new(tool: ToolInfo, directory: Utf8PathBuf, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::OASFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            directory,
            dry_run,
            files: vec![],
            summary: FixSummary::default(),
        }
    }

    /// Append a file outcome and keep the summary counters in step.
    pub fn push(&mut self, outcome: FileOutcome) {
        self.summary.record(outcome.status);
        self.files.push(outcome);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub status: FileStatus,

    /// Ids of the rewrites that changed the file, in pipeline order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewrites: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

impl FileOutcome {
    pub fn failed(path: Utf8PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            rewrites: vec![],
            error: Some(error.into()),
            sha256_before: None,
            sha256_after: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one rewrite changed the content.
    Fixed,
    /// The chain ran but produced identical content.
    Unchanged,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub files_seen: u64,
    pub fixed: u64,
    pub unchanged: u64,
    pub failed: u64,
}

impl FixSummary {
    pub fn record(&mut self, status: FileStatus) {
        self.files_seen += 1;
        match status {
            FileStatus::Fixed => self.fixed += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Failed => self.failed += 1,
        }
    }
}
