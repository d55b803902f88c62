//! Shared DTOs for the oasfix workspace.
//!
//! # Design constraints
//! - These types are serialized to disk as the run report.
//! - Prefer adding optional fields over changing semantics.

pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const OASFIX_REPORT_V1: &str = "oasfix.report.v1";
}

pub use report::{FileOutcome, FileStatus, FixSummary, OasfixReport, RunInfo, ToolInfo};
