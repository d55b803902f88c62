//! Embeddable core library for oasfix.
//!
//! Provides a clap-free, I/O-abstracted batch runner: list a directory, run
//! the rewrite chain over each matching file, write the results back, and
//! report per-file status without letting one bad file stop the batch.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DocumentStore`](ports::DocumentStore): list, read and write documents
//! - [`StatusSink`](ports::StatusSink): per-file status and completion lines
//!
//! The [`adapters`] module provides filesystem, console and in-memory
//! implementations.

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use error::FileError;
pub use pipeline::{BatchOutcome, render_patch, run_batch};
pub use settings::FixSettings;

// Re-export report types so embedders don't need oasfix-types directly.
pub use oasfix_types::{FileOutcome, FileStatus, FixSummary, OasfixReport, ToolInfo};
