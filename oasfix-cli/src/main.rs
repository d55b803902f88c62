mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use fs_err as fs;
use oasfix_core::ToolInfo;
use oasfix_core::adapters::{ConsoleStatusSink, FsDocumentStore};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "oasfix",
    version,
    about = "Heuristic in-place repairs for malformed OpenAPI YAML documents.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    fix: FixArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the rewrite chain in the order it runs.
    ListRewrites(ListRewritesArgs),
}

#[derive(Debug, Args)]
struct FixArgs {
    /// Directory holding the documents (default: openapi/zk-compression).
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// File-name suffix selecting documents (default: .yaml).
    #[arg(long)]
    ext: Option<String>,

    /// URL inserted under `license:` when it has none.
    #[arg(long)]
    license_url: Option<String>,

    /// Dashboard URL used to split `schemas:` off description lines.
    #[arg(long)]
    vendor_url: Option<String>,

    /// Print a diff of every change instead of writing files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Config file (default: ./oasfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Args)]
struct ListRewritesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // stdout carries the status lines; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::ListRewrites(args)) => cmd_list_rewrites(args),
        None => cmd_fix(cli.fix),
    }
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(args.config.as_deref(), Utf8Path::new("."))
        .context("load oasfix.toml config")?;
    let settings = ConfigMerger::new(file_config).merge_fix_args(CliOverrides {
        dir: args.dir,
        ext: args.ext,
        license_url: args.license_url,
        vendor_url: args.vendor_url,
        dry_run: args.dry_run,
    });

    debug!(
        "merged config: dir={}, ext={}, license_url={}, vendor_url={}, dry_run={}",
        settings.dir, settings.extension, settings.license_url, settings.vendor_url, settings.dry_run
    );

    let mut sink = ConsoleStatusSink;
    let outcome = oasfix_core::run_batch(&settings, &FsDocumentStore, &mut sink, tool_info())
        .with_context(|| format!("process {}", settings.dir))?;

    if let Some(path) = &args.report {
        write_json(path, &outcome.report)?;
        info!("wrote report to {}", path);
    }
    Ok(())
}

fn cmd_list_rewrites(args: ListRewritesArgs) -> anyhow::Result<()> {
    let metas = oasfix_rewrite::rewrite_metas();

    match args.format {
        OutputFormat::Text => {
            println!("Rewrite chain (in order):\n");
            println!("  {:<3} {:<32} TITLE", "#", "ID");
            println!("  {:<3} {:<32} -----", "-", "--");
            for (i, meta) in metas.iter().enumerate() {
                println!("  {:<3} {:<32} {}", i + 1, meta.id, meta.title);
            }
        }
        OutputFormat::Json => {
            let rewrites: Vec<_> = metas
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    serde_json::json!({
                        "order": i + 1,
                        "id": m.id,
                        "title": m.title,
                        "description": m.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rewrites)?);
        }
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "oasfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
