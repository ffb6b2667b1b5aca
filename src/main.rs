mod cli;

use clap::Parser;
use fsweep::sweep::SweepOptions;
use fsweep::{config, output, sweep};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let (config_path, archive_root, group, dry_run) = match cli.command {
        cli::Command::Scan {
            config,
            archive_root,
            group,
        } => (config, archive_root, group, true),
        cli::Command::Sweep {
            confirm,
            config,
            archive_root,
            group,
        } => (config, archive_root, group, !confirm),
    };

    let mut document = match config::load(Path::new(&config_path)) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("fsweep: {e}");
            std::process::exit(2);
        }
    };
    if let Some(group) = &group {
        document.retain(|name, _| name == group);
    }

    output::print_banner();
    let now = chrono::Utc::now();
    let opts = SweepOptions {
        archive_root: PathBuf::from(archive_root),
        dry_run,
    };
    let report = sweep::sweep(&document, now, &opts);
    info!(
        "sweep finished: {} rules, {} entries acted on",
        report.results.len(),
        report.total_acted()
    );
    output::print_report(&report, dry_run);

    // Nonzero exit signals the alerting collaborator that this sweep
    // accumulated errors.
    std::process::exit(if report.has_errors() { 1 } else { 0 });
}
