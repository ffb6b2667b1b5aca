use crate::report::SweepReport;
use crate::utils;
use colored::Colorize;

pub fn print_banner() {
    println!("{}", "fsweep - filesystem retention sweeper".bold().cyan());
    println!();
}

pub fn print_report(report: &SweepReport, dry_run: bool) {
    println!("{}", "=== Sweep Report ===".bold().white());

    for result in &report.results {
        let label = format!("{}/{}", result.group, result.rule_name);
        println!(
            "  {:<36} matched {:>4}  eligible {:>4}  acted {:>4}  {}",
            label.bold(),
            result.matched_count,
            result.eligible_count,
            result.acted_count,
            utils::format_size(result.bytes_freed).green()
        );
        if let Some(archive) = &result.archive {
            println!(
                "    {} {}",
                "archived to".dimmed(),
                archive.display()
            );
        }
        for err in &result.errors {
            match &err.path {
                Some(path) => println!(
                    "    {} {}: {}",
                    "error".red().bold(),
                    path.display(),
                    err.cause
                ),
                None => println!("    {} {}", "error".red().bold(), err.cause),
            }
        }
    }

    println!("  {}", "─".repeat(45).dimmed());
    println!(
        "  {} entries acted on, {} freed",
        report.total_acted(),
        utils::format_size(report.total_bytes_freed()).green()
    );
    if dry_run {
        println!("  {}", "[dry run] nothing was modified".yellow());
    }
    if report.has_errors() {
        println!("  {}", "sweep completed with errors".red().bold());
    }
    println!();
}
