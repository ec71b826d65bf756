//! Batch process command implementation
//!
//! Runs the commit workflow across the hub and renders the resulting
//! report. Everything printed here is reconstructed from the BatchReport;
//! the engine itself never writes to the terminal.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use indicatif::ProgressBar;

use crate::batch::run_batch;
use crate::core::{
    BatchConfig, BatchReport, RepositoryResult, ERROR_MESSAGE_MAX_LENGTH,
    ERROR_MESSAGE_TRUNCATE_LENGTH, NO_REPOS_MESSAGE, PATH_DISPLAY_WIDTH,
};
use crate::exec::SystemRunner;
use crate::utils::{set_terminal_title, set_terminal_title_and_flush, shorten_path};

const PROCESSING_MESSAGE: &str = "🔍 Scanning and processing repositories...";

/// Handles the batch process command
pub async fn handle_process_command(config: BatchConfig) -> Result<()> {
    set_terminal_title("🚀 repohub");

    print_header(&config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(PROCESSING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let runner = SystemRunner::new();
    let report = run_batch(&config, &runner).await;

    spinner.finish_and_clear();

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            set_terminal_title_and_flush("✅ repohub");
            return Err(e.into());
        }
    };

    if report.total() == 0 {
        println!("{NO_REPOS_MESSAGE}");
        set_terminal_title_and_flush("✅ repohub");
        return Ok(());
    }

    render_report(&report);

    set_terminal_title_and_flush("✅ repohub");
    Ok(())
}

/// Prints the run header and the effective configuration
fn print_header(config: &BatchConfig) {
    println!();
    println!(
        "🚀 Git Repository Manager • {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("   hub: {}", config.base_dir.display());

    let mut options = Vec::new();
    if config.pull {
        options.push("pull".to_string());
    }
    if config.normalize_ignore {
        options.push("normalize-ignore".to_string());
    }
    if config.purge_junk {
        options.push("purge-junk".to_string());
    }
    if config.use_commit_tool {
        options.push(format!("commit via {}", config.commit_tool));
    }
    if !options.is_empty() {
        println!("   options: {}", options.join(", "));
    }
    if !config.exclude.is_empty() {
        println!("   excluding: {}", config.exclude.join(", "));
    }
    if !config.include.is_empty() {
        println!("   only: {}", config.include.join(", "));
    }
    println!();
}

/// Renders every repository's step outcomes followed by the aggregate tally
fn render_report(report: &BatchReport) {
    let max_name_length = report
        .results()
        .iter()
        .map(|r| r.repo.name.len())
        .max()
        .unwrap_or(0);

    for result in report.results() {
        render_repository(result, max_name_length);
    }

    println!();
    let mut total_elapsed = 0.0;
    for result in report.results() {
        total_elapsed += result.elapsed_seconds();
    }
    let verdict = if report.failure_count() > 0 {
        format!(
            "✅ Completed in {:.1}s • {} processed • {} succeeded • {} failed",
            total_elapsed,
            report.total(),
            report.success_count(),
            report.failure_count()
        )
    } else {
        format!(
            "✅ Completed in {:.1}s • {} processed • all succeeded",
            total_elapsed,
            report.total()
        )
    };
    println!("{verdict}");

    render_failures(report);
}

/// Renders one repository's block: verdict line plus per-step detail
fn render_repository(result: &RepositoryResult, max_name_length: usize) {
    let verdict_symbol = if result.overall_succeeded() {
        "🟢"
    } else {
        "🔴"
    };
    println!(
        "{} {:width$}  {:.2}s",
        verdict_symbol,
        result.repo.name,
        result.elapsed_seconds(),
        width = max_name_length
    );

    for outcome in result.outcomes() {
        println!(
            "   {} {:<16} {}",
            outcome.symbol(),
            outcome.kind.name(),
            condense_message(&outcome.message)
        );
    }
}

/// Prints the tree-style listing of failed repositories, if any
fn render_failures(report: &BatchReport) {
    let failed: Vec<&RepositoryResult> = report
        .results()
        .iter()
        .filter(|r| !r.overall_succeeded())
        .collect();
    if failed.is_empty() {
        return;
    }

    println!();
    println!("🔴 FAILED REPOS ({})", failed.len());
    for (i, result) in failed.iter().enumerate() {
        let tree_char = if i == failed.len() - 1 { "└─" } else { "├─" };
        let error = result
            .outcomes()
            .iter()
            .find(|o| !o.succeeded && o.kind.is_fatal())
            .map(|o| condense_message(&o.message))
            .unwrap_or_default();
        let path = result.repo.path.to_string_lossy();
        println!(
            "   {} {:20} {:30} # {}",
            tree_char,
            result.repo.name,
            shorten_path(&path, PATH_DISPLAY_WIDTH),
            error
        );
    }
}

/// Cleans and condenses step messages for single-line display
fn condense_message(message: &str) -> String {
    let cleaned = message.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.contains("timed out") {
        "timeout".to_string()
    } else if cleaned.contains("authentication") || cleaned.contains("Permission denied") {
        "authentication failed".to_string()
    } else if cleaned.contains("conflict") || cleaned.contains("diverged") {
        "merge conflict".to_string()
    } else if cleaned.contains("Could not resolve host") || cleaned.contains("network") {
        "network error".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
