mod commands;
mod logging;
mod progress;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use progress::CliReporter;
use tracing::info;
use zotfile_doctor_core::{DoctorEngine, ProgressReporter, SilentReporter};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let mut config = zotfile_doctor_core::config::load_configuration()
        .context("Error loading configuration")?;
    if args.strict_link_filter {
        config.strict_link_filter = true;
    }

    let cli_reporter;
    let reporter: &dyn ProgressReporter = if args.quiet {
        &SilentReporter
    } else {
        cli_reporter = CliReporter::new();
        &cli_reporter
    };

    let engine = DoctorEngine::new(config);
    let result = engine
        .run(&args.zotero_sqlite, &args.zotfile_directory, reporter)
        .with_context(|| {
            format!(
                "Error checking {} against {}",
                args.zotfile_directory.display(),
                args.zotero_sqlite.display()
            )
        })?;

    print!("{}", result.discrepancies);
    io::stdout().flush()?;

    info!(
        "DB: {}, Dir: {}, {:?} filesystem, {} database rows skipped",
        format!("{:.2}s", result.db_read_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.walk_duration.as_secs_f64()).green(),
        result.case_sensitivity,
        format!("{}", result.db_skipped).yellow(),
    );

    if !args.quiet && result.discrepancies.is_consistent() {
        eprintln!("{}", "Database and zotfile directory are consistent".green());
    }

    if args.clean && !result.discrepancies.in_dir_not_db.is_empty() {
        let summary = engine
            .clean(&args.zotfile_directory, &result, reporter)
            .context("Error cleaning zotfile directory")?;
        println!(
            "\n{} files and {} empty directories have been removed",
            summary.removed_files, summary.removed_dirs
        );
    }

    Ok(())
}
