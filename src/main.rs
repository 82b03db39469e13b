//! PM Trace Tools CLI
//!
//! Checksums ucode blobs and turns suspend/resume ftrace output into
//! per-cycle timing reports.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pm_trace_tools::commands::{execute_checksum, execute_report, validate_args, ReportArgs};
use pm_trace_tools::utils::config::{
    CYCLE_LINE_THRESHOLD, DEFAULT_EXTRACT_DIR, DEFAULT_REPORT_FILE, DEFAULT_TRACE_FILE,
    SUMMARY_SCHEMA_VERSION, UCODE_HEADER_LEN,
};

/// PM Trace Tools - suspend/resume timing and ucode checksums
#[derive(Parser, Debug)]
#[command(name = "pmtrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the signature of a ucode blob
    Checksum {
        /// Path to the firmware binary
        file: PathBuf,
    },

    /// Build the per-cycle suspend/resume report from an ftrace capture
    Report {
        /// ftrace text to scan
        #[arg(short, long, default_value = DEFAULT_TRACE_FILE)]
        input: PathBuf,

        /// Report file (overwritten)
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,

        /// Directory for the dated extract of long cycles
        #[arg(long, default_value = DEFAULT_EXTRACT_DIR)]
        extract_dir: PathBuf,

        /// Minimum report lines for a cycle to be extracted
        #[arg(long, default_value_t = CYCLE_LINE_THRESHOLD)]
        min_lines: usize,

        /// Date for the extract file name (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output path for a JSON cycle summary (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Checksum { file } => {
            execute_checksum(&file)?;
        }

        Commands::Report {
            input,
            output,
            extract_dir,
            min_lines,
            date,
            json,
            summary,
        } => {
            let mut args = ReportArgs {
                input,
                output,
                extract_dir,
                line_threshold: min_lines,
                json_output: json,
                print_summary: summary,
                ..Default::default()
            };

            if let Some(date) = date {
                args.extract_date = date;
            }

            // Validate args first
            validate_args(&args)?;

            execute_report(&args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("PM Trace Tools v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_SCHEMA_VERSION);
    println!("ucode header: {} bytes", UCODE_HEADER_LEN);
    println!();
    println!("Suspend/resume ftrace timing reports and ucode checksums.");
}
