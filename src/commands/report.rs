//! Report command implementation.
//!
//! The report command:
//! 1. Scans the trace and writes the per-cycle report
//! 2. Re-reads the report and extracts cycles over the line threshold
//! 3. Writes the optional JSON summary

use crate::aggregator::{calculate_cycle_stats, CycleReport, CycleTimer};
use crate::output::{
    extract_cycles, format_secs, scan_cycle_blocks, select_cycles, write_extract, write_summary,
    CycleSummary, ReportSummary, ReportWriter,
};
use crate::parser::classify_line;
use crate::utils::config::{
    CYCLE_LINE_THRESHOLD, DEFAULT_EXTRACT_DIR, DEFAULT_REPORT_FILE, DEFAULT_TRACE_FILE,
    SUMMARY_SCHEMA_VERSION,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// ftrace text to scan
    pub input: PathBuf,

    /// Per-cycle report, overwritten each run
    pub output: PathBuf,

    /// Directory receiving the dated extract
    pub extract_dir: PathBuf,

    /// Minimum block line count for a cycle to be extracted
    pub line_threshold: usize,

    /// Date used in the extract file name
    pub extract_date: NaiveDate,

    /// Output path for the JSON summary (optional)
    pub json_output: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TRACE_FILE),
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
            line_threshold: CYCLE_LINE_THRESHOLD,
            extract_date: chrono::Local::now().date_naive(),
            json_output: None,
            print_summary: false,
        }
    }
}

/// What a report run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Completed cycles in trace order
    pub cycles: Vec<CycleReport>,

    /// Cycle numbers copied into the extract
    pub extracted: Vec<u32>,

    pub extract_path: PathBuf,
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file missing or unreadable
/// * Marker line without a parseable timestamp
/// * File write errors
pub fn execute_report(args: &ReportArgs) -> Result<ReportOutcome> {
    let start_time = Instant::now();

    info!("Starting report for trace: {}", args.input.display());

    // Step 1: Scan trace into the report
    info!("Step 1/3: Scanning trace...");
    let cycles = write_cycle_report(&args.input, &args.output)?;

    let stats = calculate_cycle_stats(&cycles);
    info!("Cycle statistics: {}", stats.summary());

    // Step 2: Extract long cycles
    info!(
        "Step 2/3: Extracting cycles with at least {} lines...",
        args.line_threshold
    );
    let report = std::fs::read_to_string(&args.output)
        .with_context(|| format!("Failed to re-read report {}", args.output.display()))?;

    let blocks = scan_cycle_blocks(&report);
    let extracted = select_cycles(&blocks, args.line_threshold);
    debug!("{} of {} cycle blocks selected", extracted.len(), blocks.len());

    let extract_path = write_extract(
        &args.extract_dir,
        args.extract_date,
        &extract_cycles(&report, &extracted),
    )
    .context("Failed to write cycle extract")?;

    info!("✓ Extract written to: {}", extract_path.display());

    // Step 3: JSON summary (if requested)
    if let Some(json_path) = &args.json_output {
        info!("Step 3/3: Writing JSON summary...");
        let summary = to_summary(args, &cycles, &extracted);
        write_summary(&summary, json_path).context("Failed to write JSON summary")?;

        info!("✓ Summary written to: {}", json_path.display());
    } else {
        info!("Step 3/3: Skipping JSON summary (not requested)");
    }

    if args.print_summary {
        print_summary(&cycles, &extracted);
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(ReportOutcome {
        cycles,
        extracted,
        extract_path,
    })
}

/// Stream the trace through the cycle timer into the report file
///
/// **Private** - internal helper for execute_report
fn write_cycle_report(input: &Path, output: &Path) -> Result<Vec<CycleReport>> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open trace file {}", input.display()))?;

    let mut writer = ReportWriter::create(output).context("Failed to create report file")?;
    let mut timer = CycleTimer::new();
    let mut cycles = Vec::new();

    // ftrace payloads (bprint, tracing_mark_write) may carry arbitrary bytes
    for (index, raw) in BufReader::new(file).split(b'\n').enumerate() {
        let line_number = index + 1;
        let raw = raw.with_context(|| {
            format!("Failed to read line {} of {}", line_number, input.display())
        })?;

        let line = String::from_utf8_lossy(&raw);
        if let Cow::Owned(_) = line {
            debug!("Line {} is not valid UTF-8, decoded lossily", line_number);
        }
        let line = line.trim_end_matches('\r');

        let Some(event) = classify_line(line, line_number)
            .with_context(|| format!("Malformed trace line in {}", input.display()))?
        else {
            continue;
        };

        if let Some(cycle) = timer.feed(event) {
            writer
                .write_cycle(&cycle)
                .context("Failed to write report")?;
            cycles.push(cycle);
        }
    }

    timer.finish();
    writer.finish().context("Failed to flush report")?;

    info!("✓ Report written to: {} ({} cycles)", output.display(), cycles.len());

    Ok(cycles)
}

/// Build the serializable summary
///
/// **Private** - internal helper for execute_report
fn to_summary(args: &ReportArgs, cycles: &[CycleReport], extracted: &[u32]) -> ReportSummary {
    ReportSummary {
        version: SUMMARY_SCHEMA_VERSION.to_string(),
        trace_file: args.input.display().to_string(),
        line_threshold: args.line_threshold,
        cycles: cycles.iter().map(CycleSummary::from).collect(),
        extracted_cycles: extracted.to_vec(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Print the console summary table
///
/// **Private** - internal helper for execute_report
fn print_summary(cycles: &[CycleReport], extracted: &[u32]) {
    let stats = calculate_cycle_stats(cycles);

    println!("\n{}", "=".repeat(80));
    println!("SUSPEND/RESUME SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Cycles:    {}", stats.cycle_count);
    println!("Mean:      {} sec", format_secs(stats.mean));
    println!("Min:       {} sec", format_secs(stats.min));
    println!("Max:       {} sec", format_secs(stats.max));
    println!("Extracted: {:?}", extracted);
    println!();

    for cycle in cycles {
        let slowest = cycle
            .slowest()
            .map(|line| format!("{} ({} sec)", line.name, format_secs(line.elapsed)))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  Cycle {:>4}  {:>9} sec  {:>4} spans  slowest: {}",
            cycle.number,
            format_secs(cycle.duration),
            cycle.lines.len(),
            slowest
        );
    }
    println!("{}", "=".repeat(80));
}

/// Whether two paths name the same file (`./ftrace.txt` and `ftrace.txt` do)
///
/// **Private** - internal helper for validate_args
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    // A path that does not exist yet cannot alias an existing trace
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Report file path cannot be empty");
    }

    if same_file(&args.input, &args.output) {
        anyhow::bail!("Report file would overwrite the trace file");
    }

    if args.line_threshold == 0 {
        anyhow::bail!("line threshold must be greater than 0");
    }

    Ok(())
}
