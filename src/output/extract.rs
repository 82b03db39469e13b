//! Extraction of long cycles from a written report.
//!
//! The report is re-read as text: blocks are counted line by line, the
//! ones reaching the line threshold are copied verbatim into a dated file.

use super::report::cycle_start_line;
use super::{prepare_output_path, OutputError};
use crate::utils::config::EXTRACT_FILE_PREFIX;
use chrono::NaiveDate;
use log::{debug, info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CYCLE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Cycle (\d+) starts$").expect("Invalid cycle start regex"));

static CYCLE_TOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Cycle (\d+) took \d+\.\d+ sec$").expect("Invalid cycle total regex")
});

/// A complete cycle block found in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBlock {
    pub number: u32,
    /// Lines from `Cycle N starts` through `Cycle N took ... sec`
    pub line_count: usize,
}

fn cycle_number(regex: &Regex, line: &str) -> Option<u32> {
    regex.captures(line)?.get(1)?.as_str().parse().ok()
}

/// Count the lines of every complete block in a report
///
/// A block ends at `Cycle N took ... sec` followed by a blank line (or the
/// end of the report). Text outside blocks is ignored.
pub fn scan_cycle_blocks(report: &str) -> Vec<CycleBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CycleBlock> = None;
    let mut lines = report.lines().peekable();

    while let Some(line) = lines.next() {
        if let Some(number) = cycle_number(&CYCLE_START, line) {
            if let Some(open) = current {
                debug!("Cycle {} block has no total line, skipped", open.number);
            }
            current = Some(CycleBlock {
                number,
                line_count: 1,
            });
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };
        block.line_count += 1;

        let closes = cycle_number(&CYCLE_TOOK, line) == Some(block.number)
            && lines.peek().map_or(true, |next| next.is_empty());
        if closes {
            blocks.push(*block);
            current = None;
        }
    }

    blocks
}

/// Cycle numbers whose block has at least `threshold` lines
pub fn select_cycles(blocks: &[CycleBlock], threshold: usize) -> Vec<u32> {
    blocks
        .iter()
        .filter(|block| block.line_count >= threshold)
        .map(|block| block.number)
        .collect()
}

/// Byte offset of a line equal to `line`, searching from `from`
fn find_line(text: &str, line: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    for candidate in text[from..].split_inclusive('\n') {
        if candidate.trim_end_matches(['\n', '\r']) == line {
            return Some(offset);
        }
        offset += candidate.len();
    }
    None
}

/// Copy the selected cycles verbatim from the report
///
/// Cycle N spans from `Cycle N starts` up to `Cycle N+1 starts`, or the end
/// of the report for the last cycle.
pub fn extract_cycles(report: &str, cycles: &[u32]) -> String {
    let mut extract = String::new();

    for &number in cycles {
        let Some(start) = find_line(report, &cycle_start_line(number), 0) else {
            warn!("Cycle {} not found in report, skipped", number);
            continue;
        };

        let end = find_line(report, &cycle_start_line(number + 1), start)
            .unwrap_or(report.len());
        extract.push_str(&report[start..end]);
    }

    extract
}

/// `<prefix>_<YYYY-MM-DD>.txt`
pub fn extract_file_name(date: NaiveDate) -> String {
    format!("{}_{}.txt", EXTRACT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

/// Write the extract into `dir`, creating it if needed
///
/// # Returns
/// Path of the written file
pub fn write_extract(
    dir: impl AsRef<Path>,
    date: NaiveDate,
    extract: &str,
) -> Result<PathBuf, OutputError> {
    let path = dir.as_ref().join(extract_file_name(date));

    prepare_output_path(&path)?;
    std::fs::write(&path, extract).map_err(OutputError::WriteFailed)?;

    info!("Extract written to: {} ({} bytes)", path.display(), extract.len());

    Ok(path)
}
