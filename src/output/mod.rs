//! Output writers for reports, extracts and summaries.
//!
//! This module handles writing data to disk in various formats:
//! - Text cycle report
//! - Dated extract of long cycles
//! - JSON cycle summary

pub mod extract;
pub mod json;
pub mod report;
pub mod schema;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use extract::{
    extract_cycles, extract_file_name, scan_cycle_blocks, select_cycles, write_extract, CycleBlock,
};
pub use json::{read_summary, write_summary};
pub use report::{format_cycle, format_secs, ReportWriter};
pub use schema::{CycleSummary, ReportSummary, SpanSummary};

/// Validate that an output path is writable
///
/// **Public** - shared by every writer
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate the path and create missing parent directories
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
