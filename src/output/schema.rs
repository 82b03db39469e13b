//! JSON schema for the cycle summary.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{CycleReport, TimingLine};
use crate::parser::SpanKind;
use serde::{Deserialize, Serialize};

/// Top-level summary written with `--json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was built from
    pub trace_file: String,

    /// Minimum block line count used for the extract
    pub line_threshold: usize,

    pub cycles: Vec<CycleSummary>,

    /// Cycle numbers copied into the dated extract
    pub extracted_cycles: Vec<u32>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// One completed cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSummary {
    pub number: u32,
    pub duration_secs: f64,
    pub span_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slowest_span: Option<SpanSummary>,
}

/// A single timed span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanSummary {
    pub name: String,
    /// `phase`, `cpu` or `callback`
    pub kind: String,
    pub elapsed_secs: f64,
}

impl From<&TimingLine> for SpanSummary {
    fn from(line: &TimingLine) -> Self {
        let kind = match line.kind {
            SpanKind::Phase => "phase",
            SpanKind::Cpu => "cpu",
            SpanKind::Callback => "callback",
        };

        Self {
            name: line.name.clone(),
            kind: kind.to_string(),
            elapsed_secs: line.elapsed.as_secs_f64(),
        }
    }
}

impl From<&CycleReport> for CycleSummary {
    fn from(cycle: &CycleReport) -> Self {
        Self {
            number: cycle.number,
            duration_secs: cycle.duration.as_secs_f64(),
            span_count: cycle.lines.len(),
            slowest_span: cycle.slowest().map(SpanSummary::from),
        }
    }
}
