//! Duration statistics across completed cycles.

use super::cycle::CycleReport;
use std::time::Duration;

/// Cycle duration statistics
///
/// **Public** - returned from calculate_cycle_stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleStats {
    /// Number of completed cycles
    pub cycle_count: usize,

    /// Total completed spans across all cycles
    pub span_count: usize,

    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,

    /// Cycle number of the longest cycle
    pub longest_cycle: Option<u32>,
}

/// Calculate duration statistics over completed cycles
///
/// **Public** - used for the console summary and log output
pub fn calculate_cycle_stats(cycles: &[CycleReport]) -> CycleStats {
    if cycles.is_empty() {
        return CycleStats::default();
    }

    let total: Duration = cycles.iter().map(|c| c.duration).sum();
    let longest = cycles.iter().max_by_key(|c| c.duration);

    CycleStats {
        cycle_count: cycles.len(),
        span_count: cycles.iter().map(|c| c.lines.len()).sum(),
        mean: total / cycles.len() as u32,
        min: cycles.iter().map(|c| c.duration).min().unwrap_or_default(),
        max: longest.map(|c| c.duration).unwrap_or_default(),
        longest_cycle: longest.map(|c| c.number),
    }
}

impl CycleStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Cycles: {} | Spans: {} | Mean: {:.3}s | Min: {:.3}s | Max: {:.3}s",
            self.cycle_count,
            self.span_count,
            self.mean.as_secs_f64(),
            self.min.as_secs_f64(),
            self.max.as_secs_f64()
        )
    }
}
