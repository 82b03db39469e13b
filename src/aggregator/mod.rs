//! Aggregation of classified events into per-cycle timings.
//!
//! This module turns the event stream into:
//! - Completed cycles with their span timings
//! - Duration statistics across cycles

pub mod cycle;
pub mod stats;

// Re-export main types and functions
pub use cycle::{collect_cycles, CycleReport, CycleTimer, TimingLine};
pub use stats::{calculate_cycle_stats, CycleStats};
