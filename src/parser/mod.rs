//! Trace line parsing.
//!
//! This module handles:
//! - Recognising suspend/resume markers in ftrace text
//! - Extracting timestamps across the known column layouts

pub mod event;
pub mod timestamp;

// Re-export main types
pub use event::{classify_line, classify_marker, Edge, Marker, SpanKind, TraceEvent};
pub use timestamp::{extract_timestamp, Timestamp, TimestampPattern, TIMESTAMP_PATTERNS};
