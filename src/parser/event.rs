//! Classification of ftrace lines into suspend/resume events.
//!
//! Only two tracepoint families matter here:
//! - `suspend_resume: <name>[<val>] begin|end` for cycle boundaries and phases
//! - `device_pm_callback_start/end: <driver> <device>, ...` for driver callbacks
//!
//! Every other line is skipped without looking for a timestamp.

use super::timestamp::{extract_timestamp, Timestamp};
use crate::utils::config::{
    CALLBACK_END_EVENT, CALLBACK_START_EVENT, CPU_PHASES, CYCLE_END_MARKER, CYCLE_START_MARKER,
    KNOWN_PHASES, SUSPEND_RESUME_EVENT,
};
use crate::utils::error::ParseError;
use log::debug;

/// Which side of a span a marker closes or opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Begin,
    End,
}

/// Span families; each one has its own pending slot in the cycle timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Named suspend/resume phase (dpm_suspend, syscore_resume, ...)
    Phase,
    /// CPU_OFF / CPU_ON for a single CPU
    Cpu,
    /// Per-device PM callback
    Callback,
}

/// Recognised marker on a trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    CycleStart,
    CycleEnd,
    Span {
        kind: SpanKind,
        name: String,
        edge: Edge,
    },
}

/// A classified trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub marker: Marker,
    pub timestamp: Timestamp,
    /// 1-based line number in the trace file
    pub line_number: usize,
}

/// Classify a trace line
///
/// **Public** - main entry point for the reporter's line scan
///
/// # Returns
/// * `Ok(None)` - the line carries no known marker
/// * `Ok(Some(event))` - marker plus its timestamp
///
/// # Errors
/// * `ParseError::MissingTimestamp` - marker found but no timestamp layout matched
pub fn classify_line(line: &str, line_number: usize) -> Result<Option<TraceEvent>, ParseError> {
    let Some(marker) = classify_marker(line) else {
        return Ok(None);
    };

    let timestamp = extract_timestamp(line, line_number)?;

    Ok(Some(TraceEvent {
        marker,
        timestamp,
        line_number,
    }))
}

/// Find the marker on a line, ignoring its timestamp
pub fn classify_marker(line: &str) -> Option<Marker> {
    if let Some((_, rest)) = line.split_once(SUSPEND_RESUME_EVENT) {
        return classify_suspend_resume(rest);
    }

    if let Some((_, rest)) = line.split_once(CALLBACK_START_EVENT) {
        return callback_marker(rest, Edge::Begin);
    }

    if let Some((_, rest)) = line.split_once(CALLBACK_END_EVENT) {
        return callback_marker(rest, Edge::End);
    }

    None
}

/// Parse the `<name>[<val>] begin|end` payload of a suspend_resume event
fn classify_suspend_resume(payload: &str) -> Option<Marker> {
    let (name, rest) = payload.split_once('[')?;
    let (value, rest) = rest.split_once(']')?;

    let edge = match rest.trim() {
        "begin" => Edge::Begin,
        "end" => Edge::End,
        other => {
            debug!("Unknown suspend_resume edge '{}' for {}", other, name);
            return None;
        }
    };

    match (name, edge) {
        (CYCLE_START_MARKER, Edge::Begin) => return Some(Marker::CycleStart),
        (CYCLE_END_MARKER, Edge::End) => return Some(Marker::CycleEnd),
        _ => {}
    }

    if KNOWN_PHASES.contains(&name) {
        Some(Marker::Span {
            kind: SpanKind::Phase,
            name: name.to_string(),
            edge,
        })
    } else if CPU_PHASES.contains(&name) {
        Some(Marker::Span {
            kind: SpanKind::Cpu,
            name: format!("{}[{}]", name, value),
            edge,
        })
    } else {
        debug!("Skipping unknown suspend_resume phase: {}", name);
        None
    }
}

/// `<driver> <device>, parent: ..., type [suspend]` → name before the first comma
fn callback_marker(payload: &str, edge: Edge) -> Option<Marker> {
    let name = payload.split(',').next().unwrap_or_default().trim();
    if name.is_empty() {
        return None;
    }

    Some(Marker::Span {
        kind: SpanKind::Callback,
        name: name.to_string(),
        edge,
    })
}
