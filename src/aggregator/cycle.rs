//! Per-cycle span timing.
//!
//! [`CycleTimer`] consumes classified events in trace order and yields a
//! [`CycleReport`] every time a suspend/resume cycle completes. All
//! accumulator state lives in the timer itself.

use crate::parser::{Edge, Marker, SpanKind, Timestamp, TraceEvent};
use crate::utils::config::CYCLE_END_MARKER;
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Duration;

/// A completed begin/end pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingLine {
    pub kind: SpanKind,
    pub name: String,
    pub elapsed: Duration,
}

/// A completed suspend/resume cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based cycle number
    pub number: u32,
    /// From the cycle-start marker to the cycle-end marker
    pub duration: Duration,
    /// Completed spans in the order their end markers appeared
    pub lines: Vec<TimingLine>,
}

impl CycleReport {
    /// Longest span of the cycle, if any completed
    pub fn slowest(&self) -> Option<&TimingLine> {
        self.lines.iter().max_by_key(|line| line.elapsed)
    }
}

/// A begin marker still waiting for its end
#[derive(Debug, Clone)]
struct OpenSpan {
    name: String,
    started: Timestamp,
}

#[derive(Debug)]
struct OpenCycle {
    started: Timestamp,
    pending: HashMap<SpanKind, OpenSpan>,
    lines: Vec<TimingLine>,
}

impl OpenCycle {
    fn new(started: Timestamp) -> Self {
        Self {
            started,
            pending: HashMap::new(),
            lines: Vec::new(),
        }
    }

    fn begin(&mut self, kind: SpanKind, name: String, at: Timestamp) {
        if let Some(previous) = self.pending.insert(kind, OpenSpan { name, started: at }) {
            debug!("{:?} span '{}' never ended, replaced", kind, previous.name);
        }
    }

    fn end(&mut self, kind: SpanKind, name: &str, at: Timestamp) {
        let Some(open) = self.pending.remove(&kind) else {
            debug!("{:?} span '{}' ended without a begin, dropped", kind, name);
            return;
        };

        if open.name != name {
            debug!(
                "{:?} span end '{}' does not match begin '{}', dropped",
                kind, name, open.name
            );
            return;
        }

        match at.since(open.started) {
            Some(elapsed) => self.lines.push(TimingLine {
                kind,
                name: open.name,
                elapsed,
            }),
            None => warn!(
                "{:?} span '{}' ends at {} before it begins at {}, dropped",
                kind, name, at, open.started
            ),
        }
    }
}

#[derive(Debug)]
enum CycleState {
    Idle,
    InCycle(OpenCycle),
}

/// Suspend/resume cycle state machine
#[derive(Debug)]
pub struct CycleTimer {
    state: CycleState,
    cycles_started: u32,
}

impl Default for CycleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleTimer {
    pub fn new() -> Self {
        Self {
            state: CycleState::Idle,
            cycles_started: 0,
        }
    }

    /// Number of the current (or last) cycle
    pub fn cycle_count(&self) -> u32 {
        self.cycles_started
    }

    pub fn in_cycle(&self) -> bool {
        matches!(self.state, CycleState::InCycle(_))
    }

    /// Feed one event; returns the cycle it completes, if any
    ///
    /// **Public** - called once per classified trace line
    pub fn feed(&mut self, event: TraceEvent) -> Option<CycleReport> {
        let TraceEvent {
            marker,
            timestamp,
            line_number,
        } = event;

        match marker {
            Marker::CycleStart => {
                self.start_cycle(timestamp, line_number);
                None
            }
            Marker::CycleEnd => self.end_cycle(timestamp, line_number),
            Marker::Span { kind, name, edge } => {
                match &mut self.state {
                    CycleState::Idle => {
                        debug!("Span '{}' at line {} outside a cycle, ignored", name, line_number)
                    }
                    CycleState::InCycle(open) => match edge {
                        Edge::Begin => open.begin(kind, name, timestamp),
                        Edge::End => open.end(kind, &name, timestamp),
                    },
                }
                None
            }
        }
    }

    fn start_cycle(&mut self, at: Timestamp, line_number: usize) {
        match &self.state {
            CycleState::Idle => {
                self.cycles_started += 1;
                debug!("Cycle {} starts at {}", self.cycles_started, at);
            }
            // Aborted suspend: restart under the same number
            CycleState::InCycle(open) => warn!(
                "Cycle {} restarted at line {} ({} timing lines discarded)",
                self.cycles_started,
                line_number,
                open.lines.len()
            ),
        }

        self.state = CycleState::InCycle(OpenCycle::new(at));
    }

    fn end_cycle(&mut self, at: Timestamp, line_number: usize) -> Option<CycleReport> {
        let CycleState::InCycle(mut open) = std::mem::replace(&mut self.state, CycleState::Idle)
        else {
            debug!("Cycle end at line {} outside a cycle, ignored", line_number);
            return None;
        };

        if open
            .pending
            .get(&SpanKind::Phase)
            .is_some_and(|span| span.name == CYCLE_END_MARKER)
        {
            open.end(SpanKind::Phase, CYCLE_END_MARKER, at);
        }

        let duration = at.since(open.started).unwrap_or_else(|| {
            warn!(
                "Cycle {} ends at {} before it starts at {}",
                self.cycles_started, at, open.started
            );
            Duration::ZERO
        });

        Some(CycleReport {
            number: self.cycles_started,
            duration,
            lines: open.lines,
        })
    }

    /// Close the scan; an unterminated cycle is dropped
    pub fn finish(self) {
        if let CycleState::InCycle(open) = self.state {
            warn!(
                "Trace ended inside cycle {} ({} timing lines discarded)",
                self.cycles_started,
                open.lines.len()
            );
        }
    }
}

/// Run every event through a fresh [`CycleTimer`]
///
/// **Public** - convenience for callers that already hold all events
pub fn collect_cycles(events: impl IntoIterator<Item = TraceEvent>) -> Vec<CycleReport> {
    let mut timer = CycleTimer::new();
    let cycles = events
        .into_iter()
        .filter_map(|event| timer.feed(event))
        .collect();
    timer.finish();
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> Timestamp {
        Timestamp::parse(ts).unwrap()
    }

    fn event(marker: Marker, ts: &str) -> TraceEvent {
        TraceEvent {
            marker,
            timestamp: at(ts),
            line_number: 0,
        }
    }

    fn span(kind: SpanKind, name: &str, edge: Edge, ts: &str) -> TraceEvent {
        event(
            Marker::Span {
                kind,
                name: name.to_string(),
                edge,
            },
            ts,
        )
    }

    #[test]
    fn test_single_phase() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.500"),
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.000"),
            span(SpanKind::Phase, "dpm_suspend", Edge::End, "1.250"),
            event(Marker::CycleEnd, "2.500"),
        ]);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].number, 1);
        assert_eq!(cycles[0].duration, Duration::from_secs(2));
        assert_eq!(
            cycles[0].lines,
            vec![TimingLine {
                kind: SpanKind::Phase,
                name: "dpm_suspend".to_string(),
                elapsed: Duration::from_millis(250),
            }]
        );
    }

    #[test]
    fn test_mismatched_names_are_dropped() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.0"),
            span(SpanKind::Phase, "dpm_resume", Edge::End, "2.0"),
            event(Marker::CycleEnd, "3.0"),
        ]);

        assert!(cycles[0].lines.is_empty());
    }

    #[test]
    fn test_kinds_have_separate_slots() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.0"),
            span(SpanKind::Callback, "i2c 0-0010", Edge::Begin, "1.1"),
            span(SpanKind::Callback, "i2c 0-0010", Edge::End, "1.3"),
            span(SpanKind::Phase, "dpm_suspend", Edge::End, "2.0"),
            event(Marker::CycleEnd, "3.0"),
        ]);

        let names: Vec<_> = cycles[0].lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["i2c 0-0010", "dpm_suspend"]);
        assert_eq!(cycles[0].lines[0].elapsed, Duration::from_millis(200));
    }

    #[test]
    fn test_cycle_end_closes_thaw_processes() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Phase, "thaw_processes", Edge::Begin, "4.0"),
            event(Marker::CycleEnd, "4.5"),
        ]);

        assert_eq!(cycles[0].lines[0].name, "thaw_processes");
        assert_eq!(cycles[0].lines[0].elapsed, Duration::from_millis(500));
    }

    #[test]
    fn test_spans_outside_cycle_ignored() {
        let cycles = collect_cycles(vec![
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::End, "2.0"),
            event(Marker::CycleEnd, "3.0"),
        ]);

        assert!(cycles.is_empty());
    }

    #[test]
    fn test_restart_keeps_number() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::End, "2.0"),
            event(Marker::CycleStart, "10.0"),
            event(Marker::CycleEnd, "11.0"),
            event(Marker::CycleStart, "20.0"),
            event(Marker::CycleEnd, "22.0"),
        ]);

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].number, 1);
        assert!(cycles[0].lines.is_empty());
        assert_eq!(cycles[0].duration, Duration::from_secs(1));
        assert_eq!(cycles[1].number, 2);
    }

    #[test]
    fn test_unterminated_cycle_dropped() {
        let mut timer = CycleTimer::new();
        assert!(timer.feed(event(Marker::CycleStart, "0.0")).is_none());
        assert!(timer.in_cycle());
        assert_eq!(timer.cycle_count(), 1);
        timer.finish();
    }

    #[test]
    fn test_backwards_span_dropped() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Cpu, "CPU_OFF[1]", Edge::Begin, "2.0"),
            span(SpanKind::Cpu, "CPU_OFF[1]", Edge::End, "1.0"),
            event(Marker::CycleEnd, "3.0"),
        ]);

        assert!(cycles[0].lines.is_empty());
    }

    #[test]
    fn test_slowest() {
        let cycles = collect_cycles(vec![
            event(Marker::CycleStart, "0.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::Begin, "1.0"),
            span(SpanKind::Phase, "dpm_suspend", Edge::End, "1.1"),
            span(SpanKind::Phase, "dpm_resume", Edge::Begin, "2.0"),
            span(SpanKind::Phase, "dpm_resume", Edge::End, "2.9"),
            event(Marker::CycleEnd, "3.0"),
        ]);

        assert_eq!(cycles[0].slowest().unwrap().name, "dpm_resume");
    }
}
