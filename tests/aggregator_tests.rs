use pm_trace_tools::aggregator::{calculate_cycle_stats, collect_cycles, CycleTimer};
use pm_trace_tools::parser::{classify_line, SpanKind, TraceEvent};
use std::time::Duration;

const TRACE: &str = include_str!("fixtures/ftrace_two_cycles.txt");

fn events(trace: &str) -> Vec<TraceEvent> {
    trace
        .lines()
        .enumerate()
        .filter_map(|(i, line)| classify_line(line, i + 1).unwrap())
        .collect()
}

#[test]
fn test_fixture_cycles() {
    let cycles = collect_cycles(events(TRACE));

    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0].number, 1);
    assert_eq!(cycles[0].duration, Duration::from_secs(2));
    assert_eq!(cycles[0].lines.len(), 4);
    assert_eq!(cycles[0].lines[0].kind, SpanKind::Callback);
    assert_eq!(cycles[0].lines[2].name, "CPU_OFF[1]");
    assert_eq!(cycles[0].lines[2].elapsed, Duration::from_millis(10));

    // dpm_suspend begin / dpm_resume end never pair up
    assert_eq!(cycles[1].number, 2);
    assert!(cycles[1].lines.is_empty());
    assert_eq!(cycles[1].duration, Duration::from_millis(500));
}

#[test]
fn test_phase_elapsed() {
    let trace = "\
 sh-1 [000] ...1 0.500000: suspend_resume: suspend_enter[3] begin
 sh-1 [000] ...1 1.000000: suspend_resume: dpm_suspend_noirq[2] begin
 sh-1 [000] ...1 1.250000: suspend_resume: dpm_suspend_noirq[2] end
 sh-1 [000] ...1 2.000000: suspend_resume: thaw_processes[0] end
";
    let cycles = collect_cycles(events(trace));

    assert_eq!(cycles[0].lines[0].name, "dpm_suspend_noirq");
    assert_eq!(cycles[0].lines[0].elapsed, Duration::from_millis(250));
}

#[test]
fn test_streaming_matches_batch() {
    let mut timer = CycleTimer::new();
    let streamed: Vec<_> = events(TRACE)
        .into_iter()
        .filter_map(|event| timer.feed(event))
        .collect();
    assert!(!timer.in_cycle());
    assert_eq!(timer.cycle_count(), 2);
    timer.finish();

    assert_eq!(streamed, collect_cycles(events(TRACE)));
}

#[test]
fn test_trailing_partial_cycle_not_reported() {
    let trace = format!(
        "{} sh-1 [000] ...1 50.000000: suspend_resume: suspend_enter[3] begin\n",
        TRACE
    );

    assert_eq!(collect_cycles(events(&trace)).len(), 2);
}

#[test]
fn test_cycle_stats_on_fixture() {
    let stats = calculate_cycle_stats(&collect_cycles(events(TRACE)));

    assert_eq!(stats.cycle_count, 2);
    assert_eq!(stats.span_count, 4);
    assert_eq!(stats.mean, Duration::from_millis(1250));
    assert_eq!(stats.longest_cycle, Some(1));
}
