//! Configuration and constants for the CLI.

/// Current JSON summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

// ucode layout: a fixed header followed by little-endian 32-bit words
pub const UCODE_HEADER_LEN: usize = 16;
pub const UCODE_WORD_SIZE: usize = 4;

/// Trace file read by `pmtrace report` when no `--input` is given
pub const DEFAULT_TRACE_FILE: &str = "ftrace.txt";

/// Report file written by `pmtrace report` when no `--output` is given
pub const DEFAULT_REPORT_FILE: &str = "res.txt";

/// Directory receiving the dated extract of long cycles
pub const DEFAULT_EXTRACT_DIR: &str = "/tmp/suspend_resume";

/// Prefix of the dated extract file (`<prefix>_<YYYY-MM-DD>.txt`)
pub const EXTRACT_FILE_PREFIX: &str = "suspend_cycles";

/// Minimum number of lines a cycle block needs to be extracted
pub const CYCLE_LINE_THRESHOLD: usize = 40;

// Cycle boundaries in the suspend_resume tracepoint
pub const CYCLE_START_MARKER: &str = "suspend_enter";
pub const CYCLE_END_MARKER: &str = "thaw_processes";

// Tracepoint prefixes recognised by the classifier
pub const SUSPEND_RESUME_EVENT: &str = "suspend_resume: ";
pub const CALLBACK_START_EVENT: &str = "device_pm_callback_start: ";
pub const CALLBACK_END_EVENT: &str = "device_pm_callback_end: ";

/// Phase names timed as spans inside a cycle.
/// CPU_ON / CPU_OFF are handled separately since their index is part of the name.
pub const KNOWN_PHASES: &[&str] = &[
    "suspend_enter",
    "sync_filesystems",
    "freeze_processes",
    "dpm_prepare",
    "dpm_suspend",
    "dpm_suspend_late",
    "dpm_suspend_noirq",
    "syscore_suspend",
    "machine_suspend",
    "syscore_resume",
    "dpm_resume_noirq",
    "dpm_resume_early",
    "dpm_resume",
    "dpm_complete",
    "resume_console",
    "thaw_processes",
];

pub const CPU_PHASES: &[&str] = &["CPU_OFF", "CPU_ON"];
