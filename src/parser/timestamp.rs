//! Timestamp extraction from ftrace lines.
//!
//! Depending on how tracing was configured, the text output either carries
//! an irq-flags column between the CPU and the timestamp or it does not:
//!
//! ```text
//!      bash-1432  [001] d..1   412.530112: suspend_resume: dpm_suspend[2] begin
//!      bash-1432  [001]   412.530112: suspend_resume: dpm_suspend[2] begin
//! ```
//!
//! Each layout is a [`TimestampPattern`]; they are tried in order.

use crate::utils::error::ParseError;
use log::trace;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

/// Trace time since boot, kept exact (no float rounding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub fn from_duration(since_boot: Duration) -> Self {
        Self(since_boot)
    }

    /// Parse `seconds.fraction` as printed by ftrace (up to 9 fraction digits)
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidTimestamp(text.to_string());

        let (secs, frac) = text.split_once('.').unwrap_or((text, ""));
        if secs.is_empty() || frac.len() > 9 {
            return Err(invalid());
        }
        if !secs.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let secs: u64 = secs.parse().map_err(|_| invalid())?;
        let nanos: u32 = if frac.is_empty() {
            0
        } else {
            format!("{:0<9}", frac).parse().map_err(|_| invalid())?
        };

        Ok(Self(Duration::new(secs, nanos)))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is later than `self`
    pub fn since(&self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0.as_secs(), self.0.subsec_micros())
    }
}

/// One known timestamp column layout
pub struct TimestampPattern {
    /// Short name used in debug logs
    pub name: &'static str,
    regex: LazyLock<Regex>,
}

impl TimestampPattern {
    /// Return the raw timestamp text if the line uses this layout
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Known layouts, most specific first
pub static TIMESTAMP_PATTERNS: [TimestampPattern; 2] = [
    TimestampPattern {
        name: "irq-flags",
        regex: LazyLock::new(|| {
            Regex::new(r"\]\s+[^\s\d]\S*\s+(\d+\.\d+):\s").expect("Invalid irq-flags timestamp regex")
        }),
    },
    TimestampPattern {
        name: "plain",
        regex: LazyLock::new(|| {
            Regex::new(r"\]\s+(\d+\.\d+):\s").expect("Invalid plain timestamp regex")
        }),
    },
];

/// Extract the timestamp of a trace line using [`TIMESTAMP_PATTERNS`]
///
/// **Public** - used by the line classifier
///
/// # Errors
/// * `ParseError::MissingTimestamp` - no layout matched
/// * `ParseError::InvalidTimestamp` - a layout matched but the value is unusable
pub fn extract_timestamp(line: &str, line_number: usize) -> Result<Timestamp, ParseError> {
    for pattern in &TIMESTAMP_PATTERNS {
        if let Some(raw) = pattern.capture(line) {
            trace!("line {}: timestamp {} via {} layout", line_number, raw, pattern.name);
            return Timestamp::parse(raw);
        }
    }

    Err(ParseError::MissingTimestamp {
        line_number,
        line: line.trim_end().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_micro_precision() {
        let ts = Timestamp::parse("412.530112").unwrap();
        assert_eq!(ts.as_duration(), Duration::new(412, 530_112_000));
        assert_eq!(ts.to_string(), "412.530112");
    }

    #[test]
    fn test_parse_nano_precision() {
        let ts = Timestamp::parse("1.000000001").unwrap();
        assert_eq!(ts.as_duration(), Duration::new(1, 1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse(".5").is_err());
        assert!(Timestamp::parse("1.2.3").is_err());
        assert!(Timestamp::parse("12a.5").is_err());
        assert!(Timestamp::parse("1.0000000001").is_err());
    }

    #[test]
    fn test_since() {
        let a = Timestamp::parse("1.000").unwrap();
        let b = Timestamp::parse("1.250").unwrap();
        assert_eq!(b.since(a), Some(Duration::from_millis(250)));
        assert_eq!(a.since(b), None);
    }

    #[test]
    fn test_irq_flags_layout() {
        let line = "     bash-1432  [001] d..1   412.530112: suspend_resume: dpm_suspend[2] begin";
        assert_eq!(TIMESTAMP_PATTERNS[0].capture(line), Some("412.530112"));
        assert_eq!(
            extract_timestamp(line, 1).unwrap(),
            Timestamp::parse("412.530112").unwrap()
        );
    }

    #[test]
    fn test_plain_layout_falls_back() {
        let line = "     bash-1432  [001]   412.530112: suspend_resume: dpm_suspend[2] begin";
        assert_eq!(TIMESTAMP_PATTERNS[0].capture(line), None);
        assert_eq!(TIMESTAMP_PATTERNS[1].capture(line), Some("412.530112"));
        assert!(extract_timestamp(line, 1).is_ok());
    }

    #[test]
    fn test_missing_timestamp() {
        let err = extract_timestamp("suspend_resume: dpm_suspend[2] begin", 7).unwrap_err();
        assert!(matches!(err, ParseError::MissingTimestamp { line_number: 7, .. }));
    }
}
