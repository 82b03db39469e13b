//! Text report writer.
//!
//! Each completed cycle becomes one block:
//!
//! ```text
//! Cycle 1 starts
//! dpm_suspend took 0.250 sec
//!     platform alarmtimer took 0.001 sec
//! Cycle 1 took 2.000 sec
//!
//! ```

use super::{prepare_output_path, OutputError};
use crate::aggregator::{CycleReport, TimingLine};
use crate::parser::SpanKind;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Seconds with millisecond precision, as used throughout the report
pub fn format_secs(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

/// First line of a cycle block
pub fn cycle_start_line(number: u32) -> String {
    format!("Cycle {} starts", number)
}

fn timing_line(line: &TimingLine) -> String {
    let indent = match line.kind {
        SpanKind::Callback => "    ",
        SpanKind::Phase | SpanKind::Cpu => "",
    };
    format!("{}{} took {} sec", indent, line.name, format_secs(line.elapsed))
}

/// Render one cycle block, including its trailing blank line
pub fn format_cycle(cycle: &CycleReport) -> String {
    let mut block = cycle_start_line(cycle.number);
    block.push('\n');

    for line in &cycle.lines {
        block.push_str(&timing_line(line));
        block.push('\n');
    }

    block.push_str(&format!(
        "Cycle {} took {} sec\n\n",
        cycle.number,
        format_secs(cycle.duration)
    ));
    block
}

/// Sequential writer for the cycle report
pub struct ReportWriter<W: Write> {
    writer: W,
    cycles_written: usize,
}

impl ReportWriter<BufWriter<File>> {
    /// Create (or truncate) the report file
    ///
    /// **Public** - main entry point for report output
    pub fn create(output_path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let output_path = output_path.as_ref();

        info!("Writing report to: {}", output_path.display());

        prepare_output_path(output_path)?;

        let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cycles_written: 0,
        }
    }

    /// Append one cycle block
    pub fn write_cycle(&mut self, cycle: &CycleReport) -> Result<(), OutputError> {
        debug!(
            "Writing cycle {} ({} timing lines)",
            cycle.number,
            cycle.lines.len()
        );

        self.writer.write_all(format_cycle(cycle).as_bytes())?;
        self.cycles_written += 1;
        Ok(())
    }

    pub fn cycles_written(&self) -> usize {
        self.cycles_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_cycle() -> CycleReport {
        CycleReport {
            number: 3,
            duration: Duration::from_millis(2000),
            lines: vec![
                TimingLine {
                    kind: SpanKind::Callback,
                    name: "platform alarmtimer".to_string(),
                    elapsed: Duration::from_micros(1200),
                },
                TimingLine {
                    kind: SpanKind::Phase,
                    name: "dpm_suspend".to_string(),
                    elapsed: Duration::from_millis(250),
                },
            ],
        }
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(Duration::from_millis(250)), "0.250");
        assert_eq!(format_secs(Duration::from_micros(1_234_567)), "1.235");
        assert_eq!(format_secs(Duration::ZERO), "0.000");
    }

    #[test]
    fn test_format_cycle() {
        assert_eq!(
            format_cycle(&sample_cycle()),
            "Cycle 3 starts\n\
             \x20   platform alarmtimer took 0.001 sec\n\
             dpm_suspend took 0.250 sec\n\
             Cycle 3 took 2.000 sec\n\
             \n"
        );
    }

    #[test]
    fn test_writer_appends_in_order() {
        let mut writer = ReportWriter::new(Vec::new());
        let mut second = sample_cycle();
        second.number = 4;

        writer.write_cycle(&sample_cycle()).unwrap();
        writer.write_cycle(&second).unwrap();
        assert_eq!(writer.cycles_written(), 2);

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let starts: Vec<_> = text.lines().filter(|l| l.ends_with("starts")).collect();
        assert_eq!(starts, vec!["Cycle 3 starts", "Cycle 4 starts"]);
    }
}
