//! PM Trace Tools
//!
//! Offline helpers for kernel suspend/resume bring-up:
//! - ucode (firmware) signature computation
//! - suspend/resume ftrace timing reports with extraction of long cycles
//!
//! This crate provides the core implementation for the
//! `pmtrace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! pmtrace checksum firmware.bin
//! pmtrace report --input ftrace.txt --summary
//! ```

pub mod aggregator;
pub mod checksum;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
