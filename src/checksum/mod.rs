//! Firmware (ucode) checksum computation.

pub mod ucode;

pub use ucode::{checksum_file, compute_checksum, UcodeChecksum};
