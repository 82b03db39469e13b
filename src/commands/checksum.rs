//! Checksum command implementation.

use crate::checksum::{checksum_file, UcodeChecksum};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Execute the checksum command
///
/// **Public** - main entry point called from main.rs
///
/// Prints the payload byte count and the hex signature on two lines.
pub fn execute_checksum(path: &Path) -> Result<UcodeChecksum> {
    info!("Computing ucode signature: {}", path.display());

    let checksum = checksum_file(path)
        .with_context(|| format!("Failed to checksum {}", path.display()))?;

    println!("{}", checksum.payload_len);
    println!("{}", checksum.signature_hex());

    Ok(checksum)
}
