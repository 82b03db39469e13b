//! ucode signature computation.
//!
//! A ucode blob is a fixed-size header followed by a payload of
//! little-endian 32-bit words. The signature is the wrapping sum of
//! those words.

use crate::utils::config::{UCODE_HEADER_LEN, UCODE_WORD_SIZE};
use crate::utils::error::ChecksumError;
use log::debug;
use std::path::Path;

/// Result of checksumming a ucode blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UcodeChecksum {
    /// Payload length in bytes (header excluded)
    pub payload_len: usize,

    /// Wrapping 32-bit sum of the payload words
    pub signature: u32,
}

impl UcodeChecksum {
    /// Signature as printed by the CLI (`0x...`, no zero padding)
    pub fn signature_hex(&self) -> String {
        format!("{:#x}", self.signature)
    }
}

/// Compute the signature of an in-memory ucode blob
///
/// **Public** - main entry point for checksumming
///
/// # Errors
/// * `ChecksumError::TruncatedHeader` - blob shorter than the header
/// * `ChecksumError::UnalignedPayload` - payload not a whole number of words
///
/// # Example
/// ```ignore
/// let mut blob = vec![0u8; 16];
/// blob.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);
/// assert_eq!(compute_checksum(&blob)?.signature, 3);
/// ```
pub fn compute_checksum(bytes: &[u8]) -> Result<UcodeChecksum, ChecksumError> {
    let payload = bytes
        .get(UCODE_HEADER_LEN..)
        .ok_or(ChecksumError::TruncatedHeader {
            len: bytes.len(),
            header: UCODE_HEADER_LEN,
        })?;

    if payload.len() % UCODE_WORD_SIZE != 0 {
        return Err(ChecksumError::UnalignedPayload {
            len: payload.len(),
            word: UCODE_WORD_SIZE,
        });
    }

    let signature = payload
        .chunks_exact(UCODE_WORD_SIZE)
        .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .fold(0u32, u32::wrapping_add);

    debug!(
        "Summed {} words ({} payload bytes)",
        payload.len() / UCODE_WORD_SIZE,
        payload.len()
    );

    Ok(UcodeChecksum {
        payload_len: payload.len(),
        signature,
    })
}

/// Read a ucode file and compute its signature
///
/// **Public** - used by the `checksum` command
pub fn checksum_file(path: impl AsRef<Path>) -> Result<UcodeChecksum, ChecksumError> {
    let path = path.as_ref();

    debug!("Reading ucode from: {}", path.display());

    let bytes = std::fs::read(path)?;
    compute_checksum(&bytes)
}
