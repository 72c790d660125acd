//! File fingerprints used for cheap comparison
//!
//! A [`Fingerprint`] is a lightweight summary of one file at one point in
//! time: byte size, modification time, line count and a SHA-256 digest.
//! The digest is computed over the file's text after normalization (see
//! [`crate::normalize`]) so that masked fields never show up as differences
//! in any hash-based comparison. Files that are not valid UTF-8 fall back to
//! hashing the raw bytes.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::normalize::Normalizer;

/// Summary of one file's content and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub size_bytes: u64,
    pub modified_at: SystemTime,
    pub line_count: usize,
    /// Hex SHA-256 over normalized content (raw bytes for non-UTF-8 files)
    pub content_hash: String,
}

impl Fingerprint {
    /// Compute the fingerprint of an existing regular file.
    pub fn compute(path: &Path, normalizer: &Normalizer) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let modified_at = meta.modified().map_err(|e| Error::io(path, e))?;
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;

        Ok(Self {
            size_bytes: meta.len(),
            modified_at,
            line_count: count_lines(&String::from_utf8_lossy(&bytes)),
            content_hash: hash_for_compare(path, &bytes, normalizer),
        })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mtime: DateTime<Utc> = self.modified_at.into();
        write!(
            f,
            "size={}B, mtime={}, lines={}, sha256={}…",
            self.size_bytes,
            mtime.format("%Y-%m-%d %H:%M:%S"),
            self.line_count,
            &self.content_hash[..12]
        )
    }
}

/// Newline-terminated lines plus one for a trailing fragment; empty text is 0.
pub fn count_lines(text: &str) -> usize {
    let newlines = text.matches('\n').count();
    if text.is_empty() || text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Line count of a file's raw (non-normalized) text.
///
/// Undecodable bytes are replaced, never fatal.
pub fn count_file_lines(path: &Path) -> Result<usize> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(count_lines(&String::from_utf8_lossy(&bytes)))
}

/// Comparison hash of a file: normalized text when UTF-8, raw bytes otherwise.
pub fn file_hash_for_compare(path: &Path, normalizer: &Normalizer) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(hash_for_compare(path, &bytes, normalizer))
}

fn hash_for_compare(path: &Path, bytes: &[u8], normalizer: &Normalizer) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => hash_bytes(normalizer.normalize(path, text).as_bytes()),
        Err(_) => hash_bytes(bytes),
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
