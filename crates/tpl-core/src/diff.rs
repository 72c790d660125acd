//! Unified diff generation over normalized content

use std::fs;
use std::path::Path;

use similar::TextDiff;

use crate::error::{Error, Result};
use crate::normalize::Normalizer;

/// Context lines around each hunk
const CONTEXT_LINES: usize = 3;

/// Unified diff between the normalized contents of two files.
///
/// The target is the "from" side and the template source the "to" side, so
/// the diff reads as what would change if the target were updated to match
/// the template. Returns an empty string when either file is not valid UTF-8
/// (binary files are never diffed) or when the normalized contents are
/// identical.
pub fn unified_diff(src: &Path, dst: &Path, normalizer: &Normalizer) -> Result<String> {
    let src_bytes = fs::read(src).map_err(|e| Error::io(src, e))?;
    let dst_bytes = fs::read(dst).map_err(|e| Error::io(dst, e))?;

    let (Ok(src_text), Ok(dst_text)) = (
        std::str::from_utf8(&src_bytes),
        std::str::from_utf8(&dst_bytes),
    ) else {
        return Ok(String::new());
    };

    let src_norm = normalizer.normalize(src, src_text);
    let dst_norm = normalizer.normalize(dst, dst_text);

    if src_norm == dst_norm {
        return Ok(String::new());
    }

    let from_label = dst.display().to_string();
    let to_label = src.display().to_string();
    let diff = TextDiff::from_lines(&*dst_norm, &*src_norm);
    Ok(diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&from_label, &to_label)
        .to_string())
}
