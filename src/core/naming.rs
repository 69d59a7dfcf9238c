//! Collision-free output file naming.
//!
//! Output names are derived from the source name: the old extension and any
//! trailing `_NN` counter are stripped, the configured prefix/suffix are
//! applied, and candidate names `name_00.ext`, `name_01.ext`, ... are probed
//! until a free one is found. Re-converting a previous output therefore
//! yields the next counter value instead of an ever-growing name.

use std::path::{Path, PathBuf};

/// Strips one trailing `_NN` counter (exactly two digits) from a file stem.
fn strip_counter(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    if bytes.len() >= 3
        && bytes[bytes.len() - 3] == b'_'
        && bytes[bytes.len() - 2].is_ascii_digit()
        && bytes[bytes.len() - 1].is_ascii_digit()
    {
        &stem[..stem.len() - 3]
    } else {
        stem
    }
}

/// Derives a non-colliding output path next to the source file.
///
/// `extension` includes the leading dot (e.g. `".poly"`). The returned path
/// is guaranteed not to exist at the time of the probe; two concurrent
/// conversions into the same directory could still race on that probe, which
/// is out of scope for this tool.
pub fn output_path(source: &Path, extension: &str, prefix: &str, suffix: &str) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = strip_counter(&stem).to_string();
    if !name.starts_with(prefix) {
        name = format!("{}{}", prefix, name);
    }
    if !name.ends_with(suffix) {
        name.push_str(suffix);
    }

    let mut count = 0u32;
    loop {
        let candidate = dir.join(format!("{}_{:02}{}", name, count, extension));
        if !candidate.exists() {
            return candidate;
        }
        count += 1;
    }
}
