use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Fixed fallback bucket for files whose timestamp could not be resolved.
pub const UNRESOLVED_DIR: &str = "Dateless";

/// Derive a collision-free destination under `<output_root>/<year>/`.
///
/// The year bucket is the timestamp's leading four characters and is created
/// on demand (idempotent). The candidate name is `<timestamp><extension>`;
/// when taken, `_1`, `_2`, ... are appended until a free name is found. The
/// returned path does not exist at the moment of the call — the
/// check-then-decide sequence is not atomic against concurrent writers of
/// the same tree, which a single-threaded caller never races.
pub fn allocate_target(output_root: &Path, timestamp: &str, extension: &str) -> Result<PathBuf> {
    let year: String = timestamp.chars().take(4).collect();
    let year_dir = output_root.join(year);
    fs::create_dir_all(&year_dir)?;

    let mut target = year_dir.join(format!("{timestamp}{extension}"));
    let mut counter = 0u32;
    while target.exists() {
        counter += 1;
        target = year_dir.join(format!("{timestamp}_{counter}{extension}"));
    }
    Ok(target)
}

/// Destination inside the unresolved bucket: original filename kept
/// verbatim, no year bucket, no disambiguation.
pub fn unresolved_target(output_root: &Path, filename: &str) -> Result<PathBuf> {
    let dir = output_root.join(UNRESOLVED_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(filename))
}
