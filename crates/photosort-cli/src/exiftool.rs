use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use photosort_core::TagMapping;

/// Read a file's metadata via `exiftool -j -G` (JSON output with
/// group-prefixed tag names, e.g. `EXIF:DateTimeOriginal`). Every value is
/// stringified into the mapping. A file exiftool cannot read yields an
/// empty mapping, so resolution falls through to the filename matcher.
pub fn read_metadata(path: &Path) -> Result<TagMapping> {
    let output = Command::new("exiftool")
        .args(["-j", "-G"])
        .arg(path)
        .output()
        .context("failed to run exiftool (is it installed and on PATH?)")?;

    let mut tags = TagMapping::new();
    if !output.status.success() {
        return Ok(tags);
    }
    let Ok(parsed) = serde_json::from_slice::<serde_json::Value>(&output.stdout) else {
        return Ok(tags);
    };
    if let Some(fields) = parsed.get(0).and_then(|v| v.as_object()) {
        for (name, value) in fields {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            tags.insert(name.clone(), text);
        }
    }
    Ok(tags)
}

/// A canonical timestamp in the shape exiftool expects for date tags,
/// with the fixed UTC suffix: `2023:01:15 14:30:00+00:00`.
pub fn exif_date_value(timestamp: &str) -> String {
    format!("{}+00:00", timestamp.replace('_', " ").replace('-', ":"))
}

/// Stamp the resolved timestamp back into the relocated file: filesystem
/// dates carry the UTC suffix, the EXIF original date does not.
pub fn write_dates(path: &Path, timestamp: &str) -> Result<()> {
    let with_zone = exif_date_value(timestamp);
    let without_zone = &with_zone[..with_zone.len() - "+00:00".len()];
    let output = Command::new("exiftool")
        .arg("-overwrite_original")
        .arg(format!("-File:FileModifyDate={with_zone}"))
        .arg(format!("-File:FileCreateDate={with_zone}"))
        .arg(format!("-EXIF:DateTimeOriginal={without_zone}"))
        .arg(path)
        .output()
        .context("failed to run exiftool (is it installed and on PATH?)")?;
    anyhow::ensure!(
        output.status.success(),
        "exiftool exited with {}",
        output.status
    );
    Ok(())
}
