pub mod date;
pub mod media;
pub mod writer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

pub use date::{DateResult, Provenance, TIMESTAMP_FORMAT};

/// Raw metadata for one file, produced by an external extractor: field name
/// to stringified value. Keys are not guaranteed present.
pub type TagMapping = HashMap<String, String>;

/// A resolved placement for one file: the normalized timestamp, which rule
/// or pattern produced it, and the allocated destination path.
#[derive(Debug, Clone)]
pub struct Placement {
    pub timestamp: String,
    pub source: Provenance,
    pub target: PathBuf,
}

/// Resolve and place a single file.
///
/// The metadata tag chain runs first, the filename-pattern guess only when
/// no tag counts. The resolved timestamp gets the clock-delta correction
/// and then the hour-24 repair before a destination is allocated under
/// `output_root`. `Ok(None)` means no source yielded a timestamp; the
/// caller decides where the file goes (the unresolved bucket).
pub fn place_file(
    tags: &TagMapping,
    filename: &str,
    delta_seconds: i64,
    output_root: &Path,
) -> Result<Option<Placement>> {
    let Some(resolved) = date::resolve_date(tags, media::file_stem(filename)) else {
        return Ok(None);
    };

    let timestamp = date::normalize::fix_midnight_hour24(&date::normalize::apply_delta(
        &resolved.timestamp,
        delta_seconds,
    ));
    let target =
        writer::allocate_target(output_root, &timestamp, &media::file_extension(filename))?;

    Ok(Some(Placement {
        timestamp,
        source: resolved.source,
        target,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_from_filename_with_delta_applied() {
        let root = tempfile::tempdir().unwrap();
        let placement = place_file(&TagMapping::new(), "IMG_20230115_143000.JPG", 3600, root.path())
            .unwrap()
            .unwrap();
        assert_eq!(placement.timestamp, "2023-01-15_15-30-00");
        assert_eq!(
            placement.target,
            root.path().join("2023").join("2023-01-15_15-30-00.jpg")
        );
        assert!(!placement.target.exists());
    }

    #[test]
    fn places_from_tags_ahead_of_filename() {
        let root = tempfile::tempdir().unwrap();
        let mut tags = TagMapping::new();
        tags.insert(
            "EXIF:DateTimeOriginal".to_string(),
            "2020:06:07 08:09:10".to_string(),
        );
        let placement = place_file(&tags, "IMG_20230115_143000.jpg", 0, root.path())
            .unwrap()
            .unwrap();
        assert_eq!(placement.timestamp, "2020-06-07_08-09-10");
        assert_eq!(
            placement.source,
            Provenance::Tag("EXIF:DateTimeOriginal".to_string())
        );
    }

    #[test]
    fn hour_24_repair_runs_after_the_delta() {
        let root = tempfile::tempdir().unwrap();
        let mut tags = TagMapping::new();
        tags.insert(
            "QuickTime:CreateDate".to_string(),
            "2023:01:15 24:05:10".to_string(),
        );
        let placement = place_file(&tags, "clip.mov", 0, root.path()).unwrap().unwrap();
        assert_eq!(placement.timestamp, "2023-01-15_00-05-10");
    }

    #[test]
    fn total_failure_is_ok_none() {
        let root = tempfile::tempdir().unwrap();
        let outcome = place_file(&TagMapping::new(), "scan42.jpg", 0, root.path()).unwrap();
        assert!(outcome.is_none());
        // No year bucket gets created for an unresolved file.
        assert!(std::fs::read_dir(root.path()).unwrap().next().is_none());
    }
}
