pub mod guess;
pub mod normalize;
pub mod tags;

use std::fmt;

use crate::TagMapping;

/// Lexical shape every resolved timestamp is reformatted to:
/// `YYYY-MM-DD_hh-mm-ss`, naive wall clock, no timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Which rule or pattern produced a timestamp, for caller-side logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// A metadata tag rule matched (rule description, e.g. the tag name).
    Tag(String),
    /// A filename template matched.
    Filename(&'static str),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Tag(rule) => write!(f, "tag {rule}"),
            Provenance::Filename(pattern) => write!(f, "filename pattern {pattern}"),
        }
    }
}

/// Result of timestamp resolution: canonical timestamp + where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateResult {
    pub timestamp: String,
    pub source: Provenance,
}

/// Resolve a capture timestamp for one file, in priority order: the
/// metadata tag chain first, the filename guess only when no tag counts.
pub fn resolve_date(tags: &TagMapping, filename_stem: &str) -> Option<DateResult> {
    tags::resolve_from_tags(tags).or_else(|| guess::guess_date_from_filename(filename_stem))
}
