use std::fmt;

use super::{DateResult, Provenance};
use crate::TagMapping;

/// Values exiftool emits when a date field exists but was never set.
const ZERO_SENTINELS: &[&str] = &["0000:00:00 00:00:00", "0000:00:00 00:00:00+00:00"];

/// A rule for pulling a date out of the tag mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// The tag itself must be present and non-sentinel.
    Simple { tag: &'static str },
    /// Additionally gated on a marker tag being present at all; the marker's
    /// value is irrelevant.
    Conditioned {
        precondition: &'static str,
        tag: &'static str,
    },
}

/// Priority chain, highest first. Order is the tie-break policy: the first
/// rule that counts wins and later rules are never consulted. Do not reorder.
/// The filesystem modify date of RIFF containers outranks the unconditional
/// last-resort because those files carry no usable embedded date.
pub const DATE_TAGS: &[DateSource] = &[
    DateSource::Simple {
        tag: "EXIF:DateTimeOriginal",
    },
    DateSource::Simple {
        tag: "QuickTime:ModifyDate",
    },
    DateSource::Simple {
        tag: "QuickTime:CreateDate",
    },
    DateSource::Conditioned {
        precondition: "RIFF:StreamCount",
        tag: "File:FileModifyDate",
    },
    DateSource::Simple {
        tag: "File:FileModifyDate",
    },
];

impl DateSource {
    fn tag(&self) -> &'static str {
        match self {
            DateSource::Simple { tag } | DateSource::Conditioned { tag, .. } => tag,
        }
    }

    /// Whether this rule counts for the given mapping.
    fn counts(&self, tags: &TagMapping) -> bool {
        let usable = |tag: &str| {
            tags.get(tag)
                .is_some_and(|value| !ZERO_SENTINELS.contains(&value.as_str()))
        };
        match self {
            DateSource::Simple { tag } => usable(tag),
            DateSource::Conditioned { precondition, tag } => {
                tags.contains_key(*precondition) && usable(tag)
            }
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSource::Simple { tag } => write!(f, "{tag}"),
            DateSource::Conditioned { precondition, tag } => {
                write!(f, "{precondition} -> {tag}")
            }
        }
    }
}

/// Reshape a raw tag value (`2023:01:15 14:30:00+09:00`) into canonical
/// timestamp form. Anything after the first `+` is a timezone suffix and is
/// dropped. No deeper validation: a garbage value passes through and may
/// yield a well-formed but wrong timestamp.
fn canonicalize(raw: &str) -> String {
    let raw = raw.split('+').next().unwrap_or(raw);
    raw.replace(':', "-").replace(' ', "_")
}

/// Evaluate the priority chain against one file's tag mapping.
pub fn resolve_from_tags(tags: &TagMapping) -> Option<DateResult> {
    for source in DATE_TAGS {
        if source.counts(tags) {
            return Some(DateResult {
                timestamp: canonicalize(&tags[source.tag()]),
                source: Provenance::Tag(source.to_string()),
            });
        }
    }
    None
}
