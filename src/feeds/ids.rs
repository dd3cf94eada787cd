//! Stable item IDs
//!
//! An ID becomes part of the post filename, so it must be derived from the
//! feed item alone and be identical on every run.

use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::{last_path_segment, slug_from_segment};

lazy_static! {
    static ref TRACK_ID: Regex = Regex::new(r"(?i)tracks:(\d+)").unwrap();
    static ref OPAQUE_ID: Regex = Regex::new(r"(?i)([a-z0-9_-]{6,})$").unwrap();
}

/// Numeric track id from a SoundCloud GUID like `tag:soundcloud,2010:tracks:12345`
pub fn track_id_from_guid(guid: &str) -> Option<String> {
    TRACK_ID
        .captures(guid)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Trailing token of at least six `[a-z0-9_-]` characters
pub fn opaque_id_from_guid(guid: &str) -> Option<String> {
    OPAQUE_ID
        .captures(guid.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Slug of the last path segment of a link; `None` when nothing usable is left
pub fn slug_from_link(link: &str) -> Option<String> {
    let segment = last_path_segment(link)?;
    let slug = slug_from_segment(&segment);
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}
