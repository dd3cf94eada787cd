//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode one URL path segment (a tag name, a slug)
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "/tags/music") // -> "https://example.com/tags/music"
/// ```
pub fn full_url_for(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Last non-empty path segment of a URL
///
/// Query strings and fragments are ignored. Input that does not parse as a
/// URL is split on `/` after dropping everything from the first `?`.
pub fn last_path_segment(link: &str) -> Option<String> {
    if let Ok(u) = url::Url::parse(link) {
        return u
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string));
    }

    link.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Slug for a path segment: percent-decoded, lowercased, non-alphanumerics collapsed to `-`
pub fn slug_from_segment(segment: &str) -> String {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    slug::slugify(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("music"), "music");
        assert_eq!(encode_segment("c/c++"), "c%2Fc++");
        assert_eq!(encode_segment("two words"), "two%20words");
    }

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for("https://example.com/", "/tags/music"),
            "https://example.com/tags/music"
        );
        assert_eq!(full_url_for("https://example.com", "day/2024-01-01"), "https://example.com/day/2024-01-01");
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            last_path_segment("https://soundcloud.com/artist/foo-bar").as_deref(),
            Some("foo-bar")
        );
        assert_eq!(
            last_path_segment("https://example.com/episodes/ep-12/?ref=rss").as_deref(),
            Some("ep-12")
        );
        assert_eq!(last_path_segment("episodes/ep-3?x=1").as_deref(), Some("ep-3"));
        assert_eq!(last_path_segment("https://example.com/"), None);
        assert_eq!(last_path_segment(""), None);
    }

    #[test]
    fn test_slug_from_segment() {
        assert_eq!(slug_from_segment("foo-bar"), "foo-bar");
        assert_eq!(slug_from_segment("Episode%2012_Final"), "episode-12-final");
        assert_eq!(slug_from_segment("caf%C3%A9"), "cafe");
    }
}
