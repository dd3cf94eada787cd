//! Regex extraction over RSS text
//!
//! Feeds are read with a handful of tolerant patterns rather than a full XML
//! parser: the feeds in use are small, flat and not always well-formed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ITEM_OPEN: Regex = Regex::new(r"(?i)<item>").unwrap();
    static ref ITEM_CLOSE: Regex = Regex::new(r"(?i)</item>").unwrap();
    static ref LINK_HREF: Regex =
        Regex::new(r#"(?i)<link[^>]*?href=["']([^"']+)["'][^>]*/>"#).unwrap();
    static ref ENCLOSURE_URL: Regex =
        Regex::new(r#"(?i)<enclosure[^>]*url=["']([^"']+)["'][^>]*>"#).unwrap();
    static ref CDATA_OPEN: Regex = Regex::new(r"^<!\[CDATA\[").unwrap();
    static ref CDATA_CLOSE: Regex = Regex::new(r"\]\]>$").unwrap();
}

/// Trimmed inner text of the first `<tag>` or `<tag attr="...">` element
///
/// Matching is case-insensitive and non-greedy; an absent element yields an
/// empty string.
pub fn extract_tag(tag: &str, xml: &str) -> String {
    let pattern = format!(
        r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>",
        tag = regex::escape(tag)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };
    re.captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Remove one leading `<![CDATA[` and one trailing `]]>`
///
/// The flag is set when the text opened a CDATA section, whose content is
/// literal and must not be entity-decoded.
pub fn strip_cdata(s: &str) -> (String, bool) {
    let wrapped = CDATA_OPEN.is_match(s);
    let s = CDATA_OPEN.replace(s, "");
    (CDATA_CLOSE.replace(&s, "").into_owned(), wrapped)
}

/// The text of each `<item>` block, in document order
///
/// Everything before the first `<item>` is the channel header and is dropped.
/// A block missing its closing tag runs to the next `<item>` or the end.
pub fn split_items(xml: &str) -> Vec<&str> {
    ITEM_OPEN
        .split(xml)
        .skip(1)
        .map(|part| ITEM_CLOSE.split(part).next().unwrap_or(part))
        .collect()
}

/// `href` of a self-closing `<link href="..."/>` (Atom style)
pub fn link_href(block: &str) -> Option<String> {
    LINK_HREF
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// `url` attribute of an `<enclosure>`
pub fn enclosure_url(block: &str) -> Option<String> {
    ENCLOSURE_URL
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode the five predefined XML entities
pub fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Element text, unwrapped from CDATA or else entity-decoded
pub fn text_of(tag: &str, block: &str) -> String {
    match strip_cdata(&extract_tag(tag, block)) {
        (text, true) => text,
        (text, false) => unescape_entities(&text),
    }
}

/// Whether the body looks like an RSS document at all
pub fn looks_like_rss(xml: &str) -> bool {
    let lower = xml.to_ascii_lowercase();
    lower.contains("<rss") || lower.contains("<channel")
}
