//! Post models

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::helpers::date_key;

/// The `type` discriminator of a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Article,
    Video,
    Music,
    Audio,
}

impl PostKind {
    /// Parse the front-matter `type` value; unknown values are articles
    pub fn from_type_field(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "video" => PostKind::Video,
            "music" => PostKind::Music,
            "audio" => PostKind::Audio,
            _ => PostKind::Article,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Article => "article",
            PostKind::Video => "video",
            PostKind::Music => "music",
            PostKind::Audio => "audio",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (file stem, unique across the posts directory)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Post tags
    pub tags: Vec<String>,

    #[serde(rename = "type")]
    pub kind: PostKind,

    /// Link for posts that live elsewhere
    pub external_url: Option<String>,

    pub youtube_id: Option<String>,
    pub video_description: Option<String>,
    pub soundcloud_url: Option<String>,
    pub audio_url: Option<String>,
    pub summary: Option<String>,

    /// Raw markdown content
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub body: String,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            date,
            tags: Vec::new(),
            kind: PostKind::default(),
            external_url: None,
            youtube_id: None,
            video_description: None,
            soundcloud_url: None,
            audio_url: None,
            summary: None,
            body: String::new(),
            source: PathBuf::new(),
        }
    }

    /// UTC year of the publication date
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// UTC `YYYY-MM-DD` day key
    pub fn date_key(&self) -> String {
        date_key(&self.date)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn summary_record(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            date: self.date,
            tags: self.tags.clone(),
        }
    }
}

/// The slice of a post the calendar and timeline need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl PostSummary {
    pub fn new<S: AsRef<str>>(slug: &str, date: DateTime<Utc>, tags: &[S]) -> Self {
        Self {
            slug: slug.to_string(),
            date,
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        post.summary_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_from_type_field() {
        assert_eq!(PostKind::from_type_field("video"), PostKind::Video);
        assert_eq!(PostKind::from_type_field(" Music "), PostKind::Music);
        assert_eq!(PostKind::from_type_field("audio"), PostKind::Audio);
        assert_eq!(PostKind::from_type_field("gallery"), PostKind::Article);
    }

    #[test]
    fn test_post_helpers() {
        let date = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
        let mut post = Post::new("youtube-abc", "Clip", date);
        post.tags = vec!["music".to_string()];
        assert_eq!(post.year(), 2023);
        assert_eq!(post.date_key(), "2023-12-31");
        assert!(post.has_tag("music"));
        assert!(!post.has_tag("Music"));

        let summary = PostSummary::from(&post);
        assert_eq!(summary.slug, "youtube-abc");
        assert_eq!(summary.tags, vec!["music"]);
    }
}
