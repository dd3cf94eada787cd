//! Feed ingestion
//!
//! Each source fetches its feed, turns it into [`FeedItem`]s and hands them to
//! [`sync::write_items`], which creates one post file per item that does not
//! have one yet.

pub mod extract;
pub mod http;
pub mod ids;
pub mod podcast;
pub mod soundcloud;
pub mod sync;
pub mod youtube;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::config::FeedsConfig;
use crate::content::FrontMatter;

pub use http::HttpClient;
pub use sync::{write_items, SyncReport};

/// Errors that abort a feed run
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("missing env {0}")]
    MissingConfig(&'static str),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("malformed feed: {0}")]
    Malformed(String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A feed entry, normalised across sources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    /// Stable identifier; items without one are never written
    pub id: Option<String>,
    pub title: String,
    pub link: Option<String>,
    pub published: DateTime<Utc>,
    pub enclosure_url: Option<String>,
    /// Episode summary, or the video description for YouTube
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    YouTube,
    SoundCloud,
    Podcast,
}

impl Source {
    /// Filename prefix of the posts this source creates
    pub fn prefix(&self) -> &'static str {
        match self {
            Source::YouTube => "youtube",
            Source::SoundCloud => "soundcloud",
            Source::Podcast => "podcast",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::YouTube => "YouTube",
            Source::SoundCloud => "SoundCloud",
            Source::Podcast => "Podcast",
        }
    }

    /// `<prefix>-<id>`
    pub fn stem(&self, id: &str) -> String {
        format!("{}-{}", self.prefix(), id)
    }

    pub fn front_matter(&self, item: &FeedItem) -> FrontMatter {
        match self {
            Source::YouTube => youtube::to_front_matter(item),
            Source::SoundCloud => soundcloud::to_front_matter(item),
            Source::Podcast => podcast::to_front_matter(item),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Feed endpoints and credentials for one run
///
/// Environment variables take precedence over `_config.yml`.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub youtube_api_key: Option<String>,
    pub youtube_channel_id: String,
    pub soundcloud_user_id: String,
    pub podcast_feed_url: String,
    pub max_redirects: usize,
    pub user_agent: Option<String>,
}

impl FeedSettings {
    pub fn resolve(config: &FeedsConfig) -> Self {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(config: &FeedsConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        Self {
            youtube_api_key: var("YOUTUBE_API_KEY"),
            youtube_channel_id: var("YOUTUBE_CHANNEL_ID")
                .unwrap_or_else(|| config.youtube_channel_id.clone()),
            soundcloud_user_id: var("SOUNDCLOUD_USER_ID")
                .unwrap_or_else(|| config.soundcloud_user_id.clone()),
            podcast_feed_url: var("PODCAST_FEED_URL")
                .unwrap_or_else(|| config.podcast_feed_url.clone()),
            max_redirects: config.max_redirects,
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn youtube_api_key(&self) -> Result<&str, FeedError> {
        self.youtube_api_key
            .as_deref()
            .ok_or(FeedError::MissingConfig("YOUTUBE_API_KEY"))
    }

    pub fn http_client(&self) -> Result<HttpClient, FeedError> {
        HttpClient::new(self.user_agent.as_deref(), self.max_redirects)
    }
}
