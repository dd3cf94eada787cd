//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Directory
    pub posts_dir: String,

    #[serde(default)]
    pub tags: TagConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "iancanderson".to_string(),
            url: "http://example.com".to_string(),
            posts_dir: "_posts".to_string(),
            tags: TagConfig::default(),
            calendar: CalendarConfig::default(),
            feeds: FeedsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("parsing {:?}", path))?;
        Ok(config)
    }
}

/// Tag priority and emoji table used to pick one glyph per day or post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Tags checked in order when a cell has several tags
    pub priority: Vec<String>,
    /// Tag to glyph (IndexMap keeps the YAML order)
    pub emoji: IndexMap<String, String>,
    /// Glyph for tags missing from `emoji`
    pub default_emoji: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        let priority = ["music", "software", "video", "podcast", "homebrewing", "investing"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        let emoji = [
            ("software", "💻"),
            ("investing", "📈"),
            ("music", "🎵"),
            ("video", "🎬"),
            ("homebrewing", "🍺"),
            ("podcast", "🎙️"),
        ]
        .iter()
        .map(|(t, e)| (t.to_string(), e.to_string()))
        .collect();

        Self {
            priority,
            emoji,
            default_emoji: "🏷️".to_string(),
        }
    }
}

/// Calendar and timeline geometry, in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub day_square: u32,
    pub gap: u32,
    /// Height of the year selector row above the month labels
    pub years_row: u32,
    /// Height of the month label row
    pub label_row: u32,
    pub out_of_year_opacity: f32,
    pub timeline_px_per_day: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_square: 18,
            gap: 3,
            years_row: 24,
            label_row: 18,
            out_of_year_opacity: 0.08,
            timeline_px_per_day: 1.2,
        }
    }
}

/// Feed sources for the sync commands. Environment variables win over these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub youtube_channel_id: String,
    pub soundcloud_user_id: String,
    pub podcast_feed_url: String,
    pub max_redirects: usize,
    pub user_agent: Option<String>,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            youtube_channel_id: "UCvRvcLNML0QOOAah4HNXg8g".to_string(),
            soundcloud_user_id: "2178588".to_string(),
            podcast_feed_url: "https://hunchpig.audio/podcast.xml".to_string(),
            max_redirects: 5,
            user_agent: None,
        }
    }
}
