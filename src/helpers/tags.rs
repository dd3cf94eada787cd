//! Tag helpers: emoji lookup, representative-tag resolution and the tag cloud

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::TagConfig;
use crate::content::Post;

/// The tag picked to represent a set of tags, with its glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTag {
    pub tag: String,
    pub emoji: String,
}

/// Priority order and emoji table for tags
///
/// Both lists are site data, loaded from `_config.yml`.
#[derive(Debug, Clone)]
pub struct TagPalette {
    priority: Vec<String>,
    emoji: IndexMap<String, String>,
    default_emoji: String,
}

impl TagPalette {
    pub fn new(priority: Vec<String>, emoji: IndexMap<String, String>, default_emoji: String) -> Self {
        let priority = priority.into_iter().map(|t| t.to_lowercase()).collect();
        let emoji = emoji
            .into_iter()
            .map(|(t, e)| (t.to_lowercase(), e))
            .collect();
        Self {
            priority,
            emoji,
            default_emoji,
        }
    }

    pub fn from_config(config: &TagConfig) -> Self {
        Self::new(
            config.priority.clone(),
            config.emoji.clone(),
            config.default_emoji.clone(),
        )
    }

    pub fn default_emoji(&self) -> &str {
        &self.default_emoji
    }

    /// Glyph for a tag, or the default glyph when the tag is unknown
    pub fn emoji_for(&self, tag: &str) -> &str {
        self.emoji
            .get(&tag.to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default_emoji)
    }

    /// Whether the tag has its own glyph
    pub fn is_known(&self, tag: &str) -> bool {
        self.emoji.contains_key(&tag.to_lowercase())
    }

    /// CSS class for a tag chip, empty for unknown tags
    pub fn color_class(&self, tag: &str) -> String {
        let t = tag.to_lowercase();
        if self.emoji.contains_key(&t) {
            format!("chip-{}", t)
        } else {
            String::new()
        }
    }

    /// Pick the single tag that represents `tags`
    ///
    /// The first priority tag present wins. Otherwise the first tag that has
    /// its own glyph. Otherwise nothing is shown.
    pub fn resolve<I, S>(&self, tags: I) -> Option<ResolvedTag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lower: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect();
        if lower.is_empty() {
            return None;
        }

        if let Some(tag) = self.priority.iter().find(|p| lower.contains(*p)) {
            return Some(ResolvedTag {
                tag: tag.clone(),
                emoji: self.emoji_for(tag).to_string(),
            });
        }

        lower
            .into_iter()
            .find(|t| self.emoji_for(t) != self.default_emoji)
            .map(|tag| ResolvedTag {
                emoji: self.emoji_for(&tag).to_string(),
                tag,
            })
    }
}

impl Default for TagPalette {
    fn default() -> Self {
        Self::from_config(&TagConfig::default())
    }
}

/// Relative weight of a tag in the cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagWeight {
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl TagWeight {
    fn for_ratio(ratio: f64) -> Self {
        if ratio >= 0.75 {
            TagWeight::Bold
        } else if ratio >= 0.5 {
            TagWeight::Semibold
        } else if ratio >= 0.25 {
            TagWeight::Medium
        } else {
            TagWeight::Normal
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCloudEntry {
    pub tag: String,
    pub count: usize,
    pub weight: TagWeight,
    pub emoji: String,
}

/// All tags with their post counts, alphabetical
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagCloud {
    pub entries: Vec<TagCloudEntry>,
}

impl TagCloud {
    pub fn from_posts(posts: &[Post], palette: &TagPalette) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for post in posts {
            for tag in &post.tags {
                if tag.trim().is_empty() {
                    continue;
                }
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let max = counts.values().copied().max().unwrap_or(1).max(1) as f64;
        let entries = counts
            .into_iter()
            .map(|(tag, count)| TagCloudEntry {
                tag: tag.to_string(),
                count,
                weight: TagWeight::for_ratio(count as f64 / max),
                emoji: palette.emoji_for(tag).to_string(),
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
