//! postline: calendar layout, feed ingestion and maintenance tooling for a
//! flat-file personal blog
//!
//! Posts are Markdown files with a YAML front-matter header in one directory.
//! This crate reads them into layout data (year calendar, timeline, route
//! table), pulls new posts in from YouTube, SoundCloud and podcast feeds, and
//! runs bulk edits over the headers.

pub mod calendar;
pub mod commands;
pub mod config;
pub mod content;
pub mod feeds;
pub mod helpers;
pub mod routes;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{PostLoader, PostWriter};
use helpers::TagPalette;

/// A site on disk
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post files
    pub posts_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    pub fn loader(&self) -> PostLoader {
        PostLoader::new(&self.posts_dir)
    }

    pub fn writer(&self) -> PostWriter {
        PostWriter::new(&self.posts_dir)
    }

    pub fn palette(&self) -> TagPalette {
        TagPalette::from_config(&self.config.tags)
    }
}
