//! Pull new posts from a feed

use anyhow::{Context, Result};

use crate::feeds::{podcast, soundcloud, write_items, youtube, FeedSettings, Source, SyncReport};
use crate::Site;

/// Fetch one source and write its new items
///
/// The whole feed is fetched before anything is written, so a failed request
/// leaves the posts directory untouched.
pub async fn run(site: &Site, source: Source) -> Result<SyncReport> {
    let settings = FeedSettings::resolve(&site.config.feeds);
    if source == Source::YouTube {
        settings.youtube_api_key()?;
    }

    let client = settings.http_client()?;
    let items = match source {
        Source::YouTube => youtube::fetch(&client, &settings).await,
        Source::SoundCloud => soundcloud::fetch(&client, &settings).await,
        Source::Podcast => podcast::fetch(&client, &settings).await,
    }
    .with_context(|| format!("{} sync failed", source))?;

    tracing::info!("{} feed returned {} items", source, items.len());

    let report = write_items(&site.writer(), source, &items)?;
    if report.unidentified > 0 {
        tracing::warn!("{} items had no usable id", report.unidentified);
    }
    println!("{} sync complete. New files: {}", source, report.created_count());
    Ok(report)
}
