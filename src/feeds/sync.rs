//! Writing feed items as posts

use anyhow::Result;
use serde::Serialize;

use super::{FeedItem, Source};
use crate::content::PostWriter;

/// Outcome of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Stems of the post files created by this run
    pub created: Vec<String>,
    /// Items whose file already existed
    pub skipped: usize,
    /// Items with no usable id
    pub unidentified: usize,
}

impl SyncReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Create `<prefix>-<id>.md` for every item that does not have a file yet
///
/// Existing files are never touched, so running a sync twice against the
/// same feed creates nothing the second time.
pub fn write_items(writer: &PostWriter, source: Source, items: &[FeedItem]) -> Result<SyncReport> {
    writer.ensure_dir()?;
    let mut report = SyncReport::default();

    for item in items {
        let Some(id) = item.id.as_deref() else {
            tracing::warn!("Skipping {} item without an id: {:?}", source, item.title);
            report.unidentified += 1;
            continue;
        };

        let stem = source.stem(id);
        let front_matter = source.front_matter(item);
        if writer.write_new(&stem, &front_matter, "")? {
            tracing::info!("Created {}.md", stem);
            report.created.push(stem);
        } else {
            report.skipped += 1;
        }
    }

    Ok(report)
}
