//! Fill in front-matter fields on existing YouTube posts

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::{PostDocument, PostKind, PostWriter};
use crate::feeds::{youtube, FeedSettings};
use crate::Site;

const YOUTUBE_PREFIX: &str = "youtube-";

/// Video id of a post: `youtubeId`, else the `youtube-<id>` file stem
fn video_id(doc: &PostDocument) -> Option<String> {
    doc.front_matter
        .youtube_id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| {
            doc.stem()
                .strip_prefix(YOUTUBE_PREFIX)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        })
}

/// Set `youtubeId` on `youtube-<id>.md` posts that lack it
///
/// Returns the number of files rewritten.
pub fn youtube_ids(site: &Site) -> Result<usize> {
    let writer = site.writer();
    let mut updated = 0;

    for mut doc in site.loader().load_documents()? {
        if !doc.stem().starts_with(YOUTUBE_PREFIX) || doc.front_matter.youtube_id.is_some() {
            continue;
        }
        let Some(id) = video_id(&doc) else {
            continue;
        };
        doc.front_matter.youtube_id = Some(id);
        writer.rewrite(&doc.path, &doc.front_matter, &doc.body)?;
        updated += 1;
    }

    Ok(updated)
}

/// Video posts without a description, with the id to look up
pub fn description_targets(docs: Vec<PostDocument>) -> Vec<(PostDocument, String)> {
    docs.into_iter()
        .filter(|doc| {
            doc.front_matter.post_kind() == PostKind::Video
                && doc
                    .front_matter
                    .video_description
                    .as_deref()
                    .map_or(true, str::is_empty)
        })
        .filter_map(|doc| video_id(&doc).map(|id| (doc, id)))
        .collect()
}

/// Write fetched descriptions into their posts; ids missing from the map are left alone
pub fn apply_descriptions(
    writer: &PostWriter,
    targets: Vec<(PostDocument, String)>,
    descriptions: &IndexMap<String, String>,
) -> Result<usize> {
    let mut updated = 0;
    for (mut doc, id) in targets {
        let Some(description) = descriptions.get(&id) else {
            tracing::debug!("No description returned for {}", id);
            continue;
        };
        doc.front_matter.video_description = Some(description.clone());
        writer.rewrite(&doc.path, &doc.front_matter, &doc.body)?;
        updated += 1;
    }
    Ok(updated)
}

/// Fetch and store descriptions for video posts missing one
///
/// All lookups finish before the first file is rewritten.
pub async fn video_descriptions(site: &Site) -> Result<Option<usize>> {
    let settings = FeedSettings::resolve(&site.config.feeds);
    let api_key = settings.youtube_api_key()?;

    let targets = description_targets(site.loader().load_documents()?);
    if targets.is_empty() {
        return Ok(None);
    }
    tracing::info!("Looking up {} video descriptions", targets.len());

    let ids: Vec<String> = targets.iter().map(|(_, id)| id.clone()).collect();
    let client = settings.http_client()?;
    let descriptions = youtube::fetch_descriptions(&client, api_key, &ids).await?;

    Ok(Some(apply_descriptions(&site.writer(), targets, &descriptions)?))
}

pub async fn run(site: &Site, what: &str) -> Result<()> {
    match what {
        "youtube-ids" => {
            let updated = youtube_ids(site)?;
            println!("Backfill complete. Files updated: {}", updated);
        }
        "video-descriptions" => match video_descriptions(site).await? {
            Some(updated) => println!("Updated {} video posts with descriptions.", updated),
            None => println!("No video posts missing descriptions."),
        },
        _ => anyhow::bail!(
            "Unknown backfill: {}. Available: youtube-ids, video-descriptions",
            what
        ),
    }
    Ok(())
}
