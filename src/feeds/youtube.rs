//! YouTube uploads through the Data API v3
//!
//! The channel's uploads playlist is resolved first, then paged through 50
//! items at a time until the API stops returning a `nextPageToken`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use super::{FeedError, FeedItem, FeedSettings, HttpClient};
use crate::content::FrontMatter;
use crate::helpers::{iso_string, parse_feed_date};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Page size of `playlistItems` and batch size of `videos` lookups
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelList {
    #[serde(default)]
    items: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Channel {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

/// One page of `playlistItems`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<PlaylistEntry>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub description: Option<String>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoList {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: String,
    snippet: Option<Snippet>,
}

fn api_url(endpoint: &str, params: &[(&str, &str)]) -> Result<Url, FeedError> {
    Ok(Url::parse_with_params(&format!("{}/{}", API_BASE, endpoint), params)?)
}

/// Id of the playlist holding every upload of `channel_id`
pub async fn uploads_playlist_id(
    client: &HttpClient,
    api_key: &str,
    channel_id: &str,
) -> Result<String, FeedError> {
    let url = api_url(
        "channels",
        &[("part", "contentDetails"), ("id", channel_id), ("key", api_key)],
    )?;
    let channels: ChannelList = client.get_json(&url).await?;
    channels
        .items
        .into_iter()
        .next()
        .map(|c| c.content_details.related_playlists.uploads)
        .ok_or_else(|| FeedError::Malformed(format!("channel {} not found", channel_id)))
}

pub async fn fetch(client: &HttpClient, settings: &FeedSettings) -> Result<Vec<FeedItem>, FeedError> {
    let api_key = settings.youtube_api_key()?;
    let playlist = uploads_playlist_id(client, api_key, &settings.youtube_channel_id).await?;
    tracing::info!(
        "Fetching uploads of channel {} (playlist {})",
        settings.youtube_channel_id,
        playlist
    );

    let max_results = PAGE_SIZE.to_string();
    let now = Utc::now();
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist.as_str()),
            ("maxResults", max_results.as_str()),
            ("key", api_key),
        ];
        if let Some(token) = page_token.as_deref() {
            params.push(("pageToken", token));
        }
        let url = api_url("playlistItems", &params)?;
        let page: PlaylistPage = client.get_json(&url).await?;

        tracing::debug!("Fetched {} playlist items", page.items.len());
        page_token = page.next_page_token.clone().filter(|t| !t.is_empty());
        items.extend(items_from_page(page, now));

        if page_token.is_none() {
            break;
        }
    }

    Ok(items)
}

/// Feed items of one playlist page; entries without a snippet are dropped
pub fn items_from_page(page: PlaylistPage, now: DateTime<Utc>) -> Vec<FeedItem> {
    page.items
        .into_iter()
        .filter_map(|entry| entry.snippet)
        .map(|snippet| {
            let id = snippet
                .resource_id
                .and_then(|r| r.video_id)
                .filter(|id| !id.is_empty());
            FeedItem {
                link: id
                    .as_ref()
                    .map(|id| format!("https://www.youtube.com/watch?v={}", id)),
                id,
                title: snippet
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_string()),
                published: snippet
                    .published_at
                    .as_deref()
                    .and_then(parse_feed_date)
                    .unwrap_or(now),
                enclosure_url: None,
                summary: snippet
                    .description
                    .map(|d| normalize_newlines(&d))
                    .filter(|d| !d.is_empty()),
            }
        })
        .collect()
}

/// Video descriptions by id, looked up in batches of [`PAGE_SIZE`]
///
/// Ids the API does not return are absent from the map.
pub async fn fetch_descriptions(
    client: &HttpClient,
    api_key: &str,
    ids: &[String],
) -> Result<IndexMap<String, String>, FeedError> {
    let mut descriptions = IndexMap::new();

    for batch in ids.chunks(PAGE_SIZE) {
        let joined = batch.join(",");
        let url = api_url(
            "videos",
            &[("part", "snippet"), ("id", joined.as_str()), ("key", api_key)],
        )?;
        let videos: VideoList = client.get_json(&url).await?;
        tracing::debug!("Fetched {} of {} descriptions", videos.items.len(), batch.len());

        for video in videos.items {
            let description = video
                .snippet
                .and_then(|s| s.description)
                .unwrap_or_default();
            descriptions.insert(video.id, normalize_newlines(&description));
        }
    }

    Ok(descriptions)
}

pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// `type: video` with the id and description; the page embeds the video
pub fn to_front_matter(item: &FeedItem) -> FrontMatter {
    FrontMatter {
        title: Some(item.title.clone()),
        date: Some(iso_string(&item.published)),
        kind: Some("video".to_string()),
        youtube_id: item.id.clone(),
        video_description: item.summary.clone(),
        ..Default::default()
    }
}
