//! Podcast episodes from an RSS feed

use chrono::{DateTime, Utc};
use url::Url;

use super::extract::{enclosure_url, extract_tag, link_href, looks_like_rss, split_items, text_of};
use super::ids::{opaque_id_from_guid, slug_from_link};
use super::{FeedError, FeedItem, FeedSettings, HttpClient};
use crate::content::FrontMatter;
use crate::helpers::{iso_string, parse_feed_date};

pub async fn fetch(client: &HttpClient, settings: &FeedSettings) -> Result<Vec<FeedItem>, FeedError> {
    let url = Url::parse(&settings.podcast_feed_url)?;
    tracing::info!("Fetching podcast feed {}", url);
    let rss = client.get_text(&url).await?;
    parse_items(&rss, Utc::now())
}

/// Parse an episode feed; `now` stands in for missing or unreadable dates
pub fn parse_items(rss: &str, now: DateTime<Utc>) -> Result<Vec<FeedItem>, FeedError> {
    if !looks_like_rss(rss) {
        return Err(FeedError::Malformed("podcast response is not an RSS feed".into()));
    }

    let items = split_items(rss)
        .into_iter()
        .map(|block| parse_item(block, now))
        .collect();

    Ok(items)
}

fn parse_item(block: &str, now: DateTime<Utc>) -> FeedItem {
    let enclosure = enclosure_url(block);

    // <link>text</link>, then <link href="..."/>, then the audio file itself
    let link = Some(text_of("link", block))
        .filter(|l| !l.is_empty())
        .or_else(|| link_href(block))
        .or_else(|| enclosure.clone());

    let guid = extract_tag("guid", block);
    let id = opaque_id_from_guid(&guid).or_else(|| link.as_deref().and_then(slug_from_link));

    let summary = Some(text_of("description", block))
        .filter(|s| !s.is_empty())
        .or_else(|| Some(text_of("itunes:summary", block)).filter(|s| !s.is_empty()));

    let title = text_of("title", block);

    FeedItem {
        id,
        title: if title.is_empty() { "Untitled".to_string() } else { title },
        link,
        published: parse_feed_date(&extract_tag("pubDate", block)).unwrap_or(now),
        enclosure_url: enclosure,
        summary,
    }
}

/// `type: audio`, `tags: [podcast]`, the episode page and the audio file
pub fn to_front_matter(item: &FeedItem) -> FrontMatter {
    FrontMatter {
        title: Some(item.title.clone()),
        date: Some(iso_string(&item.published)),
        kind: Some("audio".to_string()),
        tags: vec!["podcast".to_string()],
        external_url: item.link.clone(),
        audio_url: item.enclosure_url.clone(),
        summary: item.summary.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
  <title>Hunchpig</title>
  <atom:link href="https://hunchpig.audio/podcast.xml" rel="self" type="application/rss+xml"/>
  <item>
    <title>Episode 1: Pilot</title>
    <guid isPermaLink="false">Buzzsprout-13370042</guid>
    <pubDate>Mon, 04 Mar 2024 08:00:00 -0500</pubDate>
    <link>https://hunchpig.audio/episodes/pilot</link>
    <description><![CDATA[<p>We start.</p>]]></description>
    <enclosure url="https://cdn.example/ep1.mp3" length="100" type="audio/mpeg"/>
  </item>
  <item>
    <title>Episode 2</title>
    <guid>ep/2</guid>
    <link href="https://hunchpig.audio/episodes/second-one"/>
    <itunes:summary>Second summary</itunes:summary>
  </item>
  <item>
    <title>Episode 3</title>
    <enclosure url='https://cdn.example/files/ep-three.mp3' type="audio/mpeg"/>
  </item>
  <item>
    <title></title>
  </item>
</channel>
</rss>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_guid_id_and_fields() {
        let items = parse_items(FEED, now()).unwrap();
        assert_eq!(items.len(), 4);

        let first = &items[0];
        assert_eq!(first.id.as_deref(), Some("Buzzsprout-13370042"));
        assert_eq!(first.title, "Episode 1: Pilot");
        assert_eq!(first.link.as_deref(), Some("https://hunchpig.audio/episodes/pilot"));
        assert_eq!(first.enclosure_url.as_deref(), Some("https://cdn.example/ep1.mp3"));
        assert_eq!(first.summary.as_deref(), Some("<p>We start.</p>"));
        assert_eq!(first.published, Utc.with_ymd_and_hms(2024, 3, 4, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_link_fallbacks() {
        let items = parse_items(FEED, now()).unwrap();

        // Short GUID, id from the href link
        assert_eq!(items[1].link.as_deref(), Some("https://hunchpig.audio/episodes/second-one"));
        assert_eq!(items[1].id.as_deref(), Some("second-one"));
        assert_eq!(items[1].summary.as_deref(), Some("Second summary"));
        assert_eq!(items[1].published, now());

        // No link at all, the enclosure stands in
        assert_eq!(items[2].link.as_deref(), Some("https://cdn.example/files/ep-three.mp3"));
        assert_eq!(items[2].id.as_deref(), Some("ep-three-mp3"));

        assert_eq!(items[3].id, None);
        assert_eq!(items[3].title, "Untitled");
    }

    #[test]
    fn test_cdata_summary_is_not_decoded() {
        let rss = "<rss><channel><item>\
                   <title><![CDATA[Tom &amp; Jerry]]></title>\
                   <guid>Buzzsprout-424242</guid>\
                   <description><![CDATA[<p>Use the &lt;br&gt; tag</p>]]></description>\
                   </item></channel></rss>";
        let items = parse_items(rss, now()).unwrap();
        assert_eq!(items[0].title, "Tom &amp; Jerry");
        assert_eq!(items[0].summary.as_deref(), Some("<p>Use the &lt;br&gt; tag</p>"));
    }

    #[test]
    fn test_malformed_feed() {
        assert!(matches!(parse_items("   ", now()), Err(FeedError::Malformed(_))));
    }

    #[test]
    fn test_front_matter() {
        let items = parse_items(FEED, now()).unwrap();
        let fm = to_front_matter(&items[0]);
        assert_eq!(fm.kind.as_deref(), Some("audio"));
        assert_eq!(fm.tags, vec!["podcast"]);
        assert_eq!(fm.external_url.as_deref(), Some("https://hunchpig.audio/episodes/pilot"));
        assert_eq!(fm.audio_url.as_deref(), Some("https://cdn.example/ep1.mp3"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-04T13:00:00.000Z"));
    }
}
