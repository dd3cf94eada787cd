//! SoundCloud tracks from the user's public RSS feed

use chrono::{DateTime, Utc};
use url::Url;

use super::extract::{extract_tag, looks_like_rss, split_items, text_of};
use super::ids::{slug_from_link, track_id_from_guid};
use super::{FeedError, FeedItem, FeedSettings, HttpClient};
use crate::content::FrontMatter;
use crate::helpers::{iso_string, parse_feed_date};

pub fn feed_url(user_id: &str) -> Result<Url, FeedError> {
    let url = format!(
        "https://feeds.soundcloud.com/users/soundcloud:users:{}/sounds.rss",
        user_id
    );
    Ok(Url::parse(&url)?)
}

pub async fn fetch(client: &HttpClient, settings: &FeedSettings) -> Result<Vec<FeedItem>, FeedError> {
    let url = feed_url(&settings.soundcloud_user_id)?;
    tracing::info!("Fetching SoundCloud feed for user {}", settings.soundcloud_user_id);
    let rss = client.get_text(&url).await?;
    parse_items(&rss, Utc::now())
}

/// Parse a track feed; `now` stands in for missing or unreadable dates
pub fn parse_items(rss: &str, now: DateTime<Utc>) -> Result<Vec<FeedItem>, FeedError> {
    if !looks_like_rss(rss) {
        return Err(FeedError::Malformed("SoundCloud response is not an RSS feed".into()));
    }

    let items = split_items(rss)
        .into_iter()
        .map(|block| {
            let link = Some(text_of("link", block)).filter(|l| !l.is_empty());
            let guid = extract_tag("guid", block);
            let id = track_id_from_guid(&guid).or_else(|| link.as_deref().and_then(slug_from_link));
            let title = text_of("title", block);

            FeedItem {
                id,
                title: if title.is_empty() { "Untitled".to_string() } else { title },
                link,
                published: parse_feed_date(&extract_tag("pubDate", block)).unwrap_or(now),
                enclosure_url: None,
                summary: None,
            }
        })
        .collect();

    Ok(items)
}

/// `type: music`, `tags: [music]` and the track page as `soundcloudUrl`
pub fn to_front_matter(item: &FeedItem) -> FrontMatter {
    FrontMatter {
        title: Some(item.title.clone()),
        date: Some(iso_string(&item.published)),
        kind: Some("music".to_string()),
        tags: vec!["music".to_string()],
        soundcloud_url: item.link.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
<channel>
  <title>Ian Anderson</title>
  <link>https://soundcloud.com/iancanderson</link>
  <item>
    <guid isPermaLink="false">tag:soundcloud,2010:tracks:12345</guid>
    <title>First &amp; Last</title>
    <pubDate>Tue, 02 Jan 2024 15:04:05 +0000</pubDate>
    <link>https://soundcloud.com/iancanderson/first-last</link>
  </item>
  <item>
    <guid>https://soundcloud.com/iancanderson/foo-bar</guid>
    <title><![CDATA[No Track Id]]></title>
    <link>https://soundcloud.com/iancanderson/foo-bar</link>
  </item>
  <item>
    <title>Orphan</title>
  </item>
</channel>
</rss>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_feed_url() {
        assert_eq!(
            feed_url("2178588").unwrap().as_str(),
            "https://feeds.soundcloud.com/users/soundcloud:users:2178588/sounds.rss"
        );
    }

    #[test]
    fn test_parse_items() {
        let items = parse_items(FEED, now()).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].id.as_deref(), Some("12345"));
        assert_eq!(items[0].title, "First & Last");
        assert_eq!(
            items[0].published,
            Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap()
        );

        // Falls back to the last link segment
        assert_eq!(items[1].id.as_deref(), Some("foo-bar"));
        assert_eq!(items[1].title, "No Track Id");
        assert_eq!(items[1].published, now());

        assert_eq!(items[2].id, None);
        assert_eq!(items[2].link, None);
    }

    #[test]
    fn test_malformed_feed() {
        assert!(matches!(parse_items("", now()), Err(FeedError::Malformed(_))));
        assert!(matches!(
            parse_items("<html>502 Bad Gateway</html>", now()),
            Err(FeedError::Malformed(_))
        ));
        // A valid feed with no items is fine
        assert!(parse_items("<rss><channel></channel></rss>", now()).unwrap().is_empty());
    }

    #[test]
    fn test_front_matter() {
        let items = parse_items(FEED, now()).unwrap();
        let fm = to_front_matter(&items[0]);
        assert_eq!(fm.kind.as_deref(), Some("music"));
        assert_eq!(fm.tags, vec!["music"]);
        assert_eq!(fm.date.as_deref(), Some("2024-01-02T15:04:05.000Z"));
        assert_eq!(
            fm.soundcloud_url.as_deref(),
            Some("https://soundcloud.com/iancanderson/first-last")
        );
    }
}
