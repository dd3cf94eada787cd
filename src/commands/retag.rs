//! Bulk tagging passes over the post headers

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use crate::content::{FrontMatter, PostKind};
use crate::Site;

lazy_static! {
    static ref GAME_DEV: Regex = Regex::new(r"(xna|unity|unreal|game|suite game)").unwrap();
}

const INVESTING_KEYWORDS: [&str; 10] = [
    "invest",
    "portfolio",
    "portfolios",
    "risk",
    "parity",
    "hedge",
    // not "fund", it matches "fundamentals"
    "finance",
    "stock",
    "bond",
    "etf",
];

/// Which posts `tag add` touches
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub kind: Option<PostKind>,
    /// UTC year of the post date
    pub year: Option<i32>,
}

impl TagFilter {
    fn matches(&self, fm: &FrontMatter) -> bool {
        if let Some(kind) = self.kind {
            if fm.post_kind() != kind {
                return false;
            }
        }
        if let Some(year) = self.year {
            let post_year = fm.parse_date().map(|d| chrono::Datelike::year(&d));
            if post_year != Some(year) {
                return false;
            }
        }
        true
    }
}

/// Add `tags` to every matching post that does not carry them yet
///
/// Returns the number of files rewritten.
pub fn add_tags(site: &Site, tags: &[String], filter: &TagFilter) -> Result<usize> {
    let writer = site.writer();
    let mut updated = 0;

    for mut doc in site.loader().load_documents()? {
        if !filter.matches(&doc.front_matter) {
            continue;
        }
        if doc.front_matter.add_tags(tags) {
            writer.rewrite(&doc.path, &doc.front_matter, &doc.body)?;
            updated += 1;
        }
    }

    Ok(updated)
}

/// Broad category tags for a post
///
/// Videos get `video` plus `music`, or `software` when the title reads like
/// game development. Other posts get `investing` when the file name, title or
/// link mention money, and `software` otherwise. Existing tags are kept; the
/// result is deduplicated and sorted.
pub fn classify(file_name: &str, fm: &FrontMatter) -> Vec<String> {
    let mut tags: BTreeSet<String> = fm
        .tags
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect();

    if fm.post_kind() == PostKind::Video {
        tags.insert("video".to_string());
        let title = fm.title.as_deref().unwrap_or_default().to_lowercase();
        if GAME_DEV.is_match(&title) {
            tags.insert("software".to_string());
        } else {
            tags.insert("music".to_string());
        }
        return tags.into_iter().collect();
    }

    let hay = format!(
        "{} {} {}",
        file_name,
        fm.title.as_deref().unwrap_or_default(),
        fm.external_url.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    if INVESTING_KEYWORDS.iter().any(|k| hay.contains(k)) {
        tags.insert("investing".to_string());
    }
    if !tags.contains("investing") {
        tags.insert("software".to_string());
    }

    tags.into_iter().collect()
}

/// Apply [`classify`] to every post, rewriting only those whose tags change
pub fn classify_all(site: &Site) -> Result<usize> {
    let writer = site.writer();
    let mut updated = 0;

    for mut doc in site.loader().load_documents()? {
        let file_name = doc
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut before = doc.front_matter.tags.clone();
        before.sort();
        let after = classify(&file_name, &doc.front_matter);
        if before == after {
            continue;
        }

        tracing::debug!("{}: {:?} -> {:?}", file_name, before, after);
        doc.front_matter.tags = after;
        writer.rewrite(&doc.path, &doc.front_matter, &doc.body)?;
        updated += 1;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fm(yaml: &str) -> FrontMatter {
        FrontMatter::parse(&format!("---\n{}\n---\n", yaml)).unwrap().0
    }

    #[test]
    fn test_classify_videos() {
        assert_eq!(
            classify("youtube-1.md", &fm("title: Live at the Barn\ntype: video")),
            vec!["music", "video"]
        );
        assert_eq!(
            classify("youtube-2.md", &fm("title: My Unity Prototype\ntype: video")),
            vec!["software", "video"]
        );
        assert_eq!(
            classify("youtube-3.md", &fm("title: x\ntype: video\ntags: [music, katies-40th]")),
            vec!["katies-40th", "music", "video"]
        );
    }

    #[test]
    fn test_classify_articles() {
        assert_eq!(
            classify("risk-parity.md", &fm("title: Notes")),
            vec!["investing"]
        );
        assert_eq!(
            classify("notes.md", &fm("title: Rust Fundamentals")),
            vec!["software"]
        );
        assert_eq!(
            classify("a.md", &fm("title: A\nexternalUrl: https://example.com/etf-guide")),
            vec!["investing"]
        );
        assert_eq!(
            classify("brew.md", &fm("title: Brew\ntags: homebrewing")),
            vec!["homebrewing", "software"]
        );
    }

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        for (name, content) in files {
            fs::write(posts.join(name), content).unwrap();
        }
        let site = Site::new(temp.path()).unwrap();
        (temp, site)
    }

    #[test]
    fn test_add_tags_by_kind_and_year() {
        let (_temp, site) = site_with(&[
            ("youtube-a.md", "---\ntitle: A\ndate: \"2023-04-01T00:00:00.000Z\"\ntype: video\n---\n"),
            ("youtube-b.md", "---\ntitle: B\ndate: \"2024-04-01T00:00:00.000Z\"\ntype: video\n---\n"),
            ("post.md", "---\ntitle: C\ndate: \"2023-04-01T00:00:00.000Z\"\n---\n"),
        ]);
        let tags = vec!["katies-40th".to_string(), "music".to_string()];
        let filter = TagFilter {
            kind: Some(PostKind::Video),
            year: Some(2023),
        };

        assert_eq!(add_tags(&site, &tags, &filter).unwrap(), 1);
        assert_eq!(add_tags(&site, &tags, &filter).unwrap(), 0);

        let posts = site.loader().load_posts().unwrap();
        let a = posts.iter().find(|p| p.slug == "youtube-a").unwrap();
        assert_eq!(a.tags, vec!["katies-40th", "music"]);
        assert!(posts.iter().find(|p| p.slug == "youtube-b").unwrap().tags.is_empty());
        assert!(posts.iter().find(|p| p.slug == "post").unwrap().tags.is_empty());
    }

    #[test]
    fn test_classify_all_writes_only_changes() {
        let (_temp, site) = site_with(&[
            ("done.md", "---\ntitle: Done\ndate: 2023-01-01\ntags:\n  - software\n---\n"),
            ("stock-picks.md", "---\ntitle: Picks\ndate: 2023-01-01\n---\n\nBody\n"),
        ]);
        let untouched = fs::read_to_string(site.posts_dir.join("done.md")).unwrap();

        assert_eq!(classify_all(&site).unwrap(), 1);
        assert_eq!(fs::read_to_string(site.posts_dir.join("done.md")).unwrap(), untouched);

        let raw = fs::read_to_string(site.posts_dir.join("stock-picks.md")).unwrap();
        assert_eq!(FrontMatter::parse(&raw).unwrap().0.tags, vec!["investing"]);
        assert!(raw.ends_with("\nBody\n"));

        assert_eq!(classify_all(&site).unwrap(), 0);
    }
}
