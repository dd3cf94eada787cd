//! Content loader - loads posts from the flat posts directory

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};

/// A post file as read from disk, before it is turned into a [`Post`]
#[derive(Debug, Clone)]
pub struct PostDocument {
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl PostDocument {
    /// File stem, which doubles as the post slug
    pub fn stem(&self) -> &str {
        file_stem(&self.path)
    }
}

/// Loads content from the posts directory
pub struct PostLoader {
    posts_dir: PathBuf,
}

impl PostLoader {
    /// Create a new content loader
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load all posts, newest first
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for path in self.post_paths() {
            match self.load_post(&path) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                }
            }
        }

        // Sort by date descending (newest first), slug breaks ties
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.posts_dir);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let doc = read_document(path)?;
        let fm = &doc.front_matter;

        let date = fm
            .parse_date()
            .ok_or_else(|| anyhow!("missing or invalid date: {:?}", fm.date))?;

        let slug = doc.stem().to_string();
        let title = fm.title.clone().unwrap_or_else(|| slug.clone());

        let mut post = Post::new(slug, title, date);
        post.tags = fm.tags.clone();
        post.kind = fm.post_kind();
        post.external_url = fm.external_url.clone();
        post.youtube_id = fm.youtube_id.clone();
        post.video_description = fm.video_description.clone();
        post.soundcloud_url = fm.soundcloud_url.clone();
        post.audio_url = fm.audio_url.clone();
        post.summary = fm.summary.clone();
        post.body = doc.body;
        post.source = doc.path;

        Ok(post)
    }

    /// Read every post file with its raw front-matter, for passes that rewrite headers
    ///
    /// Unlike [`load_posts`](Self::load_posts) a file that fails to parse is an error:
    /// a bulk edit should stop rather than silently skip part of the archive.
    pub fn load_documents(&self) -> Result<Vec<PostDocument>> {
        self.post_paths()
            .iter()
            .map(|path| read_document(path))
            .collect()
    }

    /// Markdown files directly inside the posts directory, sorted by name
    fn post_paths(&self) -> Vec<PathBuf> {
        if !self.posts_dir.exists() {
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect();
        paths.sort();
        paths
    }
}

fn read_document(path: &Path) -> Result<PostDocument> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let (front_matter, body) =
        FrontMatter::parse(&content).with_context(|| format!("parsing {:?}", path))?;
    Ok(PostDocument {
        path: path.to_path_buf(),
        front_matter,
        body: body.to_string(),
    })
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "markdown" | "mdx"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostKind;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "older.md",
            "---\ntitle: Older\ndate: \"2022-05-01T00:00:00.000Z\"\ntags:\n  - software\n---\n\nBody\n",
        );
        write(
            dir.path(),
            "youtube-abc.md",
            "---\ntitle: \"Newer\"\ndate: \"2024-02-01T12:00:00.000Z\"\nyoutubeId: abc\ntype: video\n---\n",
        );
        write(dir.path(), "notes.txt", "not a post");

        let posts = PostLoader::new(dir.path()).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "youtube-abc");
        assert_eq!(posts[0].kind, PostKind::Video);
        assert_eq!(posts[0].youtube_id.as_deref(), Some("abc"));
        assert_eq!(posts[1].slug, "older");
        assert_eq!(posts[1].tags, vec!["software"]);
        assert_eq!(posts[1].body, "Body\n");
    }

    #[test]
    fn test_bad_posts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\n");
        write(dir.path(), "undated.md", "---\ntitle: No date\n---\n");
        write(dir.path(), "broken.md", "---\ntitle: [oops\n---\n");

        let posts = PostLoader::new(dir.path()).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = PostLoader::new(dir.path().join("_posts"));
        assert!(loader.load_posts().unwrap().is_empty());
        assert!(loader.load_documents().unwrap().is_empty());
    }

    #[test]
    fn test_load_documents_fails_on_broken_header() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.md", "---\ntitle: [oops\n---\n");
        assert!(PostLoader::new(dir.path()).load_documents().is_err());
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "untitled-idea.md", "---\ndate: 2024-01-01\n---\n");
        let posts = PostLoader::new(dir.path()).load_posts().unwrap();
        assert_eq!(posts[0].title, "untitled-idea");
    }
}
