//! Post writer - creates and rewrites post files
//!
//! The existence of `<stem>.md` is the only identity check the site has:
//! a feed item whose file already exists has been synced before.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::FrontMatter;

/// Writes post files into the posts directory
pub struct PostWriter {
    posts_dir: PathBuf,
}

impl PostWriter {
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    /// Create the posts directory if needed
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.posts_dir)
            .with_context(|| format!("creating {:?}", self.posts_dir))
    }

    /// Path of the post file for a stem like `youtube-<id>`
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.md", stem))
    }

    pub fn exists(&self, stem: &str) -> bool {
        self.path_for(stem).exists()
    }

    /// Write a new post unless one with the same stem exists
    ///
    /// Returns `Ok(false)` when the file was already there.
    pub fn write_new(&self, stem: &str, fm: &FrontMatter, body: &str) -> Result<bool> {
        let path = self.path_for(stem);
        let content = fm.render(body)?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("Skipping existing {:?}", path);
                return Ok(false);
            }
            Err(e) => return Err(e).with_context(|| format!("creating {:?}", path)),
        };

        fill_or_remove(&path, file, content.as_bytes())?;
        tracing::debug!("Created {:?}", path);
        Ok(true)
    }

    /// Overwrite an existing post with a new header
    pub fn rewrite(&self, path: &Path, fm: &FrontMatter, body: &str) -> Result<()> {
        let content = fm.render(body)?;
        fs::write(path, content).with_context(|| format!("writing {:?}", path))?;
        tracing::debug!("Rewrote {:?}", path);
        Ok(())
    }
}

/// Write `content` into a freshly created file, deleting it on failure
///
/// A half-written post would otherwise count as synced on every later run.
fn fill_or_remove<W: Write>(path: &Path, mut file: W, content: &[u8]) -> Result<()> {
    let written = file.write_all(content).and_then(|_| file.flush());
    drop(file);

    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial {:?}: {}", path, rm);
        }
        return Err(e).with_context(|| format!("writing {:?}", path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample() -> FrontMatter {
        FrontMatter {
            title: Some("Track".to_string()),
            date: Some("2024-01-01T00:00:00.000Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_new_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path().join("_posts"));
        writer.ensure_dir().unwrap();

        assert!(writer.write_new("soundcloud-1", &sample(), "").unwrap());
        assert!(writer.exists("soundcloud-1"));

        let mut changed = sample();
        changed.title = Some("Changed".to_string());
        assert!(!writer.write_new("soundcloud-1", &changed, "").unwrap());

        let content = fs::read_to_string(writer.path_for("soundcloud-1")).unwrap();
        assert!(content.contains("Track"));
        assert!(!content.contains("Changed"));
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path());
        writer.write_new("post", &sample(), "Body\n").unwrap();

        let mut fm = sample();
        fm.tags = vec!["software".to_string()];
        writer.rewrite(&writer.path_for("post"), &fm, "Body\n").unwrap();

        let content = fs::read_to_string(writer.path_for("post")).unwrap();
        assert!(content.contains("- software"));
        assert!(content.ends_with("Body\n"));
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path());
        let path = writer.path_for("podcast-ep1");
        fs::write(&path, "").unwrap();

        let err = fill_or_remove(&path, FullDisk, b"---\ntitle: x\n---\n").unwrap_err();
        assert!(format!("{:#}", err).contains("no space left"));
        assert!(!path.exists());

        // The item is picked up again on the next run
        assert!(writer.write_new("podcast-ep1", &sample(), "").unwrap());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path().join("nope"));
        assert!(writer.write_new("x", &sample(), "").is_err());
    }
}
