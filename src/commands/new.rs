//! Create a new post

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use crate::content::{FrontMatter, PostKind};
use crate::helpers::iso_string;
use crate::Site;

/// Options for a hand-written post
#[derive(Debug, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub kind: Option<PostKind>,
    pub tags: &'a [String],
    pub external_url: Option<&'a str>,
    /// File stem; the slugified title when absent
    pub slug: Option<&'a str>,
}

/// Create the post file and return its path
pub fn create_post(site: &Site, post: &NewPost) -> Result<PathBuf> {
    let slug = match post.slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(post.title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", post.title);
    }

    let front_matter = FrontMatter {
        title: Some(post.title.to_string()),
        date: Some(iso_string(&Utc::now())),
        kind: post
            .kind
            .filter(|k| *k != PostKind::Article)
            .map(|k| k.as_str().to_string()),
        tags: post.tags.to_vec(),
        external_url: post.external_url.map(str::to_string),
        ..Default::default()
    };

    let writer = site.writer();
    writer.ensure_dir()?;
    let path = writer.path_for(&slug);

    if !writer.write_new(&slug, &front_matter, "")? {
        anyhow::bail!("File already exists: {:?}", path);
    }

    Ok(path)
}

/// Run the new command
pub fn run(site: &Site, post: &NewPost) -> Result<()> {
    let path = create_post(site, post)?;
    println!("Created: {:?}", path);
    Ok(())
}
