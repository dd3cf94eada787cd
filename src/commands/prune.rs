//! Drop `externalUrl` from YouTube video posts
//!
//! Those posts embed the video through `youtubeId`, so the outbound link only
//! sends readers off the site.

use anyhow::Result;

use crate::content::PostKind;
use crate::Site;

pub fn prune_external_urls(site: &Site) -> Result<usize> {
    let writer = site.writer();
    let mut updated = 0;

    for mut doc in site.loader().load_documents()? {
        let fm = &doc.front_matter;
        let is_youtube =
            fm.post_kind() == PostKind::Video && (fm.youtube_id.is_some() || doc.stem().starts_with("youtube-"));
        if !is_youtube || fm.external_url.is_none() {
            continue;
        }

        doc.front_matter.external_url = None;
        writer.rewrite(&doc.path, &doc.front_matter, &doc.body)?;
        updated += 1;
    }

    Ok(updated)
}

pub fn run(site: &Site) -> Result<()> {
    let updated = prune_external_urls(site)?;
    println!("Removed externalUrl from {} video posts.", updated);
    Ok(())
}
