//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::calendar::DayBuckets;
use crate::content::PostSummary;
use crate::helpers::{count_label, TagCloud};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = site.loader().load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}] ({})",
                    post.date_key(),
                    post.title,
                    post.kind,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let cloud = TagCloud::from_posts(&posts, &site.palette());
            println!("Tags ({}):", cloud.entries.len());
            for entry in &cloud.entries {
                println!(
                    "  {} {} ({}, {:?})",
                    entry.emoji, entry.tag, entry.count, entry.weight
                );
            }
        }
        "day" | "days" => {
            let summaries: Vec<PostSummary> = posts.iter().map(PostSummary::from).collect();
            let buckets = DayBuckets::from_posts(&summaries);
            println!("Days ({}):", buckets.len());
            for day in buckets.iter().collect::<Vec<_>>().into_iter().rev() {
                println!(
                    "  {} - {}: {}",
                    day.key(),
                    count_label(day.post_count(), "post"),
                    day.slugs.join(", ")
                );
            }
        }
        "year" | "years" => {
            let mut years: BTreeMap<i32, usize> = BTreeMap::new();
            for post in &posts {
                *years.entry(post.year()).or_insert(0) += 1;
            }
            println!("Years ({}):", years.len());
            for (year, count) in years.into_iter().rev() {
                println!("  {} ({})", year, count_label(count, "post"));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, tags, days, years",
                content_type
            );
        }
    }

    Ok(())
}
