//! Static route table
//!
//! Lists every page the site renders and the posts each one shows. The
//! renderer walks this table; nothing here produces markup.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::calendar::active_years;
use crate::content::{Post, PostSummary};
use crate::helpers::{count_label, date_key, encode_segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Home,
    Post,
    Tag,
    Day,
    Year,
}

/// One rendered page
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub kind: RouteKind,
    pub path: String,
    pub title: String,
    /// Slugs of the posts on the page, newest first
    pub posts: Vec<String>,
    /// Year whose calendar the page shows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Route {
    /// e.g. `3 posts`
    pub fn post_count_label(&self) -> String {
        count_label(self.posts.len(), "post")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn build(posts: &[Post]) -> Self {
        Self::build_at(posts, Utc::now())
    }

    /// Build with an explicit clock, used for the empty-site home year
    pub fn build_at(posts: &[Post], now: DateTime<Utc>) -> Self {
        let mut sorted: Vec<&Post> = posts.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        let summaries: Vec<PostSummary> = sorted.iter().map(|p| p.summary_record()).collect();
        let years = active_years(&summaries);
        let home_year = years.first().copied().unwrap_or_else(|| now.year());

        let mut routes = Vec::new();

        routes.push(Route {
            kind: RouteKind::Home,
            path: "/".to_string(),
            title: home_year.to_string(),
            posts: slugs_where(&sorted, |p| p.year() == home_year),
            year: Some(home_year),
        });

        for post in &sorted {
            routes.push(Route {
                kind: RouteKind::Post,
                path: format!("/posts/{}", encode_segment(&post.slug)),
                title: post.title.clone(),
                posts: vec![post.slug.clone()],
                year: Some(post.year()),
            });
        }

        let mut tags: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for post in &sorted {
            for tag in &post.tags {
                if tag.trim().is_empty() {
                    continue;
                }
                let slugs = tags.entry(tag.as_str()).or_default();
                if !slugs.contains(&post.slug) {
                    slugs.push(post.slug.clone());
                }
            }
        }
        for (tag, slugs) in tags {
            routes.push(Route {
                kind: RouteKind::Tag,
                path: format!("/tags/{}", encode_segment(tag)),
                title: format!("#{}", tag),
                posts: slugs,
                year: None,
            });
        }

        let mut days: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for post in &sorted {
            days.entry(date_key(&post.date))
                .or_default()
                .push(post.slug.clone());
        }
        for (key, slugs) in days.into_iter().rev() {
            let year = key.get(..4).and_then(|y| y.parse().ok());
            routes.push(Route {
                kind: RouteKind::Day,
                path: format!("/day/{}", key),
                title: key,
                posts: slugs,
                year,
            });
        }

        for year in years {
            routes.push(Route {
                kind: RouteKind::Year,
                path: format!("/year/{}", year),
                title: year.to_string(),
                posts: slugs_where(&sorted, |p| p.year() == year),
                year: Some(year),
            });
        }

        Self { routes }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn of_kind(&self, kind: RouteKind) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn slugs_where(posts: &[&Post], keep: impl Fn(&Post) -> bool) -> Vec<String> {
    posts
        .iter()
        .filter(|p| keep(**p))
        .map(|p| p.slug.clone())
        .collect()
}
