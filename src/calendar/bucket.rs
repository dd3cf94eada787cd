//! Day bucketing
//!
//! Posts are grouped by the UTC calendar day of their date. A day's bucket
//! holds the slugs of its posts and the union of their tags.

use chrono::{Datelike, NaiveDate};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::content::PostSummary;
use crate::helpers::{day_key, parse_day_key};

/// Posts published on one UTC day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub slugs: Vec<String>,
    /// Union of the posts' tags, in first-seen order
    pub tags: IndexSet<String>,
}

impl DayBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slugs: Vec::new(),
            tags: IndexSet::new(),
        }
    }

    pub fn key(&self) -> String {
        day_key(&self.date)
    }

    pub fn post_count(&self) -> usize {
        self.slugs.len()
    }
}

/// All day buckets of a post list, keyed by date
#[derive(Debug, Clone, Default)]
pub struct DayBuckets {
    days: BTreeMap<NaiveDate, DayBucket>,
}

impl DayBuckets {
    pub fn from_posts(posts: &[PostSummary]) -> Self {
        let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for post in posts {
            let date = post.date.date_naive();
            let bucket = days.entry(date).or_insert_with(|| DayBucket::new(date));
            bucket.slugs.push(post.slug.clone());
            bucket.tags.extend(post.tags.iter().cloned());
        }
        Self { days }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DayBucket> {
        self.days.get(date)
    }

    /// Look up a bucket by its `YYYY-MM-DD` key
    pub fn get_key(&self, key: &str) -> Option<&DayBucket> {
        parse_day_key(key).and_then(|d| self.days.get(&d))
    }

    /// Buckets in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = &DayBucket> {
        self.days.values()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Distinct UTC years with at least one post, most recent first
pub fn active_years(posts: &[PostSummary]) -> Vec<i32> {
    let years: BTreeSet<i32> = posts.iter().map(|p| p.date.year()).collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(iso: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc)
    }

    fn posts() -> Vec<PostSummary> {
        vec![
            PostSummary::new("a", at("2024-03-10T01:00:00Z"), &["music"]),
            // Local evening of the 9th, UTC morning of the 10th
            PostSummary::new("b", at("2024-03-09T22:00:00-05:00"), &["software", "music"]),
            PostSummary::new("c", at("2024-03-09T12:00:00Z"), &[] as &[&str]),
            PostSummary::new("d", at("2023-12-31T23:59:59Z"), &["video"]),
        ]
    }

    #[test]
    fn test_each_post_lands_in_its_utc_day() {
        let posts = posts();
        let buckets = DayBuckets::from_posts(&posts);

        let total: usize = buckets.iter().map(|b| b.post_count()).sum();
        assert_eq!(total, posts.len());

        for post in &posts {
            let key = crate::helpers::date_key(&post.date);
            let bucket = buckets.get_key(&key).unwrap();
            let expected: Vec<&str> = posts
                .iter()
                .filter(|p| crate::helpers::date_key(&p.date) == key)
                .map(|p| p.slug.as_str())
                .collect();
            assert_eq!(bucket.slugs, expected);
        }
    }

    #[test]
    fn test_bucket_tags_are_a_union() {
        let buckets = DayBuckets::from_posts(&posts());
        let day = buckets.get_key("2024-03-10").unwrap();
        assert_eq!(day.slugs, vec!["a", "b"]);
        let tags: Vec<&str> = day.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["music", "software"]);

        let empty = buckets.get_key("2024-03-09").unwrap();
        assert_eq!(empty.slugs, vec!["c"]);
        assert!(empty.tags.is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let buckets = DayBuckets::from_posts(&posts());
        let keys: Vec<String> = buckets.iter().map(|b| b.key()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-03-09", "2024-03-10"]);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.get_key("bogus").is_none());
    }

    #[test]
    fn test_active_years_descending() {
        assert_eq!(active_years(&posts()), vec![2024, 2023]);
        assert!(active_years(&[]).is_empty());
    }
}
