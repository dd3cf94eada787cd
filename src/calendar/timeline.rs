//! Horizontal post timeline
//!
//! Posts are placed along one axis proportionally to their date, each drawn
//! as a stack of the glyphs of its known tags.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::content::PostSummary;
use crate::helpers::TagPalette;

const MIN_WIDTH: f64 = 800.0;
const END_PADDING: f64 = 60.0;
const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineGlyph {
    pub tag: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineMarker {
    pub slug: String,
    pub date: DateTime<Utc>,
    pub left: f64,
    pub glyphs: Vec<TimelineGlyph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTick {
    pub year: i32,
    pub left: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    pub width: f64,
    pub markers: Vec<TimelineMarker>,
    pub year_ticks: Vec<YearTick>,
}

impl TimelineLayout {
    pub fn build(posts: &[PostSummary], palette: &TagPalette, px_per_day: f64) -> Self {
        let mut sorted: Vec<&PostSummary> = posts.iter().collect();
        sorted.sort_by_key(|p| p.date);

        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return Self {
                width: MIN_WIDTH,
                markers: Vec::new(),
                year_ticks: Vec::new(),
            };
        };
        let min_t = first.date;
        let max_t = last.date;

        let days_between = |from: DateTime<Utc>, to: DateTime<Utc>| {
            (to - from).num_milliseconds() as f64 / MS_PER_DAY
        };

        let span_days = days_between(min_t, max_t).max(1.0);
        let width = MIN_WIDTH.max((span_days * px_per_day).ceil() + END_PADDING);

        let markers = sorted
            .iter()
            .filter_map(|post| {
                let glyphs: Vec<TimelineGlyph> = post
                    .tags
                    .iter()
                    .filter(|t| palette.is_known(t))
                    .map(|t| TimelineGlyph {
                        tag: t.clone(),
                        emoji: palette.emoji_for(t).to_string(),
                    })
                    .collect();
                if glyphs.is_empty() {
                    return None;
                }
                Some(TimelineMarker {
                    slug: post.slug.clone(),
                    date: post.date,
                    left: days_between(min_t, post.date) * px_per_day,
                    glyphs,
                })
            })
            .collect();

        // A tick for every January 1 from the first post's year on; the first
        // one sits left of the axis origin unless the first post is on Jan 1.
        let year_ticks = (min_t.year()..=max_t.year())
            .filter_map(|year| {
                let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?.and_utc();
                Some(YearTick {
                    year,
                    left: days_between(min_t, jan1) * px_per_day,
                })
            })
            .collect();

        Self {
            width,
            markers,
            year_ticks,
        }
    }
}
