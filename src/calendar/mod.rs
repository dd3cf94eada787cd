//! Calendar layout data
//!
//! Everything here is derived from a slice of [`PostSummary`] records and is
//! serializable, so a renderer can draw the year grid and the timeline
//! without knowing how posts are stored.

mod bucket;
mod grid;
mod timeline;

pub use bucket::{active_years, DayBucket, DayBuckets};
pub use grid::{
    week_count, week_start, year_end, year_start_week, DayCell, MonthTick, WeekColumn, YearGrid,
};
pub use timeline::{TimelineGlyph, TimelineLayout, TimelineMarker, YearTick};

use chrono::NaiveDate;

use crate::config::CalendarConfig;
use crate::content::PostSummary;
use crate::helpers::{parse_day_key, TagPalette};

/// Bucketed posts plus the data needed to lay out any of their years
pub struct Calendar {
    buckets: DayBuckets,
    years: Vec<i32>,
    palette: TagPalette,
    config: CalendarConfig,
}

impl Calendar {
    pub fn new(posts: &[PostSummary], palette: TagPalette, config: CalendarConfig) -> Self {
        Self {
            buckets: DayBuckets::from_posts(posts),
            years: active_years(posts),
            palette,
            config,
        }
    }

    /// Years with posts, most recent first
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn buckets(&self) -> &DayBuckets {
        &self.buckets
    }

    pub fn palette(&self) -> &TagPalette {
        &self.palette
    }

    /// The year to show for an optional selected `YYYY-MM-DD` date
    ///
    /// A selected date picks its own year, and one without a readable year
    /// draws nothing. Without a selection the most recent year with posts is
    /// used. `None` means there is nothing to draw.
    pub fn select_year(&self, selected_date: Option<&str>) -> Option<i32> {
        match selected_date {
            Some(d) => d.get(..4).and_then(|y| y.parse().ok()),
            None => self.years.first().copied(),
        }
    }

    pub fn grid(&self, year: i32, selected: Option<NaiveDate>) -> Option<YearGrid> {
        YearGrid::build(year, &self.buckets, &self.palette, selected, &self.config)
    }

    /// Grid for the page of a selected date, if any
    pub fn grid_for_selection(&self, selected_date: Option<&str>) -> Option<YearGrid> {
        let year = self.select_year(selected_date)?;
        let selected = selected_date.and_then(parse_day_key);
        self.grid(year, selected)
    }

    pub fn timeline(&self, posts: &[PostSummary]) -> TimelineLayout {
        TimelineLayout::build(posts, &self.palette, self.config.timeline_px_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn posts() -> Vec<PostSummary> {
        vec![
            PostSummary::new("a", Utc.with_ymd_and_hms(2022, 4, 2, 8, 0, 0).unwrap(), &["music"]),
            PostSummary::new("b", Utc.with_ymd_and_hms(2024, 7, 4, 8, 0, 0).unwrap(), &["video"]),
        ]
    }

    fn calendar(posts: &[PostSummary]) -> Calendar {
        Calendar::new(posts, TagPalette::default(), CalendarConfig::default())
    }

    #[test]
    fn test_select_year() {
        let cal = calendar(&posts());
        assert_eq!(cal.years(), &[2024, 2022]);
        assert_eq!(cal.select_year(None), Some(2024));
        assert_eq!(cal.select_year(Some("2022-04-02")), Some(2022));
        // A selected date wins even for a year without posts
        assert_eq!(cal.select_year(Some("2019-01-01")), Some(2019));
        assert_eq!(cal.select_year(Some("xx")), None);
        assert!(cal.grid_for_selection(Some("abcd-01-01")).is_none());
    }

    #[test]
    fn test_no_posts_no_calendar() {
        let cal = calendar(&[]);
        assert_eq!(cal.select_year(None), None);
        assert!(cal.grid_for_selection(None).is_none());
    }

    #[test]
    fn test_grid_for_selection_marks_day() {
        let cal = calendar(&posts());
        let grid = cal.grid_for_selection(Some("2022-04-02")).unwrap();
        assert_eq!(grid.year, 2022);
        let selected: Vec<&DayCell> = grid.cells().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "2022-04-02");
        assert_eq!(selected[0].tag.as_ref().unwrap().emoji, "🎵");
    }
}
