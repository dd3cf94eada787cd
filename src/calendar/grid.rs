//! Year-grid layout
//!
//! A year is drawn as columns of weeks, Sunday at the top. The first column
//! starts on the Sunday on or before January 1 and columns are added until
//! December 31 is covered, so boundary weeks contain days of the adjacent
//! years. Those cells are kept (faded) to keep the columns rectangular.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::DayBuckets;
use crate::config::CalendarConfig;
use crate::helpers::{day_key, ResolvedTag, TagPalette};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The Sunday on or before January 1 of `year`
pub fn year_start_week(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(week_start)
}

/// The last instant of December 31 of `year`, in UTC
pub fn year_end(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 12, 31)?
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc())
}

/// Number of week columns needed to cover `year`
///
/// Counts the week starts that fall on or before the year's last instant.
pub fn week_count(year: i32) -> Option<usize> {
    let start = year_start_week(year)?;
    let end = year_end(year)?.date_naive();
    let span = (end - start).num_days();
    Some((span / 7 + 1) as usize)
}

/// One day square of the grid
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    /// False for the neighbouring-year days of boundary weeks
    pub in_year: bool,
    pub post_count: usize,
    pub slugs: Vec<String>,
    pub tag: Option<ResolvedTag>,
    pub color_class: String,
    pub selected: bool,
    /// Day page link, only for days with posts
    pub href: Option<String>,
    pub opacity: f32,
    /// Hover text, e.g. `2024-01-15 • 2 post(s)`
    pub title: String,
}

/// Seven cells, Sunday through Saturday
#[derive(Debug, Clone, Serialize)]
pub struct WeekColumn {
    pub index: usize,
    pub start: NaiveDate,
    pub days: Vec<DayCell>,
}

/// A month label above the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTick {
    /// 1-based month
    pub month: u32,
    pub label: String,
    /// Week column of the month's first day, counted from the year's first column
    pub week_offset: usize,
    /// Horizontal offset in pixels
    pub left: u32,
}

/// Layout data for one year of the calendar
#[derive(Debug, Clone, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub start: NaiveDate,
    pub weeks: Vec<WeekColumn>,
    pub month_ticks: Vec<MonthTick>,
    pub track_width: u32,
    pub track_height: u32,
    /// Vertical offset of the first row of cells
    pub grid_top: u32,
}

impl YearGrid {
    /// Lay out `year`, marking `selected` if it falls inside the grid
    ///
    /// Returns `None` for years outside the supported date range.
    pub fn build(
        year: i32,
        buckets: &DayBuckets,
        palette: &TagPalette,
        selected: Option<NaiveDate>,
        config: &CalendarConfig,
    ) -> Option<Self> {
        let start = year_start_week(year)?;
        let week_total = week_count(year)?;

        let weeks = (0..week_total)
            .map(|w| {
                let week_first = start + Duration::weeks(w as i64);
                let days = (0..7)
                    .map(|d| {
                        let date = week_first + Duration::days(d);
                        build_cell(date, year, buckets, palette, selected, config)
                    })
                    .collect();
                WeekColumn {
                    index: w,
                    start: week_first,
                    days,
                }
            })
            .collect();

        let month_ticks = month_ticks(year, start, config)?;

        let cols = week_total as u32;
        let track_width = cols * config.day_square + cols.saturating_sub(1) * config.gap;
        let grid_top = config.years_row + config.label_row;
        let track_height = grid_top + 7 * config.day_square + 6 * config.gap;

        Some(Self {
            year,
            start,
            weeks,
            month_ticks,
            track_width,
            track_height,
            grid_top,
        })
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }
}

fn build_cell(
    date: NaiveDate,
    year: i32,
    buckets: &DayBuckets,
    palette: &TagPalette,
    selected: Option<NaiveDate>,
    config: &CalendarConfig,
) -> DayCell {
    let key = day_key(&date);
    let bucket = buckets.get(&date);
    let in_year = date.year() == year;

    let tag = bucket.and_then(|b| palette.resolve(&b.tags));
    let color_class = tag
        .as_ref()
        .map(|t| palette.color_class(&t.tag))
        .unwrap_or_default();

    let title = match bucket {
        Some(b) => format!("{} • {} post(s)", key, b.post_count()),
        None => key.clone(),
    };

    DayCell {
        in_year,
        post_count: bucket.map(|b| b.post_count()).unwrap_or(0),
        slugs: bucket.map(|b| b.slugs.clone()).unwrap_or_default(),
        tag,
        color_class,
        selected: selected == Some(date),
        href: bucket.map(|_| format!("/day/{}", key)),
        opacity: if in_year { 1.0 } else { config.out_of_year_opacity },
        title,
        date,
        key,
    }
}

fn month_ticks(year: i32, start: NaiveDate, config: &CalendarConfig) -> Option<Vec<MonthTick>> {
    let short_year = year.rem_euclid(100);
    (1..=12u32)
        .map(|month| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let week_offset = ((week_start(first) - start).num_days() / 7) as usize;
            Some(MonthTick {
                month,
                label: format!("{} '{:02}", MONTH_LABELS[month as usize - 1], short_year),
                week_offset,
                left: week_offset as u32 * (config.day_square + config.gap),
            })
        })
        .collect()
}
