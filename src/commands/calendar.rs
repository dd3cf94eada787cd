//! Print the year calendar and the post timeline

use anyhow::{bail, Result};

use crate::calendar::{Calendar, TimelineLayout, YearGrid};
use crate::content::PostSummary;
use crate::helpers::{count_label, parse_day_key};
use crate::Site;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn load_calendar(site: &Site) -> Result<(Vec<PostSummary>, Calendar)> {
    let posts = site.loader().load_posts()?;
    let summaries: Vec<PostSummary> = posts.iter().map(PostSummary::from).collect();
    let calendar = Calendar::new(&summaries, site.palette(), site.config.calendar.clone());
    Ok((summaries, calendar))
}

/// Print the grid of `year`, or of the year of `date`, or of the latest year
pub fn run(site: &Site, year: Option<i32>, date: Option<&str>, json: bool) -> Result<()> {
    let selected = match date {
        Some(d) => match parse_day_key(d) {
            Some(day) => Some(day),
            None => bail!("Invalid date: {}. Expected YYYY-MM-DD", d),
        },
        None => None,
    };

    let (_, calendar) = load_calendar(site)?;
    let Some(year) = year.or_else(|| calendar.select_year(date)) else {
        println!("No posts yet, nothing to draw.");
        return Ok(());
    };

    let Some(grid) = calendar.grid(year, selected) else {
        bail!("Year {} is out of range", year);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", render_text(&grid));
        if let Some(day) = selected.and_then(|d| calendar.buckets().get(&d)) {
            println!();
            println!("{} ({})", day.key(), count_label(day.post_count(), "post"));
            for slug in &day.slugs {
                println!("  {}", slug);
            }
        }
    }

    Ok(())
}

/// Text rendering of a year grid, two columns per week
///
/// Days with posts show their tag glyph (`■` when no tag resolves), empty
/// days `·`, and days of the neighbouring years are left blank.
pub fn render_text(grid: &YearGrid) -> String {
    let width = grid.week_count() * 2;
    let mut labels = vec![' '; width];
    for tick in &grid.month_ticks {
        let short: Vec<char> = tick.label.chars().take(3).collect();
        let at = tick.week_offset * 2;
        for (i, c) in short.into_iter().enumerate() {
            if let Some(slot) = labels.get_mut(at + i) {
                *slot = c;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", grid.year));
    out.push_str(&format!("    {}\n", labels.into_iter().collect::<String>().trim_end()));

    for (row, name) in WEEKDAYS.iter().enumerate() {
        let mut line = format!("{} ", name);
        for week in &grid.weeks {
            let cell = &week.days[row];
            let glyph = if !cell.in_year {
                "  ".to_string()
            } else if let Some(tag) = &cell.tag {
                tag.emoji.clone()
            } else if cell.post_count > 0 {
                "■ ".to_string()
            } else {
                "· ".to_string()
            };
            line.push_str(&glyph);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Print the timeline layout
pub fn timeline(site: &Site, json: bool) -> Result<()> {
    let (summaries, calendar) = load_calendar(site)?;
    let layout = calendar.timeline(&summaries);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print!("{}", render_timeline(&layout));
    }
    Ok(())
}

pub fn render_timeline(layout: &TimelineLayout) -> String {
    let mut out = format!("Timeline ({}px wide)\n", layout.width);
    for tick in &layout.year_ticks {
        out.push_str(&format!("  {} @ {:.1}px\n", tick.year, tick.left));
    }
    for marker in &layout.markers {
        let glyphs: String = marker.glyphs.iter().map(|g| g.emoji.as_str()).collect();
        out.push_str(&format!(
            "  {:>8.1}px  {}  {} {}\n",
            marker.left,
            marker.date.format("%Y-%m-%d"),
            glyphs,
            marker.slug
        ));
    }
    out
}
