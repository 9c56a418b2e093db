//! Plain-text rendering for the planner screens.
//!
//! Pure string builders, kept free of prompt and terminal handling so they
//! can be exercised directly in tests.

use chrono::{Datelike, NaiveDate};

use crate::board::Board;
use crate::calendar::{self, Week};
use crate::models::{Bucket, Feature};

/// Month heading plus one row per week: number, date range and the day
/// strip. Days outside the reference month are bracketed.
pub fn weeks_table(reference: NaiveDate, weeks: &[Week]) -> String {
    let mut out = String::new();
    out.push_str(&calendar::format_month_title(reference));
    out.push('\n');
    for week in weeks {
        out.push_str(&format!(
            "  Week {:<4} {:<15} {}\n",
            calendar::week_number(week.start),
            calendar::format_week_range(week),
            day_strip(week, reference.month()),
        ));
    }
    out
}

/// [`weeks_table`] plus the board summary shown on the month screen.
pub fn month_table(reference: NaiveDate, weeks: &[Week], board: &Board) -> String {
    let mut out = weeks_table(reference, weeks);
    out.push_str(&format!(
        "  {} features on the board ({} new / {} continuing / {} ending)\n",
        board.total(),
        board.len(Bucket::New),
        board.len(Bucket::Continuing),
        board.len(Bucket::Ending),
    ));
    out
}

/// Header line for the week screen.
pub fn week_header(week: &Week) -> String {
    format!(
        "Week {} \u{2022} {}",
        calendar::week_number(week.start),
        calendar::format_week_range(week)
    )
}

/// The feature list for one bucket tab.
pub fn bucket_table(bucket: Bucket, features: &[Feature]) -> String {
    if features.is_empty() {
        return format!("No {} features yet.\n", bucket.as_str());
    }
    let mut out = String::new();
    for feature in features {
        out.push_str(&format!(
            "- {} [{} priority, {}]\n",
            feature.name,
            feature.priority.as_str(),
            feature.status
        ));
        if let Some(description) = &feature.description {
            out.push_str(&format!("    {}\n", description));
        }
    }
    out
}

fn day_strip(week: &Week, month: u32) -> String {
    week.days
        .iter()
        .map(|day| {
            if day.month() == month {
                format!("{:>2}", day.day())
            } else {
                format!("[{}]", day.day())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
