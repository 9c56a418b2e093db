//! Week arithmetic for the planning calendar.
//!
//! Everything here is pure `NaiveDate` math: weeks are anchored on
//! Saturday, week numbers are a linear offset from a fixed baseline week,
//! and month stepping is plain calendar rollover. Weeks are derived data,
//! recomputed on demand and discarded on navigation.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// First day of every planning week.
pub const WEEK_START: Weekday = Weekday::Sat;

/// Week number carried by the baseline week.
const BASELINE_WEEK_NUMBER: i64 = 22;

/// Upper bound on weeks emitted for one month. Guards the enumeration loop
/// against date-arithmetic mistakes; a real month needs at most six.
const MAX_WEEKS_PER_MONTH: usize = 7;

/// Start of the week the numbering scheme is anchored to (a Saturday).
fn baseline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 28).expect("baseline date is valid")
}

/// A single calendar week, Saturday through Friday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub start: NaiveDate,
    /// Always `start + 6 days`.
    pub end: NaiveDate,
    /// The 7 consecutive dates from `start`, in order.
    pub days: Vec<NaiveDate>,
}

impl Week {
    fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Days::new(6),
            days: (0..7).map(|offset| start + Days::new(offset)).collect(),
        }
    }
}

/// The most recent week start on or before `date`.
pub fn week_start_on_or_before(date: NaiveDate) -> NaiveDate {
    // Days elapsed since the last Saturday; Saturday itself maps to 0.
    let since_start = (date.weekday().num_days_from_sunday() + 1) % 7;
    date - Days::new(u64::from(since_start))
}

/// Enumerate the weeks shown for `reference`'s month.
///
/// Starts at the first Saturday on or before the 1st and walks forward in
/// 7-day steps while the cursor is still inside the month or has not yet
/// passed its last day, so the partial leading and trailing weeks both
/// appear. Bounded at [`MAX_WEEKS_PER_MONTH`] entries.
pub fn weeks_in_month(reference: NaiveDate) -> Vec<Week> {
    let first = reference.with_day(1).expect("every month has a day 1");
    let last = first + Months::new(1) - Days::new(1);

    let mut weeks = Vec::new();
    let mut cursor = week_start_on_or_before(first);
    while cursor <= last || cursor.month() == reference.month() {
        weeks.push(Week::starting(cursor));
        if weeks.len() >= MAX_WEEKS_PER_MONTH {
            break;
        }
        cursor = cursor + Days::new(7);
    }
    weeks
}

/// Sequential number of the week starting at `week_start`.
///
/// Numbers are a linear offset from the baseline: 2025-06-28 carries
/// number 22 and every 7 days forward adds one. The division rounds rather
/// than truncates, so an input that drifted off a week boundary by less
/// than half a week still lands on the nearest number.
pub fn week_number(week_start: NaiveDate) -> i64 {
    let days = (week_start - baseline()).num_days();
    BASELINE_WEEK_NUMBER + (days as f64 / 7.0).round() as i64
}

/// Step `reference` forward or back by whole months.
///
/// Rollover is calendar-correct (December + 1 lands in January of the next
/// year); the day clamps when the target month is shorter (Jan 31 + 1
/// month is Feb 28).
pub fn step_month(reference: NaiveDate, step: i32) -> NaiveDate {
    let months = Months::new(step.unsigned_abs());
    if step >= 0 {
        reference + months
    } else {
        reference - months
    }
}

/// "Jun 7 - Jun 13" style label for a week.
pub fn format_week_range(week: &Week) -> String {
    format!(
        "{} - {}",
        week.start.format("%b %-d"),
        week.end.format("%b %-d")
    )
}

/// "June 2025" style heading for the month containing `reference`.
pub fn format_month_title(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}
