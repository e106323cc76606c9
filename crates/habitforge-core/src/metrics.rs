//! Daily and weekly completion metrics.

use chrono::{Datelike, Duration, NaiveDate};

use crate::habit::Habit;

/// Number of habits completed on `today`.
pub fn completed_today<'a, I>(habits: I, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a Habit>,
{
    habits
        .into_iter()
        .filter(|h| h.is_completed_on(today))
        .count()
}

/// Most recent Monday on or before `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// 1-indexed ISO day of week: Monday = 1 .. Sunday = 7.
pub fn days_passed(today: NaiveDate) -> u32 {
    today.weekday().number_from_monday()
}

/// Percentage of possible completions achieved so far this ISO week.
///
/// `completions / (habit_count * days_passed)`, rounded half away from
/// zero. Completions logged for future dates within the week still count.
pub fn weekly_ratio(habits: &[Habit], today: NaiveDate) -> u32 {
    let start = week_start(today);
    let completions: usize = habits
        .iter()
        .map(|h| h.completed_dates.since(start).count())
        .sum();
    let total_possible = habits.len() as u64 * u64::from(days_passed(today));
    if total_possible == 0 {
        return 0;
    }
    (completions as f64 / total_possible as f64 * 100.0).round() as u32
}
