//! Consecutive-day streaks.
//!
//! Streaks are always recomputed from raw completion dates; nothing is
//! maintained incrementally. A streak is "alive" only if its most recent
//! day is today or yesterday, and it counts back from that day until the
//! first missing calendar day.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::habit::{CompletionLedger, Habit};

/// Streak over any ascending-ordered set of unique dates.
///
/// Returns 0 for an empty set or when the latest date is older than
/// yesterday. Runs before the first gap are never counted.
pub fn streak_from<I>(dates: I, today: NaiveDate) -> u32
where
    I: DoubleEndedIterator<Item = NaiveDate>,
{
    let mut newest_first = dates.rev();
    let Some(latest) = newest_first.next() else {
        return 0;
    };

    let yesterday = today.pred_opt().unwrap_or(today);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut last = latest;
    for date in newest_first {
        if last.signed_duration_since(date).num_days() == 1 {
            streak += 1;
            last = date;
        } else {
            break;
        }
    }
    streak
}

/// Global streak: a day counts once no matter how many habits were done.
pub fn calculate_streak<'a, I>(habits: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a Habit>,
{
    let days: BTreeSet<NaiveDate> = habits
        .into_iter()
        .flat_map(|h| h.completed_dates.iter())
        .collect();
    streak_from(days.into_iter(), today)
}

/// Streak for a single habit.
pub fn calculate_habit_streak(ledger: &CompletionLedger, today: NaiveDate) -> u32 {
    streak_from(ledger.iter(), today)
}
