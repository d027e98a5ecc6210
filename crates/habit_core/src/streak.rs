//! Consecutive-day streak derivation.
//!
//! A streak is anchored to `today`: it only survives while the most recent
//! completion is today or yesterday, and it counts back through days that
//! follow each other without a gap.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::days_between;

/// Length of the current streak for `completed` as seen from `today`.
///
/// Input order and duplicates do not matter; the caller's collection is only
/// borrowed.
pub fn compute_streak<'a, I>(completed: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = completed.into_iter().copied().collect();
    let mut newest_first = unique.iter().rev();

    let Some(&most_recent) = newest_first.next() else {
        return 0;
    };
    if days_between(most_recent, today) > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut previous = most_recent;
    for &date in newest_first {
        if days_between(date, previous) != 1 {
            break;
        }
        streak += 1;
        previous = date;
    }
    streak
}
