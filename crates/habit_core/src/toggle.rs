//! Completion toggling: flip one date in a completion set and re-derive the
//! streak from the result.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::streak::compute_streak;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub dates: BTreeSet<NaiveDate>,
    pub streak: u32,
}

/// Flip `date` in `completed`, defaulting to `today` when no date is given.
///
/// The returned streak is always anchored to `today`, not to the toggled
/// date, so marking or unmarking a past day still reports the present streak.
pub fn toggle(
    completed: &BTreeSet<NaiveDate>,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Toggled {
    let date = date.unwrap_or(today);
    let mut dates = completed.clone();
    if !dates.remove(&date) {
        dates.insert(date);
    }
    let streak = compute_streak(&dates, today);
    Toggled { dates, streak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn set(offsets: &[i64]) -> BTreeSet<NaiveDate> {
        offsets
            .iter()
            .map(|offset| today() - Duration::days(*offset))
            .collect()
    }

    #[test]
    fn marking_and_unmarking_today() {
        let first = toggle(&BTreeSet::new(), None, today());
        assert_eq!(first.dates, set(&[0]));
        assert_eq!(first.streak, 1);

        let second = toggle(&first.dates, Some(today()), today());
        assert!(second.dates.is_empty());
        assert_eq!(second.streak, 0);
    }

    #[test]
    fn double_toggle_restores_the_set() {
        let original = set(&[0, 1, 4, 9]);
        for offset in [0, 2, 4, 30] {
            let date = today() - Duration::days(offset);
            let once = toggle(&original, Some(date), today());
            let twice = toggle(&once.dates, Some(date), today());
            assert_eq!(twice.dates, original);
        }
    }

    #[test]
    fn filling_a_past_gap_extends_the_streak() {
        let before = set(&[0, 1, 3, 4]);
        let after = toggle(&before, Some(today() - Duration::days(2)), today());
        assert_eq!(after.streak, 5);
    }

    #[test]
    fn removing_yesterday_truncates_to_today() {
        let after = toggle(
            &set(&[0, 1, 2]),
            Some(today() - Duration::days(1)),
            today(),
        );
        assert_eq!(after.dates, set(&[0, 2]));
        assert_eq!(after.streak, 1);
    }

    #[test]
    fn streak_is_anchored_to_today_not_the_toggled_date() {
        let after = toggle(
            &BTreeSet::new(),
            Some(today() - Duration::days(10)),
            today(),
        );
        assert_eq!(after.dates, set(&[10]));
        assert_eq!(after.streak, 0);
    }

    #[test]
    fn caller_set_is_left_alone() {
        let original = set(&[0]);
        let _ = toggle(&original, None, today());
        assert_eq!(original, set(&[0]));
    }
}
