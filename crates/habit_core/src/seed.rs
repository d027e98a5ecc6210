use chrono::{Duration, NaiveDate};

use crate::store::SeedHabit;

/// Demo habits laid out relative to `today`.
pub fn demo_habits(today: NaiveDate) -> Vec<SeedHabit> {
    vec![
        seed(
            "Morning Exercise",
            "30 minutes of cardio or strength training",
            last_n_days(today, 4),
        ),
        seed(
            "Read Books",
            "Read for at least 20 minutes",
            last_n_days(today, 10),
        ),
        seed(
            "Meditation",
            "10 minutes of mindfulness meditation",
            last_n_days(today, 30),
        ),
        seed("Drink Water", "8 glasses of water daily", Vec::new()),
    ]
}

fn seed(name: &str, description: &str, dates: Vec<NaiveDate>) -> SeedHabit {
    SeedHabit {
        name: name.to_string(),
        description: description.to_string(),
        completed_dates: dates,
    }
}

fn last_n_days(today: NaiveDate, n: i64) -> Vec<NaiveDate> {
    (0..n).map(|offset| today - Duration::days(offset)).collect()
}
