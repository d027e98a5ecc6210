use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::BadgeTier;
use crate::error::HabitError;
use crate::streak::compute_streak;
use crate::toggle::{toggle, Toggled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(u64);

impl HabitId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(HabitId)
            .map_err(|_| HabitError::InvalidId {
                input: s.to_string(),
            })
    }
}

/// A tracked habit together with its cached streak.
///
/// `streak` is derived from `completed_dates`; it has no setter and is
/// recomputed by every operation that changes the completion set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    id: HabitId,
    name: String,
    description: String,
    completed_dates: BTreeSet<NaiveDate>,
    streak: u32,
}

impl Habit {
    pub fn new(id: HabitId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            completed_dates: BTreeSet::new(),
            streak: 0,
        }
    }

    pub fn with_completions(
        id: HabitId,
        name: impl Into<String>,
        description: impl Into<String>,
        dates: impl IntoIterator<Item = NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let completed_dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let streak = compute_streak(&completed_dates, today);
        Self {
            id,
            name: name.into(),
            description: description.into(),
            completed_dates,
            streak,
        }
    }

    /// Rebuild from the exchanged record. The record's streak is discarded
    /// and derived again from its dates.
    pub fn from_record(record: HabitRecord, today: NaiveDate) -> Self {
        Self::with_completions(
            record.id,
            record.name,
            record.description,
            record.completed_dates,
            today,
        )
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.completed_dates
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn badge(&self) -> BadgeTier {
        BadgeTier::classify(self.streak)
    }

    pub fn set_details(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.name = name.into();
        self.description = description.into();
    }

    /// Flip `date` (or `today`) and recompute the streak against `today`.
    pub fn toggle_completion(&mut self, date: Option<NaiveDate>, today: NaiveDate) -> u32 {
        let Toggled { dates, streak } = toggle(&self.completed_dates, date, today);
        self.completed_dates = dates;
        self.streak = streak;
        streak
    }

    /// Re-derive the cached streak for a new `today`.
    pub fn refresh_streak(&mut self, today: NaiveDate) -> u32 {
        self.streak = compute_streak(&self.completed_dates, today);
        self.streak
    }

    pub fn to_record(&self) -> HabitRecord {
        HabitRecord::from(self)
    }

    pub fn view(&self) -> HabitView {
        let badge = self.badge();
        HabitView {
            record: self.to_record(),
            badge: badge.is_earned().then_some(badge),
            badge_label: badge.label(self.streak),
        }
    }
}

/// Persisted/exchanged shape of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
}

impl From<&Habit> for HabitRecord {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            description: habit.description.clone(),
            completed_dates: habit.completed_dates.iter().copied().collect(),
            streak: habit.streak,
        }
    }
}

/// Record plus the badge the presentation layer shows next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    #[serde(flatten)]
    pub record: HabitRecord,
    pub badge: Option<BadgeTier>,
    pub badge_label: Option<String>,
}
