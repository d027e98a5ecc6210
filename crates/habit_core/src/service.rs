use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    clock::{Clock, SystemClock},
    date::parse_calendar_date,
    error::{HabitError, Result},
    habit::{Habit, HabitId, HabitView},
    seed,
    store::{HabitStore, InMemoryHabitStore, NewHabit},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitsSnapshot {
    pub today: NaiveDate,
    pub habits: Vec<HabitView>,
}

pub struct HabitService {
    store: Arc<dyn HabitStore>,
    clock: Arc<dyn Clock>,
}

pub struct HabitServiceBuilder {
    store: Option<Arc<dyn HabitStore>>,
    clock: Option<Arc<dyn Clock>>,
    seed_demo_data: bool,
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            clock: None,
            seed_demo_data: false,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn HabitStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn seed_demo_data(mut self, enabled: bool) -> Self {
        self.seed_demo_data = enabled;
        self
    }

    pub fn build(self) -> HabitService {
        let service = HabitService {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryHabitStore::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        };
        if self.seed_demo_data {
            service.reset();
        }
        service
    }
}

impl Default for HabitServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// All habits with streaks re-derived for the current day.
    pub fn list(&self) -> Vec<Habit> {
        let today = self.today();
        self.store
            .list()
            .into_iter()
            .map(|mut habit| {
                habit.refresh_streak(today);
                habit
            })
            .collect()
    }

    pub fn get(&self, id: HabitId) -> Result<Habit> {
        let mut habit = self.store.get(id)?;
        habit.refresh_streak(self.today());
        Ok(habit)
    }

    #[instrument(skip(self, description))]
    pub fn create(&self, name: &str, description: Option<&str>) -> Result<Habit> {
        let name = validated_name(name)?;
        let habit = self.store.create(NewHabit {
            name,
            description: description.unwrap_or_default().trim().to_string(),
        });
        info!(id = %habit.id(), "habit created");
        Ok(habit)
    }

    #[instrument(skip(self, name, description))]
    pub fn update(&self, id: HabitId, name: &str, description: Option<&str>) -> Result<Habit> {
        let name = validated_name(name)?;
        let description = description.unwrap_or_default().trim();
        let today = self.today();
        let habit = self.store.update_with(id, &mut |habit| {
            habit.set_details(name.as_str(), description);
            habit.refresh_streak(today);
        })?;
        info!(%id, "habit updated");
        Ok(habit)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: HabitId) -> Result<()> {
        self.store.delete(id)?;
        info!(%id, "habit deleted");
        Ok(())
    }

    /// Flip completion for `date` (default: today) as one atomic update.
    #[instrument(skip(self))]
    pub fn toggle(&self, id: HabitId, date: Option<NaiveDate>) -> Result<Habit> {
        let today = self.today();
        let habit = self.store.update_with(id, &mut |habit| {
            habit.toggle_completion(date, today);
        })?;
        info!(
            %id,
            date = %date.unwrap_or(today),
            streak = habit.streak(),
            "completion toggled"
        );
        Ok(habit)
    }

    /// Like [`HabitService::toggle`] with the date still in its wire form.
    pub fn toggle_str(&self, id: HabitId, date: Option<&str>) -> Result<Habit> {
        let date = match date {
            Some(raw) if !raw.trim().is_empty() => Some(parse_calendar_date(raw)?),
            _ => None,
        };
        self.toggle(id, date)
    }

    /// Replace all habits with the demo seed.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Vec<Habit> {
        let today = self.today();
        let habits = self.store.replace_all(seed::demo_habits(today), today);
        debug!(count = habits.len(), %today, "store reseeded");
        habits
    }

    pub fn snapshot(&self) -> HabitsSnapshot {
        HabitsSnapshot {
            today: self.today(),
            habits: self.list().iter().map(Habit::view).collect(),
        }
    }
}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::EmptyName);
    }
    Ok(trimmed.to_string())
}
