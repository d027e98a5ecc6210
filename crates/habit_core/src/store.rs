use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::error::{HabitError, Result};
use crate::habit::{Habit, HabitId};

/// Fields supplied when a habit is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
}

/// Repository of habits. Implementations must make `update_with` atomic per
/// record so concurrent toggles of the same habit never lose a write.
pub trait HabitStore: Send + Sync {
    fn list(&self) -> Vec<Habit>;
    fn get(&self, id: HabitId) -> Result<Habit>;
    fn create(&self, habit: NewHabit) -> Habit;
    fn delete(&self, id: HabitId) -> Result<()>;

    /// Run `apply` against the stored record while holding it exclusively.
    fn update_with(&self, id: HabitId, apply: &mut dyn FnMut(&mut Habit)) -> Result<Habit>;

    /// Drop every habit and restart id allocation, then insert `seed` in order
    /// with streaks derived for `today`.
    fn replace_all(&self, seed: Vec<SeedHabit>, today: NaiveDate) -> Vec<Habit>;

    fn update_details(&self, id: HabitId, name: &str, description: &str) -> Result<Habit> {
        self.update_with(id, &mut |habit| habit.set_details(name, description))
    }
}

/// Seed entry; the store assigns the id.
#[derive(Debug, Clone)]
pub struct SeedHabit {
    pub name: String,
    pub description: String,
    pub completed_dates: Vec<NaiveDate>,
}

#[derive(Debug, Default)]
struct Inner {
    habits: BTreeMap<HabitId, Habit>,
    next_id: u64,
}

impl Inner {
    fn allocate_id(&mut self) -> HabitId {
        self.next_id += 1;
        HabitId::new(self.next_id)
    }
}

/// Process-local store behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryHabitStore {
    inner: RwLock<Inner>,
}

impl InMemoryHabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HabitStore for InMemoryHabitStore {
    fn list(&self) -> Vec<Habit> {
        self.inner.read().habits.values().cloned().collect()
    }

    fn get(&self, id: HabitId) -> Result<Habit> {
        self.inner
            .read()
            .habits
            .get(&id)
            .cloned()
            .ok_or(HabitError::NotFound(id))
    }

    fn create(&self, habit: NewHabit) -> Habit {
        let mut inner = self.inner.write();
        let id = inner.allocate_id();
        let created = Habit::new(id, habit.name, habit.description);
        inner.habits.insert(id, created.clone());
        created
    }

    fn delete(&self, id: HabitId) -> Result<()> {
        self.inner
            .write()
            .habits
            .remove(&id)
            .map(|_| ())
            .ok_or(HabitError::NotFound(id))
    }

    fn update_with(&self, id: HabitId, apply: &mut dyn FnMut(&mut Habit)) -> Result<Habit> {
        let mut inner = self.inner.write();
        let habit = inner.habits.get_mut(&id).ok_or(HabitError::NotFound(id))?;
        apply(habit);
        Ok(habit.clone())
    }

    fn replace_all(&self, seed: Vec<SeedHabit>, today: NaiveDate) -> Vec<Habit> {
        let mut inner = self.inner.write();
        *inner = Inner::default();
        let mut created = Vec::with_capacity(seed.len());
        for entry in seed {
            let id = inner.allocate_id();
            let habit = Habit::with_completions(
                id,
                entry.name,
                entry.description,
                entry.completed_dates,
                today,
            );
            inner.habits.insert(id, habit.clone());
            created.push(habit);
        }
        created
    }
}
