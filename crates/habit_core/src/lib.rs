pub mod badge;
pub mod clock;
pub mod date;
pub mod error;
pub mod habit;
pub mod seed;
pub mod service;
pub mod store;
pub mod streak;
pub mod toggle;

pub use crate::badge::BadgeTier;
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::error::HabitError;
pub use crate::habit::{Habit, HabitId, HabitRecord, HabitView};
pub use crate::service::{HabitService, HabitServiceBuilder, HabitsSnapshot};
pub use crate::store::{HabitStore, InMemoryHabitStore, NewHabit};
