//! Core domain types for habitforge

mod habit;
mod stat;

pub use habit::{
    DEFAULT_HABIT_ICON, DEFAULT_XP_REWARD, Habit, HabitError, HabitId, HabitUpdate,
    MAX_XP_REWARD, MIN_XP_REWARD, NewHabit,
};
pub use stat::{DEFAULT_STAT_COLOR, NewStat, Stat, StatError, StatId, StatUpdate};
