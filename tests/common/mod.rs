//! Shared test utilities for progression tests

#![allow(dead_code)]

use chrono::{Days, NaiveDate};

use habitforge::{
    Habit, KeyValueStore, ManualClock, MemoryStore, NewHabit, ProgressionEngine, StoreError,
};

/// Fixed "today" used by most tests (a Monday)
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
}

pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).expect("date in range")
}

/// Engine over an in-memory store with the clock pinned to `today()`
pub fn memory_engine() -> ProgressionEngine<MemoryStore, ManualClock> {
    ProgressionEngine::with_clock(MemoryStore::new(), ManualClock::new(today()))
}

pub fn add_habit<S: KeyValueStore>(
    engine: &mut ProgressionEngine<S, ManualClock>,
    name: &str,
    xp: u32,
    stats: &[&str],
) -> Habit {
    engine
        .add_habit(NewHabit::new(name).xp_reward(xp).linked_stats(stats.iter().copied()))
        .expect("Failed to add habit")
}

/// Complete `habit_id` on each of the given past days, then return to `today()`
pub fn complete_on_days<S: KeyValueStore>(
    engine: &mut ProgressionEngine<S, ManualClock>,
    habit_id: &str,
    days_back: &[u64],
) {
    for back in days_back {
        engine.clock().set(days_before(today(), *back));
        assert!(engine.complete_habit(habit_id).is_success());
    }
    engine.clock().set(today());
}

/// Store whose reads and writes always fail
#[derive(Debug, Default)]
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    fn set(&mut self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }
}
