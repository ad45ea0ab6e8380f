//! Progression engine - core gamification logic
//!
//! Owns the five state slices (total XP, stats, unlocked badges, habits,
//! completion history), applies completions, CRUD edits and resets to them,
//! and mirrors every touched slice to the key-value store.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::badges::{BADGES, Badge, BadgeStatus};
use super::history::{self, CompletionHistory, DayStats, completion_percentage};
use super::levels::{LevelProgress, level_from_total_xp, streak_bonus};
use super::streaks::streak_for_habit;
use crate::clock::{Clock, SystemClock};
use crate::domain::{
    Habit, HabitError, HabitId, HabitUpdate, NewHabit, NewStat, Stat, StatError, StatUpdate,
};
use crate::store::{
    KEY_BADGES, KEY_HABITS, KEY_HISTORY, KEY_STATS, KEY_TOTAL_XP, KeyValueStore,
};

/// Rewards from a successful completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReward {
    pub habit_id: HabitId,
    /// Base reward plus streak bonus
    pub xp_gained: u64,
    /// Part of `xp_gained` that came from the streak
    pub streak_bonus: u64,
    /// Streak including the day just completed
    pub new_streak: u32,
    pub leveled_up: bool,
    pub new_level: u32,
    pub new_badge: Option<&'static Badge>,
}

/// Result of trying to complete a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed(CompletionReward),
    /// The habit is already in today's entry; nothing changed
    AlreadyCompleted,
    /// No habit with that id exists; nothing changed
    UnknownHabit,
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn reward(&self) -> Option<&CompletionReward> {
        match self {
            Self::Completed(reward) => Some(reward),
            _ => None,
        }
    }

    /// User-facing summary of the outcome
    pub fn message(&self) -> String {
        match self {
            Self::Completed(r) if r.streak_bonus > 0 => {
                format!("+{} XP (including +{} streak bonus)", r.xp_gained, r.streak_bonus)
            }
            Self::Completed(r) => format!("+{} XP", r.xp_gained),
            Self::AlreadyCompleted => "Already completed today".to_string(),
            Self::UnknownHabit => "Habit not found".to_string(),
        }
    }
}

/// Today's completion count against the habit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayProgress {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

/// A stat together with its position on the level curve
#[derive(Debug, Clone, Serialize)]
pub struct StatSummary {
    #[serde(flatten)]
    pub stat: Stat,
    pub progress: LevelProgress,
}

/// Read-only snapshot of the whole profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSummary {
    pub level: LevelProgress,
    pub stats: Vec<StatSummary>,
    pub total_stat_levels: u32,
    pub habit_count: usize,
    pub today: TodayProgress,
    pub longest_current_streak: u32,
    pub unlocked_badges: Vec<u32>,
}

/// State container for all progression data
pub struct ProgressionEngine<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    total_xp: u64,
    stats: Vec<Stat>,
    unlocked_badges: Vec<u32>,
    habits: Vec<Habit>,
    history: CompletionHistory,
}

impl<S: KeyValueStore> ProgressionEngine<S, SystemClock> {
    /// Load state from `store`, using the local wall clock for "today"
    pub fn open(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ProgressionEngine<S, C> {
    /// Load state from `store`. Missing or unreadable slices fall back to
    /// their defaults.
    pub fn with_clock(store: S, clock: C) -> Self {
        let total_xp = load_slice(&store, KEY_TOTAL_XP, || 0u64);
        let stats = load_records(&store, KEY_STATS, Stat::defaults);
        let stored_badges: Vec<u32> = load_slice(&store, KEY_BADGES, Vec::new);
        let habits = load_records(&store, KEY_HABITS, Vec::new);
        let history = load_slice(&store, KEY_HISTORY, CompletionHistory::new);

        let mut unlocked_badges = Vec::with_capacity(stored_badges.len());
        for level in stored_badges {
            if Badge::is_known_level(level) && !unlocked_badges.contains(&level) {
                unlocked_badges.push(level);
            }
        }

        Self {
            store,
            clock,
            total_xp,
            stats,
            unlocked_badges,
            habits,
            history,
        }
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    pub fn stat(&self, stat_id: &str) -> Option<&Stat> {
        self.stats.iter().find(|s| s.id == stat_id)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    /// Levels of the badges earned so far, in unlock order
    pub fn unlocked_badges(&self) -> &[u32] {
        &self.unlocked_badges
    }

    pub fn history(&self) -> &CompletionHistory {
        &self.history
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ========================================
    // XP & LEVEL QUERIES
    // ========================================

    pub fn level_progress(&self) -> LevelProgress {
        level_from_total_xp(self.total_xp)
    }

    pub fn level(&self) -> u32 {
        self.level_progress().level
    }

    pub fn stat_progress(&self, stat_id: &str) -> Option<LevelProgress> {
        self.stat(stat_id).map(|s| level_from_total_xp(s.xp))
    }

    /// Sum of every stat's level
    pub fn total_stat_levels(&self) -> u32 {
        self.stats
            .iter()
            .map(|s| level_from_total_xp(s.xp).level)
            .sum()
    }

    /// Every badge with its unlocked flag
    pub fn badges(&self) -> Vec<BadgeStatus> {
        BADGES
            .iter()
            .map(|badge| BadgeStatus {
                badge,
                unlocked: self.unlocked_badges.contains(&badge.level),
            })
            .collect()
    }

    // ========================================
    // STREAK & HISTORY QUERIES
    // ========================================

    /// Consecutive completed days before today for `habit_id`
    pub fn streak_for(&self, habit_id: &str) -> u32 {
        streak_for_habit(&self.history, habit_id, self.today())
    }

    /// Highest current streak across existing habits
    pub fn longest_current_streak(&self) -> u32 {
        let today = self.today();
        self.habits
            .iter()
            .map(|h| streak_for_habit(&self.history, &h.id, today))
            .max()
            .unwrap_or(0)
    }

    pub fn today_completions(&self) -> &[HabitId] {
        self.history.completions_on(self.today())
    }

    pub fn completions_on(&self, date: NaiveDate) -> &[HabitId] {
        self.history.completions_on(date)
    }

    pub fn is_completed_today(&self, habit_id: &str) -> bool {
        self.history.contains(self.today(), habit_id)
    }

    pub fn today_progress(&self) -> TodayProgress {
        let completed = self.today_completions().len();
        let total = self.habits.len();
        TodayProgress {
            date: self.today(),
            completed,
            total,
            percentage: completion_percentage(completed, total),
        }
    }

    /// The 7 days ending today, oldest first
    pub fn weekly_stats(&self) -> Vec<DayStats> {
        history::weekly_stats(&self.history, self.habits.len(), self.today())
    }

    /// Every day of the current month
    pub fn monthly_stats(&self) -> Vec<DayStats> {
        history::monthly_stats(&self.history, self.habits.len(), self.today())
    }

    pub fn summary(&self) -> EngineSummary {
        EngineSummary {
            level: self.level_progress(),
            stats: self
                .stats
                .iter()
                .map(|s| StatSummary {
                    stat: s.clone(),
                    progress: level_from_total_xp(s.xp),
                })
                .collect(),
            total_stat_levels: self.total_stat_levels(),
            habit_count: self.habits.len(),
            today: self.today_progress(),
            longest_current_streak: self.longest_current_streak(),
            unlocked_badges: self.unlocked_badges.clone(),
        }
    }

    // ========================================
    // COMPLETION
    // ========================================

    /// Check off a habit for today and award its XP
    pub fn complete_habit(&mut self, habit_id: &str) -> CompletionOutcome {
        let today = self.today();

        let Some(habit) = self.habit(habit_id).cloned() else {
            debug!(habit_id, "Ignoring completion of unknown habit");
            return CompletionOutcome::UnknownHabit;
        };

        if self.history.contains(today, habit_id) {
            debug!(habit_id, %today, "Habit already completed today");
            return CompletionOutcome::AlreadyCompleted;
        }

        let streak = streak_for_habit(&self.history, habit_id, today);
        let bonus = streak_bonus(habit.xp_reward, streak);
        let gained = u64::from(habit.xp_reward) + bonus;

        let old_level = self.level();
        self.total_xp = self.total_xp.saturating_add(gained);
        let new_level = self.level();
        let leveled_up = new_level > old_level;
        persist(&mut self.store, KEY_TOTAL_XP, &self.total_xp);

        if !habit.linked_stats.is_empty() {
            // Floor split; the remainder is dropped
            let per_stat = gained / habit.linked_stats.len() as u64;
            for stat in self.stats.iter_mut().filter(|s| habit.feeds(&s.id)) {
                stat.xp = stat.xp.saturating_add(per_stat);
            }
            persist(&mut self.store, KEY_STATS, &self.stats);
        }

        self.history.record(today, habit_id);
        persist(&mut self.store, KEY_HISTORY, &self.history);

        let new_badge = if leveled_up {
            self.unlock_badge_for(new_level)
        } else {
            None
        };

        if leveled_up {
            info!(old_level, new_level, "Level up");
        }
        debug!(habit_id, gained, bonus, streak, "Habit completed");

        CompletionOutcome::Completed(CompletionReward {
            habit_id: habit.id,
            xp_gained: gained,
            streak_bonus: bonus,
            new_streak: streak + 1,
            leveled_up,
            new_level,
            new_badge,
        })
    }

    fn unlock_badge_for(&mut self, level: u32) -> Option<&'static Badge> {
        let badge = Badge::for_level(level)?;
        if self.unlocked_badges.contains(&badge.level) {
            return None;
        }

        self.unlocked_badges.push(badge.level);
        persist(&mut self.store, KEY_BADGES, &self.unlocked_badges);
        info!(level = badge.level, name = badge.name, "Badge unlocked");
        Some(badge)
    }

    /// Remove `habit_id` from today's entry.
    ///
    /// XP, stat XP, level and badges earned by the completion are kept.
    /// Returns whether the habit was checked off today.
    pub fn uncomplete_habit(&mut self, habit_id: &str) -> bool {
        let today = self.today();
        let removed = self.history.remove(today, habit_id);
        if removed {
            persist(&mut self.store, KEY_HISTORY, &self.history);
            debug!(habit_id, %today, "Habit unchecked");
        }
        removed
    }

    // ========================================
    // HABIT CRUD
    // ========================================

    pub fn add_habit(&mut self, new: NewHabit) -> Result<Habit, HabitError> {
        let id = next_id("habit", |id| self.habit(id).is_some());
        let habit = new.build(id, self.clock.now())?;

        self.habits.push(habit.clone());
        persist(&mut self.store, KEY_HABITS, &self.habits);
        debug!(habit_id = %habit.id, name = %habit.name, "Habit added");
        Ok(habit)
    }

    /// Edit a habit. `Ok(None)` if no habit has that id.
    pub fn update_habit(
        &mut self,
        habit_id: &str,
        update: HabitUpdate,
    ) -> Result<Option<Habit>, HabitError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == habit_id) else {
            debug!(habit_id, "Ignoring update of unknown habit");
            return Ok(None);
        };

        update.apply_to(habit)?;
        let updated = habit.clone();
        persist(&mut self.store, KEY_HABITS, &self.habits);
        Ok(Some(updated))
    }

    /// Delete a habit. History entries that reference it are kept.
    pub fn delete_habit(&mut self, habit_id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != habit_id);
        let removed = self.habits.len() != before;
        if removed {
            persist(&mut self.store, KEY_HABITS, &self.habits);
            debug!(habit_id, "Habit deleted");
        }
        removed
    }

    // ========================================
    // STAT CRUD
    // ========================================

    pub fn add_stat(&mut self, new: NewStat) -> Result<Stat, StatError> {
        let id = next_id("stat", |id| self.stat(id).is_some());
        let stat = new.build(id)?;

        self.stats.push(stat.clone());
        persist(&mut self.store, KEY_STATS, &self.stats);
        debug!(stat_id = %stat.id, name = %stat.name, "Stat added");
        Ok(stat)
    }

    /// Edit a stat's name or color. `Ok(None)` if no stat has that id.
    pub fn update_stat(
        &mut self,
        stat_id: &str,
        update: StatUpdate,
    ) -> Result<Option<Stat>, StatError> {
        let Some(stat) = self.stats.iter_mut().find(|s| s.id == stat_id) else {
            debug!(stat_id, "Ignoring update of unknown stat");
            return Ok(None);
        };

        update.apply_to(stat)?;
        let updated = stat.clone();
        persist(&mut self.store, KEY_STATS, &self.stats);
        Ok(Some(updated))
    }

    /// Delete a stat and unlink it from every habit
    pub fn delete_stat(&mut self, stat_id: &str) -> bool {
        let before = self.stats.len();
        self.stats.retain(|s| s.id != stat_id);
        let removed = self.stats.len() != before;
        if removed {
            persist(&mut self.store, KEY_STATS, &self.stats);
        }

        let mut unlinked = 0usize;
        for habit in &mut self.habits {
            if habit.unlink_stat(stat_id) {
                unlinked += 1;
            }
        }
        if unlinked > 0 {
            persist(&mut self.store, KEY_HABITS, &self.habits);
        }

        if removed {
            debug!(stat_id, unlinked, "Stat deleted");
        }
        removed
    }

    // ========================================
    // RESET
    // ========================================

    /// Restore every slice to its initial value
    pub fn reset(&mut self) {
        self.total_xp = 0;
        self.stats = Stat::defaults();
        self.unlocked_badges.clear();
        self.habits.clear();
        self.history = CompletionHistory::new();

        persist(&mut self.store, KEY_TOTAL_XP, &self.total_xp);
        persist(&mut self.store, KEY_STATS, &self.stats);
        persist(&mut self.store, KEY_BADGES, &self.unlocked_badges);
        persist(&mut self.store, KEY_HABITS, &self.habits);
        persist(&mut self.store, KEY_HISTORY, &self.history);
        info!("All progression data reset");
    }
}

/// Read one slice, falling back to `default` when it is absent or unreadable
fn load_slice<S, T, F>(store: &S, key: &str, default: F) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(key, error = %e, "Stored value has unexpected shape, using default");
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read from store, using default");
            default()
        }
    }
}

/// Read a list slice record by record. Records that fail to parse are
/// skipped so the rest of the list survives the next write.
fn load_records<S, T, F>(store: &S, key: &str, default: F) -> Vec<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match store.get(key) {
        Ok(Some(Value::Array(items))) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key, index, error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect(),
        Ok(Some(_)) => {
            warn!(key, "Stored value is not a list, using default");
            default()
        }
        Ok(None) => default(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read from store, using default");
            default()
        }
    }
}

/// Mirror one slice to the store. Failures only cost durability.
fn persist<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let value = match serde_json::to_value(value) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to serialize state");
            return;
        }
    };

    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "Failed to write to store");
    }
}

/// Get current timestamp in milliseconds
fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Time-based id, bumped until `taken` rejects it
fn next_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = now_ms();
    loop {
        let id = format!("{}_{}", prefix, stamp);
        if !taken(&id) {
            return id;
        }
        stamp += 1;
    }
}
