//! Progression system: XP, Levels, Streaks, Stats and Badges
//!
//! Converts habit completions into XP, streak bonuses, per-stat XP and badge
//! unlocks. Everything except [`ProgressionEngine`] is a pure function.

mod badges;
mod engine;
mod history;
mod levels;
mod streaks;

pub use badges::{BADGES, Badge, BadgeStatus};
pub use engine::{
    CompletionOutcome, CompletionReward, EngineSummary, ProgressionEngine, StatSummary,
    TodayProgress,
};
pub use history::{
    CompletionHistory, DayStats, completion_percentage, days_in_month, monthly_stats,
    weekly_stats,
};
pub use levels::{
    LevelProgress, STREAK_BONUS_PERCENT, XP_BASE, XP_MULTIPLIER, level_from_total_xp,
    streak_bonus, total_xp_for_level, xp_for_level,
};
pub use streaks::streak_for_habit;
