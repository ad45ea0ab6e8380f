//! XP and Level system
//!
//! Levels follow a geometric schedule: clearing level `L` costs
//! `floor(100 * 1.5^(L-1))` XP. The same curve is used for the player's total
//! XP and for every individual stat.

use serde::Serialize;

/// XP needed to clear level 1
pub const XP_BASE: u64 = 100;

/// Growth factor between consecutive level thresholds
pub const XP_MULTIPLIER: f64 = 1.5;

/// XP required to go from `level` to `level + 1`
///
/// Levels start at 1; `0` is treated as 1.
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = f64::from(level.max(1) - 1);
    // `as` saturates for values beyond u64::MAX
    (XP_BASE as f64 * XP_MULTIPLIER.powf(exponent)).floor() as u64
}

/// Cumulative XP needed to reach `level` from zero
pub fn total_xp_for_level(level: u32) -> u64 {
    (1..level.max(1)).fold(0u64, |acc, l| acc.saturating_add(xp_for_level(l)))
}

/// Where an XP total sits on the level curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned inside the current level
    pub current_xp: u64,
    /// XP needed to clear the current level
    pub xp_for_next_level: u64,
    pub total_xp: u64,
}

impl LevelProgress {
    /// Progress toward the next level (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.xp_for_next_level == 0 {
            return 1.0;
        }
        (self.current_xp as f32) / (self.xp_for_next_level as f32)
    }

    /// XP still missing before the next level-up
    pub fn remaining(&self) -> u64 {
        self.xp_for_next_level.saturating_sub(self.current_xp)
    }
}

/// Map an accumulated XP total to its level progress
pub fn level_from_total_xp(total_xp: u64) -> LevelProgress {
    let mut level = 1u32;
    let mut needed = xp_for_level(level);
    let mut remaining = total_xp;

    while remaining >= needed {
        remaining -= needed;
        level += 1;
        needed = xp_for_level(level);
    }

    LevelProgress {
        level,
        current_xp: remaining,
        xp_for_next_level: needed,
        total_xp,
    }
}

/// Bonus per streak day, in percent of the base reward
pub const STREAK_BONUS_PERCENT: u64 = 10;

/// Calculate streak bonus XP: `floor(reward * streak * 0.1)`
pub fn streak_bonus(xp_reward: u32, streak_days: u32) -> u64 {
    let raw = u64::from(xp_reward) * u64::from(streak_days);
    raw * STREAK_BONUS_PERCENT / 100
}
