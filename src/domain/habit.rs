use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::StatId;

/// Identifier of a habit (`habit_<unix-ms>`)
pub type HabitId = String;

/// Smallest XP reward a habit may be created or edited with
pub const MIN_XP_REWARD: u32 = 5;
/// Largest XP reward a habit may be created or edited with
pub const MAX_XP_REWARD: u32 = 100;
/// XP reward used when the caller does not pick one
pub const DEFAULT_XP_REWARD: u32 = 25;
/// Icon used when the caller does not pick one
pub const DEFAULT_HABIT_ICON: &str = "⭐";

/// Error type for habit creation and edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitError {
    #[error("Habit name is required")]
    EmptyName,

    #[error("XP reward must be between 5 and 100, got {0}")]
    XpRewardOutOfRange(u32),
}

/// A recurring routine the user checks off once per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_xp_reward")]
    pub xp_reward: u32,
    /// Stats that share the XP of every completion
    #[serde(default)]
    pub linked_stats: Vec<StatId>,
    /// Records written without a timestamp load as the Unix epoch
    #[serde(default)]
    pub created_at: DateTime<Local>,
}

fn default_icon() -> String {
    DEFAULT_HABIT_ICON.to_string()
}

fn default_xp_reward() -> u32 {
    DEFAULT_XP_REWARD
}

impl Habit {
    /// Whether completing this habit feeds the given stat
    pub fn feeds(&self, stat_id: &str) -> bool {
        self.linked_stats.iter().any(|s| s == stat_id)
    }

    /// Drop a stat from `linked_stats`. Returns true if it was linked.
    pub(crate) fn unlink_stat(&mut self, stat_id: &str) -> bool {
        let before = self.linked_stats.len();
        self.linked_stats.retain(|s| s != stat_id);
        before != self.linked_stats.len()
    }
}

/// Input for creating a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub icon: Option<String>,
    pub xp_reward: Option<u32>,
    pub linked_stats: Vec<StatId>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            xp_reward: None,
            linked_stats: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn xp_reward(mut self, xp: u32) -> Self {
        self.xp_reward = Some(xp);
        self
    }

    pub fn linked_stats<I, S>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StatId>,
    {
        self.linked_stats = stats.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the input and build the habit record
    pub(crate) fn build(self, id: HabitId, created_at: DateTime<Local>) -> Result<Habit, HabitError> {
        let name = validate_name(&self.name)?;
        let xp_reward = validate_xp_reward(self.xp_reward.unwrap_or(DEFAULT_XP_REWARD))?;
        let icon = self
            .icon
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(default_icon);

        Ok(Habit {
            id,
            name,
            icon,
            xp_reward,
            linked_stats: dedup_ids(self.linked_stats),
            created_at,
        })
    }
}

/// Partial edit of a habit; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub xp_reward: Option<u32>,
    pub linked_stats: Option<Vec<StatId>>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.icon.is_none()
            && self.xp_reward.is_none()
            && self.linked_stats.is_none()
    }

    /// Apply the edit. Nothing is written unless every field validates.
    pub(crate) fn apply_to(self, habit: &mut Habit) -> Result<(), HabitError> {
        let name = self.name.as_deref().map(validate_name).transpose()?;
        let xp_reward = self.xp_reward.map(validate_xp_reward).transpose()?;

        if let Some(name) = name {
            habit.name = name;
        }
        if let Some(xp) = xp_reward {
            habit.xp_reward = xp;
        }
        if let Some(icon) = self.icon.filter(|i| !i.trim().is_empty()) {
            habit.icon = icon;
        }
        if let Some(stats) = self.linked_stats {
            habit.linked_stats = dedup_ids(stats);
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, HabitError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_xp_reward(xp: u32) -> Result<u32, HabitError> {
    if !(MIN_XP_REWARD..=MAX_XP_REWARD).contains(&xp) {
        return Err(HabitError::XpRewardOutOfRange(xp));
    }
    Ok(xp)
}

/// Collapse duplicate ids, keeping first-seen order
fn dedup_ids(ids: Vec<StatId>) -> Vec<StatId> {
    let mut out: Vec<StatId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(new: NewHabit) -> Result<Habit, HabitError> {
        new.build("habit_1".to_string(), Local::now())
    }

    #[test]
    fn test_new_habit_defaults() {
        let habit = build(NewHabit::new("  Read  ")).unwrap();
        assert_eq!(habit.name, "Read");
        assert_eq!(habit.icon, DEFAULT_HABIT_ICON);
        assert_eq!(habit.xp_reward, DEFAULT_XP_REWARD);
        assert!(habit.linked_stats.is_empty());
    }

    #[test]
    fn test_new_habit_rejects_blank_name() {
        assert_eq!(build(NewHabit::new("   ")), Err(HabitError::EmptyName));
    }

    #[test]
    fn test_new_habit_xp_bounds() {
        assert!(build(NewHabit::new("a").xp_reward(5)).is_ok());
        assert!(build(NewHabit::new("a").xp_reward(100)).is_ok());
        assert_eq!(
            build(NewHabit::new("a").xp_reward(4)),
            Err(HabitError::XpRewardOutOfRange(4))
        );
        assert_eq!(
            build(NewHabit::new("a").xp_reward(101)),
            Err(HabitError::XpRewardOutOfRange(101))
        );
    }

    #[test]
    fn test_linked_stats_are_deduplicated() {
        let habit = build(NewHabit::new("Run").linked_stats(["agility", "endurance", "agility"])).unwrap();
        assert_eq!(habit.linked_stats, vec!["agility", "endurance"]);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut habit = build(NewHabit::new("Run")).unwrap();
        let update = HabitUpdate {
            name: Some("Sprint".into()),
            xp_reward: Some(500),
            ..Default::default()
        };
        assert!(update.apply_to(&mut habit).is_err());
        assert_eq!(habit.name, "Run");
    }

    #[test]
    fn test_habit_without_created_at_loads() {
        let habit: Habit = serde_json::from_value(serde_json::json!({
            "id": "habit_1",
            "name": "Read",
        }))
        .unwrap();
        assert_eq!(habit.xp_reward, DEFAULT_XP_REWARD);
        assert_eq!(habit.created_at, DateTime::<Local>::default());
    }

    #[test]
    fn test_habit_json_uses_camel_case() {
        let habit = build(NewHabit::new("Run").linked_stats(["agility"])).unwrap();
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["xpReward"], 25);
        assert_eq!(json["linkedStats"][0], "agility");
        assert!(json.get("createdAt").is_some());
    }
}
