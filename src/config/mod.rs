//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_HABIT_ICON, DEFAULT_STAT_COLOR, DEFAULT_XP_REWARD, NewHabit, NewStat};

/// Main configuration structure (`~/.habitforge/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where progression state is stored
    #[serde(default)]
    pub storage: StorageSettings,

    /// Values used when a habit or stat is created without them
    #[serde(default)]
    pub defaults: DefaultSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// State file; `~/.habitforge/state.json` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_xp_reward")]
    pub xp_reward: u32,

    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default = "default_stat_color")]
    pub stat_color: String,
}

fn default_xp_reward() -> u32 {
    DEFAULT_XP_REWARD
}

fn default_icon() -> String {
    DEFAULT_HABIT_ICON.to_string()
}

fn default_stat_color() -> String {
    DEFAULT_STAT_COLOR.to_string()
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            xp_reward: default_xp_reward(),
            icon: default_icon(),
            stat_color: default_stat_color(),
        }
    }
}

impl Config {
    /// Resolved path of the state file
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("state.json"))
    }

    /// Fill in fields of `new` the caller left empty
    pub fn apply_habit_defaults(&self, mut new: NewHabit) -> NewHabit {
        if new.icon.is_none() {
            new.icon = Some(self.defaults.icon.clone());
        }
        if new.xp_reward.is_none() {
            new.xp_reward = Some(self.defaults.xp_reward);
        }
        new
    }

    pub fn apply_stat_defaults(&self, mut new: NewStat) -> NewStat {
        if new.color.is_none() {
            new.color = Some(self.defaults.stat_color.clone());
        }
        new
    }
}
