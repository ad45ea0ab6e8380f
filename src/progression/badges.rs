//! Badge definitions
//!
//! Badges are awarded once, when the player's level lands exactly on a
//! threshold from this table.

use serde::Serialize;

/// A level-gated achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub level: u32,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// All badge definitions (must be sorted by level)
pub static BADGES: &[Badge] = &[
    Badge {
        level: 10,
        name: "Novice",
        icon: "🌟",
        description: "Reach level 10",
    },
    Badge {
        level: 20,
        name: "Apprentice",
        icon: "⚔️",
        description: "Reach level 20",
    },
    Badge {
        level: 30,
        name: "Adventurer",
        icon: "🛡️",
        description: "Reach level 30",
    },
    Badge {
        level: 40,
        name: "Hero",
        icon: "👑",
        description: "Reach level 40",
    },
    Badge {
        level: 50,
        name: "Legend",
        icon: "🏆",
        description: "Reach level 50",
    },
    Badge {
        level: 60,
        name: "Master",
        icon: "💎",
        description: "Reach level 60",
    },
    Badge {
        level: 70,
        name: "Champion",
        icon: "🔥",
        description: "Reach level 70",
    },
    Badge {
        level: 80,
        name: "Titan",
        icon: "⚡",
        description: "Reach level 80",
    },
    Badge {
        level: 90,
        name: "Deity",
        icon: "✨",
        description: "Reach level 90",
    },
    Badge {
        level: 100,
        name: "Immortal",
        icon: "🌌",
        description: "Reach level 100",
    },
];

impl Badge {
    /// Badge whose threshold is exactly `level`
    pub fn for_level(level: u32) -> Option<&'static Badge> {
        BADGES.iter().find(|b| b.level == level)
    }

    /// Next badge strictly above `level` (None once every badge is behind)
    pub fn next_after(level: u32) -> Option<&'static Badge> {
        BADGES.iter().find(|b| b.level > level)
    }

    pub fn is_known_level(level: u32) -> bool {
        Self::for_level(level).is_some()
    }
}

/// A badge together with whether the player has earned it
#[derive(Debug, Clone, Serialize)]
pub struct BadgeStatus {
    pub badge: &'static Badge,
    pub unlocked: bool,
}
