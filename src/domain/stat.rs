use serde::{Deserialize, Serialize};

/// Identifier of a stat (`strength`, `stat_<unix-ms>`, ...)
pub type StatId = String;

/// Color used when the caller does not pick one
pub const DEFAULT_STAT_COLOR: &str = "#00F0FF";

/// Error type for stat creation and edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("Stat name is required")]
    EmptyName,

    #[error("Invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
}

/// A character dimension that accumulates XP from linked habits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub id: StatId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub xp: u64,
}

impl Stat {
    fn seeded(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            xp: 0,
        }
    }

    /// The stat set a fresh (or reset) profile starts with
    pub fn defaults() -> Vec<Stat> {
        vec![
            Self::seeded("strength", "Strength", "#FF0055"),
            Self::seeded("endurance", "Endurance", "#FFAA00"),
            Self::seeded("intelligence", "Intelligence", "#00F0FF"),
            Self::seeded("charisma", "Charisma", "#BD00FF"),
            Self::seeded("agility", "Agility", "#39FF14"),
            Self::seeded("wisdom", "Wisdom", "#FFFFFF"),
        ]
    }
}

/// Input for creating a stat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStat {
    pub name: String,
    pub color: Option<String>,
}

impl NewStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn build(self, id: StatId) -> Result<Stat, StatError> {
        let name = validate_name(&self.name)?;
        let color = match self.color {
            Some(c) => validate_color(&c)?,
            None => DEFAULT_STAT_COLOR.to_string(),
        };
        Ok(Stat {
            id,
            name,
            color,
            xp: 0,
        })
    }
}

/// Partial edit of a stat. XP is never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl StatUpdate {
    pub(crate) fn apply_to(self, stat: &mut Stat) -> Result<(), StatError> {
        let name = self.name.as_deref().map(validate_name).transpose()?;
        let color = self.color.as_deref().map(validate_color).transpose()?;

        if let Some(name) = name {
            stat.name = name;
        }
        if let Some(color) = color {
            stat.color = color;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, StatError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StatError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_color(color: &str) -> Result<String, StatError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StatError::InvalidColor(color.to_string()));
    }
    Ok(color.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_at_zero() {
        let stats = Stat::defaults();
        assert_eq!(stats.len(), 6);
        assert!(stats.iter().all(|s| s.xp == 0));
        assert_eq!(stats[0].id, "strength");
    }

    #[test]
    fn test_new_stat_default_color() {
        let stat = NewStat::new("Focus").build("stat_1".into()).unwrap();
        assert_eq!(stat.color, DEFAULT_STAT_COLOR);
        assert_eq!(stat.xp, 0);
    }

    #[test]
    fn test_color_validation() {
        assert_eq!(validate_color("#ff6b6b").unwrap(), "#FF6B6B");
        assert!(validate_color("ff6b6b").is_err());
        assert!(validate_color("#ff6b6").is_err());
        assert!(validate_color("#gg0000").is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(NewStat::new(" ").build("x".into()), Err(StatError::EmptyName));
    }
}
