//! Completion history and its weekly/monthly views
//!
//! History is a map from local calendar day ("YYYY-MM-DD") to the habit ids
//! completed that day. An empty list and a missing day mean the same thing.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::domain::HabitId;

/// Day key format used in the stored history
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format a date as a history day key
fn date_string(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a history day key
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FORMAT).ok()
}

/// Per-day record of completed habit ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionHistory {
    days: BTreeMap<NaiveDate, Vec<HabitId>>,
}

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Habit ids completed on `date` (empty when nothing was recorded)
    pub fn completions_on(&self, date: NaiveDate) -> &[HabitId] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, date: NaiveDate, habit_id: &str) -> bool {
        self.completions_on(date).iter().any(|id| id == habit_id)
    }

    /// Append `habit_id` to the day's entry. Callers guarantee it is not
    /// already present.
    pub(crate) fn record(&mut self, date: NaiveDate, habit_id: &str) {
        self.days.entry(date).or_default().push(habit_id.to_string());
    }

    /// Remove `habit_id` from the day's entry. An emptied entry is kept.
    pub(crate) fn remove(&mut self, date: NaiveDate, habit_id: &str) -> bool {
        let Some(ids) = self.days.get_mut(&date) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|id| id != habit_id);
        before != ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

impl Serialize for CompletionHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, ids) in &self.days {
            map.serialize_entry(&date_string(*date), ids)?;
        }
        map.end()
    }
}

/// Entries whose key is not a day or whose value is not a list of ids are
/// skipped, so one bad entry never costs the rest of the history.
impl<'de> Deserialize<'de> for CompletionHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut days = BTreeMap::new();

        for (key, value) in raw {
            let Some(date) = parse_date(&key) else {
                warn!(key = %key, "Skipping history entry with invalid date");
                continue;
            };
            match serde_json::from_value::<Vec<HabitId>>(value) {
                Ok(ids) => {
                    days.insert(date, ids);
                }
                Err(e) => warn!(key = %key, error = %e, "Skipping malformed history entry"),
            }
        }

        Ok(Self { days })
    }
}

impl FromIterator<(NaiveDate, Vec<HabitId>)> for CompletionHistory {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, Vec<HabitId>)>>(iter: T) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Completion summary for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    /// Short weekday ("Mon") for weekly views, day of month for monthly views
    pub label: String,
    pub completions: usize,
    /// `round(completions / habit_count * 100)`, 0 without habits
    pub percentage: u32,
}

/// Rounded completion percentage; can exceed 100 when orphaned ids of
/// deleted habits are still in the day's entry
pub fn completion_percentage(completions: usize, habit_count: usize) -> u32 {
    if habit_count == 0 {
        return 0;
    }
    ((completions as f64 / habit_count as f64) * 100.0).round() as u32
}

fn day_stats(history: &CompletionHistory, date: NaiveDate, label: String, habit_count: usize) -> DayStats {
    let completions = history.completions_on(date).len();
    DayStats {
        date,
        label,
        completions,
        percentage: completion_percentage(completions, habit_count),
    }
}

/// The 7 days ending with `today`, oldest first
pub fn weekly_stats(history: &CompletionHistory, habit_count: usize, today: NaiveDate) -> Vec<DayStats> {
    (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let label = date.format("%a").to_string();
            day_stats(history, date, label, habit_count)
        })
        .collect()
}

/// Every day of `today`'s calendar month, day 1 first
pub fn monthly_stats(history: &CompletionHistory, habit_count: usize, today: NaiveDate) -> Vec<DayStats> {
    (1..=days_in_month(today))
        .filter_map(|day| today.with_day(day))
        .map(|date| day_stats(history, date, date.day().to_string(), habit_count))
        .collect()
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_and_remove() {
        let mut history = CompletionHistory::new();
        let day = date(2024, 5, 1);
        history.record(day, "habit_1");
        assert!(history.contains(day, "habit_1"));
        assert!(history.remove(day, "habit_1"));
        assert!(!history.remove(day, "habit_1"));
        assert!(history.completions_on(day).is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_json_shape() {
        let mut history = CompletionHistory::new();
        history.record(date(2024, 5, 1), "habit_1");
        history.record(date(2024, 5, 1), "habit_2");
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json, serde_json::json!({"2024-05-01": ["habit_1", "habit_2"]}));

        let back: CompletionHistory = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn test_bad_history_entries_are_skipped() {
        let json = serde_json::json!({
            "2024-06-09": ["habit_keep"],
            "2024-06-08": ["habit_keep"],
            "legacy": [],
            "2024-06-07": "habit_keep",
        });
        let history: CompletionHistory = serde_json::from_value(json).unwrap();

        assert!(history.contains(date(2024, 6, 9), "habit_keep"));
        assert!(history.contains(date(2024, 6, 8), "habit_keep"));
        assert!(history.completions_on(date(2024, 6, 7)).is_empty());
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            serde_json::json!({"2024-06-08": ["habit_keep"], "2024-06-09": ["habit_keep"]})
        );
    }

    #[test]
    fn test_day_key_format() {
        assert_eq!(date_string(date(2024, 6, 10)), "2024-06-10");
        assert_eq!(parse_date("2024-06-10"), Some(date(2024, 6, 10)));
        assert_eq!(parse_date("10/06/2024"), None);
    }

    #[test]
    fn test_weekly_stats_window() {
        let today = date(2024, 3, 3);
        let history: CompletionHistory = (0..7u64)
            .map(|back| {
                let day = today.checked_sub_days(Days::new(back)).unwrap();
                let ids = (0..back).map(|i| format!("habit_{}", i)).collect();
                (day, ids)
            })
            .collect();

        let week = weekly_stats(&history, 8, today);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2024, 2, 26));
        assert_eq!(week[6].date, today);
        assert_eq!(week[6].label, "Sun");

        // oldest day has 6 completions out of 8 habits
        assert_eq!(week[0].completions, 6);
        assert_eq!(week[0].percentage, 75);
        assert_eq!(week[5].completions, 1);
        assert_eq!(week[5].percentage, 13); // 12.5 rounds up
        assert_eq!(week[6].completions, 0);
        assert_eq!(week[6].percentage, 0);
    }

    #[test]
    fn test_percentage_without_habits() {
        assert_eq!(completion_percentage(3, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
    }

    #[test]
    fn test_monthly_stats_covers_month() {
        let mut history = CompletionHistory::new();
        history.record(date(2024, 2, 29), "habit_1");

        let month = monthly_stats(&history, 1, date(2024, 2, 10));
        assert_eq!(month.len(), 29);
        assert_eq!(month[0].date, date(2024, 2, 1));
        assert_eq!(month[0].label, "1");
        assert_eq!(month[28].completions, 1);
        assert_eq!(month[28].percentage, 100);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
        assert_eq!(days_in_month(date(2024, 4, 15)), 30);
    }
}
