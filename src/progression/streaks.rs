//! Streak tracking
//!
//! A habit's streak is the number of consecutive days before today on which
//! it was completed. Today never breaks the chain: it is skipped whether or
//! not the habit has been checked off yet.

use chrono::NaiveDate;

use super::history::CompletionHistory;

/// Count consecutive completed days for `habit_id`, ending the day before `today`
pub fn streak_for_habit(history: &CompletionHistory, habit_id: &str, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today.pred_opt();

    while let Some(date) = day {
        if !history.contains(date, habit_id) {
            break;
        }
        streak += 1;
        day = date.pred_opt();
    }

    streak
}
