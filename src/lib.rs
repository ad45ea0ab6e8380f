//! habitforge - habits with XP, levels, streaks, stats and badges
//!
//! Every completed habit earns XP. XP raises the player's level on a
//! geometric curve, feeds the stats the habit is linked to, and unlocks a
//! badge at every tenth level. Consecutive days grow a streak bonus.
//!
//! All state lives in a [`ProgressionEngine`], which mirrors each change to a
//! [`KeyValueStore`] as it happens.

pub mod clock;
pub mod config;
pub mod domain;
pub mod progression;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use progression::{CompletionOutcome, CompletionReward, ProgressionEngine};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
