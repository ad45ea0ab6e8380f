//! Habit management commands

use anyhow::{Result, bail};
use clap::Subcommand;

use habitforge::{HabitUpdate, NewHabit};

use super::Context;

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    /// List all habits
    List,

    /// Create a habit
    Add {
        name: String,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// XP per completion (5-100)
        #[arg(long)]
        xp: Option<u32>,
        /// Stat ids fed by this habit (repeat or comma-separate)
        #[arg(long = "stat", value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Edit a habit
    Edit {
        habit_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        xp: Option<u32>,
        /// Replace the linked stats (repeat or comma-separate)
        #[arg(long = "stat", value_delimiter = ',')]
        stats: Option<Vec<String>>,
    },

    /// Delete a habit (its history stays)
    Delete { habit_id: String },
}

pub fn habit_command(ctx: &Context, cmd: HabitCommand) -> Result<()> {
    let mut engine = ctx.engine()?;

    match cmd {
        HabitCommand::List => {
            if engine.habits().is_empty() {
                println!("No habits yet. Create one with `habitforge habit add <name>`.");
                return Ok(());
            }
            for habit in engine.habits() {
                let stats = if habit.linked_stats.is_empty() {
                    "-".to_string()
                } else {
                    habit.linked_stats.join(", ")
                };
                println!(
                    "{}  {} {}  +{} XP  stats: {}  streak: {}",
                    habit.id,
                    habit.icon,
                    habit.name,
                    habit.xp_reward,
                    stats,
                    engine.streak_for(&habit.id)
                );
            }
        }
        HabitCommand::Add {
            name,
            icon,
            xp,
            stats,
        } => {
            let mut new = NewHabit::new(name).linked_stats(stats);
            new.icon = icon;
            new.xp_reward = xp;
            warn_unknown_stats(&engine, &new.linked_stats);

            let habit = engine.add_habit(ctx.config.apply_habit_defaults(new))?;
            println!("Created habit {} ({})", habit.name, habit.id);
        }
        HabitCommand::Edit {
            habit_id,
            name,
            icon,
            xp,
            stats,
        } => {
            let update = HabitUpdate {
                name,
                icon,
                xp_reward: xp,
                linked_stats: stats,
            };
            if update.is_empty() {
                bail!("Nothing to change. Pass --name, --icon, --xp or --stat.");
            }
            if let Some(stats) = &update.linked_stats {
                warn_unknown_stats(&engine, stats);
            }

            match engine.update_habit(&habit_id, update)? {
                Some(habit) => println!("Updated habit {} ({})", habit.name, habit.id),
                None => println!("No habit with id {}", habit_id),
            }
        }
        HabitCommand::Delete { habit_id } => {
            if engine.delete_habit(&habit_id) {
                println!("Deleted habit {}", habit_id);
            } else {
                println!("No habit with id {}", habit_id);
            }
        }
    }

    Ok(())
}

fn warn_unknown_stats<S, C>(engine: &habitforge::ProgressionEngine<S, C>, ids: &[String])
where
    S: habitforge::KeyValueStore,
    C: habitforge::Clock,
{
    for id in ids.iter().filter(|id| engine.stat(id).is_none()) {
        eprintln!("Warning: unknown stat id {}", id);
    }
}
