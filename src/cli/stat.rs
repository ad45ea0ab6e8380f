//! Stat management commands

use anyhow::{Result, bail};
use clap::Subcommand;

use habitforge::{NewStat, StatUpdate};

use super::{Context, progress_bar};

#[derive(Subcommand, Debug)]
pub enum StatCommand {
    /// List all stats with their level
    List,

    /// Create a stat
    Add {
        name: String,
        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or recolor a stat
    Edit {
        stat_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a stat and unlink it from every habit
    Delete { stat_id: String },
}

pub fn stat_command(ctx: &Context, cmd: StatCommand) -> Result<()> {
    let mut engine = ctx.engine()?;

    match cmd {
        StatCommand::List => {
            for stat in engine.stats() {
                let Some(progress) = engine.stat_progress(&stat.id) else {
                    continue;
                };
                println!(
                    "{:<16} {:<14} {}  Lv {:>2} {} {}/{} XP",
                    stat.id,
                    stat.name,
                    stat.color,
                    progress.level,
                    progress_bar(progress.progress(), 10),
                    progress.current_xp,
                    progress.xp_for_next_level
                );
            }
        }
        StatCommand::Add { name, color } => {
            let mut new = NewStat::new(name);
            new.color = color;
            let stat = engine.add_stat(ctx.config.apply_stat_defaults(new))?;
            println!("Created stat {} ({})", stat.name, stat.id);
        }
        StatCommand::Edit {
            stat_id,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                bail!("Nothing to change. Pass --name or --color.");
            }
            match engine.update_stat(&stat_id, StatUpdate { name, color })? {
                Some(stat) => println!("Updated stat {} ({})", stat.name, stat.id),
                None => println!("No stat with id {}", stat_id),
            }
        }
        StatCommand::Delete { stat_id } => {
            if engine.delete_stat(&stat_id) {
                println!("Deleted stat {}", stat_id);
            } else {
                println!("No stat with id {}", stat_id);
            }
        }
    }

    Ok(())
}
