//! History command implementation

use anyhow::Result;
use clap::ValueEnum;

use super::{Context, progress_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    /// The last 7 days
    Week,
    /// Every day of the current month
    Month,
}

pub fn history_command(ctx: &Context, period: Period) -> Result<()> {
    let engine = ctx.engine()?;
    let days = match period {
        Period::Week => engine.weekly_stats(),
        Period::Month => engine.monthly_stats(),
    };

    for day in days {
        println!(
            "{} {:>3}  {} {:>2} done ({:>3}%)",
            day.date,
            day.label,
            progress_bar(day.percentage as f32 / 100.0, 10),
            day.completions,
            day.percentage
        );
    }
    Ok(())
}
