//! Status command implementation

use anyhow::Result;

use super::{Context, progress_bar};

/// Show level, stats and today's progress
pub fn status_command(ctx: &Context, json: bool) -> Result<()> {
    let engine = ctx.engine()?;
    let summary = engine.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let level = summary.level;
    println!(
        "Level {}  {} {}/{} XP  (total {} XP)",
        level.level,
        progress_bar(level.progress(), 20),
        level.current_xp,
        level.xp_for_next_level,
        level.total_xp
    );

    let today = &summary.today;
    println!(
        "Today {}: {}/{} habits ({}%)",
        today.date, today.completed, today.total, today.percentage
    );
    if summary.longest_current_streak > 0 {
        println!("Longest streak: {} days", summary.longest_current_streak);
    }

    println!("\nStats (total levels {}):", summary.total_stat_levels);
    for s in &summary.stats {
        println!(
            "  {:<14} Lv {:>2} {} {}/{} XP",
            s.stat.name,
            s.progress.level,
            progress_bar(s.progress.progress(), 10),
            s.progress.current_xp,
            s.progress.xp_for_next_level
        );
    }

    if !engine.habits().is_empty() {
        println!("\nHabits:");
        for habit in engine.habits() {
            let mark = if engine.is_completed_today(&habit.id) { "x" } else { " " };
            let streak = engine.streak_for(&habit.id);
            println!(
                "  [{}] {} {} (+{} XP, streak {})",
                mark, habit.icon, habit.name, habit.xp_reward, streak
            );
        }
    }

    Ok(())
}
