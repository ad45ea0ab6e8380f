//! Complete / uncomplete commands

use anyhow::Result;

use habitforge::CompletionOutcome;

use super::Context;

pub fn complete_command(ctx: &Context, habit_id: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    let outcome = engine.complete_habit(habit_id);

    let CompletionOutcome::Completed(reward) = &outcome else {
        println!("{}", outcome.message());
        return Ok(());
    };

    println!("{}", outcome.message());
    println!("Streak: {} days", reward.new_streak);
    if reward.leveled_up {
        println!("Level {} reached!", reward.new_level);
    }
    if let Some(badge) = reward.new_badge {
        println!("Badge unlocked: {} {} - {}", badge.icon, badge.name, badge.description);
    }
    Ok(())
}

pub fn uncomplete_command(ctx: &Context, habit_id: &str) -> Result<()> {
    let mut engine = ctx.engine()?;
    if engine.uncomplete_habit(habit_id) {
        println!("Unchecked {} for today (earned XP is kept)", habit_id);
    } else {
        println!("{} was not completed today", habit_id);
    }
    Ok(())
}
