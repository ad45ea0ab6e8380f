//! Badges command implementation

use anyhow::Result;

use habitforge::progression::Badge;

use super::Context;

pub fn badges_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let level = engine.level();

    for status in engine.badges() {
        let mark = if status.unlocked { "x" } else { " " };
        println!(
            "[{}] {} {:<11} {}",
            mark, status.badge.icon, status.badge.name, status.badge.description
        );
    }

    if let Some(next) = Badge::next_after(level) {
        println!("\nNext badge at level {} (you are level {})", next.level, level);
    }
    Ok(())
}
