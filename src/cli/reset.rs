//! Reset command implementation

use anyhow::{Result, bail};

use super::Context;

pub fn reset_command(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        bail!("This erases all XP, stats, badges, habits and history. Re-run with --yes.");
    }

    let mut engine = ctx.engine()?;
    engine.reset();
    println!("All data reset");
    Ok(())
}
