use anyhow::Result;
use sincer_core::ChangeOptions;

use crate::context::Context;

/// Change the date and/or colour of the first matching record
pub fn handle(
    ctx: &mut Context,
    name: String,
    date: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let outcome = ctx
        .manager_mut()
        .change(&name, ChangeOptions { date, color })?;
    ctx.emit(&outcome);
    Ok(())
}

/// Restart the first matching record from the current moment
pub fn handle_restart(ctx: &mut Context, name: String) -> Result<()> {
    handle(ctx, name, Some("now".to_string()), None)
}
