use anyhow::Result;
use sincer_core::CreateOptions;

use crate::context::Context;

/// Create a record and print the list with the new row highlighted
pub fn handle(
    ctx: &mut Context,
    name: Option<String>,
    date: Option<String>,
    color: Option<String>,
    below: bool,
) -> Result<()> {
    let outcome = ctx
        .manager_mut()
        .create(name.as_deref(), CreateOptions { date, below, color })?;
    ctx.emit(&outcome);
    Ok(())
}
