use anyhow::Result;

use crate::context::Context;

/// Remove every record matching `pattern`
///
/// Without a pattern nothing is removed and an error is reported; wiping
/// everything is what `reset` is for.
pub fn handle(ctx: &mut Context, pattern: Option<String>) -> Result<()> {
    let outcome = ctx.manager_mut().remove(pattern.as_deref())?;
    ctx.emit(&outcome);
    Ok(())
}
