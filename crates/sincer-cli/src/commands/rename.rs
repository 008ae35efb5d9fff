use anyhow::Result;

use crate::context::Context;

/// Rename the first record matching `name`
///
/// A missing new name is passed through as empty so the manager reports it
/// as invalid, the same as any other bad name.
pub fn handle(ctx: &mut Context, name: String, newname: Option<String>) -> Result<()> {
    let newname = newname.unwrap_or_default();
    let outcome = ctx.manager_mut().rename(&name, &newname)?;
    ctx.emit(&outcome);
    Ok(())
}
