use anyhow::Result;

use crate::cli::SwapArg;
use crate::context::Context;

/// Swap the names or the places of two records
pub fn handle(ctx: &mut Context, mode: SwapArg, name: String, name2: String) -> Result<()> {
    let outcome = ctx.manager_mut().swap(&name, &name2, mode.into())?;
    ctx.emit(&outcome);
    Ok(())
}
