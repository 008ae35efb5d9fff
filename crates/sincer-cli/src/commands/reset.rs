// crates/sincer-cli/src/commands/reset.rs - Wiping the config
//
// Reset is special because it must not depend on the current file being
// readable: it is the way out of a corrupt config. The context for it is
// built without loading (see `Context::without_loading`).

use anyhow::Result;

use crate::context::Context;

pub fn handle(ctx: &mut Context) -> Result<()> {
    let outcome = ctx.manager_mut().reset()?;
    ctx.emit(&outcome);
    Ok(())
}
