// crates/sincer-cli/src/commands/reorder.rs - The `move` command
//
// STEP SYNTAX:
// - u<N> / d<N>: up or down by N places, stopping at the list boundary
// - umax / dmax: straight to the top or bottom
//
// Moving a record to where it already is succeeds and prints the list
// unchanged.

use anyhow::Result;

use crate::context::Context;

pub fn handle(ctx: &mut Context, name: String, step: String) -> Result<()> {
    let outcome = ctx.manager_mut().move_record(&name, &step)?;
    ctx.emit(&outcome);
    Ok(())
}
