// crates/sincer-cli/src/commands/mod.rs - Command Handler Modules
//
// One module per command family. Handlers translate parsed arguments into
// a single manager call and hand the outcome to `Context::emit`.
//
// MODULE ORGANIZATION:
// - list: display (plain table or JSON)
// - create: new records
// - change: date/colour edits, including restart
// - rename: renaming
// - swap: exchanging names or places
// - reorder: u/d moves
// - remove: deleting matching records
// - reset: wiping the config

pub mod change;
pub mod create;
pub mod list;
pub mod remove;
pub mod rename;
pub mod reorder;
pub mod reset;
pub mod swap;
