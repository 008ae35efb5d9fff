// crates/sincer-core/src/lib.rs - Core library for "time since" records
//
// LAYERING (leaves first):
// ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
// │  validate    │──▶│   record     │──▶│    store     │
// │  matcher     │   │   namegen    │   │  (YAML file) │
// │  movement    │   │   listing    │   └──────┬───────┘
// └──────────────┘   └──────────────┘          │
//                                               ▼
//                                      ┌──────────────────┐
//                                      │     manager      │
//                                      │ (owns the list)  │
//                                      └──────────────────┘
//
// Everything in this crate is synchronous and free of terminal concerns.
// Rendering the outcomes the manager returns is left to the CLI.

pub mod listing;
pub mod manager;
pub mod matcher;
pub mod movement;
pub mod namegen;
pub mod record;
pub mod store;
pub mod validate;

pub use listing::{ListingRow, Outcome, RowAction};
pub use manager::{ChangeOptions, CreateOptions, Manager, ManagerError, ManagerResult, SwapMode};
pub use record::Record;
pub use store::{Config, ConfigDocument, ConfigStore, RecordDocument, StoreError, StoreResult};

/// Upper bound on the number of records a config may hold
pub const MAX_RECORDS: usize = 200;

/// Colour given to records created without an explicit one
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Template used to synthesize names for records created without one
pub const DEFAULT_NAME_TEMPLATE: &str = "timer-$0";

/// File name of the config document inside the user's home directory
pub const DEFAULT_CONFIG_FILE: &str = ".sincer.yaml";
