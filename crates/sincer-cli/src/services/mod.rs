// crates/sincer-cli/src/services/mod.rs - Service layer modules
pub mod table;

pub use table::TableService;
