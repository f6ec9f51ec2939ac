//! Data models
//!
//! Field names serialize in camelCase so snapshots written by earlier
//! versions of the till load unchanged. All ids are `i64`.

pub mod customer;
pub mod customer_tab;
pub mod dining_table;
pub mod due_entry;
pub mod history;
pub mod menu_item;
pub mod order_line;
pub mod snapshot;

// Re-exports
pub use customer::*;
pub use customer_tab::*;
pub use dining_table::*;
pub use due_entry::*;
pub use history::*;
pub use menu_item::*;
pub use order_line::*;
pub use snapshot::*;
