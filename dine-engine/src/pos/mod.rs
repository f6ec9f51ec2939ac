//! Dine-in order and billing engine
//!
//! - `session`: table state machine and customer tabs
//! - `money`: totals, tax, split and payment summary
//! - `billing`: settlement
//! - `customers` / `ledger`: customer directory and due balances
//! - `catalog`: menu and table maintenance
//! - `manager`: command entry point (`PosManager::execute_command`)

// traits 必须先于 actions 声明，enum_dispatch 按展开顺序登记 trait
pub mod traits;
pub mod actions;
pub mod billing;
pub mod catalog;
pub mod customers;
pub mod error;
pub mod ledger;
pub mod manager;
pub mod money;
pub mod seed;
pub mod session;
pub mod store;

pub use error::{PosError, PosResult};
pub use manager::{PosManager, Selection};
pub use store::PosStore;
