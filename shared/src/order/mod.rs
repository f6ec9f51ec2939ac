//! Command vocabulary for the POS engine
//!
//! - Commands: requests from a front end to change state
//! - Responses: result-or-error values returned synchronously

pub mod command;
pub mod types;

// Re-exports
pub use command::{PosCommand, PosCommandPayload};
pub use types::*;
