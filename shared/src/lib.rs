//! Shared types for the dine-in POS
//!
//! Plain data shared by the engine and any front end: entity models,
//! the command vocabulary, unified error codes and small utilities.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ErrorCode;
pub use models::PosSnapshot;
pub use order::{CommandError, CommandErrorCode, CommandResponse, PosCommand, PosCommandPayload};
