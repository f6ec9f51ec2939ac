//! Command handler trait
//!
//! Actions run against a staged copy of the store held in `CommandContext`.
//! The manager commits the copy only when the handler returns `Ok`.

use super::error::PosResult;
use super::store::PosStore;
use chrono::{DateTime, Utc};
use enum_dispatch::enum_dispatch;
use shared::order::CommandOutcome;

/// Mutable view handed to every action
pub struct CommandContext<'a> {
    pub store: &'a mut PosStore,
    /// Single clock reading for the whole command
    pub now: DateTime<Utc>,
    warnings: Vec<String>,
}

impl<'a> CommandContext<'a> {
    pub fn new(store: &'a mut PosStore, now: DateTime<Utc>) -> Self {
        Self {
            store,
            now,
            warnings: Vec::new(),
        }
    }

    /// Non-fatal notice returned to the caller with a successful response
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings_mut(&mut self) -> &mut Vec<String> {
        &mut self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

#[enum_dispatch]
pub trait CommandHandler {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome>;
}
