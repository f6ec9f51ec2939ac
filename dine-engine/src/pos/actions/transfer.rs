//! ImportData command handler
//!
//! Merges an exported document into the staged store. A malformed document
//! or a collection that no longer decodes refuses the whole import.

use crate::pos::error::PosResult;
use crate::pos::traits::{CommandContext, CommandHandler};
use crate::transfer;
use shared::order::CommandOutcome;

#[derive(Debug, Clone)]
pub struct ImportDataAction {
    pub document: serde_json::Value,
}

impl CommandHandler for ImportDataAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let summary = transfer::import_document(ctx.store, &self.document)?;
        Ok(CommandOutcome::Imported { summary })
    }
}
