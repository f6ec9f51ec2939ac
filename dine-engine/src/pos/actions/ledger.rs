//! Due ledger actions

use crate::pos::error::PosResult;
use crate::pos::ledger;
use crate::pos::traits::{CommandContext, CommandHandler};
use shared::order::CommandOutcome;

#[derive(Debug, Clone)]
pub struct RecordManualDueAction {
    pub customer_id: i64,
    pub amount: f64,
    pub description: String,
}

impl CommandHandler for RecordManualDueAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let entry_id = ledger::record_manual_due(
            ctx.store,
            self.customer_id,
            self.amount,
            &self.description,
            ctx.now,
        )?;
        Ok(CommandOutcome::DueRecorded { entry_id })
    }
}

#[derive(Debug, Clone)]
pub struct ApplyDuePaymentAction {
    pub entry_id: i64,
    pub amount: f64,
}

impl CommandHandler for ApplyDuePaymentAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let payment = ledger::apply_payment(ctx.store, self.entry_id, self.amount, ctx.now)?;
        Ok(CommandOutcome::DuePaymentApplied {
            applied: payment.applied,
            remaining: payment.remaining,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MarkEntryPaidAction {
    pub entry_id: i64,
}

impl CommandHandler for MarkEntryPaidAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        ledger::mark_entry_paid(ctx.store, self.entry_id, ctx.now)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDueEntryAction {
    pub entry_id: i64,
}

impl CommandHandler for DeleteDueEntryAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        ledger::delete_entry(ctx.store, self.entry_id)?;
        Ok(CommandOutcome::Done)
    }
}
