//! ProcessPayment command handler
//!
//! Settles a whole table. An accepted shortfall that cannot be attributed to a
//! customer is reported as a warning on the response.

use crate::pos::billing;
use crate::pos::error::PosResult;
use crate::pos::traits::{CommandContext, CommandHandler};
use shared::order::{CommandOutcome, ShortfallPolicy};

#[derive(Debug, Clone)]
pub struct ProcessPaymentAction {
    pub table_id: i64,
    pub amount: f64,
    pub method: String,
    pub shortfall: ShortfallPolicy,
}

impl CommandHandler for ProcessPaymentAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let now = ctx.now;
        let mut warnings = Vec::new();
        let settlement = billing::process_payment(
            ctx.store,
            self.table_id,
            self.amount,
            &self.method,
            self.shortfall,
            now,
            &mut warnings,
        )?;
        ctx.warnings_mut().extend(warnings);

        Ok(CommandOutcome::Settled {
            total: settlement.total,
            paid: settlement.paid,
            change: settlement.change,
            due_entry_id: settlement.due_entry_id,
        })
    }
}
