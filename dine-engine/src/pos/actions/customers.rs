//! Customer directory actions

use crate::pos::customers;
use crate::pos::error::PosResult;
use crate::pos::traits::{CommandContext, CommandHandler};
use shared::models::{CustomerCreate, CustomerUpdate};
use shared::order::CommandOutcome;

#[derive(Debug, Clone)]
pub struct CreateCustomerAction {
    pub customer: CustomerCreate,
}

impl CommandHandler for CreateCustomerAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let customer = customers::create_customer(ctx.store, &self.customer, ctx.now)?;
        if customer.name != self.customer.name.trim() {
            ctx.warn(format!("Name already in use, saved as \"{}\"", customer.name));
        }
        Ok(CommandOutcome::CustomerLinked {
            customer_id: customer.id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCustomerAction {
    pub customer_id: i64,
    pub update: CustomerUpdate,
}

impl CommandHandler for UpdateCustomerAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        customers::update_customer(ctx.store, self.customer_id, &self.update)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCustomerAction {
    pub customer_id: i64,
}

impl CommandHandler for DeleteCustomerAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let removed = customers::delete_customer(ctx.store, self.customer_id)?;
        if removed > 0 {
            ctx.warn(format!("{} due entries removed with the customer", removed));
        }
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct ApplyCustomerPaymentAction {
    pub customer_id: i64,
    pub amount: f64,
}

impl CommandHandler for ApplyCustomerPaymentAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let payment =
            customers::apply_customer_payment(ctx.store, self.customer_id, self.amount, ctx.now)?;
        if payment.excess > 0.0 {
            ctx.warn(format!("Payment exceeds outstanding due by {:.2}", payment.excess));
        }
        Ok(CommandOutcome::CustomerPaymentApplied {
            applied: payment.applied,
            excess: payment.excess,
        })
    }
}
