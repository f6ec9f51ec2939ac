//! Table session actions

use crate::pos::error::PosResult;
use crate::pos::session;
use crate::pos::traits::{CommandContext, CommandHandler};
use shared::models::CustomerRef;
use shared::order::CommandOutcome;

#[derive(Debug, Clone)]
pub struct SeatCustomerAction {
    pub table_id: i64,
    pub customer: CustomerRef,
}

impl CommandHandler for SeatCustomerAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let customer_id = session::seat_customer(ctx.store, self.table_id, &self.customer, ctx.now)?;
        Ok(CommandOutcome::CustomerLinked { customer_id })
    }
}

#[derive(Debug, Clone)]
pub struct AddOrderLineAction {
    pub table_id: i64,
    pub customer_index: usize,
    pub item_id: i64,
}

impl CommandHandler for AddOrderLineAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::add_order_line(ctx.store, self.table_id, self.customer_index, self.item_id, ctx.now)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeQuantityAction {
    pub table_id: i64,
    pub customer_index: usize,
    pub line_index: usize,
    pub delta: i32,
}

impl CommandHandler for ChangeQuantityAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::change_quantity(
            ctx.store,
            self.table_id,
            self.customer_index,
            self.line_index,
            self.delta,
        )?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct RemoveLineAction {
    pub table_id: i64,
    pub customer_index: usize,
    pub line_index: usize,
}

impl CommandHandler for RemoveLineAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::remove_line(ctx.store, self.table_id, self.customer_index, self.line_index)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct AppendCustomerTabAction {
    pub table_id: i64,
    pub customer: CustomerRef,
}

impl CommandHandler for AppendCustomerTabAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let (customer_index, customer_id) =
            session::append_customer_tab(ctx.store, self.table_id, &self.customer, ctx.now)?;
        Ok(CommandOutcome::TabAppended {
            customer_index,
            customer_id: Some(customer_id),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RemoveCustomerTabAction {
    pub table_id: i64,
    pub customer_index: usize,
}

impl CommandHandler for RemoveCustomerTabAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::remove_customer_tab(ctx.store, self.table_id, self.customer_index)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct SetCustomerCountAction {
    pub table_id: i64,
    pub count: u32,
}

impl CommandHandler for SetCustomerCountAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::set_customer_count(ctx.store, self.table_id, self.count)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct MarkTabPaidAction {
    pub table_id: i64,
    pub customer_index: usize,
}

impl CommandHandler for MarkTabPaidAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::mark_tab_paid(ctx.store, self.table_id, self.customer_index, ctx.now)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct MarkTabUnpaidAction {
    pub table_id: i64,
    pub customer_index: usize,
}

impl CommandHandler for MarkTabUnpaidAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::mark_tab_unpaid(ctx.store, self.table_id, self.customer_index)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct ResetToAvailableAction {
    pub table_id: i64,
}

impl CommandHandler for ResetToAvailableAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        let history_recorded = session::reset_to_available(ctx.store, self.table_id, ctx.now)?;
        Ok(CommandOutcome::TableReset { history_recorded })
    }
}

#[derive(Debug, Clone)]
pub struct MarkForCleaningAction {
    pub table_id: i64,
}

impl CommandHandler for MarkForCleaningAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::mark_for_cleaning(ctx.store, self.table_id)?;
        Ok(CommandOutcome::Done)
    }
}

#[derive(Debug, Clone)]
pub struct FinishCleaningAction {
    pub table_id: i64,
}

impl CommandHandler for FinishCleaningAction {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        session::finish_cleaning(ctx.store, self.table_id)?;
        Ok(CommandOutcome::Done)
    }
}
