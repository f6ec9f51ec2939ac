//! Command action implementations
//!
//! Each action implements `CommandHandler` for one command type.

use enum_dispatch::enum_dispatch;

use super::traits::{CommandContext, CommandHandler};
use super::error::PosResult;
use shared::order::{CommandOutcome, PosCommand, PosCommandPayload};

mod billing;
mod catalog;
mod customers;
mod ledger;
mod session;
mod transfer;

pub use billing::ProcessPaymentAction;
pub use catalog::{
    AddMenuItemAction, AddTableAction, DeleteMenuItemAction, DeleteTableAction,
    UpdateMenuItemAction, UpdateTableAction,
};
pub use customers::{
    ApplyCustomerPaymentAction, CreateCustomerAction, DeleteCustomerAction, UpdateCustomerAction,
};
pub use ledger::{ApplyDuePaymentAction, DeleteDueEntryAction, MarkEntryPaidAction, RecordManualDueAction};
pub use session::{
    AddOrderLineAction, AppendCustomerTabAction, ChangeQuantityAction, FinishCleaningAction,
    MarkForCleaningAction, MarkTabPaidAction, MarkTabUnpaidAction, RemoveCustomerTabAction,
    RemoveLineAction, ResetToAvailableAction, SeatCustomerAction, SetCustomerCountAction,
};
pub use transfer::ImportDataAction;

/// Does nothing
#[derive(Debug, Clone)]
pub struct NoopAction;

impl CommandHandler for NoopAction {
    fn execute(&self, _ctx: &mut CommandContext<'_>) -> PosResult<CommandOutcome> {
        Ok(CommandOutcome::Done)
    }
}

/// CommandAction enum - dispatches to concrete action implementations
#[enum_dispatch(CommandHandler)]
pub enum CommandAction {
    SeatCustomer(SeatCustomerAction),
    AddOrderLine(AddOrderLineAction),
    ChangeQuantity(ChangeQuantityAction),
    RemoveLine(RemoveLineAction),
    AppendCustomerTab(AppendCustomerTabAction),
    RemoveCustomerTab(RemoveCustomerTabAction),
    SetCustomerCount(SetCustomerCountAction),
    MarkTabPaid(MarkTabPaidAction),
    MarkTabUnpaid(MarkTabUnpaidAction),
    ResetToAvailable(ResetToAvailableAction),
    MarkForCleaning(MarkForCleaningAction),
    FinishCleaning(FinishCleaningAction),
    ProcessPayment(ProcessPaymentAction),
    CreateCustomer(CreateCustomerAction),
    UpdateCustomer(UpdateCustomerAction),
    DeleteCustomer(DeleteCustomerAction),
    ApplyCustomerPayment(ApplyCustomerPaymentAction),
    RecordManualDue(RecordManualDueAction),
    ApplyDuePayment(ApplyDuePaymentAction),
    MarkEntryPaid(MarkEntryPaidAction),
    DeleteDueEntry(DeleteDueEntryAction),
    AddMenuItem(AddMenuItemAction),
    UpdateMenuItem(UpdateMenuItemAction),
    DeleteMenuItem(DeleteMenuItemAction),
    AddTable(AddTableAction),
    UpdateTable(UpdateTableAction),
    DeleteTable(DeleteTableAction),
    ImportData(ImportDataAction),
    Noop(NoopAction),
}

/// Convert PosCommand to CommandAction
///
/// This is the ONLY place with a match on PosCommandPayload.
impl From<&PosCommand> for CommandAction {
    fn from(cmd: &PosCommand) -> Self {
        match &cmd.payload {
            PosCommandPayload::SeatCustomer { table_id, customer } => {
                CommandAction::SeatCustomer(SeatCustomerAction {
                    table_id: *table_id,
                    customer: customer.clone(),
                })
            }
            PosCommandPayload::AddOrderLine {
                table_id,
                customer_index,
                item_id,
            } => CommandAction::AddOrderLine(AddOrderLineAction {
                table_id: *table_id,
                customer_index: *customer_index,
                item_id: *item_id,
            }),
            PosCommandPayload::ChangeQuantity {
                table_id,
                customer_index,
                line_index,
                delta,
            } => CommandAction::ChangeQuantity(ChangeQuantityAction {
                table_id: *table_id,
                customer_index: *customer_index,
                line_index: *line_index,
                delta: *delta,
            }),
            PosCommandPayload::RemoveLine {
                table_id,
                customer_index,
                line_index,
            } => CommandAction::RemoveLine(RemoveLineAction {
                table_id: *table_id,
                customer_index: *customer_index,
                line_index: *line_index,
            }),
            PosCommandPayload::AppendCustomerTab { table_id, customer } => {
                CommandAction::AppendCustomerTab(AppendCustomerTabAction {
                    table_id: *table_id,
                    customer: customer.clone(),
                })
            }
            PosCommandPayload::RemoveCustomerTab {
                table_id,
                customer_index,
            } => CommandAction::RemoveCustomerTab(RemoveCustomerTabAction {
                table_id: *table_id,
                customer_index: *customer_index,
            }),
            PosCommandPayload::SetCustomerCount { table_id, count } => {
                CommandAction::SetCustomerCount(SetCustomerCountAction {
                    table_id: *table_id,
                    count: *count,
                })
            }
            PosCommandPayload::MarkTabPaid {
                table_id,
                customer_index,
            } => CommandAction::MarkTabPaid(MarkTabPaidAction {
                table_id: *table_id,
                customer_index: *customer_index,
            }),
            PosCommandPayload::MarkTabUnpaid {
                table_id,
                customer_index,
            } => CommandAction::MarkTabUnpaid(MarkTabUnpaidAction {
                table_id: *table_id,
                customer_index: *customer_index,
            }),
            PosCommandPayload::ResetToAvailable { table_id } => {
                CommandAction::ResetToAvailable(ResetToAvailableAction { table_id: *table_id })
            }
            PosCommandPayload::MarkForCleaning { table_id } => {
                CommandAction::MarkForCleaning(MarkForCleaningAction { table_id: *table_id })
            }
            PosCommandPayload::FinishCleaning { table_id } => {
                CommandAction::FinishCleaning(FinishCleaningAction { table_id: *table_id })
            }
            PosCommandPayload::ProcessPayment {
                table_id,
                amount,
                method,
                shortfall,
            } => CommandAction::ProcessPayment(ProcessPaymentAction {
                table_id: *table_id,
                amount: *amount,
                method: method.clone(),
                shortfall: *shortfall,
            }),
            PosCommandPayload::CreateCustomer { customer } => {
                CommandAction::CreateCustomer(CreateCustomerAction {
                    customer: customer.clone(),
                })
            }
            PosCommandPayload::UpdateCustomer {
                customer_id,
                update,
            } => CommandAction::UpdateCustomer(UpdateCustomerAction {
                customer_id: *customer_id,
                update: update.clone(),
            }),
            PosCommandPayload::DeleteCustomer { customer_id } => {
                CommandAction::DeleteCustomer(DeleteCustomerAction {
                    customer_id: *customer_id,
                })
            }
            PosCommandPayload::ApplyCustomerPayment {
                customer_id,
                amount,
            } => CommandAction::ApplyCustomerPayment(ApplyCustomerPaymentAction {
                customer_id: *customer_id,
                amount: *amount,
            }),
            PosCommandPayload::RecordManualDue {
                customer_id,
                amount,
                description,
            } => CommandAction::RecordManualDue(RecordManualDueAction {
                customer_id: *customer_id,
                amount: *amount,
                description: description.clone(),
            }),
            PosCommandPayload::ApplyDuePayment { entry_id, amount } => {
                CommandAction::ApplyDuePayment(ApplyDuePaymentAction {
                    entry_id: *entry_id,
                    amount: *amount,
                })
            }
            PosCommandPayload::MarkEntryPaid { entry_id } => {
                CommandAction::MarkEntryPaid(MarkEntryPaidAction { entry_id: *entry_id })
            }
            PosCommandPayload::DeleteDueEntry { entry_id } => {
                CommandAction::DeleteDueEntry(DeleteDueEntryAction { entry_id: *entry_id })
            }
            PosCommandPayload::AddMenuItem => CommandAction::AddMenuItem(AddMenuItemAction),
            PosCommandPayload::UpdateMenuItem { item_id, update } => {
                CommandAction::UpdateMenuItem(UpdateMenuItemAction {
                    item_id: *item_id,
                    update: update.clone(),
                })
            }
            PosCommandPayload::DeleteMenuItem { item_id } => {
                CommandAction::DeleteMenuItem(DeleteMenuItemAction { item_id: *item_id })
            }
            PosCommandPayload::AddTable => CommandAction::AddTable(AddTableAction),
            PosCommandPayload::UpdateTable { table_id, update } => {
                CommandAction::UpdateTable(UpdateTableAction {
                    table_id: *table_id,
                    update: update.clone(),
                })
            }
            PosCommandPayload::DeleteTable { table_id } => {
                CommandAction::DeleteTable(DeleteTableAction { table_id: *table_id })
            }
            PosCommandPayload::ImportData { document } => {
                CommandAction::ImportData(ImportDataAction {
                    document: document.clone(),
                })
            }
            PosCommandPayload::Noop => CommandAction::Noop(NoopAction),
        }
    }
}
