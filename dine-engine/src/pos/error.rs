//! Domain errors for the POS engine

use shared::order::{CommandError, CommandErrorCode};
use thiserror::Error;

/// Errors raised by table, billing, customer, ledger and catalog operations
///
/// Every variant is a refused precondition: the operation had no effect.
#[derive(Debug, Error)]
pub enum PosError {
    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("No table selected")]
    TableNotSelected,

    #[error("Table {0} is occupied")]
    TableOccupied(i64),

    #[error("Table {0} is not occupied")]
    TableNotOccupied(i64),

    #[error("Table {0} is being cleaned")]
    TableCleaning(i64),

    #[error("Customer tab {index} not found on table {table_id}")]
    TabNotFound { table_id: i64, index: usize },

    #[error("Table {0} still has unpaid customers")]
    TabsUnpaid(i64),

    #[error("Customer tab {index} on table {table_id} still has orders")]
    TabHasOrders { table_id: i64, index: usize },

    #[error("Table {0} is not in group mode")]
    NotGroupMode(i64),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(i64),

    #[error("Menu item {0} is unavailable")]
    MenuItemUnavailable(i64),

    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    #[error("Customer name is required")]
    CustomerNameRequired,

    #[error("Due entry not found: {0}")]
    DueEntryNotFound(i64),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Payment is {short:.2} short (total {total:.2}, paid {paid:.2})")]
    PaymentShortfall { total: f64, paid: f64, short: f64 },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PosResult<T> = Result<T, PosError>;

impl From<PosError> for CommandError {
    fn from(err: PosError) -> Self {
        let code = match &err {
            PosError::TableNotFound(_) => CommandErrorCode::TableNotFound,
            PosError::TableNotSelected => CommandErrorCode::TableNotSelected,
            PosError::TableOccupied(_) => CommandErrorCode::TableOccupied,
            PosError::TableNotOccupied(_) => CommandErrorCode::TableNotOccupied,
            PosError::TableCleaning(_) => CommandErrorCode::TableCleaning,
            PosError::TabNotFound { .. } => CommandErrorCode::TabNotFound,
            PosError::TabsUnpaid(_) => CommandErrorCode::TabsUnpaid,
            PosError::TabHasOrders { .. } => CommandErrorCode::TabHasOrders,
            PosError::NotGroupMode(_) => CommandErrorCode::NotGroupMode,
            PosError::MenuItemNotFound(_) => CommandErrorCode::MenuItemNotFound,
            PosError::MenuItemUnavailable(_) => CommandErrorCode::MenuItemUnavailable,
            PosError::CustomerNotFound(_) => CommandErrorCode::CustomerNotFound,
            PosError::CustomerNameRequired => CommandErrorCode::CustomerNameRequired,
            PosError::DueEntryNotFound(_) => CommandErrorCode::DueEntryNotFound,
            PosError::InvalidAmount(_) => CommandErrorCode::InvalidAmount,
            PosError::PaymentShortfall { .. } => CommandErrorCode::PaymentShortfall,
            PosError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            PosError::NotImplemented(_) => CommandErrorCode::NotImplemented,
            PosError::Import(_) => CommandErrorCode::ImportMalformed,
            PosError::Internal(_) => CommandErrorCode::InternalError,
        };
        CommandError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_message_and_code() {
        let err = PosError::PaymentShortfall {
            total: 200.0,
            paid: 150.0,
            short: 50.0,
        };
        assert_eq!(
            err.to_string(),
            "Payment is 50.00 short (total 200.00, paid 150.00)"
        );
        let cmd: CommandError = err.into();
        assert_eq!(cmd.code, CommandErrorCode::PaymentShortfall);
        assert_eq!(cmd.error_code.code(), 5002);
    }

    #[test]
    fn tab_not_found_maps() {
        let cmd: CommandError = PosError::TabNotFound { table_id: 2, index: 5 }.into();
        assert_eq!(cmd.code, CommandErrorCode::TabNotFound);
        assert!(cmd.message.contains("tab 5"));
    }
}
