//! Unified error codes for the dine-in POS
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order / tab errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 8xxx: Customer and due-ledger errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Feature not implemented
    NotImplemented = 9,

    // ==================== 4xxx: Order ====================
    /// Customer tab not found
    TabNotFound = 4001,
    /// Some tabs with orders are still unpaid
    TabsUnpaid = 4004,
    /// Table is not in group mode
    NotGroupMode = 4005,
    /// Tab still holds order lines
    TabHasOrders = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment amount is insufficient
    PaymentInsufficientAmount = 5002,
    /// Payment amount is invalid
    PaymentInvalidAmount = 5003,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is unavailable
    MenuItemUnavailable = 6003,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is occupied
    TableOccupied = 7002,
    /// Table is not occupied
    TableNotOccupied = 7003,
    /// Table is being cleaned
    TableCleaning = 7004,
    /// No table selected
    TableNotSelected = 7005,

    // ==================== 8xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 8001,
    /// Customer name is required
    CustomerNameRequired = 8002,
    /// Due ledger entry not found
    DueEntryNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Import document is malformed
    ImportMalformed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            9 => Ok(ErrorCode::NotImplemented),

            // Order
            4001 => Ok(ErrorCode::TabNotFound),
            4004 => Ok(ErrorCode::TabsUnpaid),
            4005 => Ok(ErrorCode::NotGroupMode),
            4006 => Ok(ErrorCode::TabHasOrders),

            // Payment
            5002 => Ok(ErrorCode::PaymentInsufficientAmount),
            5003 => Ok(ErrorCode::PaymentInvalidAmount),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6003 => Ok(ErrorCode::MenuItemUnavailable),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7003 => Ok(ErrorCode::TableNotOccupied),
            7004 => Ok(ErrorCode::TableCleaning),
            7005 => Ok(ErrorCode::TableNotSelected),

            // Customer
            8001 => Ok(ErrorCode::CustomerNotFound),
            8002 => Ok(ErrorCode::CustomerNameRequired),
            8101 => Ok(ErrorCode::DueEntryNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9101 => Ok(ErrorCode::ImportMalformed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
