//! POS commands

use crate::models::{CustomerCreate, CustomerRef, CustomerUpdate, DiningTableUpdate, MenuItemUpdate};
use crate::util::{now_millis, snowflake_id};
use serde::{Deserialize, Serialize};

use super::types::ShortfallPolicy;

/// A command with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosCommand {
    /// Client generated id, echoed back in the response
    pub command_id: String,
    /// Client timestamp (ms)
    pub timestamp: i64,
    pub payload: PosCommandPayload,
}

impl PosCommand {
    pub fn new(payload: PosCommandPayload) -> Self {
        Self {
            command_id: snowflake_id().to_string(),
            timestamp: now_millis(),
            payload,
        }
    }

    /// Whether a successful run changes persisted state
    pub fn is_mutating(&self) -> bool {
        !matches!(self.payload, PosCommandPayload::Noop)
    }
}

/// Command payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosCommandPayload {
    // ========== Table session ==========
    /// Link a customer to a table before ordering
    SeatCustomer {
        table_id: i64,
        customer: CustomerRef,
    },
    AddOrderLine {
        table_id: i64,
        customer_index: usize,
        item_id: i64,
    },
    ChangeQuantity {
        table_id: i64,
        customer_index: usize,
        line_index: usize,
        delta: i32,
    },
    RemoveLine {
        table_id: i64,
        customer_index: usize,
        line_index: usize,
    },
    AppendCustomerTab {
        table_id: i64,
        customer: CustomerRef,
    },
    RemoveCustomerTab {
        table_id: i64,
        customer_index: usize,
    },
    SetCustomerCount {
        table_id: i64,
        count: u32,
    },
    MarkTabPaid {
        table_id: i64,
        customer_index: usize,
    },
    MarkTabUnpaid {
        table_id: i64,
        customer_index: usize,
    },
    ResetToAvailable {
        table_id: i64,
    },
    MarkForCleaning {
        table_id: i64,
    },
    FinishCleaning {
        table_id: i64,
    },

    // ========== Billing ==========
    ProcessPayment {
        table_id: i64,
        amount: f64,
        method: String,
        #[serde(default)]
        shortfall: ShortfallPolicy,
    },

    // ========== Customer directory ==========
    CreateCustomer {
        customer: CustomerCreate,
    },
    UpdateCustomer {
        customer_id: i64,
        update: CustomerUpdate,
    },
    DeleteCustomer {
        customer_id: i64,
    },
    ApplyCustomerPayment {
        customer_id: i64,
        amount: f64,
    },

    // ========== Due ledger ==========
    RecordManualDue {
        customer_id: i64,
        amount: f64,
        description: String,
    },
    ApplyDuePayment {
        entry_id: i64,
        amount: f64,
    },
    MarkEntryPaid {
        entry_id: i64,
    },
    DeleteDueEntry {
        entry_id: i64,
    },

    // ========== Catalog ==========
    AddMenuItem,
    UpdateMenuItem {
        item_id: i64,
        update: MenuItemUpdate,
    },
    DeleteMenuItem {
        item_id: i64,
    },
    AddTable,
    UpdateTable {
        table_id: i64,
        update: DiningTableUpdate,
    },
    DeleteTable {
        table_id: i64,
    },

    // ========== Data transfer ==========
    ImportData {
        document: serde_json::Value,
    },

    /// Does nothing; used to probe the command path
    Noop,
}
