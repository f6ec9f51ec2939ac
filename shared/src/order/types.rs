use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to do when a settlement amount is below the table total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Refuse the settlement; nothing changes
    #[default]
    Reject,
    /// Settle and record the difference as a due entry for the linked customer
    RecordAsDue,
}

/// Split billing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    Equal,
    Items,
    Custom,
}

/// Import merge counters for one collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Incoming records matched to a local record
    pub updated: usize,
    /// Incoming records appended
    pub added: usize,
    /// Local records the import did not mention
    pub kept: usize,
}

/// Per-collection merge counters, keyed by collection name
pub type ImportSummary = BTreeMap<String, MergeStats>;

/// Command-specific result data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Nothing beyond success to report
    Done,
    CustomerLinked {
        customer_id: i64,
    },
    TabAppended {
        customer_index: usize,
        customer_id: Option<i64>,
    },
    TableReset {
        history_recorded: bool,
    },
    Settled {
        total: f64,
        paid: f64,
        change: f64,
        due_entry_id: Option<i64>,
    },
    DueRecorded {
        entry_id: i64,
    },
    DuePaymentApplied {
        applied: f64,
        remaining: f64,
    },
    CustomerPaymentApplied {
        applied: f64,
        excess: f64,
    },
    MenuItemAdded {
        item_id: i64,
    },
    TableAdded {
        table_id: i64,
    },
    Imported {
        summary: ImportSummary,
    },
}

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CommandOutcome>,
    /// Non-fatal conditions the operator should see
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, outcome: CommandOutcome, warnings: Vec<String>) -> Self {
        Self {
            command_id,
            success: true,
            outcome: Some(outcome),
            warnings,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            outcome: None,
            warnings: Vec::new(),
            error: Some(error),
        }
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    /// Numeric code from the unified error table (serialized as u16)
    pub error_code: ErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            error_code: code.error_code(),
            message: message.into(),
        }
    }
}

/// Command error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    TableNotFound,
    TableNotSelected,
    TableOccupied,
    TableNotOccupied,
    TableCleaning,
    TabNotFound,
    TabsUnpaid,
    TabHasOrders,
    NotGroupMode,
    MenuItemNotFound,
    MenuItemUnavailable,
    CustomerNotFound,
    CustomerNameRequired,
    DueEntryNotFound,
    InvalidAmount,
    PaymentShortfall,
    InvalidOperation,
    NotImplemented,
    ImportMalformed,
    InternalError,
}

impl CommandErrorCode {
    /// Numeric code in the unified error table
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TableNotFound => ErrorCode::TableNotFound,
            Self::TableNotSelected => ErrorCode::TableNotSelected,
            Self::TableOccupied => ErrorCode::TableOccupied,
            Self::TableNotOccupied => ErrorCode::TableNotOccupied,
            Self::TableCleaning => ErrorCode::TableCleaning,
            Self::TabNotFound => ErrorCode::TabNotFound,
            Self::TabsUnpaid => ErrorCode::TabsUnpaid,
            Self::TabHasOrders => ErrorCode::TabHasOrders,
            Self::NotGroupMode => ErrorCode::NotGroupMode,
            Self::MenuItemNotFound => ErrorCode::MenuItemNotFound,
            Self::MenuItemUnavailable => ErrorCode::MenuItemUnavailable,
            Self::CustomerNotFound => ErrorCode::CustomerNotFound,
            Self::CustomerNameRequired => ErrorCode::CustomerNameRequired,
            Self::DueEntryNotFound => ErrorCode::DueEntryNotFound,
            Self::InvalidAmount => ErrorCode::PaymentInvalidAmount,
            Self::PaymentShortfall => ErrorCode::PaymentInsufficientAmount,
            Self::InvalidOperation => ErrorCode::InvalidRequest,
            Self::NotImplemented => ErrorCode::NotImplemented,
            Self::ImportMalformed => ErrorCode::ImportMalformed,
            Self::InternalError => ErrorCode::InternalError,
        }
    }
}
