//! Data import / export
//!
//! - `merge`: folds an exported JSON document into the local store
//! - `export`: JSON backup document and CSV extracts

mod export;
mod merge;

pub use export::{
    EXPORT_VERSION, customers_csv, due_ledger_csv, export_json, menu_csv, order_lines_csv,
    sales_csv,
};
pub use merge::import_document;

use crate::pos::PosError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Malformed import document: {0}")]
    Malformed(String),

    #[error("Collection `{collection}` could not be decoded after merge: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type TransferResult<T> = Result<T, TransferError>;

impl From<TransferError> for PosError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Malformed(_) | TransferError::Decode { .. } => {
                PosError::Import(err.to_string())
            }
            other => PosError::Internal(other.to_string()),
        }
    }
}
