//! Due Ledger Entry Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    #[default]
    Pending,
    Paid,
}

/// Outstanding amount owed by a customer (欠款)
///
/// `amount` is the remaining balance; partial payments overwrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueLedgerEntry {
    pub id: i64,
    pub customer_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: DueStatus,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "paidDate", alias = "paidAt", default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(rename = "orderId", default, skip_serializing_if = "Option::is_none")]
    pub originating_order_id: Option<String>,
}

impl DueLedgerEntry {
    pub fn is_pending(&self) -> bool {
        self.status == DueStatus::Pending
    }
}
