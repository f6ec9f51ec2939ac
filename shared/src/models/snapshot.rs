//! Persistence snapshot

use super::{Customer, DiningTable, DueLedgerEntry, HistoricalOrder, MenuItem};
use serde::{Deserialize, Serialize};

/// Everything the store persists, in one document.
///
/// `orders` holds stand-alone order records kept for compatibility with
/// older data; the engine carries them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosSnapshot {
    #[serde(default)]
    pub tables: Vec<DiningTable>,
    #[serde(default)]
    pub orders: Vec<serde_json::Value>,
    #[serde(default)]
    pub order_history: Vec<HistoricalOrder>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub due_expenses: Vec<DueLedgerEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DueStatus;

    #[test]
    fn empty_object_decodes_to_default() {
        let s: PosSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(s, PosSnapshot::default());
    }

    #[test]
    fn due_entry_accepts_paid_date_and_order_id() {
        let json = r#"{"dueExpenses": [{
            "id": 1714557600000, "customerId": 7, "amount": 50,
            "description": "Partial payment for Table 3", "status": "paid",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "paidDate": "2024-05-02T10:00:00.000Z",
            "orderId": "TBL3-1714557600000"
        }]}"#;
        let s: PosSnapshot = serde_json::from_str(json).unwrap();
        let e = &s.due_expenses[0];
        assert_eq!(e.status, DueStatus::Paid);
        assert!(e.paid_at.is_some());
        assert_eq!(e.originating_order_id.as_deref(), Some("TBL3-1714557600000"));
    }
}
