//! Dining Table Model

use super::{CustomerTab, OrderLine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Table status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
}

fn default_customer_count() -> u32 {
    1
}

/// Dining table entity (桌台)
///
/// `is_group == true`: every line lives in `customer_tabs`, `legacy_lines` is empty.
/// `is_group == false`: `customer_tabs` is empty, lines (if any) live in `legacy_lines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub occupied_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default = "default_customer_count")]
    pub customer_count: u32,
    #[serde(rename = "customers", default)]
    pub customer_tabs: Vec<CustomerTab>,
    #[serde(rename = "orders", default)]
    pub legacy_lines: Vec<OrderLine>,
    #[serde(default)]
    pub current_customer_id: Option<i64>,
}

impl DiningTable {
    pub fn new(id: i64, capacity: u32) -> Self {
        Self {
            id,
            name: format!("Table {}", id),
            capacity,
            status: TableStatus::Available,
            occupied_since: None,
            is_group: false,
            customer_count: 1,
            customer_tabs: Vec::new(),
            legacy_lines: Vec::new(),
            current_customer_id: None,
        }
    }

    /// All active lines regardless of mode
    pub fn active_lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.customer_tabs
            .iter()
            .flat_map(|tab| tab.order_lines.iter())
            .chain(self.legacy_lines.iter())
    }

    pub fn has_active_lines(&self) -> bool {
        self.active_lines().next().is_some()
    }

    /// Drop every session field (tabs, lines, group flag, customer link).
    /// Status is left to the caller.
    pub fn clear_session(&mut self) {
        self.customer_tabs.clear();
        self.legacy_lines.clear();
        self.is_group = false;
        self.customer_count = 1;
        self.occupied_since = None;
        self.current_customer_id = None;
    }
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub capacity: Option<u32>,
}
