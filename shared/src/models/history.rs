//! Historical Order Model

use super::OrderLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_customer_count() -> u32 {
    1
}

/// Settled order record (历史订单), append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrder {
    pub table_id: i64,
    pub timestamp: DateTime<Utc>,
    pub total: f64,
    pub paid: f64,
    #[serde(default)]
    pub change: f64,
    pub payment_method: String,
    #[serde(rename = "orders", default)]
    pub order_lines: Vec<OrderLine>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default = "default_customer_count")]
    pub customer_count: u32,
    #[serde(default)]
    pub customer_id: Option<i64>,
}
