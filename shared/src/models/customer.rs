//! Customer Model

use super::HistoricalOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer entity (顾客)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Party name rather than a person
    #[serde(default)]
    pub is_group: bool,
    #[serde(default = "crate::util::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub due_amount: f64,
    #[serde(default)]
    pub order_history: Vec<HistoricalOrder>,
}

/// Create customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_group: bool,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Either an existing directory entry or a new one to create
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CustomerRef {
    Existing { id: i64 },
    New(CustomerCreate),
}
