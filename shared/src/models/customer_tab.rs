//! Customer Tab Model

use super::OrderLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status of a single tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

/// One customer's running order within a table (分单)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTab {
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(rename = "orders", default)]
    pub order_lines: Vec<OrderLine>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl CustomerTab {
    pub fn new(display_name: impl Into<String>, customer_id: Option<i64>) -> Self {
        Self {
            customer_id,
            display_name: display_name.into(),
            order_lines: Vec::new(),
            payment_status: PaymentStatus::Unpaid,
            paid_at: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn has_lines(&self) -> bool {
        !self.order_lines.is_empty()
    }
}
