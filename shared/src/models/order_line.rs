//! Order Line Model

use super::MenuItem;
use serde::{Deserialize, Serialize};

/// Order line (订单行)
///
/// Snapshot of a menu item at the moment it was added. Later catalog edits
/// never touch existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "id")]
    pub item_id: i64,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderLine {
    /// New line with quantity 1, copied from a menu item
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }
}
