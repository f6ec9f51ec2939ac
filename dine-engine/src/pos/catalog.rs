//! Menu and table catalog maintenance

use super::error::{PosError, PosResult};
use super::money::validate_price;
use super::store::PosStore;
use shared::models::{DiningTable, DiningTableUpdate, MenuItem, MenuItemUpdate, TableStatus};

const NEW_ITEM_NAME: &str = "New Item";
const NEW_ITEM_CATEGORY: &str = "Uncategorized";
const NEW_TABLE_CAPACITY: u32 = 4;

/// Append a placeholder menu item; returns its id
pub fn add_menu_item(store: &mut PosStore) -> i64 {
    let id = store.menu.iter().map(|m| m.id).max().unwrap_or(0) + 1;
    store
        .menu
        .push(MenuItem::new(id, NEW_ITEM_NAME, 0.0, NEW_ITEM_CATEGORY, ""));
    tracing::info!(item_id = id, "Menu item added");
    id
}

pub fn update_menu_item(store: &mut PosStore, item_id: i64, update: &MenuItemUpdate) -> PosResult<()> {
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    let item = store
        .menu
        .iter_mut()
        .find(|m| m.id == item_id)
        .ok_or(PosError::MenuItemNotFound(item_id))?;

    if let Some(name) = &update.name {
        item.name = name.trim().to_string();
    }
    if let Some(price) = update.price {
        item.price = price;
    }
    if let Some(category) = &update.category {
        item.category = category.trim().to_string();
    }
    if let Some(description) = &update.description {
        item.description = description.clone();
    }
    if let Some(available) = update.available {
        item.available = available;
    }
    Ok(())
}

/// Existing order lines keep their copied name and price
pub fn delete_menu_item(store: &mut PosStore, item_id: i64) -> PosResult<()> {
    let before = store.menu.len();
    store.menu.retain(|m| m.id != item_id);
    if store.menu.len() == before {
        return Err(PosError::MenuItemNotFound(item_id));
    }
    tracing::info!(item_id, "Menu item deleted");
    Ok(())
}

/// Orderable items, filtered by a case-insensitive search over name and
/// description and by exact category (`None` or "all" means every category)
pub fn available_menu<'a>(store: &'a PosStore, search: &str, category: Option<&str>) -> Vec<&'a MenuItem> {
    let needle = search.trim().to_lowercase();
    store
        .menu
        .iter()
        .filter(|m| m.available)
        .filter(|m| match category {
            None | Some("all") => true,
            Some(c) => m.category == c,
        })
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Append a table "Table N" with capacity 4; returns its id
pub fn add_table(store: &mut PosStore) -> i64 {
    let id = store.tables.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    store.tables.push(DiningTable::new(id, NEW_TABLE_CAPACITY));
    tracing::info!(table_id = id, "Table added");
    id
}

pub fn update_table(store: &mut PosStore, table_id: i64, update: &DiningTableUpdate) -> PosResult<()> {
    if update.capacity == Some(0) {
        return Err(PosError::InvalidOperation("table capacity must be at least 1".into()));
    }
    let table = store.table_mut(table_id)?;
    if let Some(name) = &update.name {
        table.name = name.trim().to_string();
    }
    if let Some(capacity) = update.capacity {
        table.capacity = capacity;
    }
    Ok(())
}

pub fn delete_table(store: &mut PosStore, table_id: i64) -> PosResult<()> {
    if store.table(table_id)?.status == TableStatus::Occupied {
        return Err(PosError::TableOccupied(table_id));
    }
    store.tables.retain(|t| t.id != table_id);
    tracing::info!(table_id, "Table deleted");
    Ok(())
}
