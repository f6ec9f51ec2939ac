//! Table session state machine
//!
//! ```text
//! available ──first line──▶ occupied ──settlement──▶ cleaning ──finish──▶ available
//!                              │
//!                              └──reset (all tabs paid)──▶ available
//! ```
//!
//! The first line added to an available table always opens the table in group
//! mode with one tab. Single (legacy) tables only come from older snapshots and
//! are promoted the first time a second customer or a customer count is set.

use super::error::{PosError, PosResult};
use super::money::{grand_total, to_f64};
use super::store::PosStore;
use chrono::{DateTime, Utc};
use shared::models::{
    CustomerRef, CustomerTab, DiningTable, HistoricalOrder, OrderLine, PaymentStatus, TableStatus,
};

const GUEST_NAME: &str = "Guest";
const MIXED_PAYMENT: &str = "Mixed";

/// Display name for the first tab: the linked customer, else "Guest"
fn first_tab_name(store: &PosStore, table: &DiningTable) -> String {
    table
        .current_customer_id
        .and_then(|id| store.customer(id).ok())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| GUEST_NAME.to_string())
}

/// available → occupied, group mode with exactly one tab
fn open_table(table: &mut DiningTable, first_name: String, now: DateTime<Utc>) {
    table.status = TableStatus::Occupied;
    table.occupied_since = Some(now);
    table.is_group = true;
    table.legacy_lines.clear();
    table.customer_tabs = vec![CustomerTab::new(first_name, table.current_customer_id)];
    table.customer_count = 1;
    tracing::info!(table_id = table.id, "Table occupied");
}

/// single → group, legacy lines move into tab[0]
fn promote_to_group(table: &mut DiningTable, first_name: String) {
    if table.is_group {
        return;
    }
    let mut first = CustomerTab::new(first_name, table.current_customer_id);
    first.order_lines = std::mem::take(&mut table.legacy_lines);
    table.customer_tabs = vec![first];
    table.is_group = true;
    table.customer_count = 1;
    tracing::debug!(table_id = table.id, "Table promoted to group mode");
}

/// Order lines addressed by `customer_index`.
/// A single table exposes its legacy lines as index 0.
fn lines_mut(table: &mut DiningTable, customer_index: usize) -> PosResult<&mut Vec<OrderLine>> {
    let table_id = table.id;
    if table.is_group {
        return table
            .customer_tabs
            .get_mut(customer_index)
            .map(|tab| &mut tab.order_lines)
            .ok_or(PosError::TabNotFound {
                table_id,
                index: customer_index,
            });
    }
    if customer_index == 0 {
        Ok(&mut table.legacy_lines)
    } else {
        Err(PosError::TabNotFound {
            table_id,
            index: customer_index,
        })
    }
}

fn tab_mut(table: &mut DiningTable, customer_index: usize) -> PosResult<&mut CustomerTab> {
    let table_id = table.id;
    if !table.is_group {
        return Err(PosError::NotGroupMode(table_id));
    }
    table
        .customer_tabs
        .get_mut(customer_index)
        .ok_or(PosError::TabNotFound {
            table_id,
            index: customer_index,
        })
}

/// Link a customer to a table (the seating form). Returns the customer id.
pub fn seat_customer(
    store: &mut PosStore,
    table_id: i64,
    customer: &CustomerRef,
    now: DateTime<Utc>,
) -> PosResult<i64> {
    if store.table(table_id)?.status == TableStatus::Cleaning {
        return Err(PosError::TableCleaning(table_id));
    }
    let (customer_id, _) = store.resolve_customer(customer, now)?;
    store.table_mut(table_id)?.current_customer_id = Some(customer_id);
    tracing::info!(table_id, customer_id, "Customer seated");
    Ok(customer_id)
}

/// Add one unit of a menu item to a tab
pub fn add_order_line(
    store: &mut PosStore,
    table_id: i64,
    customer_index: usize,
    item_id: i64,
    now: DateTime<Utc>,
) -> PosResult<()> {
    let item = store.menu_item(item_id)?;
    if !item.available {
        return Err(PosError::MenuItemUnavailable(item_id));
    }
    let new_line = OrderLine::from_menu_item(item);

    let table = store.table(table_id)?;
    let opening = match table.status {
        TableStatus::Cleaning => return Err(PosError::TableCleaning(table_id)),
        TableStatus::Available => {
            if customer_index != 0 {
                return Err(PosError::TabNotFound {
                    table_id,
                    index: customer_index,
                });
            }
            Some(first_tab_name(store, table))
        }
        TableStatus::Occupied => None,
    };

    let table = store.table_mut(table_id)?;
    if let Some(first_name) = opening {
        open_table(table, first_name, now);
    }
    let lines = lines_mut(table, customer_index)?;
    match lines.iter_mut().find(|l| l.item_id == item_id) {
        Some(line) => line.quantity = line.quantity.saturating_add(1),
        None => lines.push(new_line),
    }
    tracing::debug!(table_id, customer_index, item_id, "Order line added");
    Ok(())
}

/// Adjust a line's quantity; reaching zero or below removes the line.
/// A missing line is a no-op.
pub fn change_quantity(
    store: &mut PosStore,
    table_id: i64,
    customer_index: usize,
    line_index: usize,
    delta: i32,
) -> PosResult<()> {
    let lines = lines_mut(store.table_mut(table_id)?, customer_index)?;
    let Some(line) = lines.get_mut(line_index) else {
        tracing::debug!(table_id, customer_index, line_index, "No line at index, nothing to change");
        return Ok(());
    };
    let quantity = i64::from(line.quantity) + i64::from(delta);
    if quantity <= 0 {
        lines.remove(line_index);
    } else {
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    }
    Ok(())
}

/// Remove a line; a missing line is a no-op
pub fn remove_line(
    store: &mut PosStore,
    table_id: i64,
    customer_index: usize,
    line_index: usize,
) -> PosResult<()> {
    let lines = lines_mut(store.table_mut(table_id)?, customer_index)?;
    if line_index < lines.len() {
        lines.remove(line_index);
    }
    Ok(())
}

/// Append a tab for an existing or new customer. Returns the new tab index.
pub fn append_customer_tab(
    store: &mut PosStore,
    table_id: i64,
    customer: &CustomerRef,
    now: DateTime<Utc>,
) -> PosResult<(usize, i64)> {
    let table = store.table(table_id)?;
    if table.status != TableStatus::Occupied {
        return Err(PosError::TableNotOccupied(table_id));
    }
    let first_name = first_tab_name(store, table);
    let (customer_id, name) = store.resolve_customer(customer, now)?;

    let table = store.table_mut(table_id)?;
    promote_to_group(table, first_name);
    table.customer_tabs.push(CustomerTab::new(name, Some(customer_id)));
    table.customer_count = table.customer_tabs.len() as u32;
    let index = table.customer_tabs.len() - 1;
    tracing::info!(table_id, customer_id, index, "Customer tab appended");
    Ok((index, customer_id))
}

/// Remove a tab. Removing the last tab reverts to single mode with no lines;
/// status is left unchanged.
pub fn remove_customer_tab(store: &mut PosStore, table_id: i64, customer_index: usize) -> PosResult<()> {
    let table = store.table_mut(table_id)?;
    tab_mut(table, customer_index)?;
    let removed = table.customer_tabs.remove(customer_index);
    if removed.has_lines() {
        tracing::warn!(table_id, customer_index, lines = removed.order_lines.len(), "Removed a tab that still had orders");
    }
    if table.customer_tabs.is_empty() {
        table.is_group = false;
        table.legacy_lines.clear();
        table.customer_count = 1;
    } else {
        table.customer_count = table.customer_tabs.len() as u32;
    }
    Ok(())
}

/// Set the number of tabs: pads with "Customer k", truncates empty tabs.
/// Dropping a tab that holds lines is refused.
pub fn set_customer_count(store: &mut PosStore, table_id: i64, count: u32) -> PosResult<()> {
    if count == 0 {
        return Err(PosError::InvalidOperation("customer count must be at least 1".into()));
    }
    let table = store.table(table_id)?;
    if table.status != TableStatus::Occupied {
        return Err(PosError::TableNotOccupied(table_id));
    }
    let first_name = first_tab_name(store, table);

    let table = store.table_mut(table_id)?;
    promote_to_group(table, first_name);
    let count = count as usize;
    if let Some(index) = table
        .customer_tabs
        .iter()
        .enumerate()
        .skip(count)
        .find_map(|(i, tab)| tab.has_lines().then_some(i))
    {
        return Err(PosError::TabHasOrders { table_id, index });
    }
    table.customer_tabs.truncate(count);
    while table.customer_tabs.len() < count {
        let k = table.customer_tabs.len() + 1;
        table
            .customer_tabs
            .push(CustomerTab::new(format!("Customer {}", k), None));
    }
    table.customer_count = count as u32;
    Ok(())
}

/// Mark a tab paid. Repeating keeps the first `paid_at`.
pub fn mark_tab_paid(
    store: &mut PosStore,
    table_id: i64,
    customer_index: usize,
    now: DateTime<Utc>,
) -> PosResult<()> {
    let tab = tab_mut(store.table_mut(table_id)?, customer_index)?;
    if tab.payment_status != PaymentStatus::Paid {
        tab.payment_status = PaymentStatus::Paid;
        tab.paid_at = Some(now);
    }
    Ok(())
}

pub fn mark_tab_unpaid(store: &mut PosStore, table_id: i64, customer_index: usize) -> PosResult<()> {
    let tab = tab_mut(store.table_mut(table_id)?, customer_index)?;
    tab.payment_status = PaymentStatus::Unpaid;
    tab.paid_at = None;
    Ok(())
}

/// Every tab with lines is paid. A single table with lines never qualifies.
pub fn all_tabs_paid(table: &DiningTable) -> bool {
    if !table.is_group {
        return table.legacy_lines.is_empty();
    }
    table
        .customer_tabs
        .iter()
        .all(|tab| !tab.has_lines() || tab.is_paid())
}

/// Release a table whose tabs were all settled individually.
/// Returns whether a "Mixed" history record was written.
pub fn reset_to_available(store: &mut PosStore, table_id: i64, now: DateTime<Utc>) -> PosResult<bool> {
    let tax_rate = store.tax_rate();
    let table = store.table(table_id)?;
    if !all_tabs_paid(table) {
        return Err(PosError::TabsUnpaid(table_id));
    }

    let lines: Vec<OrderLine> = table.active_lines().cloned().collect();
    let record = (!lines.is_empty()).then(|| {
        let total = to_f64(grand_total(table, tax_rate));
        HistoricalOrder {
            table_id,
            timestamp: now,
            total,
            paid: total,
            change: 0.0,
            payment_method: MIXED_PAYMENT.to_string(),
            order_lines: lines,
            is_group: table.is_group,
            customer_count: table.customer_count,
            customer_id: table.current_customer_id,
        }
    });
    let recorded = record.is_some();
    if let Some(record) = record {
        store.order_history.push(record);
    }

    let table = store.table_mut(table_id)?;
    table.clear_session();
    table.status = TableStatus::Available;
    tracing::info!(table_id, history_recorded = recorded, "Table reset to available");
    Ok(recorded)
}

/// Any table without active lines → cleaning
pub fn mark_for_cleaning(store: &mut PosStore, table_id: i64) -> PosResult<()> {
    let table = store.table_mut(table_id)?;
    if table.has_active_lines() {
        return Err(PosError::TableOccupied(table_id));
    }
    table.clear_session();
    table.status = TableStatus::Cleaning;
    Ok(())
}

/// Cleaning complete: back to available with a blank session
pub fn finish_cleaning(store: &mut PosStore, table_id: i64) -> PosResult<()> {
    let table = store.table_mut(table_id)?;
    if table.status == TableStatus::Occupied && table.has_active_lines() {
        return Err(PosError::TableOccupied(table_id));
    }
    table.clear_session();
    table.status = TableStatus::Available;
    tracing::info!(table_id, "Table available");
    Ok(())
}

/// Cyclic carousel step: `(index + direction + len) % len`, no-op for ≤1 tabs
pub fn navigate_carousel(index: usize, direction: i32, len: usize) -> usize {
    if len <= 1 {
        return index.min(len.saturating_sub(1));
    }
    let len = len as i64;
    let next = (index as i64 + i64::from(direction)).rem_euclid(len);
    next as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::CustomerCreate;

    fn store() -> PosStore {
        PosStore::with_defaults(Decimal::ZERO)
    }

    fn alice() -> CustomerRef {
        CustomerRef::New(CustomerCreate {
            name: "Alice".into(),
            ..Default::default()
        })
    }

    #[test]
    fn first_add_opens_table_in_group_mode() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 2, 0, 1, now).unwrap();
        add_order_line(&mut s, 2, 0, 1, now).unwrap();

        let t = s.table(2).unwrap();
        assert_eq!(t.status, TableStatus::Occupied);
        assert!(t.is_group);
        assert_eq!(t.customer_count, 1);
        assert_eq!(t.customer_tabs.len(), 1);
        assert_eq!(t.customer_tabs[0].display_name, "Guest");
        assert_eq!(t.customer_tabs[0].order_lines.len(), 1);
        assert_eq!(t.customer_tabs[0].order_lines[0].item_id, 1);
        assert_eq!(t.customer_tabs[0].order_lines[0].quantity, 2);
        assert_eq!(t.occupied_since, Some(now));
    }

    #[test]
    fn first_tab_takes_seated_customer_name() {
        let mut s = store();
        let now = shared::util::now();
        let id = seat_customer(&mut s, 4, &alice(), now).unwrap();
        add_order_line(&mut s, 4, 0, 9, now).unwrap();
        let tab = &s.table(4).unwrap().customer_tabs[0];
        assert_eq!(tab.display_name, "Alice");
        assert_eq!(tab.customer_id, Some(id));
    }

    #[test]
    fn unavailable_item_is_refused() {
        let mut s = store();
        s.menu[0].available = false;
        let err = add_order_line(&mut s, 1, 0, 1, shared::util::now()).unwrap_err();
        assert!(matches!(err, PosError::MenuItemUnavailable(1)));
        assert_eq!(s.table(1).unwrap().status, TableStatus::Available);
    }

    #[test]
    fn cleaning_table_refuses_orders() {
        let mut s = store();
        mark_for_cleaning(&mut s, 1).unwrap();
        assert!(matches!(
            add_order_line(&mut s, 1, 0, 1, shared::util::now()),
            Err(PosError::TableCleaning(1))
        ));
    }

    #[test]
    fn quantity_never_stored_at_zero() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 1, 0, 1, now).unwrap();
        add_order_line(&mut s, 1, 0, 2, now).unwrap();
        change_quantity(&mut s, 1, 0, 0, 3).unwrap();
        assert_eq!(s.table(1).unwrap().customer_tabs[0].order_lines[0].quantity, 4);

        change_quantity(&mut s, 1, 0, 0, -10).unwrap();
        let lines = &s.table(1).unwrap().customer_tabs[0].order_lines;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_id, 2);

        change_quantity(&mut s, 1, 0, 0, -1).unwrap();
        assert!(s.table(1).unwrap().customer_tabs[0].order_lines.is_empty());
        assert!(s.table(1).unwrap().active_lines().all(|l| l.quantity > 0));
    }

    #[test]
    fn change_on_empty_tab_is_noop() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 3, 0, 1, now).unwrap();
        let (index, _) = append_customer_tab(&mut s, 3, &alice(), now).unwrap();
        assert_eq!(index, 1);
        let before = s.table(3).unwrap().clone();
        change_quantity(&mut s, 3, 1, 0, 1).unwrap();
        remove_line(&mut s, 3, 1, 0).unwrap();
        assert_eq!(s.table(3).unwrap(), &before);
    }

    #[test]
    fn append_promotes_legacy_table() {
        let mut s = store();
        let now = shared::util::now();
        {
            let t = s.table_mut(5).unwrap();
            t.status = TableStatus::Occupied;
            t.legacy_lines.push(OrderLine {
                item_id: 1,
                name: "French Fries".into(),
                unit_price: 80.0,
                quantity: 2,
            });
        }
        append_customer_tab(&mut s, 5, &alice(), now).unwrap();
        let t = s.table(5).unwrap();
        assert!(t.is_group);
        assert!(t.legacy_lines.is_empty());
        assert_eq!(t.customer_tabs.len(), 2);
        assert_eq!(t.customer_tabs[0].display_name, "Guest");
        assert_eq!(t.customer_tabs[0].order_lines[0].quantity, 2);
        assert_eq!(t.customer_count, 2);
    }

    #[test]
    fn append_requires_occupied() {
        let mut s = store();
        let err = append_customer_tab(&mut s, 1, &alice(), shared::util::now()).unwrap_err();
        assert!(matches!(err, PosError::TableNotOccupied(1)));
    }

    #[test]
    fn removing_last_tab_reverts_to_single() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 1, 0, 1, now).unwrap();
        remove_customer_tab(&mut s, 1, 0).unwrap();
        let t = s.table(1).unwrap();
        assert!(!t.is_group);
        assert!(t.customer_tabs.is_empty());
        assert!(t.legacy_lines.is_empty());
        assert_eq!(t.status, TableStatus::Occupied);
    }

    #[test]
    fn customer_count_pads_and_truncates() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 7, 0, 1, now).unwrap();
        set_customer_count(&mut s, 7, 3).unwrap();
        let t = s.table(7).unwrap();
        assert_eq!(t.customer_tabs.len(), 3);
        assert_eq!(t.customer_count, 3);
        assert_eq!(t.customer_tabs[2].display_name, "Customer 3");

        add_order_line(&mut s, 7, 2, 4, now).unwrap();
        assert!(matches!(
            set_customer_count(&mut s, 7, 2),
            Err(PosError::TabHasOrders { index: 2, .. })
        ));
        change_quantity(&mut s, 7, 2, 0, -1).unwrap();
        set_customer_count(&mut s, 7, 2).unwrap();
        let t = s.table(7).unwrap();
        assert_eq!(t.customer_tabs.len(), 2);
        assert_eq!(t.customer_count as usize, t.customer_tabs.len());
    }

    #[test]
    fn mark_paid_is_idempotent() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 1, 0, 1, now).unwrap();
        mark_tab_paid(&mut s, 1, 0, now).unwrap();
        let first = s.table(1).unwrap().clone();
        mark_tab_paid(&mut s, 1, 0, now + chrono::Duration::minutes(3)).unwrap();
        assert_eq!(s.table(1).unwrap(), &first);
        assert_eq!(first.customer_tabs[0].paid_at, Some(now));

        mark_tab_unpaid(&mut s, 1, 0).unwrap();
        let tab = &s.table(1).unwrap().customer_tabs[0];
        assert_eq!(tab.payment_status, PaymentStatus::Unpaid);
        assert!(tab.paid_at.is_none());
    }

    #[test]
    fn reset_refused_while_tab_unpaid() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 1, 0, 1, now).unwrap();
        let before = s.table(1).unwrap().clone();
        assert!(!all_tabs_paid(&before));
        assert!(matches!(
            reset_to_available(&mut s, 1, now),
            Err(PosError::TabsUnpaid(1))
        ));
        assert_eq!(s.table(1).unwrap(), &before);
        assert!(s.order_history.is_empty());
    }

    #[test]
    fn reset_writes_mixed_history() {
        let mut s = store();
        let now = shared::util::now();
        add_order_line(&mut s, 1, 0, 1, now).unwrap();
        append_customer_tab(&mut s, 1, &alice(), now).unwrap();
        add_order_line(&mut s, 1, 1, 9, now).unwrap();
        set_customer_count(&mut s, 1, 3).unwrap();
        mark_tab_paid(&mut s, 1, 0, now).unwrap();
        mark_tab_paid(&mut s, 1, 1, now).unwrap();
        // tab 2 没有菜品，不阻止重置
        assert!(all_tabs_paid(s.table(1).unwrap()));

        assert!(reset_to_available(&mut s, 1, now).unwrap());
        let record = &s.order_history[0];
        assert_eq!(record.payment_method, "Mixed");
        assert_eq!(record.total, 130.0);
        assert_eq!(record.paid, 130.0);
        assert_eq!(record.change, 0.0);
        assert_eq!(record.order_lines.len(), 2);
        assert_eq!(record.customer_count, 3);

        let t = s.table(1).unwrap();
        assert_eq!(t, &DiningTable::new(1, 2));
    }

    #[test]
    fn reset_of_empty_table_writes_nothing() {
        let mut s = store();
        assert!(!reset_to_available(&mut s, 2, shared::util::now()).unwrap());
        assert!(s.order_history.is_empty());
    }

    #[test]
    fn finish_cleaning_refuses_live_session() {
        let mut s = store();
        add_order_line(&mut s, 1, 0, 1, shared::util::now()).unwrap();
        assert!(matches!(finish_cleaning(&mut s, 1), Err(PosError::TableOccupied(1))));
        assert!(matches!(mark_for_cleaning(&mut s, 1), Err(PosError::TableOccupied(1))));

        mark_for_cleaning(&mut s, 2).unwrap();
        finish_cleaning(&mut s, 2).unwrap();
        assert_eq!(s.table(2).unwrap().status, TableStatus::Available);
    }

    #[test]
    fn carousel_is_cyclic() {
        for len in 2..6 {
            for start in 0..len {
                let mut idx = start;
                for _ in 0..len {
                    idx = navigate_carousel(idx, 1, len);
                }
                assert_eq!(idx, start);
            }
        }
        assert_eq!(navigate_carousel(0, -1, 3), 2);
        assert_eq!(navigate_carousel(2, 1, 3), 0);
        assert_eq!(navigate_carousel(0, 1, 1), 0);
        assert_eq!(navigate_carousel(0, -1, 0), 0);
    }
}
