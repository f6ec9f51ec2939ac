//! Due-balance ledger
//!
//! Entry `amount` is the remaining balance. Partial payments overwrite it and
//! the original amount is not retained. Customer `dueAmount` follows every
//! change and is clamped at zero.

use super::error::PosResult;
use super::money::{to_decimal, to_f64, validate_positive_amount};
use super::store::PosStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{DueLedgerEntry, DueStatus};

const MANUAL_ENTRY_DESCRIPTION: &str = "Manual expense entry";

fn add_customer_due(store: &mut PosStore, customer_id: i64, amount: Decimal) {
    if let Some(customer) = store.find_customer_mut(Some(customer_id)) {
        customer.due_amount = to_f64(to_decimal(customer.due_amount) + amount);
    }
}

fn reduce_customer_due(store: &mut PosStore, customer_id: i64, amount: Decimal) {
    match store.find_customer_mut(Some(customer_id)) {
        Some(customer) => {
            let current = to_decimal(customer.due_amount);
            if amount > current {
                tracing::debug!(customer_id, %current, %amount, "Due amount clamped at zero");
            }
            customer.due_amount = to_f64((current - amount).max(Decimal::ZERO));
        }
        None => tracing::debug!(customer_id, "Due entry belongs to an unknown customer"),
    }
}

/// Manually raise a due entry; returns the new entry id
pub fn record_manual_due(
    store: &mut PosStore,
    customer_id: i64,
    amount: f64,
    description: &str,
    now: DateTime<Utc>,
) -> PosResult<i64> {
    validate_positive_amount(amount, "due amount")?;
    store.customer(customer_id)?;

    let description = match description.trim() {
        "" => MANUAL_ENTRY_DESCRIPTION.to_string(),
        d => d.to_string(),
    };
    let entry = DueLedgerEntry {
        id: store.next_due_entry_id(),
        customer_id,
        amount: to_f64(to_decimal(amount)),
        description,
        status: DueStatus::Pending,
        created_at: now,
        paid_at: None,
        originating_order_id: None,
    };
    let id = entry.id;
    store.due_expenses.push(entry);
    add_customer_due(store, customer_id, to_decimal(amount));

    tracing::info!(entry_id = id, customer_id, amount, "Manual due recorded");
    Ok(id)
}

/// Due entry raised by an underpaid settlement
pub(crate) fn record_shortfall_due(
    store: &mut PosStore,
    customer_id: i64,
    table_id: i64,
    shortfall: Decimal,
    now: DateTime<Utc>,
) -> i64 {
    let entry = DueLedgerEntry {
        id: store.next_due_entry_id(),
        customer_id,
        amount: to_f64(shortfall),
        description: format!("Partial payment for Table {}", table_id),
        status: DueStatus::Pending,
        created_at: now,
        paid_at: None,
        originating_order_id: Some(format!("TBL{}-{}", table_id, now.timestamp_millis())),
    };
    let id = entry.id;
    store.due_expenses.push(entry);
    add_customer_due(store, customer_id, shortfall);
    id
}

/// Result of a payment against one entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuePayment {
    pub applied: f64,
    pub remaining: f64,
}

/// Pay part of an entry: `newAmount = max(0, amount - paid)`
pub fn apply_payment(
    store: &mut PosStore,
    entry_id: i64,
    amount: f64,
    now: DateTime<Utc>,
) -> PosResult<DuePayment> {
    validate_positive_amount(amount, "payment amount")?;
    let entry = store.due_entry_mut(entry_id)?;

    let owed = to_decimal(entry.amount);
    let new_amount = (owed - to_decimal(amount)).max(Decimal::ZERO);
    let applied = owed - new_amount;
    entry.amount = to_f64(new_amount);
    if new_amount.is_zero() && entry.status == DueStatus::Pending {
        entry.status = DueStatus::Paid;
        entry.paid_at = Some(now);
    }
    let customer_id = entry.customer_id;

    reduce_customer_due(store, customer_id, applied);
    tracing::info!(entry_id, customer_id, applied = %applied, remaining = %new_amount, "Due payment applied");
    Ok(DuePayment {
        applied: to_f64(applied),
        remaining: to_f64(new_amount),
    })
}

/// Settle the remaining amount in full. Already-paid entries are left as they are.
pub fn mark_entry_paid(store: &mut PosStore, entry_id: i64, now: DateTime<Utc>) -> PosResult<()> {
    let entry = store.due_entry_mut(entry_id)?;
    if entry.status == DueStatus::Paid {
        return Ok(());
    }
    let paid = to_decimal(entry.amount);
    entry.amount = 0.0;
    entry.status = DueStatus::Paid;
    entry.paid_at = Some(now);
    let customer_id = entry.customer_id;

    reduce_customer_due(store, customer_id, paid);
    tracing::info!(entry_id, customer_id, paid = %paid, "Due entry marked paid");
    Ok(())
}

/// Remove an entry after taking its remaining amount off the customer's due
pub fn delete_entry(store: &mut PosStore, entry_id: i64) -> PosResult<()> {
    let entry = store.due_entry_mut(entry_id)?;
    let remaining = to_decimal(entry.amount);
    let customer_id = entry.customer_id;

    reduce_customer_due(store, customer_id, remaining);
    store.due_expenses.retain(|e| e.id != entry_id);
    tracing::info!(entry_id, customer_id, remaining = %remaining, "Due entry deleted");
    Ok(())
}

/// Pending entries with a positive balance, and their sum
#[derive(Debug, Clone)]
pub struct PendingDue<'a> {
    pub entries: Vec<&'a DueLedgerEntry>,
    pub total: f64,
}

pub fn pending_entries(store: &PosStore) -> PendingDue<'_> {
    let entries: Vec<_> = store
        .due_expenses
        .iter()
        .filter(|e| e.status == DueStatus::Pending && e.amount > 0.0)
        .collect();
    let total: Decimal = entries.iter().map(|e| to_decimal(e.amount)).sum();
    PendingDue {
        entries,
        total: to_f64(total),
    }
}
