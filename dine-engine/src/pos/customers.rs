//! Customer directory
//!
//! Names are unique within the directory (suffixing, never rejection).
//! Balances never go below zero.

use super::error::{PosError, PosResult};
use super::money::{to_decimal, to_f64, validate_positive_amount, MONEY_TOLERANCE};
use super::store::PosStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Customer, CustomerCreate, CustomerUpdate, DueStatus};

fn normalized_name(name: &str) -> PosResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PosError::CustomerNameRequired);
    }
    Ok(name)
}

/// Create a customer with a uniqued name; returns a copy of the new record
pub fn create_customer(
    store: &mut PosStore,
    create: &CustomerCreate,
    now: DateTime<Utc>,
) -> PosResult<Customer> {
    let base = normalized_name(&create.name)?;
    let name = store.unique_customer_name(base, None);
    if name != base {
        tracing::debug!(requested = %base, assigned = %name, "Customer name already taken, suffixed");
    }
    let customer = Customer {
        id: store.next_customer_id(),
        name,
        phone: create.phone.trim().to_string(),
        is_group: create.is_group,
        created_at: now,
        total_spent: 0.0,
        due_amount: 0.0,
        order_history: Vec::new(),
    };
    tracing::info!(customer_id = customer.id, name = %customer.name, "Customer created");
    store.customers.push(customer.clone());
    Ok(customer)
}

pub fn update_customer(store: &mut PosStore, customer_id: i64, update: &CustomerUpdate) -> PosResult<()> {
    store.customer(customer_id)?;
    let new_name = match &update.name {
        Some(name) => Some(store.unique_customer_name(normalized_name(name)?, Some(customer_id))),
        None => None,
    };
    let customer = store.customer_mut(customer_id)?;
    if let Some(name) = new_name {
        customer.name = name;
    }
    if let Some(phone) = &update.phone {
        customer.phone = phone.trim().to_string();
    }
    Ok(())
}

/// Remove a customer, its due entries, and every table link to it.
/// Returns the number of due entries removed.
pub fn delete_customer(store: &mut PosStore, customer_id: i64) -> PosResult<usize> {
    store.customer(customer_id)?;
    store.customers.retain(|c| c.id != customer_id);

    let before = store.due_expenses.len();
    store.due_expenses.retain(|e| e.customer_id != customer_id);
    let removed = before - store.due_expenses.len();

    for table in &mut store.tables {
        if table.current_customer_id == Some(customer_id) {
            table.current_customer_id = None;
        }
        for tab in &mut table.customer_tabs {
            if tab.customer_id == Some(customer_id) {
                tab.customer_id = None;
            }
        }
    }

    tracing::info!(customer_id, removed_entries = removed, "Customer deleted");
    Ok(removed)
}

/// Result of a payment against a customer's balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerPayment {
    pub applied: f64,
    /// Part of the payment above the outstanding due; reported, not stored
    pub excess: f64,
}

/// Reduce the customer's due and pay down pending entries oldest-first
pub fn apply_customer_payment(
    store: &mut PosStore,
    customer_id: i64,
    amount: f64,
    now: DateTime<Utc>,
) -> PosResult<CustomerPayment> {
    validate_positive_amount(amount, "payment amount")?;
    let customer = store.customer_mut(customer_id)?;

    let paid = to_decimal(amount);
    let due = to_decimal(customer.due_amount).max(Decimal::ZERO);
    let applied = paid.min(due);
    customer.due_amount = to_f64(due - applied);

    let mut pending: Vec<_> = store
        .due_expenses
        .iter_mut()
        .filter(|e| e.customer_id == customer_id && e.status == DueStatus::Pending)
        .collect();
    pending.sort_by_key(|e| e.created_at);

    let mut remaining = applied;
    for entry in pending {
        if remaining <= Decimal::ZERO {
            break;
        }
        let owed = to_decimal(entry.amount);
        let take = remaining.min(owed);
        remaining -= take;
        let left = owed - take;
        if left < MONEY_TOLERANCE {
            entry.amount = 0.0;
            entry.status = DueStatus::Paid;
            entry.paid_at = Some(now);
        } else {
            entry.amount = to_f64(left);
        }
    }

    let result = CustomerPayment {
        applied: to_f64(applied),
        excess: to_f64(paid - applied),
    };
    if result.excess > 0.0 {
        tracing::warn!(customer_id, excess = result.excess, "Payment exceeds outstanding due");
    }
    Ok(result)
}

/// Directory aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: usize,
    pub total_due: f64,
}

pub fn customer_stats(store: &PosStore) -> CustomerStats {
    let total_due: Decimal = store.customers.iter().map(|c| to_decimal(c.due_amount)).sum();
    CustomerStats {
        total_customers: store.customers.len(),
        total_due: to_f64(total_due),
    }
}
