//! Billing & settlement
//!
//! A settlement either aborts with no effect or runs to completion:
//! history record, customer spend, optional due entry, table → cleaning.

use super::error::{PosError, PosResult};
use super::ledger;
use super::money::{
    grand_total, is_payment_sufficient, round_money, to_decimal, to_f64, validate_payment_amount,
};
use super::store::PosStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{DiningTable, HistoricalOrder, OrderLine, TableStatus};
use shared::order::ShortfallPolicy;

/// Figures of a completed settlement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub total: f64,
    pub paid: f64,
    pub change: f64,
    /// Due entry raised for an accepted shortfall
    pub due_entry_id: Option<i64>,
}

/// Customer the settlement is attributed to: the seated customer only.
///
/// Tab customers never pick up the table's spend or shortfall.
fn attributed_customer(store: &PosStore, table: &DiningTable) -> Option<i64> {
    table
        .current_customer_id
        .filter(|id| store.customer(*id).is_ok())
}

/// Settle a table
///
/// `amount < total` is refused unless `policy` is `RecordAsDue`. An accepted
/// shortfall with no attributable customer is not recorded anywhere; a
/// warning is pushed to `warnings` instead.
pub fn process_payment(
    store: &mut PosStore,
    table_id: i64,
    amount: f64,
    method: &str,
    policy: ShortfallPolicy,
    now: DateTime<Utc>,
    warnings: &mut Vec<String>,
) -> PosResult<Settlement> {
    validate_payment_amount(amount)?;
    let method = method.trim();
    if method.is_empty() {
        return Err(PosError::InvalidOperation("payment method is required".into()));
    }

    let table = store.table(table_id)?;
    if table.status != TableStatus::Occupied {
        return Err(PosError::TableNotOccupied(table_id));
    }

    let total = round_money(grand_total(table, store.tax_rate()));
    let paid = round_money(to_decimal(amount));
    let customer_id = attributed_customer(store, table);

    let shortfall = if is_payment_sufficient(paid, total) {
        None
    } else {
        let short = total - paid;
        if policy == ShortfallPolicy::Reject {
            return Err(PosError::PaymentShortfall {
                total: to_f64(total),
                paid: to_f64(paid),
                short: to_f64(short),
            });
        }
        Some(short)
    };

    let lines: Vec<OrderLine> = table.active_lines().cloned().collect();
    let record = HistoricalOrder {
        table_id,
        timestamp: now,
        total: to_f64(total),
        paid: to_f64(paid),
        change: to_f64((paid - total).max(Decimal::ZERO)),
        payment_method: method.to_string(),
        order_lines: lines,
        is_group: table.is_group,
        customer_count: if table.is_group { table.customer_count } else { 1 },
        customer_id,
    };

    let due_entry_id = match (shortfall, customer_id) {
        (Some(short), Some(customer_id)) => {
            Some(ledger::record_shortfall_due(store, customer_id, table_id, short, now))
        }
        (Some(short), None) => {
            tracing::warn!(table_id, shortfall = %short, "Shortfall accepted but no customer is linked, not recorded as due");
            warnings.push(format!(
                "Shortfall of {:.2} on Table {} was not recorded: no customer linked",
                to_f64(short),
                table_id
            ));
            None
        }
        (None, _) => None,
    };

    if let Some(customer) = store.find_customer_mut(customer_id) {
        customer.total_spent = to_f64(to_decimal(customer.total_spent) + paid);
        customer.order_history.push(record.clone());
    }

    let settlement = Settlement {
        total: record.total,
        paid: record.paid,
        change: record.change,
        due_entry_id,
    };
    store.order_history.push(record);

    let table = store.table_mut(table_id)?;
    table.clear_session();
    table.status = TableStatus::Cleaning;

    tracing::info!(
        table_id,
        total = settlement.total,
        paid = settlement.paid,
        change = settlement.change,
        method,
        "Table settled"
    );
    Ok(settlement)
}
