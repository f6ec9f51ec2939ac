//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use super::error::{PosError, PosResult};
use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{CustomerTab, DiningTable, OrderLine};
use shared::order::SplitMode;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed menu price (₹1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed payment or due amount (₹1,000,000)
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> PosResult<()> {
    if !value.is_finite() {
        return Err(PosError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a tendered settlement amount (zero is allowed, e.g. full shortfall)
pub fn validate_payment_amount(amount: f64) -> PosResult<()> {
    require_finite(amount, "payment amount")?;
    if amount < 0.0 {
        return Err(PosError::InvalidAmount(format!(
            "payment amount must be non-negative, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(PosError::InvalidAmount(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Validate an amount that must be strictly positive (due entries, due payments)
pub fn validate_positive_amount(amount: f64, field_name: &str) -> PosResult<()> {
    require_finite(amount, field_name)?;
    if amount <= 0.0 {
        return Err(PosError::InvalidAmount(format!(
            "{} must be positive, got {}",
            field_name, amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(PosError::InvalidAmount(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Validate a menu price
pub fn validate_price(price: f64) -> PosResult<()> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(PosError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(PosError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// unitPrice × quantity
pub fn line_total(line: &OrderLine) -> Decimal {
    to_decimal(line.unit_price) * Decimal::from(line.quantity)
}

pub fn lines_subtotal<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> Decimal {
    lines.into_iter().map(line_total).sum()
}

/// Derived figures for a set of order lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

impl TableTotals {
    pub fn of_lines<'a>(lines: impl IntoIterator<Item = &'a OrderLine>, tax_rate: Decimal) -> Self {
        let subtotal = lines_subtotal(lines);
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }

    /// Same formula for group and legacy single tables
    pub fn of_table(table: &DiningTable, tax_rate: Decimal) -> Self {
        Self::of_lines(table.active_lines(), tax_rate)
    }

    pub fn of_tab(tab: &CustomerTab, tax_rate: Decimal) -> Self {
        Self::of_lines(tab.order_lines.iter(), tax_rate)
    }
}

/// Grand total of a table, unrounded
pub fn grand_total(table: &DiningTable, tax_rate: Decimal) -> Decimal {
    TableTotals::of_table(table, tax_rate).grand_total
}

/// Bill / paid / remaining for a group table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total_bill: f64,
    pub total_paid: f64,
    pub remaining: f64,
}

/// totalPaid counts the grand total of every tab marked paid
pub fn payment_summary(table: &DiningTable, tax_rate: Decimal) -> PaymentSummary {
    let total_bill = grand_total(table, tax_rate);
    let total_paid: Decimal = table
        .customer_tabs
        .iter()
        .filter(|tab| tab.is_paid())
        .map(|tab| TableTotals::of_tab(tab, tax_rate).grand_total)
        .sum();
    PaymentSummary {
        total_bill: to_f64(total_bill),
        total_paid: to_f64(total_paid),
        remaining: to_f64(total_bill - total_paid),
    }
}

/// Result of a bill split
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub mode: SplitMode,
    pub parts: u32,
    pub grand_total: f64,
    pub per_person: f64,
}

/// Split a table bill
///
/// Only equal splits are supported. A legacy single table splits into one part.
pub fn split_bill(table: &DiningTable, tax_rate: Decimal, mode: SplitMode) -> PosResult<SplitResult> {
    match mode {
        SplitMode::Equal => {
            let parts = if table.is_group { table.customer_count.max(1) } else { 1 };
            let total = grand_total(table, tax_rate);
            let per_person = total / Decimal::from(parts);
            Ok(SplitResult {
                mode,
                parts,
                grand_total: to_f64(total),
                per_person: to_f64(per_person),
            })
        }
        SplitMode::Items => Err(PosError::NotImplemented("Split by items")),
        SplitMode::Custom => Err(PosError::NotImplemented("Custom split")),
    }
}

/// Check if paid covers required after rounding both to cents
pub fn is_payment_sufficient(paid: Decimal, required: Decimal) -> bool {
    round_money(paid) >= round_money(required)
}

/// Compare two monetary values with tolerance
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}
