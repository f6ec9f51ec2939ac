//! History reporting (read-only)
//!
//! Everything here is derived from `HistoricalOrder` records and the live
//! table list; nothing mutates the store.

use crate::pos::money::{round_money, to_decimal, to_f64};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{DiningTable, HistoricalOrder, OrderLine, TableStatus};

/// Number of entries in the popular items list
pub const POPULAR_ITEMS_LIMIT: usize = 5;

/// Inclusive range of local calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// `None` when `from` is after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.with_timezone(&Local).date_naive();
        self.from <= day && day <= self.to
    }
}

pub fn history_in_range(
    history: &[HistoricalOrder],
    range: DateRange,
) -> impl Iterator<Item = &HistoricalOrder> {
    history.iter().filter(move |o| range.contains(o.timestamp))
}

/// Start of the local calendar day containing `now`
fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .map(|midnight| midnight.with_timezone(&Utc))
        .unwrap_or(now)
}

/// Headline figures for today
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub sales: f64,
    /// Customers served: Σ customerCount
    pub orders_today: u32,
    pub average_order_value: f64,
}

/// Orders settled since local midnight
pub fn todays_orders(history: &[HistoricalOrder], now: DateTime<Utc>) -> Vec<&HistoricalOrder> {
    let start = local_midnight(now);
    history.iter().filter(|o| o.timestamp >= start).collect()
}

pub fn today_summary(history: &[HistoricalOrder], now: DateTime<Utc>) -> TodaySummary {
    let today = todays_orders(history, now);
    let sales: Decimal = today.iter().map(|o| to_decimal(o.total)).sum();
    let orders_today = today
        .iter()
        .fold(0u32, |acc, o| acc.saturating_add(o.customer_count.max(1)));
    let average_order_value = if orders_today > 0 {
        round_money(sales / Decimal::from(orders_today))
    } else {
        Decimal::ZERO
    };
    TodaySummary {
        sales: to_f64(round_money(sales)),
        orders_today,
        average_order_value: to_f64(average_order_value),
    }
}

/// Item names by total quantity sold, best first.
/// Ties keep first-seen order.
pub fn popular_items<'a>(
    orders: impl IntoIterator<Item = &'a HistoricalOrder>,
    limit: usize,
) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for line in orders.into_iter().flat_map(|o| o.order_lines.iter()) {
        match counts.iter_mut().find(|(name, _)| *name == line.name) {
            Some((_, qty)) => *qty = qty.saturating_add(line.quantity),
            None => counts.push((line.name.clone(), line.quantity)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// `"{h}h {m}m"` from one hour up, `"{m}m"` below
pub fn format_duration(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes().max(0);
    let hours = minutes / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// One kitchen card: a tab with lines, or a legacy single table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub table_id: i64,
    pub table_name: String,
    /// 1-based tab number; `None` for a single table
    pub customer_number: Option<usize>,
    pub lines: Vec<OrderLine>,
    pub elapsed: String,
}

impl KitchenTicket {
    /// "Table 3 - Customer 2"
    pub fn header(&self) -> String {
        match self.customer_number {
            Some(n) => format!("{} - Customer {}", self.table_name, n),
            None => self.table_name.clone(),
        }
    }
}

/// Active kitchen work across occupied tables
pub fn kitchen_tickets(tables: &[DiningTable], now: DateTime<Utc>) -> Vec<KitchenTicket> {
    let mut tickets = Vec::new();
    for table in tables.iter().filter(|t| t.status == TableStatus::Occupied) {
        let elapsed = format_duration(now - table.occupied_since.unwrap_or(now));
        let ticket = |customer_number, lines: &[OrderLine]| KitchenTicket {
            table_id: table.id,
            table_name: table.name.clone(),
            customer_number,
            lines: lines.to_vec(),
            elapsed: elapsed.clone(),
        };
        if table.is_group {
            for (i, tab) in table.customer_tabs.iter().enumerate() {
                if tab.has_lines() {
                    tickets.push(ticket(Some(i + 1), &tab.order_lines));
                }
            }
        } else if !table.legacy_lines.is_empty() {
            tickets.push(ticket(None, &table.legacy_lines));
        }
    }
    tickets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(name: &str, quantity: u32) -> OrderLine {
        OrderLine {
            item_id: 0,
            name: name.into(),
            unit_price: 10.0,
            quantity,
        }
    }

    fn order(at: DateTime<Utc>, total: f64, customer_count: u32, lines: Vec<OrderLine>) -> HistoricalOrder {
        HistoricalOrder {
            table_id: 1,
            timestamp: at,
            total,
            paid: total,
            change: 0.0,
            payment_method: "Cash".into(),
            order_lines: lines,
            is_group: customer_count > 1,
            customer_count,
            customer_id: None,
        }
    }

    #[test]
    fn today_counts_customers_not_orders() {
        let now = Local
            .with_ymd_and_hms(2024, 6, 1, 15, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let history = vec![
            order(now - Duration::hours(1), 300.0, 3, vec![]),
            order(now - Duration::hours(2), 100.0, 1, vec![]),
            // 昨天的订单不计入
            order(now - Duration::days(1), 999.0, 1, vec![]),
        ];
        let s = today_summary(&history, now);
        assert_eq!(s.sales, 400.0);
        assert_eq!(s.orders_today, 4);
        assert_eq!(s.average_order_value, 100.0);

        let empty = today_summary(&[], now);
        assert_eq!(empty.orders_today, 0);
        assert_eq!(empty.average_order_value, 0.0);
    }

    #[test]
    fn today_sales_sum_in_decimal() {
        let now = shared::util::now();
        let history = vec![
            order(now, 0.1, 1, vec![]),
            order(now, 0.2, 2, vec![]),
        ];
        let s = today_summary(&history, now);
        assert_eq!(s.sales, 0.3);
        assert_eq!(s.average_order_value, 0.1);
    }

    #[test]
    fn popular_item_count_saturates() {
        let now = shared::util::now();
        let history = vec![
            order(now, 0.0, 1, vec![line("Mojito", u32::MAX)]),
            order(now, 0.0, 1, vec![line("Mojito", 5)]),
        ];
        let top = popular_items(&history, POPULAR_ITEMS_LIMIT);
        assert_eq!(top, vec![("Mojito".to_string(), u32::MAX)]);
    }

    #[test]
    fn popular_items_top_five() {
        let now = shared::util::now();
        let history = vec![
            order(now, 0.0, 1, vec![line("Mojito", 2), line("Thukpa", 1), line("Chowmein", 1)]),
            order(now, 0.0, 1, vec![line("Thukpa", 4), line("Spring Roll", 1), line("Fried Rice", 1)]),
            order(now, 0.0, 1, vec![line("Masala Chai", 3)]),
        ];
        let top = popular_items(&history, POPULAR_ITEMS_LIMIT);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], ("Thukpa".to_string(), 5));
        assert_eq!(top[1], ("Masala Chai".to_string(), 3));
        assert_eq!(top[2], ("Mojito".to_string(), 2));
        assert_eq!(top[3].0, "Chowmein");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::minutes(135)), "2h 15m");
        assert_eq!(format_duration(Duration::seconds(59)), "0m");
        assert_eq!(format_duration(Duration::minutes(60)), "1h 0m");
    }

    #[test]
    fn range_is_inclusive_by_local_day() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let range = DateRange::new(from, to).unwrap();
        let late = Local.with_ymd_and_hms(2024, 6, 3, 23, 59, 0).unwrap().with_timezone(&Utc);
        let early = Local.with_ymd_and_hms(2024, 6, 1, 0, 1, 0).unwrap().with_timezone(&Utc);
        let after = Local.with_ymd_and_hms(2024, 6, 4, 0, 1, 0).unwrap().with_timezone(&Utc);
        assert!(range.contains(late));
        assert!(range.contains(early));
        assert!(!range.contains(after));
        assert!(DateRange::new(to, from).is_none());
    }

    #[test]
    fn kitchen_tickets_per_tab() {
        let now = shared::util::now();
        let mut group = DiningTable::new(2, 4);
        group.status = TableStatus::Occupied;
        group.is_group = true;
        group.occupied_since = Some(now - Duration::minutes(75));
        group.customer_tabs = vec![
            shared::models::CustomerTab::new("Guest", None),
            shared::models::CustomerTab::new("Alice", None),
        ];
        group.customer_tabs[1].order_lines.push(line("Mojito", 1));

        let mut single = DiningTable::new(5, 2);
        single.status = TableStatus::Occupied;
        single.occupied_since = Some(now);
        single.legacy_lines.push(line("Thukpa", 2));

        let free = DiningTable::new(6, 4);

        let tickets = kitchen_tickets(&[group, single, free], now);
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].header(), "Table 2 - Customer 2");
        assert_eq!(tickets[0].elapsed, "1h 15m");
        assert_eq!(tickets[1].header(), "Table 5");
        assert_eq!(tickets[1].elapsed, "0m");
    }
}
