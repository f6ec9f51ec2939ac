//! JSON backup and CSV extracts
//!
//! CSV output quotes every field and doubles embedded quotes; records end
//! with `\n`. Dates are rendered in local time.

use super::TransferResult;
use crate::pos::PosStore;
use crate::reports::{DateRange, history_in_range};
use chrono::{DateTime, Local, Utc};
use serde_json::Value;
use shared::models::HistoricalOrder;

/// Written into every JSON backup
pub const EXPORT_VERSION: &str = "2.0";

/// Full backup document: all six collections plus `exportDate` and `version`
pub fn export_json(store: &PosStore, now: DateTime<Utc>) -> TransferResult<Value> {
    let mut document = serde_json::to_value(store.to_snapshot())?;
    if let Value::Object(map) = &mut document {
        map.insert("exportDate".into(), Value::String(now.to_rfc3339()));
        map.insert("version".into(), Value::String(EXPORT_VERSION.into()));
    }
    Ok(document)
}

fn local_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn write_csv<I, R>(headers: &[&str], rows: I) -> TransferResult<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn customers_csv(store: &PosStore) -> TransferResult<String> {
    let headers = [
        "ID",
        "Name",
        "Phone",
        "Type",
        "Total Spent",
        "Due Amount",
        "Orders Count",
        "Created Date",
    ];
    write_csv(
        &headers,
        store.customers.iter().map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.phone.clone(),
                if c.is_group { "Group" } else { "Individual" }.to_string(),
                money(c.total_spent),
                money(c.due_amount),
                c.order_history.len().to_string(),
                local_date(c.created_at),
            ]
        }),
    )
}

pub fn due_ledger_csv(store: &PosStore) -> TransferResult<String> {
    let headers = [
        "ID",
        "Customer Name",
        "Amount",
        "Description",
        "Status",
        "Created Date",
        "Paid Date",
    ];
    write_csv(
        &headers,
        store.due_expenses.iter().map(|e| {
            let customer = store
                .customers
                .iter()
                .find(|c| c.id == e.customer_id)
                .map_or("Unknown", |c| c.name.as_str());
            vec![
                e.id.to_string(),
                customer.to_string(),
                money(e.amount),
                e.description.clone(),
                if e.is_pending() { "pending" } else { "paid" }.to_string(),
                local_date(e.created_at),
                e.paid_at.map(local_date).unwrap_or_default(),
            ]
        }),
    )
}

/// One row per settled order in the range
pub fn sales_csv(history: &[HistoricalOrder], range: DateRange) -> TransferResult<String> {
    let headers = [
        "Date",
        "Time",
        "Table",
        "Total",
        "Paid",
        "Change",
        "Payment Method",
        "Customer Count",
    ];
    write_csv(
        &headers,
        history_in_range(history, range).map(|o| {
            vec![
                local_date(o.timestamp),
                local_time(o.timestamp),
                o.table_id.to_string(),
                money(o.total),
                money(o.paid),
                money(o.change),
                o.payment_method.clone(),
                o.customer_count.to_string(),
            ]
        }),
    )
}

/// One row per order line of every settled order in the range
pub fn order_lines_csv(history: &[HistoricalOrder], range: DateRange) -> TransferResult<String> {
    let headers = [
        "Date",
        "Time",
        "Table",
        "Item",
        "Quantity",
        "Unit Price",
        "Total Price",
    ];
    write_csv(
        &headers,
        history_in_range(history, range).flat_map(|o| {
            o.order_lines.iter().map(move |line| {
                vec![
                    local_date(o.timestamp),
                    local_time(o.timestamp),
                    o.table_id.to_string(),
                    line.name.clone(),
                    line.quantity.to_string(),
                    money(line.unit_price),
                    money(line.unit_price * f64::from(line.quantity)),
                ]
            })
        }),
    )
}

pub fn menu_csv(store: &PosStore) -> TransferResult<String> {
    let headers = ["ID", "Name", "Price", "Category", "Description", "Available"];
    write_csv(
        &headers,
        store.menu.iter().map(|m| {
            vec![
                m.id.to_string(),
                m.name.clone(),
                money(m.price),
                m.category.clone(),
                m.description.clone(),
                if m.available { "Yes" } else { "No" }.to_string(),
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::import_document;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shared::models::{Customer, OrderLine};

    fn store() -> PosStore {
        PosStore::with_defaults(Decimal::ZERO)
    }

    #[test]
    fn json_backup_carries_version() {
        let doc = export_json(&store(), shared::util::now()).unwrap();
        assert_eq!(doc["version"], "2.0");
        assert!(doc["exportDate"].is_string());
        assert_eq!(doc["menu"].as_array().unwrap().len(), 18);
        assert_eq!(doc["tables"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn export_then_import_updates_everything() {
        let mut s = store();
        let doc = export_json(&s, shared::util::now()).unwrap();
        let summary = import_document(&mut s, &doc).unwrap();
        assert_eq!(summary["menu"].updated, 18);
        assert_eq!(summary["menu"].added, 0);
        assert_eq!(summary["tables"].updated, 12);
        assert_eq!(summary["tables"].added, 0);
        assert_eq!(summary["tables"].kept, 0);
    }

    #[test]
    fn fields_are_always_quoted() {
        let mut s = store();
        s.menu.truncate(1);
        s.menu[0].description = "Say \"crispy\", twice".into();
        let csv = menu_csv(&s).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(r#""ID","Name","Price","Category","Description","Available""#)
        );
        assert_eq!(
            lines.next(),
            Some(r#""1","French Fries","80.00","Appetizers","Say ""crispy"", twice","Yes""#)
        );
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn due_csv_names_unknown_customers() {
        let mut s = store();
        let now = shared::util::now();
        s.customers.push(Customer {
            id: 1,
            name: "Asha".into(),
            phone: String::new(),
            is_group: false,
            created_at: now,
            total_spent: 0.0,
            due_amount: 0.0,
            order_history: vec![],
        });
        crate::pos::ledger::record_manual_due(&mut s, 1, 100.0, "", now).unwrap();
        s.due_expenses[0].customer_id = 99;
        let csv = due_ledger_csv(&s).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""Unknown","100.00","Manual expense entry","pending""#));
    }

    #[test]
    fn empty_range_gives_header_only() {
        let day = Local.with_ymd_and_hms(2024, 5, 10, 13, 30, 0).unwrap();
        let order = HistoricalOrder {
            table_id: 3,
            timestamp: day.with_timezone(&Utc),
            total: 160.0,
            paid: 200.0,
            change: 40.0,
            payment_method: "Cash".into(),
            order_lines: vec![OrderLine {
                item_id: 1,
                name: "French Fries".into(),
                unit_price: 80.0,
                quantity: 2,
            }],
            is_group: true,
            customer_count: 2,
            customer_id: None,
        };
        let history = vec![order];

        let hit = DateRange::new(day.date_naive(), day.date_naive()).unwrap();
        let sales = sales_csv(&history, hit).unwrap();
        assert_eq!(sales.lines().count(), 2);
        assert!(sales.lines().nth(1).unwrap().ends_with(r#""3","160.00","200.00","40.00","Cash","2""#));
        let lines = order_lines_csv(&history, hit).unwrap();
        assert!(lines.lines().nth(1).unwrap().ends_with(r#""French Fries","2","80.00","160.00""#));

        let next = day.date_naive().succ_opt().unwrap();
        let miss = DateRange::new(next, next).unwrap();
        assert_eq!(sales_csv(&history, miss).unwrap().lines().count(), 1);
    }
}
