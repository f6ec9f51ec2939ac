//! Field-level merge of an imported document
//!
//! Each collection is matched on its key. A matched local record takes every
//! field present on the incoming record, except:
//!
//! | Collection | Key | Max fields | Union fields |
//! |---|---|---|---|
//! | customers | id | totalSpent, dueAmount | orderHistory (by timestamp) |
//! | dueExpenses | id | amount | |
//! | menu, tables, orders | id | | |
//! | orderHistory | timestamp | | |
//!
//! Unmatched incoming records are appended. The merged collections are decoded
//! back into typed records before anything is committed.

use super::{TransferError, TransferResult};
use crate::pos::PosStore;
use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::models::PosSnapshot;
use shared::order::{ImportSummary, MergeStats};
use std::collections::{HashMap, HashSet};

struct CollectionSpec {
    name: &'static str,
    key: &'static str,
    max_fields: &'static [&'static str],
    union_history: bool,
}

const COLLECTIONS: [CollectionSpec; 6] = [
    CollectionSpec {
        name: "customers",
        key: "id",
        max_fields: &["totalSpent", "dueAmount"],
        union_history: true,
    },
    CollectionSpec {
        name: "dueExpenses",
        key: "id",
        max_fields: &["amount"],
        union_history: false,
    },
    CollectionSpec {
        name: "menu",
        key: "id",
        max_fields: &[],
        union_history: false,
    },
    CollectionSpec {
        name: "tables",
        key: "id",
        max_fields: &[],
        union_history: false,
    },
    CollectionSpec {
        name: "orders",
        key: "id",
        max_fields: &[],
        union_history: false,
    },
    CollectionSpec {
        name: "orderHistory",
        key: "timestamp",
        max_fields: &[],
        union_history: false,
    },
];

const HISTORY_FIELD: &str = "orderHistory";

/// Comparable form of a key value.
/// RFC 3339 strings compare by instant, so `...00.000Z` equals `...00Z`.
fn key_of(value: &Value) -> String {
    match value {
        Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => format!("@{}", dt.timestamp_nanos_opt().unwrap_or_else(|| dt.timestamp_millis())),
            Err(_) => format!("s:{}", s),
        },
        Value::Number(n) => format!("n:{}", n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())),
        other => other.to_string(),
    }
}

fn history_keys(history: &[Value]) -> HashSet<String> {
    history
        .iter()
        .filter_map(|order| order.get("timestamp"))
        .map(key_of)
        .collect()
}

fn max_number(local: Option<&Value>, incoming: f64) -> Value {
    let current = local.and_then(Value::as_f64).unwrap_or(0.0);
    serde_json::Number::from_f64(current.max(incoming))
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn merge_record(policy: &CollectionSpec, local: &mut Map<String, Value>, incoming: &Map<String, Value>) {
    for (field, value) in incoming {
        if policy.max_fields.contains(&field.as_str())
            && let Some(n) = value.as_f64()
        {
            let merged = max_number(local.get(field), n);
            local.insert(field.clone(), merged);
            continue;
        }
        if policy.union_history
            && field == HISTORY_FIELD
            && let (Some(incoming_orders), Some(Value::Array(local_orders))) =
                (value.as_array(), local.get_mut(field))
        {
            let mut seen = history_keys(local_orders);
            for order in incoming_orders {
                let fresh = order
                    .get("timestamp")
                    .map(key_of)
                    .is_none_or(|key| seen.insert(key));
                if fresh {
                    local_orders.push(order.clone());
                }
            }
            continue;
        }
        local.insert(field.clone(), value.clone());
    }
}

/// Merge one collection in place and count what happened
fn merge_collection(
    policy: &CollectionSpec,
    local: &mut Vec<Value>,
    incoming: &[Value],
) -> TransferResult<MergeStats> {
    let original = local.len();
    let mut index: HashMap<String, usize> = local
        .iter()
        .enumerate()
        .filter_map(|(i, record)| record.get(policy.key).map(|k| (key_of(k), i)))
        .collect();
    let mut touched: HashSet<usize> = HashSet::new();
    let mut stats = MergeStats::default();

    for record in incoming {
        let Value::Object(fields) = record else {
            return Err(TransferError::Malformed(format!(
                "`{}` must contain objects",
                policy.name
            )));
        };
        let key = fields.get(policy.key).map(key_of);
        match key.as_ref().and_then(|k| index.get(k)).copied() {
            Some(i) => {
                if let Some(Value::Object(target)) = local.get_mut(i) {
                    merge_record(policy, target, fields);
                }
                if i < original {
                    touched.insert(i);
                }
                stats.updated += 1;
            }
            None => {
                local.push(record.clone());
                if let Some(key) = key {
                    index.insert(key, local.len() - 1);
                }
                stats.added += 1;
            }
        }
    }
    stats.kept = original - touched.len();
    Ok(stats)
}

fn decode<T: DeserializeOwned>(collection: &'static str, value: Vec<Value>) -> TransferResult<Vec<T>> {
    serde_json::from_value(Value::Array(value))
        .map_err(|source| TransferError::Decode { collection, source })
}

/// Merge an exported document into the store.
///
/// Nothing changes unless every merged collection decodes.
pub fn import_document(store: &mut PosStore, document: &Value) -> TransferResult<ImportSummary> {
    let Value::Object(incoming) = document else {
        return Err(TransferError::Malformed("expected a JSON object".into()));
    };

    let mut current = match serde_json::to_value(store.to_snapshot())? {
        Value::Object(map) => map,
        _ => return Err(TransferError::Malformed("store snapshot is not an object".into())),
    };

    let mut summary = ImportSummary::new();
    for policy in &COLLECTIONS {
        let records = match incoming.get(policy.name) {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(records)) => records.as_slice(),
            Some(_) => {
                return Err(TransferError::Malformed(format!("`{}` must be an array", policy.name)));
            }
        };
        let mut local = match current.remove(policy.name) {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        };
        let stats = merge_collection(policy, &mut local, records)?;
        tracing::debug!(collection = policy.name, ?stats, "Collection merged");
        summary.insert(policy.name.to_string(), stats);
        current.insert(policy.name.to_string(), Value::Array(local));
    }

    let mut take = |name: &str| match current.remove(name) {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    };
    let snapshot = PosSnapshot {
        customers: decode("customers", take("customers"))?,
        due_expenses: decode("dueExpenses", take("dueExpenses"))?,
        menu: decode("menu", take("menu"))?,
        tables: decode("tables", take("tables"))?,
        orders: take("orders"),
        order_history: decode("orderHistory", take("orderHistory"))?,
    };

    *store = PosStore::from_snapshot(snapshot, store.tax_rate());
    tracing::info!(?summary, "Import merged");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn store() -> PosStore {
        PosStore::with_defaults(Decimal::ZERO)
    }

    fn customer(id: i64, spent: f64, due: f64) -> Value {
        json!({
            "id": id,
            "name": format!("C{}", id),
            "phone": "",
            "isGroup": false,
            "createdAt": "2024-03-01T10:00:00Z",
            "totalSpent": spent,
            "dueAmount": due,
            "orderHistory": []
        })
    }

    #[test]
    fn non_object_is_refused() {
        let mut s = store();
        let before = s.to_snapshot();
        assert!(matches!(
            import_document(&mut s, &json!([1, 2])),
            Err(TransferError::Malformed(_))
        ));
        assert!(matches!(
            import_document(&mut s, &json!({"menu": "nope"})),
            Err(TransferError::Malformed(_))
        ));
        assert_eq!(s.to_snapshot(), before);
    }

    #[test]
    fn cumulative_fields_take_max() {
        let mut s = store();
        import_document(&mut s, &json!({"customers": [customer(1, 500.0, 20.0)]})).unwrap();
        let summary = import_document(
            &mut s,
            &json!({"customers": [{"id": 1, "totalSpent": 300.0, "dueAmount": 80.0, "phone": "98"}]}),
        )
        .unwrap();
        assert_eq!(
            summary["customers"],
            MergeStats {
                updated: 1,
                added: 0,
                kept: 0
            }
        );
        let c = s.customer(1).unwrap();
        assert_eq!(c.total_spent, 500.0);
        assert_eq!(c.due_amount, 80.0);
        assert_eq!(c.phone, "98");
        // 未出现的字段保持不变
        assert_eq!(c.name, "C1");
    }

    #[test]
    fn customer_history_unions_by_instant() {
        let mut s = store();
        let mut c = customer(7, 0.0, 0.0);
        c["orderHistory"] = json!([{
            "tableId": 1, "timestamp": "2024-03-01T12:00:00Z", "total": 80.0, "paid": 80.0,
            "paymentMethod": "Cash", "orders": []
        }]);
        import_document(&mut s, &json!({"customers": [c]})).unwrap();

        let incoming = json!({"customers": [{"id": 7, "orderHistory": [
            {"tableId": 1, "timestamp": "2024-03-01T12:00:00.000Z", "total": 80.0, "paid": 80.0,
             "paymentMethod": "Cash", "orders": []},
            {"tableId": 2, "timestamp": "2024-03-02T12:00:00Z", "total": 50.0, "paid": 50.0,
             "paymentMethod": "Card", "orders": []}
        ]}]});
        import_document(&mut s, &incoming).unwrap();
        assert_eq!(s.customer(7).unwrap().order_history.len(), 2);
    }

    #[test]
    fn unmatched_records_are_appended() {
        let mut s = store();
        let summary = import_document(
            &mut s,
            &json!({"menu": [
                {"id": 1, "price": 90.0},
                {"id": 40, "name": "Lassi", "price": 60.0, "category": "Beverages"}
            ]}),
        )
        .unwrap();
        assert_eq!(
            summary["menu"],
            MergeStats {
                updated: 1,
                added: 1,
                kept: 17
            }
        );
        assert_eq!(s.menu_item(1).unwrap().price, 90.0);
        assert_eq!(s.menu_item(1).unwrap().name, "French Fries");
        assert_eq!(s.menu_item(40).unwrap().name, "Lassi");
        assert_eq!(summary["tables"], MergeStats { updated: 0, added: 0, kept: 12 });
    }

    #[test]
    fn undecodable_merge_is_refused() {
        let mut s = store();
        let before = s.to_snapshot();
        let err = import_document(&mut s, &json!({"tables": [{"id": 1, "capacity": "lots"}]})).unwrap_err();
        assert!(matches!(err, TransferError::Decode { collection: "tables", .. }));
        assert_eq!(s.to_snapshot(), before);
    }
}
