//! In-memory POS state
//!
//! `PosStore` is the context object every operation receives. The manager
//! keeps one committed instance and runs each command against a clone.

use super::error::{PosError, PosResult};
use super::seed;
use rust_decimal::Decimal;
use shared::models::{
    Customer, CustomerRef, DiningTable, DueLedgerEntry, HistoricalOrder, MenuItem, PosSnapshot,
};
use shared::util::snowflake_id;

#[derive(Debug, Clone)]
pub struct PosStore {
    pub tables: Vec<DiningTable>,
    /// Stand-alone order records from older data, carried through untouched
    pub orders: Vec<serde_json::Value>,
    pub order_history: Vec<HistoricalOrder>,
    pub menu: Vec<MenuItem>,
    pub customers: Vec<Customer>,
    pub due_expenses: Vec<DueLedgerEntry>,
    tax_rate: Decimal,
}

impl PosStore {
    /// Seed menu and the twelve default tables
    pub fn with_defaults(tax_rate: Decimal) -> Self {
        Self {
            tables: seed::default_tables(),
            orders: Vec::new(),
            order_history: Vec::new(),
            menu: seed::default_menu(),
            customers: Vec::new(),
            due_expenses: Vec::new(),
            tax_rate,
        }
    }

    /// Restore from a persisted snapshot; an empty table list or menu falls
    /// back to the built-in defaults.
    pub fn from_snapshot(snapshot: PosSnapshot, tax_rate: Decimal) -> Self {
        let PosSnapshot {
            tables,
            orders,
            order_history,
            menu,
            customers,
            due_expenses,
        } = snapshot;
        Self {
            tables: if tables.is_empty() { seed::default_tables() } else { tables },
            orders,
            order_history,
            menu: if menu.is_empty() { seed::default_menu() } else { menu },
            customers,
            due_expenses,
            tax_rate,
        }
    }

    pub fn to_snapshot(&self) -> PosSnapshot {
        PosSnapshot {
            tables: self.tables.clone(),
            orders: self.orders.clone(),
            order_history: self.order_history.clone(),
            menu: self.menu.clone(),
            customers: self.customers.clone(),
            due_expenses: self.due_expenses.clone(),
        }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    // ========== Lookups ==========

    pub fn table(&self, table_id: i64) -> PosResult<&DiningTable> {
        self.tables
            .iter()
            .find(|t| t.id == table_id)
            .ok_or(PosError::TableNotFound(table_id))
    }

    pub fn table_mut(&mut self, table_id: i64) -> PosResult<&mut DiningTable> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(PosError::TableNotFound(table_id))
    }

    pub fn menu_item(&self, item_id: i64) -> PosResult<&MenuItem> {
        self.menu
            .iter()
            .find(|m| m.id == item_id)
            .ok_or(PosError::MenuItemNotFound(item_id))
    }

    pub fn customer(&self, customer_id: i64) -> PosResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or(PosError::CustomerNotFound(customer_id))
    }

    pub fn customer_mut(&mut self, customer_id: i64) -> PosResult<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or(PosError::CustomerNotFound(customer_id))
    }

    /// Linked customer, if the id still resolves
    pub fn find_customer_mut(&mut self, customer_id: Option<i64>) -> Option<&mut Customer> {
        let id = customer_id?;
        self.customers.iter_mut().find(|c| c.id == id)
    }

    pub fn due_entry_mut(&mut self, entry_id: i64) -> PosResult<&mut DueLedgerEntry> {
        self.due_expenses
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(PosError::DueEntryNotFound(entry_id))
    }

    // ========== Id / name allocation ==========

    /// "Name", then "Name (2)", "Name (3)", ... first unused.
    /// `exclude` skips one customer (the one being renamed).
    pub fn unique_customer_name(&self, base: &str, exclude: Option<i64>) -> String {
        let taken = |name: &str| {
            self.customers
                .iter()
                .any(|c| Some(c.id) != exclude && c.name == name)
        };
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{} ({})", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn next_customer_id(&self) -> i64 {
        loop {
            let id = snowflake_id();
            if !self.customers.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    pub fn next_due_entry_id(&self) -> i64 {
        loop {
            let id = snowflake_id();
            if !self.due_expenses.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }

    /// Resolve an existing customer or create a new one.
    /// Returns `(customer_id, display_name)`.
    pub fn resolve_customer(
        &mut self,
        customer: &CustomerRef,
        now: chrono::DateTime<chrono::Utc>,
    ) -> PosResult<(i64, String)> {
        match customer {
            CustomerRef::Existing { id } => {
                let c = self.customer(*id)?;
                Ok((c.id, c.name.clone()))
            }
            CustomerRef::New(create) => {
                let c = super::customers::create_customer(self, create, now)?;
                Ok((c.id, c.name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CustomerCreate;

    #[test]
    fn unique_name_suffixes() {
        let mut store = PosStore::with_defaults(Decimal::ZERO);
        let now = shared::util::now();
        let create = CustomerCreate {
            name: "Ravi".into(),
            ..Default::default()
        };
        let a = super::super::customers::create_customer(&mut store, &create, now).unwrap();
        let b = super::super::customers::create_customer(&mut store, &create, now).unwrap();
        let c = super::super::customers::create_customer(&mut store, &create, now).unwrap();
        assert_eq!(a.name, "Ravi");
        assert_eq!(b.name, "Ravi (2)");
        assert_eq!(c.name, "Ravi (3)");
        // 改名时排除自己
        assert_eq!(store.unique_customer_name("Ravi", Some(a.id)), "Ravi");
    }

    #[test]
    fn empty_snapshot_falls_back_to_defaults() {
        let store = PosStore::from_snapshot(PosSnapshot::default(), Decimal::ZERO);
        assert_eq!(store.tables.len(), 12);
        assert_eq!(store.menu.len(), 18);
        assert!(store.customers.is_empty());
    }

    #[test]
    fn lookups_report_missing_ids() {
        let store = PosStore::with_defaults(Decimal::ZERO);
        assert!(matches!(store.table(99), Err(PosError::TableNotFound(99))));
        assert!(matches!(store.menu_item(0), Err(PosError::MenuItemNotFound(0))));
        assert!(matches!(store.customer(5), Err(PosError::CustomerNotFound(5))));
    }
}
