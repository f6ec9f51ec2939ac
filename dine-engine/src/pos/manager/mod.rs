//! PosManager - command processing over the in-memory store
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Take the write lock
//!     ├─ 2. Stage a copy of the store
//!     ├─ 3. Convert command to action and execute against the copy
//!     ├─ 4. On success: commit the copy, save a snapshot (best effort)
//!     └─ 5. Return response (errors leave the store untouched)
//! ```
//!
//! The manager also holds the operator's current selection (table and active
//! tab in the carousel) used by `settle_selected`.

use super::actions::CommandAction;
use super::catalog;
use super::customers::{self, CustomerStats};
use super::error::{PosError, PosResult};
use super::ledger;
use super::money::{PaymentSummary, SplitResult, TableTotals, payment_summary, split_bill};
use super::session;
use super::store::PosStore;
use super::traits::{CommandContext, CommandHandler};
use crate::persistence::SnapshotStore;
use crate::reports::{self, KitchenTicket, TodaySummary};
use crate::transfer::{self, TransferResult};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use shared::models::{DiningTable, DueLedgerEntry, MenuItem, PosSnapshot};
use shared::order::{
    CommandResponse, PosCommand, PosCommandPayload, ShortfallPolicy, SplitMode,
};
use std::sync::Arc;

/// Operator focus: which table is open and which tab the carousel shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub table_id: Option<i64>,
    pub active_tab: usize,
}

pub struct PosManager {
    store: RwLock<PosStore>,
    persistence: Option<Arc<dyn SnapshotStore>>,
    selection: Mutex<Selection>,
}

impl std::fmt::Debug for PosManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosManager")
            .field("store", &"<PosStore>")
            .field("persistence", &self.persistence.is_some())
            .field("selection", &*self.selection.lock())
            .finish()
    }
}

impl PosManager {
    /// Manager over the built-in defaults, without persistence
    pub fn new(tax_rate: Decimal) -> Self {
        Self::with_store(PosStore::with_defaults(tax_rate))
    }

    pub fn with_store(store: PosStore) -> Self {
        Self {
            store: RwLock::new(store),
            persistence: None,
            selection: Mutex::new(Selection::default()),
        }
    }

    /// Load from a snapshot provider.
    ///
    /// A missing or unreadable snapshot starts from the defaults; a read
    /// failure is logged and the provider is still used for saving.
    pub fn open(persistence: Arc<dyn SnapshotStore>, tax_rate: Decimal) -> Self {
        let store = match persistence.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    tables = snapshot.tables.len(),
                    customers = snapshot.customers.len(),
                    history = snapshot.order_history.len(),
                    "Snapshot loaded"
                );
                PosStore::from_snapshot(snapshot, tax_rate)
            }
            Ok(None) => {
                tracing::info!("No snapshot found, starting from defaults");
                PosStore::with_defaults(tax_rate)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load snapshot, starting from defaults");
                PosStore::with_defaults(tax_rate)
            }
        };
        Self {
            store: RwLock::new(store),
            persistence: Some(persistence),
            selection: Mutex::new(Selection::default()),
        }
    }

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: PosCommand) -> CommandResponse {
        match self.process_command(&cmd) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(command_id = %cmd.command_id, error = %err, "Command refused");
                CommandResponse::error(cmd.command_id, err.into())
            }
        }
    }

    fn process_command(&self, cmd: &PosCommand) -> PosResult<CommandResponse> {
        tracing::info!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        let mut guard = self.store.write();
        let mut staged = guard.clone();
        let mut ctx = CommandContext::new(&mut staged, Utc::now());

        let action = CommandAction::from(cmd);
        let outcome = action.execute(&mut ctx)?;
        let warnings = ctx.into_warnings();

        *guard = staged;
        if cmd.is_mutating() {
            self.persist(&guard);
        }
        drop(guard);

        Ok(CommandResponse::success(cmd.command_id.clone(), outcome, warnings))
    }

    /// Save a snapshot; failures are logged and otherwise ignored
    fn persist(&self, store: &PosStore) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if let Err(e) = persistence.save(&store.to_snapshot()) {
            tracing::error!(error = %e, "Failed to persist snapshot, continuing in memory");
        }
    }

    // ========== Queries ==========

    /// Run a read-only closure against the committed store
    pub fn read<R>(&self, f: impl FnOnce(&PosStore) -> R) -> R {
        f(&self.store.read())
    }

    pub fn snapshot(&self) -> PosSnapshot {
        self.store.read().to_snapshot()
    }

    pub fn table(&self, table_id: i64) -> PosResult<DiningTable> {
        self.store.read().table(table_id).cloned()
    }

    pub fn tables(&self) -> Vec<DiningTable> {
        self.store.read().tables.clone()
    }

    pub fn table_totals(&self, table_id: i64) -> PosResult<TableTotals> {
        let store = self.store.read();
        Ok(TableTotals::of_table(store.table(table_id)?, store.tax_rate()))
    }

    pub fn payment_summary(&self, table_id: i64) -> PosResult<PaymentSummary> {
        let store = self.store.read();
        Ok(payment_summary(store.table(table_id)?, store.tax_rate()))
    }

    pub fn split_bill(&self, table_id: i64, mode: SplitMode) -> PosResult<SplitResult> {
        let store = self.store.read();
        split_bill(store.table(table_id)?, store.tax_rate(), mode)
    }

    /// Every tab with lines is paid
    pub fn all_tabs_paid(&self, table_id: i64) -> PosResult<bool> {
        Ok(session::all_tabs_paid(self.store.read().table(table_id)?))
    }

    pub fn available_menu(&self, search: &str, category: Option<&str>) -> Vec<MenuItem> {
        let store = self.store.read();
        catalog::available_menu(&store, search, category)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn customer_stats(&self) -> CustomerStats {
        customers::customer_stats(&self.store.read())
    }

    /// Pending due entries and their total
    pub fn pending_due(&self) -> (Vec<DueLedgerEntry>, f64) {
        let store = self.store.read();
        let pending = ledger::pending_entries(&store);
        (pending.entries.into_iter().cloned().collect(), pending.total)
    }

    pub fn today_summary(&self, now: DateTime<Utc>) -> TodaySummary {
        reports::today_summary(&self.store.read().order_history, now)
    }

    pub fn popular_items_today(&self, now: DateTime<Utc>) -> Vec<(String, u32)> {
        let store = self.store.read();
        reports::popular_items(
            reports::todays_orders(&store.order_history, now),
            reports::POPULAR_ITEMS_LIMIT,
        )
    }

    pub fn kitchen_tickets(&self, now: DateTime<Utc>) -> Vec<KitchenTicket> {
        reports::kitchen_tickets(&self.store.read().tables, now)
    }

    pub fn export_json(&self, now: DateTime<Utc>) -> TransferResult<serde_json::Value> {
        transfer::export_json(&self.store.read(), now)
    }

    // ========== Selection ==========

    pub fn selection(&self) -> Selection {
        *self.selection.lock()
    }

    /// Focus a table; the carousel starts at the first tab
    pub fn select_table(&self, table_id: i64) -> PosResult<()> {
        self.store.read().table(table_id)?;
        *self.selection.lock() = Selection {
            table_id: Some(table_id),
            active_tab: 0,
        };
        Ok(())
    }

    pub fn clear_selection(&self) {
        *self.selection.lock() = Selection::default();
    }

    /// Step the carousel of the selected table; returns the new active tab
    pub fn navigate_carousel(&self, direction: i32) -> PosResult<usize> {
        let mut selection = self.selection.lock();
        let table_id = selection.table_id.ok_or(PosError::TableNotSelected)?;
        let len = self.store.read().table(table_id)?.customer_tabs.len();
        selection.active_tab = session::navigate_carousel(selection.active_tab, direction, len);
        Ok(selection.active_tab)
    }

    /// Settle the selected table; the selection is cleared on success
    pub fn settle_selected(&self, amount: f64, method: &str, shortfall: ShortfallPolicy) -> CommandResponse {
        let Some(table_id) = self.selection().table_id else {
            let cmd = PosCommand::new(PosCommandPayload::Noop);
            return CommandResponse::error(cmd.command_id, PosError::TableNotSelected.into());
        };
        let response = self.execute_command(PosCommand::new(PosCommandPayload::ProcessPayment {
            table_id,
            amount,
            method: method.to_string(),
            shortfall,
        }));
        if response.success {
            self.clear_selection();
        }
        response
    }
}

#[cfg(test)]
mod tests;
