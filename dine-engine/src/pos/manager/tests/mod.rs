use super::*;
use crate::persistence::MemorySnapshotStore;
use crate::pos::money::money_eq;
use shared::models::{CustomerCreate, CustomerRef, TableStatus};
use shared::order::{CommandErrorCode, CommandOutcome};

fn create_test_manager() -> PosManager {
    PosManager::new(Decimal::ZERO)
}

fn create_persistent_manager() -> (PosManager, Arc<MemorySnapshotStore>) {
    let persistence = Arc::new(MemorySnapshotStore::new());
    let manager = PosManager::open(persistence.clone(), Decimal::ZERO);
    (manager, persistence)
}

fn run(manager: &PosManager, payload: PosCommandPayload) -> CommandResponse {
    manager.execute_command(PosCommand::new(payload))
}

fn run_ok(manager: &PosManager, payload: PosCommandPayload) -> CommandOutcome {
    let response = run(manager, payload);
    assert!(response.success, "command failed: {:?}", response.error);
    response.outcome.unwrap()
}

fn error_code(response: &CommandResponse) -> CommandErrorCode {
    assert!(!response.success);
    response.error.as_ref().unwrap().code
}

fn add_line(manager: &PosManager, table_id: i64, customer_index: usize, item_id: i64) {
    run_ok(
        manager,
        PosCommandPayload::AddOrderLine {
            table_id,
            customer_index,
            item_id,
        },
    );
}

fn new_customer(name: &str) -> CustomerRef {
    CustomerRef::New(CustomerCreate {
        name: name.to_string(),
        ..Default::default()
    })
}

/// Create a directory customer and return its id
fn create_customer(manager: &PosManager, name: &str) -> i64 {
    match run_ok(
        manager,
        PosCommandPayload::CreateCustomer {
            customer: CustomerCreate {
                name: name.to_string(),
                ..Default::default()
            },
        },
    ) {
        CommandOutcome::CustomerLinked { customer_id } => customer_id,
        other => panic!("unexpected outcome {:?}", other),
    }
}

mod test_ledger;
mod test_transfer;
