use super::*;
use serde_json::json;

#[test]
fn test_export_import_round_trip() {
    let manager = create_test_manager();
    // 结账产生历史记录、顾客消费记录和一笔欠款
    let outcome = run_ok(
        &manager,
        PosCommandPayload::SeatCustomer {
            table_id: 1,
            customer: new_customer("Asha"),
        },
    );
    let CommandOutcome::CustomerLinked { customer_id } = outcome else {
        panic!("unexpected outcome {:?}", outcome);
    };
    add_line(&manager, 1, 0, 1);
    add_line(&manager, 1, 0, 15);
    run_ok(
        &manager,
        PosCommandPayload::ProcessPayment {
            table_id: 1,
            amount: 150.0,
            method: "Cash".to_string(),
            shortfall: ShortfallPolicy::RecordAsDue,
        },
    );
    run_ok(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id,
            amount: 35.5,
            description: "Catering deposit".to_string(),
        },
    );
    create_customer(&manager, "Ravi");
    add_line(&manager, 2, 0, 3);

    let before = manager.snapshot();
    assert_eq!(before.order_history.len(), 1);
    assert_eq!(before.due_expenses.len(), 2);
    let document = manager.export_json(Utc::now()).unwrap();
    assert!(document["orderHistory"][0]["timestamp"].is_string());

    let outcome = run_ok(&manager, PosCommandPayload::ImportData { document });
    let CommandOutcome::Imported { summary } = outcome else {
        panic!("unexpected outcome {:?}", outcome);
    };

    let expected = [
        ("customers", before.customers.len()),
        ("dueExpenses", before.due_expenses.len()),
        ("menu", before.menu.len()),
        ("tables", before.tables.len()),
        ("orders", before.orders.len()),
        ("orderHistory", before.order_history.len()),
    ];
    assert_eq!(summary.len(), expected.len());
    for (collection, len) in expected {
        let stats = summary[collection];
        assert_eq!(stats.added, 0, "{collection}");
        assert_eq!(stats.updated, len, "{collection}");
        assert_eq!(stats.kept, 0, "{collection}");
    }

    let after = manager.snapshot();
    assert_eq!(after, before);
    let asha = after.customers.iter().find(|c| c.id == customer_id).unwrap();
    assert!(money_eq(asha.total_spent, 150.0));
    assert!(money_eq(asha.due_amount, 85.5));
    assert_eq!(asha.order_history.len(), 1);
}

#[test]
fn test_malformed_import_is_refused() {
    let manager = create_test_manager();
    let before = manager.snapshot();
    let response = run(&manager, PosCommandPayload::ImportData { document: json!("backup") });
    assert_eq!(error_code(&response), CommandErrorCode::ImportMalformed);
    assert_eq!(manager.snapshot(), before);
}

#[test]
fn test_import_adds_new_records() {
    let manager = create_test_manager();
    let document = json!({
        "customers": [{
            "id": 501, "name": "Imported", "totalSpent": 75.0, "dueAmount": 0.0
        }],
        "exportDate": "2024-05-01T08:00:00.000Z",
        "version": "2.0"
    });
    let outcome = run_ok(&manager, PosCommandPayload::ImportData { document });
    let CommandOutcome::Imported { summary } = outcome else {
        panic!("unexpected outcome {:?}", outcome);
    };
    assert_eq!(summary["customers"].added, 1);
    assert_eq!(manager.customer_stats().total_customers, 1);
}
