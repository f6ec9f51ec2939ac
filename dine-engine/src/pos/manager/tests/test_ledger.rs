use super::*;

#[test]
fn test_partial_due_payment() {
    let manager = create_test_manager();
    let customer_id = create_customer(&manager, "Kiran");

    let outcome = run_ok(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id,
            amount: 100.0,
            description: "Catering advance".to_string(),
        },
    );
    let CommandOutcome::DueRecorded { entry_id } = outcome else {
        panic!("unexpected outcome {:?}", outcome);
    };

    let outcome = run_ok(&manager, PosCommandPayload::ApplyDuePayment { entry_id, amount: 40.0 });
    assert_eq!(
        outcome,
        CommandOutcome::DuePaymentApplied {
            applied: 40.0,
            remaining: 60.0
        }
    );

    let snapshot = manager.snapshot();
    let entry = &snapshot.due_expenses[0];
    assert!(money_eq(entry.amount, 60.0));
    assert!(entry.is_pending());
    assert!(money_eq(snapshot.customers[0].due_amount, 60.0));

    let (pending, total) = manager.pending_due();
    assert_eq!(pending.len(), 1);
    assert!(money_eq(total, 60.0));
}

#[test]
fn test_manual_due_requires_positive_amount() {
    let manager = create_test_manager();
    let customer_id = create_customer(&manager, "Kiran");
    let response = run(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id,
            amount: 0.0,
            description: String::new(),
        },
    );
    assert_eq!(error_code(&response), CommandErrorCode::InvalidAmount);

    let response = run(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id: 404,
            amount: 10.0,
            description: String::new(),
        },
    );
    assert_eq!(error_code(&response), CommandErrorCode::CustomerNotFound);
}

#[test]
fn test_customer_payment_reports_excess() {
    let manager = create_test_manager();
    let customer_id = create_customer(&manager, "Tara");
    run_ok(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id,
            amount: 30.0,
            description: String::new(),
        },
    );

    let response = run(&manager, PosCommandPayload::ApplyCustomerPayment { customer_id, amount: 50.0 });
    assert!(response.success);
    assert_eq!(
        response.outcome,
        Some(CommandOutcome::CustomerPaymentApplied {
            applied: 30.0,
            excess: 20.0
        })
    );
    assert_eq!(response.warnings.len(), 1);

    let stats = manager.customer_stats();
    assert_eq!(stats.total_customers, 1);
    assert!(money_eq(stats.total_due, 0.0));
    assert!(!manager.snapshot().due_expenses[0].is_pending());
}

#[test]
fn test_delete_customer_cascades() {
    let manager = create_test_manager();
    let customer_id = create_customer(&manager, "Dev");
    run_ok(
        &manager,
        PosCommandPayload::RecordManualDue {
            customer_id,
            amount: 12.5,
            description: String::new(),
        },
    );
    run_ok(
        &manager,
        PosCommandPayload::SeatCustomer {
            table_id: 2,
            customer: CustomerRef::Existing { id: customer_id },
        },
    );

    let response = run(&manager, PosCommandPayload::DeleteCustomer { customer_id });
    assert!(response.success);
    let snapshot = manager.snapshot();
    assert!(snapshot.customers.is_empty());
    assert!(snapshot.due_expenses.is_empty());
    assert_eq!(manager.table(2).unwrap().current_customer_id, None);
}

#[test]
fn test_duplicate_names_are_suffixed() {
    let manager = create_test_manager();
    create_customer(&manager, "Sam");
    let response = run(
        &manager,
        PosCommandPayload::CreateCustomer {
            customer: CustomerCreate {
                name: "Sam".to_string(),
                ..Default::default()
            },
        },
    );
    assert!(response.success);
    assert_eq!(response.warnings.len(), 1);
    assert_eq!(manager.snapshot().customers[1].name, "Sam (2)");

    let response = run(
        &manager,
        PosCommandPayload::CreateCustomer {
            customer: CustomerCreate {
                name: "   ".to_string(),
                ..Default::default()
            },
        },
    );
    assert_eq!(error_code(&response), CommandErrorCode::CustomerNameRequired);
}
