#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Statement-level writer behavior against a mock connection.

use fleetscan_inventory::MachineInfo;
use fleetscan_store::{StatementKind, Store, TableRef};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

fn record() -> MachineInfo {
    MachineInfo {
        computer_name: "H1".to_owned(),
        domain: "corp.example".to_owned(),
        manufacturer: "Acme".to_owned(),
        model: "Rack 9000".to_owned(),
        ram_gb: 8,
        drive: "C:".to_owned(),
        disk_size_gb: 100,
        free_space_gb: 25,
        free_percent: 25,
        bios_version: "1.2.3".to_owned(),
        bios_serial: "SER-42".to_owned(),
        os_name: "Example OS 12".to_owned(),
        os_version: "12.4".to_owned(),
        os_architecture: "64-bit".to_owned(),
        processor: "Acme CPU".to_owned(),
        processor_address_width: 64,
    }
}

fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn upsert_issues_exactly_one_delete_then_one_insert() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1), exec_ok(1)])
        .into_connection();
    let store = Store::from_connection(conn, TableRef::default(), false);

    let outcome = store.upsert(&record()).await;

    assert!(outcome.is_clean());
    assert_eq!(outcome.rows_deleted, 1);

    let log = store.into_connection().into_transaction_log();
    assert_eq!(log.len(), 2);
    let delete = format!("{:?}", log[0]);
    let insert = format!("{:?}", log[1]);
    assert!(delete.contains("DELETE FROM \"machine_inventory\""), "{delete}");
    // The key predicate is parameterized, not interpolated.
    assert!(delete.contains("\"ComputerName\" = $1"), "{delete}");
    assert!(delete.contains("\"Drive\" = $2"), "{delete}");
    assert!(insert.contains("INSERT INTO \"machine_inventory\""), "{insert}");
    assert!(insert.contains("$16"), "{insert}");
    // Values travel as bound parameters.
    assert!(insert.contains("H1"), "{insert}");
    assert!(!insert.contains("'H1'"), "{insert}");
}

#[tokio::test]
async fn insert_is_still_attempted_when_the_delete_fails() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Custom("lock timeout".to_owned())])
        .append_exec_results([exec_ok(1)])
        .into_connection();
    let store = Store::from_connection(conn, TableRef::default(), false);

    let outcome = store.upsert(&record()).await;

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].statement, StatementKind::Delete);
    assert_eq!(outcome.errors[0].host, "H1");

    // Both statements reached the connection: no transactional rollback.
    let log = store.into_connection().into_transaction_log();
    assert_eq!(log.len(), 2);
    assert!(format!("{:?}", log[1]).contains("INSERT INTO"), "{:?}", log[1]);
}

#[tokio::test]
async fn insert_failure_is_reported_but_not_fatal() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(0)])
        .append_exec_errors([DbErr::Custom("constraint violation".to_owned())])
        .into_connection();
    let store = Store::from_connection(conn, TableRef::default(), false);

    let outcome = store.upsert(&record()).await;

    assert_eq!(outcome.rows_deleted, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].statement, StatementKind::Insert);
}

#[tokio::test]
async fn batch_continues_past_a_failing_record() {
    let mut second = record();
    second.computer_name = "H2".to_owned();

    // First record: delete errors, insert errors. Second record: both fine.
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([
            DbErr::Custom("lock timeout".to_owned()),
            DbErr::Custom("lock timeout".to_owned()),
        ])
        .append_exec_results([exec_ok(0), exec_ok(1)])
        .into_connection();
    let store = Store::from_connection(conn, TableRef::default(), false);

    let outcomes = store.upsert_all(&[record(), second]).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].errors.len(), 2);
    assert!(outcomes[1].is_clean());
}

#[tokio::test]
async fn writes_target_the_configured_table() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(0), exec_ok(1)])
        .into_connection();
    let table = TableRef::new("inventory_staging").unwrap();
    let store = Store::from_connection(conn, table, false);

    let outcome = store.upsert(&record()).await;
    assert!(outcome.is_clean());

    let log = store.into_connection().into_transaction_log();
    assert!(format!("{:?}", log[0]).contains("\"inventory_staging\""));
    assert!(format!("{:?}", log[1]).contains("\"inventory_staging\""));
}

#[tokio::test]
async fn transactional_mode_rolls_back_after_a_failed_delete() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Custom("lock timeout".to_owned())])
        .into_connection();
    let store = Store::from_connection(conn, TableRef::default(), true);

    let outcome = store.upsert(&record()).await;

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].statement, StatementKind::Delete);

    // Only the delete reached the connection; the insert never ran.
    let log = format!("{:?}", store.into_connection().into_transaction_log());
    assert!(log.contains("DELETE FROM"), "{log}");
    assert!(!log.contains("INSERT INTO"), "{log}");
}
