use predicates::str::contains;

mod common;
use common::{claim_ticket, count_rows, init_db, init_db_with_ticket, item_field, ntf};

/// Full walk of the lifecycle: create → claim → pause → resume →
/// finish → withdraw, checking the persisted state at every step.
#[test]
fn test_full_ticket_lifecycle() {
    let db_path = common::setup_test_db("full_lifecycle");
    init_db_with_ticket(&db_path, "NT-1001");

    assert_eq!(item_field(&db_path, "NT-1001", "status"), "awaiting_sampling");

    // Claim: items move to in_sampling, OEE record opens at zero
    claim_ticket(&db_path, "NT-1001");
    assert_eq!(item_field(&db_path, "NT-1001", "status"), "in_sampling");
    assert_eq!(item_field(&db_path, "NT-1001", "cabin"), "Cabine 1");
    assert_eq!(
        count_rows(
            &db_path,
            "oee_records",
            "cabin = 'Cabine 1' AND status = 'in_progress' AND elapsed_seconds = 0"
        ),
        1
    );

    // Pause with a fixed reason → one open interval
    ntf()
        .args([
            "--db",
            &db_path,
            "pause",
            "Cabine 1",
            "--reason",
            "T",
        ])
        .assert()
        .success()
        .stdout(contains("Troca de Turno"));

    assert_eq!(
        count_rows(
            &db_path,
            "pause_intervals",
            "cabin = 'Cabine 1' AND ended_at IS NULL"
        ),
        1
    );

    // Resume → interval closed
    ntf()
        .args(["--db", &db_path, "resume", "Cabine 1"])
        .assert()
        .success();

    assert_eq!(
        count_rows(
            &db_path,
            "pause_intervals",
            "cabin = 'Cabine 1' AND ended_at IS NULL"
        ),
        0
    );

    // Finish → awaiting withdrawal, OEE finished with duration ≥ 0
    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success()
        .stdout(contains("awaiting withdrawal"));

    assert_eq!(
        item_field(&db_path, "NT-1001", "status"),
        "awaiting_withdrawal"
    );
    assert_eq!(
        count_rows(
            &db_path,
            "oee_records",
            "cabin = 'Cabine 1' AND status = 'finished' AND total_seconds >= 0"
        ),
        1
    );

    // Withdraw as AVR → finalized, one history entry with the tag
    ntf()
        .args(["--db", &db_path, "withdraw", "NT-1001", "--type", "avr"])
        .assert()
        .success()
        .stdout(contains("AVR"));

    assert_eq!(item_field(&db_path, "NT-1001", "status"), "finalized");
    assert_eq!(
        count_rows(
            &db_path,
            "history",
            "ticket_number = 'NT-1001' AND sampling_type = 'AVR'"
        ),
        1
    );
}

#[test]
fn test_create_rejects_blank_fields() {
    let db_path = common::setup_test_db("create_blank");
    init_db(&db_path);

    // Blank description
    ntf()
        .args([
            "--db",
            &db_path,
            "create",
            "NT-2001",
            "--item",
            "MP01: :2:L001",
        ])
        .assert()
        .failure()
        .stderr(contains("description cannot be blank"));

    // Non-positive quantity
    ntf()
        .args([
            "--db",
            &db_path,
            "create",
            "NT-2001",
            "--item",
            "MP01:Resina:0:L001",
        ])
        .assert()
        .failure()
        .stderr(contains("quantity must be positive"));

    // Nothing was persisted
    assert_eq!(count_rows(&db_path, "tickets", "1=1"), 0);
}

#[test]
fn test_create_rejects_duplicate_number() {
    let db_path = common::setup_test_db("create_dup");
    init_db_with_ticket(&db_path, "NT-2002");

    ntf()
        .args([
            "--db",
            &db_path,
            "create",
            "NT-2002",
            "--item",
            "MP02:Outra resina:1:L002",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

/// Lifecycle monotonicity: claiming a ticket that already advanced
/// fails with a conflict and leaves every item unchanged.
#[test]
fn test_claim_already_claimed_ticket_conflicts() {
    let db_path = common::setup_test_db("claim_twice");
    init_db_with_ticket(&db_path, "NT-3001");
    claim_ticket(&db_path, "NT-3001");

    ntf()
        .args([
            "--db", &db_path, "claim", "NT-3001", "--cabin", "Cabine 2", "--operator", "54321",
        ])
        .assert()
        .failure()
        .stderr(contains("Conflict"));

    // Still claimed by Cabine 1, status untouched
    assert_eq!(item_field(&db_path, "NT-3001", "status"), "in_sampling");
    assert_eq!(item_field(&db_path, "NT-3001", "cabin"), "Cabine 1");
}

#[test]
fn test_withdraw_requires_finished_sampling() {
    let db_path = common::setup_test_db("withdraw_early");
    init_db_with_ticket(&db_path, "NT-3002");

    // Still awaiting sampling → conflict
    ntf()
        .args(["--db", &db_path, "withdraw", "NT-3002", "--type", "avr"])
        .assert()
        .failure()
        .stderr(contains("Conflict"));

    assert_eq!(count_rows(&db_path, "history", "1=1"), 0);
    assert_eq!(item_field(&db_path, "NT-3002", "status"), "awaiting_sampling");
}

#[test]
fn test_withdraw_conventional_records_tag() {
    let db_path = common::setup_test_db("withdraw_conv");
    init_db_with_ticket(&db_path, "NT-3003");
    claim_ticket(&db_path, "NT-3003");

    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    ntf()
        .args([
            "--db",
            &db_path,
            "withdraw",
            "NT-3003",
            "--type",
            "conventional",
            "--notes",
            "baixa de teste",
        ])
        .assert()
        .success();

    assert_eq!(
        count_rows(
            &db_path,
            "history",
            "sampling_type = 'Conventional' AND notes = 'baixa de teste'"
        ),
        1
    );
}

#[test]
fn test_unknown_ticket_is_reported() {
    let db_path = common::setup_test_db("unknown_ticket");
    init_db(&db_path);

    ntf()
        .args([
            "--db", &db_path, "claim", "NT-9999", "--cabin", "Cabine 1", "--operator", "12345",
        ])
        .assert()
        .failure()
        .stderr(contains("Ticket not found"));
}
