use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{claim_ticket, init_db_with_ticket, ntf};

#[test]
fn test_list_shows_tickets_and_items() {
    let db_path = common::setup_test_db("list_basic");
    init_db_with_ticket(&db_path, "NT-7001");

    ntf()
        .args([
            "--db",
            &db_path,
            "create",
            "NT-7002",
            "--item",
            "MP03:Pigmento azul:7:L015",
        ])
        .assert()
        .success();

    ntf()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("NT-7001"))
        .stdout(contains("NT-7002"))
        .stdout(contains("Ag. Amostragem"));

    ntf()
        .args(["--db", &db_path, "list", "--items"])
        .assert()
        .success()
        .stdout(contains("MP03"))
        .stdout(contains("Pigmento azul"));
}

#[test]
fn test_list_filters_by_status_and_cabin() {
    let db_path = common::setup_test_db("list_filters");
    init_db_with_ticket(&db_path, "NT-7003");
    init_db_with_ticket(&db_path, "NT-7004");
    claim_ticket(&db_path, "NT-7003");

    // Only the claimed ticket is in sampling
    ntf()
        .args(["--db", &db_path, "list", "--status", "sampling"])
        .assert()
        .success()
        .stdout(contains("NT-7003"))
        .stdout(contains("NT-7004").not());

    // Cabin filter
    ntf()
        .args(["--db", &db_path, "list", "--cabin", "Cabine 1"])
        .assert()
        .success()
        .stdout(contains("NT-7003"))
        .stdout(contains("NT-7004").not());

    // No match → friendly message
    ntf()
        .args(["--db", &db_path, "list", "--status", "finalized"])
        .assert()
        .success()
        .stdout(contains("No tickets match"));
}

#[test]
fn test_list_rejects_bad_status() {
    let db_path = common::setup_test_db("list_bad_status");
    init_db_with_ticket(&db_path, "NT-7005");

    ntf()
        .args(["--db", &db_path, "list", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(contains("Invalid ticket status"));
}

#[test]
fn test_stats_counts_and_metrics() {
    let db_path = common::setup_test_db("stats_metrics");
    init_db_with_ticket(&db_path, "NT-7006");
    init_db_with_ticket(&db_path, "NT-7007");

    // Before any run: counts only
    ntf()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Ag. Amostragem"))
        .stdout(contains("No finished runs yet"));

    // Run one ticket through
    claim_ticket(&db_path, "NT-7006");
    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    ntf()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Finished runs"))
        .stdout(contains("Avg cycle"))
        .stdout(contains("Efficiency"));
}

#[test]
fn test_stats_period_filters_runs() {
    let db_path = common::setup_test_db("stats_period");
    init_db_with_ticket(&db_path, "NT-7009");
    claim_ticket(&db_path, "NT-7009");
    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    // A period in the past excludes the run just finished
    ntf()
        .args(["--db", &db_path, "stats", "--period", "1999"])
        .assert()
        .success()
        .stdout(contains("No finished runs yet"));

    ntf()
        .args(["--db", &db_path, "stats", "--period", "bogus"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_db_info_prints_row_counts() {
    let db_path = common::setup_test_db("db_info");
    init_db_with_ticket(&db_path, "NT-7008");

    ntf()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Tickets:"))
        .stdout(contains("Line items:"));
}
