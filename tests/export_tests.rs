use predicates::str::contains;
use std::fs;

mod common;
use common::{claim_ticket, init_db_with_ticket, ntf, temp_out};

#[test]
fn test_export_tickets_csv() {
    let db_path = common::setup_test_db("export_tickets_csv");
    init_db_with_ticket(&db_path, "NT-8001");

    let out = temp_out("export_tickets_csv", "csv");

    ntf()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--tickets",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.contains("ticket,created_at,code"));
    assert!(content.contains("NT-8001"));
    assert!(content.contains("MP01"));
}

#[test]
fn test_export_history_json() {
    let db_path = common::setup_test_db("export_history_json");
    init_db_with_ticket(&db_path, "NT-8002");
    claim_ticket(&db_path, "NT-8002");

    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();
    ntf()
        .args(["--db", &db_path, "withdraw", "NT-8002", "--type", "avr"])
        .assert()
        .success();

    let out = temp_out("export_history_json", "json");

    ntf()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--history",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array of rows");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["ticket"], "NT-8002");
    assert_eq!(rows[0]["sampling_type"], "AVR");
}

#[test]
fn test_export_oee_xlsx() {
    let db_path = common::setup_test_db("export_oee_xlsx");
    init_db_with_ticket(&db_path, "NT-8003");
    claim_ticket(&db_path, "NT-8003");

    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    let out = temp_out("export_oee_xlsx", "xlsx");

    ntf()
        .args([
            "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--oee",
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_rejects_relative_path() {
    let db_path = common::setup_test_db("export_relative");
    init_db_with_ticket(&db_path, "NT-8004");

    ntf()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_range_warns() {
    let db_path = common::setup_test_db("export_empty_range");
    init_db_with_ticket(&db_path, "NT-8005");

    let out = temp_out("export_empty_range", "csv");

    // A period far in the past matches nothing
    ntf()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "1999",
        ])
        .assert()
        .success()
        .stdout(contains("No tickets found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_backup_copies_database() {
    let db_path = common::setup_test_db("backup_copy");
    init_db_with_ticket(&db_path, "NT-8006");

    let out = temp_out("backup_copy", "sqlite");

    ntf()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let src_len = fs::metadata(&db_path).expect("src").len();
    let dst_len = fs::metadata(&out).expect("dst").len();
    assert_eq!(src_len, dst_len);
}
