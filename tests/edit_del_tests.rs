use predicates::str::contains;

mod common;
use common::{claim_ticket, count_rows, init_db_with_ticket, item_field, ntf};

/// Round-trip of a ticket edit: the updated quantity is read back, and
/// dropped items no longer appear.
#[test]
fn test_edit_quantity_roundtrip() {
    let db_path = common::setup_test_db("edit_roundtrip");
    init_db_with_ticket(&db_path, "NT-6001");

    ntf()
        .args([
            "--db",
            &db_path,
            "edit",
            "NT-6001",
            "--item",
            "MP01:Resina base:22.75:L001",
        ])
        .assert()
        .success()
        .stdout(contains("updated MP01"));

    assert_eq!(item_field(&db_path, "NT-6001", "quantity"), "22.75");
}

#[test]
fn test_edit_adds_and_drops_items() {
    let db_path = common::setup_test_db("edit_add_drop");
    init_db_with_ticket(&db_path, "NT-6002");

    // Add a second item, then drop the first
    ntf()
        .args([
            "--db",
            &db_path,
            "edit",
            "NT-6002",
            "--item",
            "MP02:Catalisador:4:L009",
            "--drop-item",
            "MP01",
        ])
        .assert()
        .success();

    assert_eq!(count_rows(&db_path, "line_items", "code = 'MP01'"), 0);
    assert_eq!(count_rows(&db_path, "line_items", "code = 'MP02'"), 1);
}

#[test]
fn test_edit_rename_ticket() {
    let db_path = common::setup_test_db("edit_rename");
    init_db_with_ticket(&db_path, "NT-6003");

    ntf()
        .args(["--db", &db_path, "edit", "NT-6003", "--number", "NT-6003-B"])
        .assert()
        .success();

    assert_eq!(count_rows(&db_path, "tickets", "number = 'NT-6003-B'"), 1);
    assert_eq!(count_rows(&db_path, "tickets", "number = 'NT-6003'"), 0);
}

#[test]
fn test_edit_refuses_claimed_ticket() {
    let db_path = common::setup_test_db("edit_claimed");
    init_db_with_ticket(&db_path, "NT-6004");
    claim_ticket(&db_path, "NT-6004");

    ntf()
        .args([
            "--db",
            &db_path,
            "edit",
            "NT-6004",
            "--item",
            "MP01:Resina base:99:L001",
        ])
        .assert()
        .failure()
        .stderr(contains("no longer be edited"));

    // Quantity untouched
    assert_eq!(item_field(&db_path, "NT-6004", "quantity"), "10.5");
}

#[test]
fn test_edit_cannot_drop_last_item() {
    let db_path = common::setup_test_db("edit_empty");
    init_db_with_ticket(&db_path, "NT-6005");

    ntf()
        .args(["--db", &db_path, "edit", "NT-6005", "--drop-item", "MP01"])
        .assert()
        .failure()
        .stderr(contains("without items"));

    // Rolled back: the item is still there
    assert_eq!(count_rows(&db_path, "line_items", "code = 'MP01'"), 1);
}

#[test]
fn test_del_removes_awaiting_ticket() {
    let db_path = common::setup_test_db("del_awaiting");
    init_db_with_ticket(&db_path, "NT-6006");

    ntf()
        .args(["--db", &db_path, "del", "NT-6006", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted ticket NT-6006"));

    assert_eq!(count_rows(&db_path, "tickets", "1=1"), 0);
    assert_eq!(count_rows(&db_path, "line_items", "1=1"), 0);
}

#[test]
fn test_del_refuses_claimed_ticket() {
    let db_path = common::setup_test_db("del_claimed");
    init_db_with_ticket(&db_path, "NT-6007");
    claim_ticket(&db_path, "NT-6007");

    ntf()
        .args(["--db", &db_path, "del", "NT-6007", "--yes"])
        .assert()
        .failure()
        .stderr(contains("cannot be deleted"));

    assert_eq!(count_rows(&db_path, "tickets", "1=1"), 1);
}
