#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ntf() -> Command {
    cargo_bin_cmd!("ntflow")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ntflow.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema on a fresh test DB
pub fn init_db(db_path: &str) {
    ntf()
        .args(["--db", db_path, "--test", "init"]) // uses --test init to create schema
        .assert()
        .success();
}

/// Initialize DB and create one ticket useful for many tests
pub fn init_db_with_ticket(db_path: &str, number: &str) {
    init_db(db_path);

    ntf()
        .args([
            "--db",
            db_path,
            "create",
            number,
            "--item",
            "MP01:Resina base:10.5:L001",
        ])
        .assert()
        .success();
}

/// Drive a ticket all the way to a running session on Cabine 1
pub fn claim_ticket(db_path: &str, number: &str) {
    ntf()
        .args([
            "--db", db_path, "claim", number, "--cabin", "Cabine 1", "--operator", "12345",
        ])
        .assert()
        .success();
}

/// Read one line_items column of a ticket's first item, via the library DB API
pub fn item_field(db_path: &str, number: &str, column: &str) -> String {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let sql = format!(
        "SELECT li.{} FROM line_items li
         JOIN tickets t ON t.id = li.ticket_id
         WHERE t.number = ?1
         ORDER BY li.id ASC LIMIT 1",
        column
    );
    conn.query_row(&sql, [number], |row| {
        row.get::<_, rusqlite::types::Value>(0)
    })
    .map(|v| match v {
        rusqlite::types::Value::Text(s) => s,
        rusqlite::types::Value::Integer(i) => i.to_string(),
        rusqlite::types::Value::Real(r) => r.to_string(),
        _ => String::new(),
    })
    .expect("query item field")
}

/// Count rows matching an arbitrary WHERE clause.
pub fn count_rows(db_path: &str, table: &str, where_clause: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", table, where_clause);
    conn.query_row(&sql, [], |row| row.get(0)).expect("count rows")
}
