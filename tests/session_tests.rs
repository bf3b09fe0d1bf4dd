use predicates::str::contains;

mod common;
use common::{claim_ticket, count_rows, init_db_with_ticket, ntf};

#[test]
fn test_pause_requires_running_session() {
    let db_path = common::setup_test_db("pause_idle");
    init_db_with_ticket(&db_path, "NT-4001");

    // Nothing claimed on Cabine 1 yet
    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "A"])
        .assert()
        .failure()
        .stderr(contains("no active session"));
}

#[test]
fn test_double_pause_conflicts() {
    let db_path = common::setup_test_db("double_pause");
    init_db_with_ticket(&db_path, "NT-4002");
    claim_ticket(&db_path, "NT-4002");

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "M"])
        .assert()
        .success();

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "A"])
        .assert()
        .failure()
        .stderr(contains("already paused"));

    // Only one interval was opened
    assert_eq!(count_rows(&db_path, "pause_intervals", "1=1"), 1);
}

#[test]
fn test_pause_other_requires_note() {
    let db_path = common::setup_test_db("pause_other");
    init_db_with_ticket(&db_path, "NT-4003");
    claim_ticket(&db_path, "NT-4003");

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "O"])
        .assert()
        .failure()
        .stderr(contains("requires a --note"));

    ntf()
        .args([
            "--db",
            &db_path,
            "pause",
            "Cabine 1",
            "--reason",
            "O",
            "--note",
            "falta de energia",
        ])
        .assert()
        .success();

    assert_eq!(
        count_rows(
            &db_path,
            "pause_intervals",
            "reason = 'Outros' AND note = 'falta de energia'"
        ),
        1
    );
}

#[test]
fn test_invalid_pause_reason_code() {
    let db_path = common::setup_test_db("pause_bad_reason");
    init_db_with_ticket(&db_path, "NT-4004");
    claim_ticket(&db_path, "NT-4004");

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "X"])
        .assert()
        .failure()
        .stderr(contains("Invalid pause reason"));
}

#[test]
fn test_resume_without_pause_conflicts() {
    let db_path = common::setup_test_db("resume_idle");
    init_db_with_ticket(&db_path, "NT-4005");
    claim_ticket(&db_path, "NT-4005");

    ntf()
        .args(["--db", &db_path, "resume", "Cabine 1"])
        .assert()
        .failure()
        .stderr(contains("not paused"));
}

/// Pause interval closure: finish() while paused leaves no interval
/// with a NULL end timestamp.
#[test]
fn test_finish_while_paused_closes_intervals() {
    let db_path = common::setup_test_db("finish_paused");
    init_db_with_ticket(&db_path, "NT-4006");
    claim_ticket(&db_path, "NT-4006");

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "R"])
        .assert()
        .success();

    // Finishing while paused is allowed and force-closes the interval
    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    assert_eq!(count_rows(&db_path, "pause_intervals", "ended_at IS NULL"), 0);
    assert_eq!(
        count_rows(&db_path, "oee_records", "status = 'finished'"),
        1
    );
}

#[test]
fn test_finish_without_session_conflicts() {
    let db_path = common::setup_test_db("finish_idle");
    init_db_with_ticket(&db_path, "NT-4007");

    ntf()
        .args(["--db", &db_path, "finish", "Cabine 2"])
        .assert()
        .failure()
        .stderr(contains("no active session"));
}

#[test]
fn test_status_reflects_run_state() {
    let db_path = common::setup_test_db("status_states");
    init_db_with_ticket(&db_path, "NT-4008");

    // All cabins idle
    ntf()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("no ticket claimed"));

    claim_ticket(&db_path, "NT-4008");

    ntf()
        .args(["--db", &db_path, "status", "--cabin", "Cabine 1"])
        .assert()
        .success()
        .stdout(contains("running"))
        .stdout(contains("NT-4008"))
        .stdout(contains("12345"));

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "A"])
        .assert()
        .success();

    ntf()
        .args(["--db", &db_path, "status", "--cabin", "Cabine 1"])
        .assert()
        .success()
        .stdout(contains("paused"))
        .stdout(contains("Almoço"));
}

#[test]
fn test_status_rejects_unknown_cabin() {
    let db_path = common::setup_test_db("status_unknown");
    init_db_with_ticket(&db_path, "NT-4009");

    ntf()
        .args(["--db", &db_path, "status", "--cabin", "Cabine 99"])
        .assert()
        .failure()
        .stderr(contains("Unknown cabin"));
}

/// Elapsed counter persisted on the OEE row never goes negative and is
/// flushed at pause time.
#[test]
fn test_elapsed_flushed_non_negative() {
    let db_path = common::setup_test_db("elapsed_flush");
    init_db_with_ticket(&db_path, "NT-4010");
    claim_ticket(&db_path, "NT-4010");

    ntf()
        .args(["--db", &db_path, "pause", "Cabine 1", "--reason", "T"])
        .assert()
        .success();

    assert_eq!(
        count_rows(&db_path, "oee_records", "elapsed_seconds < 0"),
        0
    );

    ntf()
        .args(["--db", &db_path, "resume", "Cabine 1"])
        .assert()
        .success();

    ntf()
        .args(["--db", &db_path, "finish", "Cabine 1"])
        .assert()
        .success();

    // Net time never exceeds the gross span
    assert_eq!(
        count_rows(
            &db_path,
            "oee_records",
            "status = 'finished' AND elapsed_seconds > total_seconds"
        ),
        0
    );
}
