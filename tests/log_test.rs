//! Persistence tests for the append-only CSV case log.

use chrono::{TimeZone, Utc};
use triageq::error::Error;
use triageq::log::{CaseLog, LOG_HEADER};
use triageq::model::{CaseRecord, Priority};

fn temp_log() -> (tempfile::TempDir, CaseLog) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let log = CaseLog::new(dir.path().join("cases.csv"));
    (dir, log)
}

fn record(patient_id: &str, name: &str, label: &str, condition: &str) -> CaseRecord {
    CaseRecord::restored(
        patient_id,
        name,
        Priority::from_label(label),
        condition,
        Utc.timestamp_opt(1_699_999_000, 0).unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Append
// ---------------------------------------------------------------------------

#[test]
fn first_append_creates_file_with_header() {
    let (_dir, log) = temp_log();
    log.append(&record("P1", "Alice", "Emergency", "chest pain"))
        .unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(LOG_HEADER));
    assert_eq!(
        lines.next(),
        Some("P1,Alice,1,chest pain,1699999000"),
        "record line should match the original plain format"
    );
}

#[test]
fn later_appends_do_not_repeat_the_header() {
    let (_dir, log) = temp_log();
    log.append(&record("P1", "Alice", "Emergency", "chest pain"))
        .unwrap();
    log.append(&record("P2", "Bob", "Routine", "checkup"))
        .unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(contents.matches(LOG_HEADER).count(), 1);
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn append_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let log = CaseLog::new(dir.path().join("data").join("cases.csv"));
    log.append(&record("P1", "Alice", "Urgent", "fracture"))
        .unwrap();
    assert!(log.path().exists());
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[test]
fn missing_file_loads_zero_records_without_error() {
    let (_dir, log) = temp_log();
    let report = log.load_all().unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.skipped, 0);
}

#[test]
fn round_trip_preserves_fields_and_timestamps() {
    let (_dir, log) = temp_log();
    let records = vec![
        record("P1", "Alice", "Emergency", "chest pain"),
        record("P2", "Bob", "Routine", "checkup"),
        record("P3", "Carol", "Urgent", "fracture"),
    ];
    for r in &records {
        log.append(r).unwrap();
    }

    let report = log.load_all().unwrap();
    assert_eq!(report.skipped, 0);
    assert_eq!(report.records, records);
}

#[test]
fn round_trip_survives_embedded_commas_and_quotes() {
    let (_dir, log) = temp_log();
    let rec = record(
        "P1",
        r#"O'Brien, "Mary""#,
        "Urgent",
        "dizziness, nausea, blurred vision",
    );
    log.append(&rec).unwrap();

    let report = log.load_all().unwrap();
    assert_eq!(report.skipped, 0);
    assert_eq!(report.records, vec![rec]);
}

#[test]
fn round_trip_allows_empty_string_fields() {
    let (_dir, log) = temp_log();
    let rec = record("", "", "Standard", "");
    log.append(&rec).unwrap();

    let report = log.load_all().unwrap();
    assert_eq!(report.records, vec![rec]);
}

#[test]
fn malformed_lines_are_skipped_and_counted() {
    let (_dir, log) = temp_log();
    log.append(&record("P1", "Alice", "Emergency", "chest pain"))
        .unwrap();

    // Inject garbage the way a corrupt or hand-edited log would look.
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(log.path())
        .unwrap();
    writeln!(file, "only,three,fields").unwrap();
    writeln!(file, "P2,Bob,not-a-number,checkup,1699999000").unwrap();
    writeln!(file, "P3,Carol,2,fracture,not-a-timestamp").unwrap();
    writeln!(file, "P4,Dave,9,sprain,1699999000").unwrap();
    drop(file);

    log.append(&record("P5", "Erin", "Routine", "checkup"))
        .unwrap();

    let report = log.load_all().unwrap();
    assert_eq!(report.skipped, 4);
    let ids: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.patient_id.as_str())
        .collect();
    assert_eq!(ids, ["P1", "P5"]);
}

#[test]
fn headerless_log_keeps_its_first_record() {
    let (_dir, log) = temp_log();
    // A log created externally, never touched by append: no header row.
    std::fs::write(
        log.path(),
        "P1,Alice,1,chest pain,1699999000\nP2,Bob,4,checkup,1699999000\n",
    )
    .unwrap();

    let report = log.load_all().unwrap();
    assert_eq!(report.skipped, 0);
    let ids: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.patient_id.as_str())
        .collect();
    assert_eq!(ids, ["P1", "P2"]);
}

#[test]
fn read_failure_mid_load_reports_log_read() {
    // A directory opens fine but fails on the first read.
    let dir = tempfile::tempdir().unwrap();
    let log = CaseLog::new(dir.path());

    match log.load_all() {
        Err(Error::LogRead { .. }) => {}
        other => panic!("expected LogRead, got {other:?}"),
    }
}

#[test]
fn load_preserves_file_order() {
    let (_dir, log) = temp_log();
    for id in ["Z", "A", "M"] {
        log.append(&record(id, "n", "Standard", "c")).unwrap();
    }

    let report = log.load_all().unwrap();
    let ids: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.patient_id.as_str())
        .collect();
    assert_eq!(ids, ["Z", "A", "M"]);
}
