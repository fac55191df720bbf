//! Integration tests for the `workplan` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the schedule, overlay
//! and sample subcommands through the actual binary, covering stdin and file
//! input, both output formats, exit codes and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn workplan() -> Command {
    let mut cmd = Command::cargo_bin("workplan").unwrap();
    cmd.env_remove("WORKPLAN_TZ").env_remove("WORKPLAN_NOW");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Schedule subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn schedule_prints_day_by_day_text() {
    workplan()
        .args(["schedule", "-i", &fixture("calendar.json")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2026-03-16\n  Work Period: 09:15 to 12:30\n    Answer urgent e-mail, 1hr 0mins\n",
        ))
        .stdout(predicate::str::contains(
            "    Write deployment report(1/2), 2hrs 15mins\n",
        ))
        .stdout(predicate::str::contains(
            "  Work Period: 13:30 to 17:00\n    Write deployment report(2/2), 1hr 45mins\n",
        ))
        .stdout(predicate::str::contains("2026-03-17\n  Work Period: 09:00 to 12:30"));
}

#[test]
fn schedule_json_lists_parts_per_period() {
    let output = workplan()
        .args(["schedule", "-i", &fixture("calendar.json"), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["successful"], true);
    assert_eq!(json["allocated_minutes"], 300);
    assert_eq!(json["unscheduled"].as_array().unwrap().len(), 0);

    let periods = json["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 4);
    assert_eq!(periods[0]["start"], "2026-03-16T09:15:00");
    assert_eq!(periods[0]["parts"][1]["task"], "Write deployment report");
    assert_eq!(periods[0]["parts"][1]["minutes"], 135);
    assert_eq!(periods[1]["parts"][0]["sequence"], 2);
    assert_eq!(periods[1]["parts"][0]["minutes"], 105);
    assert_eq!(periods[3]["parts"].as_array().unwrap().len(), 0);
}

#[test]
fn schedule_reads_stdin() {
    let input = std::fs::read_to_string(fixture("calendar.json")).unwrap();

    workplan()
        .arg("schedule")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Work Period: 09:15 to 12:30"));
}

#[test]
fn now_flag_overrides_document_time() {
    let output = workplan()
        .args([
            "schedule",
            "-i",
            &fixture("calendar.json"),
            "--format",
            "json",
            "--now",
            "2026-03-16T10:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["periods"][0]["start"], "2026-03-16T10:00:00");
    assert_eq!(json["periods"][0]["parts"][0]["minutes"], 60);
}

#[test]
fn now_is_read_from_environment() {
    let output = workplan()
        .env("WORKPLAN_NOW", "2026-03-16T13:00:00Z")
        .args(["schedule", "-i", &fixture("calendar.json"), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["periods"][0]["start"], "2026-03-16T13:30:00");
}

#[test]
fn schedule_that_does_not_fit_exits_with_status_2() {
    workplan()
        .args(["schedule", "-i", &fixture("overbooked.json")])
        .assert()
        .code(2)
        .stdout("Schedule unsuccessful: insufficient time for tasks\n");
}

#[test]
fn unsuccessful_json_still_reports_partial_schedule() {
    let output = workplan()
        .args(["schedule", "-i", &fixture("overbooked.json"), "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json = stdout_json(&output);
    assert_eq!(json["successful"], false);
    assert_eq!(json["allocated_minutes"], 420);
    assert_eq!(json["unscheduled"][0]["task"], "Migrate the database");
    assert_eq!(json["unscheduled"][0]["minutes"], 240);
}

#[test]
fn task_longer_than_the_calendar_range_is_partially_placed() {
    let output = workplan()
        .args(["schedule", "-i", &fixture("endless_task.json"), "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json = stdout_json(&output);
    assert_eq!(json["allocated_minutes"], 420);
    assert_eq!(json["unscheduled"][0]["task"], "Endless backlog");
    assert_eq!(json["unscheduled"][0]["minutes"], 160_000_000_000i64 - 360);
}

#[test]
fn schedule_writes_output_file() {
    let path = std::env::temp_dir().join(format!("workplan-schedule-{}.txt", std::process::id()));

    workplan()
        .args(["schedule", "-i", &fixture("calendar.json"), "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(written.starts_with("2026-03-16\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overlay_removes_event_time() {
    workplan()
        .args(["overlay", "-i", &fixture("calendar.json")])
        .assert()
        .success()
        .stdout(
            "2026-03-16 09:15 to 2026-03-16 12:30\n\
             2026-03-16 13:30 to 2026-03-16 17:00\n\
             2026-03-17 09:00 to 2026-03-17 12:30\n\
             2026-03-17 13:30 to 2026-03-17 17:00\n",
        );
}

#[test]
fn overlay_projects_events_into_zone_flag() {
    // The 09:00 UTC standup is 10:00 in Berlin.
    workplan()
        .args([
            "overlay",
            "-i",
            &fixture("calendar.json"),
            "--zone",
            "Europe/Berlin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2026-03-16 09:00 to 2026-03-16 10:00\n2026-03-16 10:15 to 2026-03-16 12:30\n",
        ));
}

#[test]
fn overlay_json_has_no_parts() {
    let output = workplan()
        .args(["overlay", "-i", &fixture("calendar.json"), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let periods = json.as_array().unwrap();
    assert_eq!(periods.len(), 4);
    assert!(periods
        .iter()
        .all(|p| p["parts"].as_array().unwrap().is_empty()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Sample subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sample_document_describes_working_days() {
    let output = workplan()
        .args([
            "sample",
            "--start",
            "2026-03-16",
            "--days",
            "2",
            "--zone",
            "America/New_York",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["zone"], "America/New_York");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 3);
    assert_eq!(json["working_days"]["days"], 2);
    let events = json["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["start"], "2026-03-16T09:00:00-04:00");
}

#[test]
fn sample_output_feeds_schedule() {
    let sample = workplan()
        .args([
            "sample",
            "--start",
            "2026-03-16",
            "--days",
            "2",
            "--zone",
            "America/New_York",
        ])
        .output()
        .unwrap();
    assert!(sample.status.success());

    workplan()
        .arg("schedule")
        .write_stdin(sample.stdout)
        .assert()
        .success()
        .stdout(predicate::str::contains("Work Period: 09:15 to 12:30"))
        .stdout(predicate::str::contains("Plan security configuration"));
}

#[test]
fn sample_zone_from_environment() {
    let output = workplan()
        .env("WORKPLAN_TZ", "Asia/Tokyo")
        .args(["sample", "--start", "2026-03-16", "--days", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["zone"], "Asia/Tokyo");
    assert_eq!(json["events"][0]["start"], "2026-03-16T09:00:00+09:00");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overlapping_periods_are_rejected() {
    workplan()
        .args(["schedule", "-i", &fixture("overlapping.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Work periods cannot overlap"));
}

#[test]
fn unknown_zone_is_rejected() {
    workplan()
        .args([
            "overlay",
            "-i",
            &fixture("calendar.json"),
            "--zone",
            "Mars/Olympus_Mons",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mars/Olympus_Mons"));
}

#[test]
fn invalid_now_is_rejected() {
    workplan()
        .args(["schedule", "-i", &fixture("calendar.json"), "--now", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now timestamp"));
}

#[test]
fn malformed_document_is_rejected() {
    workplan()
        .arg("schedule")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar document"));
}

#[test]
fn missing_input_file_is_reported() {
    workplan()
        .args(["schedule", "-i", "/nonexistent/calendar.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn task_minutes_out_of_range_are_rejected() {
    workplan()
        .args(["schedule", "-i", &fixture("task_out_of_range.json")])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Endless backlog"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn event_ending_before_start_is_rejected() {
    let input = r#"{
        "zone": "UTC",
        "events": [
            { "start": "2026-03-16T10:00:00Z", "end": "2026-03-16T09:00:00Z" }
        ]
    }"#;

    workplan()
        .arg("overlay")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar document"));
}
