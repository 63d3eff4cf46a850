use std::time::Duration;

use chrono::Utc;

use watchjob::config::SupervisionConfig;
use watchjob::exec::{ExitDisposition, Outcome, RunRecord};
use watchjob::report::payload::{
    ReportPayload, STREAM_TAIL_BYTES, TRUNCATION_MARKER, display_hours, trim_tail,
};
use watchjob::timer::Threshold;

fn record(status: ExitDisposition) -> RunRecord {
    let now = Utc::now();
    RunRecord {
        cmd: "echo hi".to_string(),
        started_at: now,
        ended_at: now,
        stdout: b"hi\n".to_vec(),
        stderr: Vec::new(),
        status,
        duration: Duration::from_secs(3),
    }
}

fn config() -> SupervisionConfig {
    SupervisionConfig {
        cmd: "echo hi".to_string(),
        soft_timeout: Some(Threshold::from_secs(60)),
        kill_on_timeout: false,
        kill_after: None,
        retry: false,
        verbose: false,
        emails: vec![],
    }
}

#[test]
fn hours_display_floors_short_runs_to_zero() {
    assert_eq!(display_hours(0), 0.0);
    assert_eq!(display_hours(45), 0.0);
    assert_eq!(display_hours(59), 0.0);
}

#[test]
fn hours_display_is_plain_fraction_from_one_minute_up() {
    assert_eq!(display_hours(60), 60.0 / 3600.0);
    assert_eq!(display_hours(7200), 2.0);
    assert_eq!(display_hours(5400), 1.5);
}

#[test]
fn long_streams_keep_only_the_trailing_budget() {
    let mut bytes = vec![b'a'; 5_000];
    bytes.extend(vec![b'b'; 10_000]);
    assert_eq!(bytes.len(), 15_000);

    let rendered = trim_tail(&bytes);
    assert!(rendered.starts_with(TRUNCATION_MARKER));
    let tail = &rendered[TRUNCATION_MARKER.len()..];
    assert_eq!(tail.len(), STREAM_TAIL_BYTES);
    assert!(tail.bytes().all(|b| b == b'b'));
}

#[test]
fn short_streams_pass_through_unmodified() {
    let bytes = vec![b'x'; 5_000];
    let rendered = trim_tail(&bytes);
    assert_eq!(rendered.len(), 5_000);
    assert!(!rendered.contains("truncated"));
}

#[test]
fn signal_exit_classifies_as_killed_even_with_empty_stderr() {
    let rec = record(ExitDisposition::Signaled(9));
    assert!(rec.stderr.is_empty());
    assert_eq!(rec.outcome(), Outcome::Killed);
}

#[test]
fn exit_codes_classify_success_and_failure() {
    assert_eq!(record(ExitDisposition::Exited(0)).outcome(), Outcome::Success);
    assert_eq!(record(ExitDisposition::Exited(1)).outcome(), Outcome::Failure);
    assert_eq!(record(ExitDisposition::Exited(127)).outcome(), Outcome::Failure);
}

#[test]
fn spawn_failure_record_is_a_failure_with_empty_output() {
    let rec = RunRecord::spawn_failure("no-such-thing");
    assert_eq!(rec.outcome(), Outcome::Failure);
    assert!(rec.stdout.is_empty());
    assert!(rec.stderr.is_empty());
    assert_eq!(rec.status, ExitDisposition::Exited(-1));
}

#[test]
fn outcome_payload_carries_command_status_and_streams() {
    let rec = record(ExitDisposition::Exited(1));
    let payload = ReportPayload::for_outcome(Outcome::Failure, &config(), &rec);

    assert_eq!(payload.title, "watchjob: command failed");
    let body = payload.render();
    assert!(body.contains("command: echo hi"));
    assert!(body.contains("exit status: exited with code 1"));
    assert!(body.contains("duration: 3 s (0.00 h)"));
    assert!(body.contains("soft timeout: 60s"));
    assert!(body.contains("hard kill:    none"));
    assert!(body.contains("--- stdout ---"));
}

#[test]
fn threshold_payload_reports_a_still_running_command() {
    let payload = ReportPayload::for_threshold(&config(), Utc::now(), 65);

    assert_eq!(payload.title, "watchjob: time threshold exceeded");
    let body = payload.render();
    assert!(body.contains("still running"));
    assert!(body.contains("duration: 65 s"));
    assert!(!body.contains("exit status"));
    assert!(!body.contains("--- stdout ---"));
}

#[test]
fn killed_payload_shows_the_signal() {
    let rec = record(ExitDisposition::Signaled(9));
    let payload = ReportPayload::for_outcome(Outcome::Killed, &config(), &rec);

    assert_eq!(payload.title, "watchjob: command killed");
    assert!(payload.render().contains("killed by signal 9"));
}
