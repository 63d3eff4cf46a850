use watchjob::cli::CliArgs;
use watchjob::config::{RunMode, resolve_mode};

fn args() -> CliArgs {
    CliArgs {
        cmd: None,
        emails: None,
        time: None,
        kill: false,
        killtime: None,
        retry: false,
        verbose: false,
        log_level: None,
    }
}

#[test]
fn emails_without_command_selects_test_notification_mode() {
    let mut a = args();
    a.emails = Some("a@b.com, c@d.com".to_string());

    match resolve_mode(&a).unwrap() {
        RunMode::TestNotification { emails } => {
            assert_eq!(emails, vec!["a@b.com".to_string(), "c@d.com".to_string()]);
        }
        other => panic!("expected test-notification mode, got {other:?}"),
    }
}

#[test]
fn command_with_thresholds_resolves_supervision_config() {
    let mut a = args();
    a.cmd = Some("sleep 5".to_string());
    a.emails = Some("ops@example.com".to_string());
    a.time = Some("30m".to_string());
    a.killtime = Some("2h".to_string());
    a.kill = true;
    a.retry = true;

    match resolve_mode(&a).unwrap() {
        RunMode::Supervise(cfg) => {
            assert_eq!(cfg.cmd, "sleep 5");
            assert_eq!(cfg.soft_timeout.unwrap().as_secs(), 1800);
            assert_eq!(cfg.kill_after.unwrap().as_secs(), 7200);
            assert!(cfg.kill_on_timeout);
            assert!(cfg.retry);
            assert_eq!(cfg.emails, vec!["ops@example.com".to_string()]);
        }
        other => panic!("expected supervision mode, got {other:?}"),
    }
}

#[test]
fn blank_command_text_is_a_config_error() {
    let mut a = args();
    a.cmd = Some("   ".to_string());
    a.emails = Some("a@b.com".to_string());

    assert!(resolve_mode(&a).is_err());
}

#[test]
fn bad_threshold_is_rejected_at_resolution_time() {
    let mut a = args();
    a.cmd = Some("true".to_string());
    a.time = Some("10x".to_string());

    assert!(resolve_mode(&a).is_err());
}
