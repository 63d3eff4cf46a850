use std::time::Duration;

use watchjob::timer::Threshold;

#[test]
fn parses_all_units_to_seconds() {
    assert_eq!("2h".parse::<Threshold>().unwrap().as_secs(), 7200);
    assert_eq!("30m".parse::<Threshold>().unwrap().as_secs(), 1800);
    assert_eq!("45s".parse::<Threshold>().unwrap().as_secs(), 45);
}

#[test]
fn accepts_whitespace_and_uppercase_units() {
    assert_eq!(" 10s ".parse::<Threshold>().unwrap().as_secs(), 10);
    assert_eq!("1H".parse::<Threshold>().unwrap().as_secs(), 3600);
}

#[test]
fn rejects_malformed_durations() {
    assert!("".parse::<Threshold>().is_err());
    assert!("10".parse::<Threshold>().is_err());
    assert!("5d".parse::<Threshold>().is_err());
    assert!("abc".parse::<Threshold>().is_err());
    assert!("-3s".parse::<Threshold>().is_err());
}

#[test]
fn exceeded_is_strict() {
    let t = Threshold::from_secs(60);

    assert!(!t.exceeded_by(Duration::from_secs(0)));
    assert!(!t.exceeded_by(Duration::from_secs(59)));
    assert!(!t.exceeded_by(Duration::from_secs(60)));
    assert!(t.exceeded_by(Duration::from_millis(60_001)));
    assert!(t.exceeded_by(Duration::from_secs(61)));
}

#[test]
fn zero_threshold_triggers_on_any_positive_elapsed() {
    let t = Threshold::from_secs(0);

    assert!(!t.exceeded_by(Duration::ZERO));
    assert!(t.exceeded_by(Duration::from_millis(1)));
}
