use chrono::NaiveTime;
use otsched_api::config::{parse_log_level, parse_origins};
use otsched_core::errors::OtError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

use crate::test_utils::test_config;

#[rstest]
#[case("debug", Level::DEBUG)]
#[case("WARN", Level::WARN)]
#[case(" error ", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] raw: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(raw), expected);
}

#[test]
fn test_parse_origins_skips_blanks() {
    let origins = parse_origins("http://localhost:3000, https://ot.example.org,,");

    assert_eq!(
        origins,
        vec![
            "http://localhost:3000".to_string(),
            "https://ot.example.org".to_string()
        ]
    );
}

#[test]
fn test_server_addr() {
    let mut config = test_config();
    config.port = 8001;

    assert_eq!(config.server_addr(), "127.0.0.1:8001");
}

#[test]
fn test_default_operating_day() {
    let day = test_config().operating_day().unwrap();

    assert_eq!(day.opens, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(day.closes, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    assert_eq!(day.slot_minutes, 120);
    assert_eq!(day.step_minutes, 60);
}

#[test]
fn test_inverted_operating_day_is_rejected() {
    let mut config = test_config();
    config.day_start = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
    config.day_end = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

    assert!(matches!(config.operating_day(), Err(OtError::Validation(_))));
}
