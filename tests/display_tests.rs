//! Tests for display and formatting utilities.

use minion_calc::display::{format_time, reduced_number};

#[test]
fn test_format_time_seconds() {
    assert_eq!(format_time(0.0), "0s");
    assert_eq!(format_time(30.0), "30s");
    assert_eq!(format_time(59.0), "59s");
}

#[test]
fn test_format_time_minutes() {
    assert_eq!(format_time(60.0), "1m 0s");
    assert_eq!(format_time(90.0), "1m 30s");
    assert_eq!(format_time(3599.0), "59m 59s");
}

#[test]
fn test_format_time_hours() {
    assert_eq!(format_time(3600.0), "1h 0m 0s");
    assert_eq!(format_time(7265.0), "2h 1m 5s");
}

#[test]
fn test_format_time_days() {
    assert_eq!(format_time(86400.0), "1d 0h 0m 0s");
    assert_eq!(format_time(90061.0), "1d 1h 1m 1s");
}

#[test]
fn test_reduced_number_suffixes() {
    assert_eq!(reduced_number(999.0, 2), "999");
    assert_eq!(reduced_number(1000.0, 2), "1k");
    assert_eq!(reduced_number(1_000_000.0, 2), "1M");
    assert_eq!(reduced_number(12_345_678_900.0, 2), "12.35B");
    assert_eq!(reduced_number(2.5e12, 1), "2.5T");
}

#[test]
fn test_reduced_number_beyond_last_suffix() {
    // stays at the largest suffix
    assert_eq!(reduced_number(1e18, 2), "1000Qd");
}

#[test]
fn test_reduced_number_small_values() {
    assert_eq!(reduced_number(0.5, 2), "0.5");
    assert_eq!(reduced_number(-0.5, 2), "-0.5");
    assert_eq!(reduced_number(0.00123, 2), "0.0012");
}

#[test]
fn test_reduced_number_non_finite() {
    assert_eq!(reduced_number(f64::INFINITY, 2), "inf");
    assert_eq!(reduced_number(f64::NAN, 2), "NaN");
}
