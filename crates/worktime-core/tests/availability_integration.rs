//! Integration tests for the availability calculator.

use proptest::prelude::*;
use worktime_core::{compute_availability, CalculationRequest, ValidationError};

#[test]
fn test_same_input_gives_identical_output() {
    let req = CalculationRequest::for_month(2025, 8)
        .with_vacation_days(3.0)
        .with_hours_per_day(8.0);
    let first = serde_json::to_string(&compute_availability(&req).unwrap()).unwrap();
    let second = serde_json::to_string(&compute_availability(&req).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_monthly_buffers_add_up_to_yearly_default() {
    for year in [2023, 2024, 2025, 2026] {
        let total: f64 = (1..=12)
            .map(|month| {
                compute_availability(&CalculationRequest::for_month(year, month))
                    .unwrap()
                    .buffer_days
            })
            .sum();
        // Each month is rounded to one decimal, so allow 12 * 0.05.
        assert!((total - 14.0).abs() <= 0.6, "{year}: monthly buffers sum to {total}");
    }
}

#[test]
fn test_monthly_working_days_add_up_to_year() {
    let yearly = compute_availability(&CalculationRequest::for_year(2025)).unwrap();
    let monthly: u32 = (1..=12)
        .map(|m| compute_availability(&CalculationRequest::for_month(2025, m)).unwrap().working_days)
        .sum();
    assert_eq!(monthly, yearly.working_days);
}

#[test]
fn test_full_year_without_buffer_or_vacation_keeps_every_working_day() {
    for year in [1900, 2000, 2024, 2100] {
        let req = CalculationRequest::for_year(year).with_buffer_days(0.0);
        let result = compute_availability(&req).unwrap();
        assert_eq!(result.available_working_days, f64::from(result.working_days));
    }
}

#[test]
fn test_vacation_exceeding_working_days_yields_zero() {
    let req = CalculationRequest::for_month(2025, 8).with_vacation_days(40.0);
    let result = compute_availability(&req).unwrap();
    assert_eq!(result.available_working_days, 0.0);
    assert_eq!(result.total_working_hours, 0);
}

#[test]
fn test_invalid_requests_are_rejected() {
    assert!(matches!(
        compute_availability(&CalculationRequest::for_year(1899)),
        Err(ValidationError::YearOutOfRange { .. })
    ));
    assert!(matches!(
        compute_availability(&CalculationRequest::for_month(2025, 13)),
        Err(ValidationError::MonthOutOfRange { month: 13 })
    ));
    assert!(matches!(
        compute_availability(&CalculationRequest::for_year(2101)),
        Err(ValidationError::YearOutOfRange { .. })
    ));
}

#[test]
fn test_result_serializes_with_snake_case_fields() {
    let result = compute_availability(&CalculationRequest::for_year(2025)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    for field in [
        "period",
        "total_days",
        "working_days",
        "weekend_days",
        "holiday_days",
        "vacation_days",
        "buffer_days",
        "available_working_days",
        "total_working_hours",
        "hours_per_day",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
}

proptest! {
    #[test]
    fn prop_day_counts_partition_the_year(year in 1900i32..=2100) {
        let result = compute_availability(&CalculationRequest::for_year(year)).unwrap();
        prop_assert_eq!(
            result.working_days + result.weekend_days + result.holiday_days,
            result.total_days
        );
        let expected_total = if chrono::NaiveDate::from_ymd_opt(year, 2, 29).is_some() { 366 } else { 365 };
        prop_assert_eq!(result.total_days, expected_total);
    }

    #[test]
    fn prop_day_counts_partition_each_month(year in 1900i32..=2100, month in 1u32..=12) {
        let result = compute_availability(&CalculationRequest::for_month(year, month)).unwrap();
        prop_assert_eq!(
            result.working_days + result.weekend_days + result.holiday_days,
            result.total_days
        );
    }

    #[test]
    fn prop_available_days_never_negative(
        year in 1900i32..=2100,
        month in proptest::option::of(1u32..=12),
        hours in 0.5f64..=24.0,
        vacation in 0.0f64..400.0,
    ) {
        let req = CalculationRequest {
            year,
            month,
            hours_per_day: hours,
            vacation_days: vacation,
            buffer_days: None,
        };
        let result = compute_availability(&req).unwrap();
        prop_assert!(result.available_working_days >= 0.0);
        prop_assert!(result.available_working_days <= f64::from(result.working_days));
        prop_assert!(f64::from(result.total_working_hours) <= f64::from(result.working_days) * hours + 0.5);
    }

    #[test]
    fn prop_hours_follow_reported_days(
        year in 1900i32..=2100,
        month in proptest::option::of(1u32..=12),
        hours in 0.5f64..=24.0,
        vacation in 0.0f64..30.0,
        buffer in proptest::option::of(0.0f64..20.0),
    ) {
        let req = CalculationRequest {
            year,
            month,
            hours_per_day: hours,
            vacation_days: vacation,
            buffer_days: buffer,
        };
        let result = compute_availability(&req).unwrap();
        prop_assert_eq!(
            f64::from(result.total_working_hours),
            (result.available_working_days * result.hours_per_day).round()
        );
    }
}

#[test]
fn test_hours_match_reported_days_for_august_2025() {
    let req = CalculationRequest::for_month(2025, 8).with_vacation_days(3.0);
    let result = compute_availability(&req).unwrap();
    assert_eq!(result.available_working_days, 16.8);
    assert_eq!(result.total_working_hours, 134);
}
