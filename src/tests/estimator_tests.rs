use crate::forecast::calculator::{days_until_full, determine_trend};
use crate::forecast::estimator::{daily_series, estimate, EstimateDetail};
use crate::forecast::status::classify;
use crate::forecast::{DaysUntilFull, Method, Sample, Status, Thresholds, Trend};

const DAY: i64 = 86_400;
const GIB: f64 = 1_073_741_824.0;
/// 2024-01-01T00:00:00Z, a Monday.
const MONDAY: i64 = 1_704_067_200;

fn daily(values: &[f64]) -> Vec<Sample> {
    daily_from(MONDAY, values)
}

fn daily_from(start: i64, values: &[f64]) -> Vec<Sample> {
    values.iter().enumerate().map(|(i, v)| Sample::new(start + i as i64 * DAY, *v)).collect()
}

#[test]
fn test_short_history_is_insufficient_for_every_method() {
    let one = daily(&[5.0 * GIB]);
    for method in Method::ALL {
        let est = estimate(&one, 30, method);
        assert!(est.insufficient_data, "{method}");
        assert!(est.daily_growth_bytes.abs() < f64::EPSILON, "{method}");
        assert_eq!(est.confidence, 0, "{method}");
        assert_eq!(est.trend, Trend::Stable, "{method}");
    }
}

#[test]
fn test_method_minimum_samples() {
    let six = daily(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert!(estimate(&six, 30, Method::Seasonal).insufficient_data);
    assert!(estimate(&six, 30, Method::HoltWinters).insufficient_data);
    assert!(estimate(&six, 30, Method::Arima).insufficient_data);
    assert!(!estimate(&six, 30, Method::Simple).insufficient_data);
}

#[test]
fn test_simple_slope_per_day() {
    let samples = vec![Sample::new(0, 0.0), Sample::new(10 * DAY, 10.0 * GIB)];
    let est = estimate(&samples, 30, Method::Simple);
    assert!((est.daily_growth_bytes - GIB).abs() < 1.0);
    assert_eq!(est.confidence, 7);
}

#[test]
fn test_simple_span_is_at_least_one_day() {
    let samples = vec![Sample::new(0, 0.0), Sample::new(3600, 500.0)];
    let est = estimate(&samples, 7, Method::Simple);
    assert!((est.daily_growth_bytes - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_simple_glitch_is_zeroed() {
    let samples = vec![Sample::new(0, 0.0), Sample::new(DAY, 100.0 * GIB)];
    let est = estimate(&samples, 30, Method::Simple);
    assert!(est.daily_growth_bytes.abs() < f64::EPSILON);
    assert_eq!(est.trend, Trend::Stable);
}

#[test]
fn test_seasonal_linear_growth() {
    let g = GIB;
    let values: Vec<f64> = (0..14).map(|i| f64::from(i) * g).collect();
    let est = estimate(&daily(&values), 30, Method::Seasonal);

    assert!((est.daily_growth_bytes - 7.0 * g / 13.0).abs() < 1.0);
    assert_eq!(est.confidence, 47);
    match est.detail {
        Some(EstimateDetail::Seasonal { weekday_means }) => {
            assert!(weekday_means.iter().all(Option::is_some));
            assert_eq!(weekday_means[0], Some(3.5 * g));
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[test]
fn test_arima_mean_difference() {
    let values: Vec<f64> = (0..10).map(|i| 1000.0 + f64::from(i) * 250.0).collect();
    let est = estimate(&daily(&values), 30, Method::Arima);
    assert!((est.daily_growth_bytes - 250.0).abs() < 1e-9);
    assert_eq!(est.confidence, 33);
}

#[test]
fn test_arima_shrinking_reads_as_zero() {
    let values: Vec<f64> = (0..10).map(|i| 10_000.0 - f64::from(i) * 250.0).collect();
    let est = estimate(&daily(&values), 30, Method::Arima);
    assert!(est.daily_growth_bytes.abs() < f64::EPSILON);
}

#[test]
fn test_seasonal_removes_weekday_spike() {
    let smooth: Vec<f64> = (0..14).map(|d| 1000.0 + 100.0 * f64::from(d)).collect();
    let spiky: Vec<f64> =
        smooth.iter().enumerate().map(|(d, v)| if d % 7 == 6 { v + 5000.0 } else { *v }).collect();

    let plain = estimate(&daily(&smooth), 30, Method::Seasonal);
    let est = estimate(&daily(&spiky), 30, Method::Seasonal);

    assert!((est.daily_growth_bytes - 700.0 / 13.0).abs() < 1e-9);
    assert!((est.daily_growth_bytes - plain.daily_growth_bytes).abs() < 1e-9);
    match est.detail {
        Some(EstimateDetail::Seasonal { weekday_means }) => {
            assert_eq!(weekday_means[6], Some(6950.0));
            assert_eq!(weekday_means[0], Some(1350.0));
        }
        other => panic!("unexpected detail {other:?}"),
    }
}

#[test]
fn test_daily_series_keeps_last_sample_per_day() {
    let samples = vec![
        Sample::new(MONDAY + 3600, 1.0),
        Sample::new(MONDAY + 7200, 2.0),
        Sample::new(MONDAY + DAY + 10, 5.0),
        Sample::new(MONDAY + 3 * DAY + 60, 9.0),
    ];
    assert_eq!(
        daily_series(&samples),
        vec![
            Sample::new(MONDAY, 2.0),
            Sample::new(MONDAY + DAY, 5.0),
            Sample::new(MONDAY + 3 * DAY, 9.0),
        ]
    );
}

#[test]
fn test_hourly_samples_yield_daily_rates() {
    let base = 50.0 * GIB;
    let hourly: Vec<Sample> = (0..21 * 24)
        .map(|h| Sample::new(MONDAY + i64::from(h) * 3600, base + GIB * f64::from(h) / 24.0))
        .collect();
    let day_ends: Vec<f64> = (0..21).map(|d| base + GIB * f64::from(d * 24 + 23) / 24.0).collect();
    let per_day = daily(&day_ends);

    for method in [Method::Seasonal, Method::HoltWinters, Method::Arima] {
        assert_eq!(estimate(&hourly, 30, method), estimate(&per_day, 30, method), "{method}");
    }

    let arima = estimate(&hourly, 30, Method::Arima);
    assert!((arima.daily_growth_bytes - GIB).abs() < 1.0);
    assert_eq!(arima.confidence, 70);

    let seasonal = estimate(&hourly, 30, Method::Seasonal);
    assert!((seasonal.daily_growth_bytes - 0.7 * GIB).abs() < 1.0);

    let simple = estimate(&hourly, 30, Method::Simple);
    assert!((simple.daily_growth_bytes - GIB).abs() < 1.0);
}

#[test]
fn test_arima_scales_differences_across_gaps() {
    let values: Vec<f64> = (0..10).map(|i| f64::from(i) * 200.0).collect();
    let every_other_day: Vec<Sample> =
        values.iter().enumerate().map(|(i, v)| Sample::new(MONDAY + 2 * i as i64 * DAY, *v)).collect();
    let est = estimate(&every_other_day, 30, Method::Arima);
    assert!((est.daily_growth_bytes - 100.0).abs() < 1e-9);
}

#[test]
fn test_holt_winters_update_equations() {
    // Starts on a Wednesday with a Wednesday spike; the forecast uses the
    // next day's (Wednesday) factor.
    let values = [
        150.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0, 164.0, 116.0, 118.0, 120.0, 122.0, 124.0,
        126.0,
    ];
    let est = estimate(&daily_from(MONDAY + 2 * DAY, &values), 30, Method::HoltWinters);

    let Some(EstimateDetail::HoltWinters { level, trend, forecast }) = est.detail else {
        panic!("missing holt-winters detail");
    };
    assert!((level - 170.148_088_379_941_67).abs() < 1e-9);
    assert!((trend - 1.345_595_837_183_374_3).abs() < 1e-9);
    assert!((forecast - 173.673_500_177_342_7).abs() < 1e-9);
    assert!((est.daily_growth_bytes - (forecast - 126.0)).abs() < 1e-9);
}

#[test]
fn test_holt_winters_constant_series() {
    let est = estimate(&daily(&[100.0; 14]), 30, Method::HoltWinters);
    assert!(est.daily_growth_bytes.abs() < 1e-9);
    assert_eq!(est.confidence, 100);
}

#[test]
fn test_holt_winters_growing_series_is_non_negative() {
    let values: Vec<f64> = (0..21).map(|i| 50.0 * GIB + f64::from(i) * 0.5 * GIB).collect();
    let est = estimate(&daily(&values), 30, Method::HoltWinters);
    assert!(est.daily_growth_bytes >= 0.0);
    assert!(est.confidence > 50);
}

#[test]
fn test_ensemble_constant_series() {
    let est = estimate(&daily(&[100.0; 14]), 14, Method::Ensemble);
    assert!(est.daily_growth_bytes.abs() < 1e-9);
    assert_eq!(est.confidence, 100);
}

#[test]
fn test_ensemble_drops_low_confidence_members() {
    let est = estimate(&daily(&[100.0; 14]), 365, Method::Ensemble);
    let Some(EstimateDetail::Ensemble { components }) = est.detail else {
        panic!("missing ensemble detail");
    };
    let included: Vec<Method> =
        components.iter().filter(|c| c.included).map(|c| c.algorithm).collect();
    assert_eq!(included, vec![Method::HoltWinters]);
    assert_eq!(est.confidence, 100);
}

#[test]
fn test_ensemble_with_no_confident_member() {
    let values: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 1.0 } else { 1000.0 }).collect();
    let est = estimate(&daily(&values), 365, Method::Ensemble);
    assert!(est.daily_growth_bytes.abs() < f64::EPSILON);
    assert_eq!(est.confidence, 0);
    assert!(!est.insufficient_data);
}

#[test]
fn test_method_parsing() {
    assert_eq!("holt_winters".parse::<Method>().unwrap(), Method::HoltWinters);
    assert_eq!(" ensemble ".parse::<Method>().unwrap(), Method::Ensemble);
    assert!("linear".parse::<Method>().is_err());
    assert!("Ensemble".parse::<Method>().is_err());
}

#[test]
fn test_trend_thresholds() {
    assert_eq!(determine_trend(2.0 * GIB), Trend::RapidIncrease);
    assert_eq!(determine_trend(GIB), Trend::Increasing);
    assert_eq!(determine_trend(104_857_600.0), Trend::SlowIncrease);
    assert_eq!(determine_trend(1.0), Trend::SlowIncrease);
    assert_eq!(determine_trend(0.0), Trend::Stable);
    assert_eq!(determine_trend(-1000.0), Trend::Stable);
    assert_eq!(determine_trend(-200_000_000.0), Trend::Decreasing);
}

#[test]
fn test_days_until_full() {
    let d = days_until_full(100.0, 90.0, 1.0);
    assert_eq!(d, DaysUntilFull::Finite(10.0));
    assert_eq!(d.label(), "10 days");

    assert_eq!(days_until_full(100.0, 90.0, 0.0), DaysUntilFull::NoGrowth);
    assert_eq!(days_until_full(100.0, 90.0, -4.0), DaysUntilFull::NoGrowth);
    assert_eq!(days_until_full(100.0, 120.0, 1.0), DaysUntilFull::AlreadyFull);
    assert_eq!(days_until_full(100.0, 99.0, 50.0), DaysUntilFull::NoGrowth);
    assert_eq!(days_until_full(1e12, 0.0, 1.0), DaysUntilFull::Infinite);
}

#[test]
fn test_classify_usage_then_days() {
    let t = Thresholds::default();
    let ten = DaysUntilFull::Finite(10.0);
    assert_eq!(classify(90.0, &ten, &t), Status::Critical);
    assert_eq!(classify(50.0, &ten, &t), Status::Critical);
    assert_eq!(classify(85.0, &DaysUntilFull::NoGrowth, &t), Status::Warning);
    assert_eq!(classify(50.0, &DaysUntilFull::Finite(20.0), &t), Status::Warning);
    assert_eq!(classify(50.0, &DaysUntilFull::Finite(45.0), &t), Status::Ok);
}

#[test]
fn test_thresholds_range_checked() {
    assert!(Thresholds::new(80.0, 90.0).is_ok());
    assert!(Thresholds::new(-1.0, 90.0).is_err());
    assert!(Thresholds::new(80.0, 120.0).is_err());
}
