pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1).
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Median of an already sorted slice; mean of the two middle values for
/// even lengths.
pub(crate) fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let count = sorted.len();
    if count == 0 {
        return None;
    }
    let middle = (count - 1) / 2;
    if count % 2 == 1 {
        Some(sorted[middle])
    } else {
        Some((sorted[middle] + sorted[middle + 1]) / 2.0)
    }
}

/// Dispersion-based confidence for smoothing models:
/// `100 - min(100, cv * 100)` where cv is the coefficient of variation of the
/// observed values.
pub(crate) fn model_confidence(actual: &[f64]) -> u8 {
    if actual.len() < 2 {
        return 0;
    }
    let m = mean(actual);
    if m == 0.0 || !m.is_finite() {
        return 0;
    }
    let cv_pct = (std_dev(actual) / m.abs()) * 100.0;
    (100.0 - cv_pct.min(100.0)).clamp(0.0, 100.0).round() as u8
}

/// Sample coverage over the analysis window: `min(100, count / window * 100)`.
pub(crate) fn coverage_confidence(sample_count: usize, window_days: u32) -> u8 {
    let window = f64::from(window_days.max(1));
    ((sample_count as f64 / window) * 100.0).min(100.0).round() as u8
}
