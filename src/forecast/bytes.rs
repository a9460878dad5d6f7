use super::types::round_to;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count as a human-readable string using base-1024 units:
/// `1536.0` -> `"1.5 KB"`.
///
/// Negative and NaN inputs render as `"0 B"`. The value is rounded to
/// `precision` decimals and printed without trailing zeros.
pub(crate) fn format_bytes_with(bytes: f64, precision: u32) -> String {
    let bytes = if bytes.is_nan() || bytes <= 0.0 { 0.0 } else { bytes };

    // Integer walk instead of log(bytes)/log(1024), which lands just below
    // whole powers (2.9999… for 1 GiB).
    let mut power = 0;
    let mut scaled = bytes;
    while scaled >= 1024.0 && power < UNITS.len() - 1 {
        scaled /= 1024.0;
        power += 1;
    }

    let value = round_to(bytes / 1024_f64.powi(power as i32), precision);
    format!("{value} {}", UNITS[power])
}

/// [`format_bytes_with`] at the default two-decimal precision.
pub(crate) fn format_bytes(bytes: f64) -> String {
    format_bytes_with(bytes, 2)
}

/// Per-day growth rate: `"12.5 MB/day"`.
pub(crate) fn format_rate(bytes_per_day: f64) -> String {
    format!("{}/day", format_bytes(bytes_per_day))
}
