//! Formatting utilities used for CLI outputs.

/// `7.50h`, or `+1.25h` / `-3.00h` with `want_sign`.
pub fn fmt_hours(hours: f64, want_sign: bool) -> String {
    let h = if hours.abs() < 0.005 { 0.0 } else { hours };
    if want_sign && h > 0.0 {
        format!("+{:.2}h", h)
    } else {
        format!("{:.2}h", h)
    }
}

/// `1d`, `0.5d`.
pub fn fmt_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{:.0}d", days)
    } else {
        format!("{}d", days)
    }
}

pub fn or_dash(s: Option<&str>) -> String {
    match s {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
