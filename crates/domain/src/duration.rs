/// Format seconds as `M:SS`. Negative values are shown as `0:00`.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parse either a bare number of seconds (`90`) or `M:SS` (`1:30`).
///
/// Any other input falls back to `fallback`, which is itself clamped to zero.
#[must_use]
pub fn parse_duration(text: Option<&str>, fallback: i64) -> u32 {
    let fallback = u32::try_from(fallback.max(0)).unwrap_or(u32::MAX);

    let Some(text) = text else {
        return fallback;
    };
    let text = text.trim();

    if is_digits(text) {
        return text.parse::<u32>().unwrap_or(fallback);
    }

    let Some((minutes, seconds)) = text.split_once(':') else {
        return fallback;
    };

    if !is_digits(minutes) || !is_digits(seconds) || seconds.len() > 2 {
        return fallback;
    }

    match (minutes.parse::<u32>(), seconds.parse::<u32>()) {
        (Ok(minutes), Ok(seconds)) => minutes.saturating_mul(60).saturating_add(seconds),
        _ => fallback,
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
