//! Free-text duration normalization.

use std::sync::LazyLock;

use regex::Regex;

static MINUTES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(min|minutes)").expect("valid minutes regex"));

static HOURS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*h(?:\s*(\d+)\s*m)?").expect("valid hours regex")
});

/// Converts a duration cell such as `45 min`, `1h30m` or `1:15` into minutes.
///
/// Forms are tried in order: `<N> min(utes)`, `<N>h[<M>m]`, then `H:M` or
/// `H:M:S` (seconds of 30 or more round the minute up). Returns `None` for
/// `-`, `n/a`, `na`, empty input, and anything else it does not recognize.
#[must_use]
pub fn duration_to_minutes(value: &str) -> Option<u32> {
    let text = value.trim().to_lowercase();
    if text.is_empty() || matches!(text.as_str(), "-" | "n/a" | "na") {
        return None;
    }

    if let Some(caps) = MINUTES_PATTERN.captures(&text) {
        return caps[1].parse().ok();
    }

    if let Some(caps) = HOURS_PATTERN.captures(&text) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        return hours.checked_mul(60)?.checked_add(minutes);
    }

    if text.contains(':') {
        return parse_clock(&text);
    }

    None
}

fn parse_clock(text: &str) -> Option<u32> {
    let parts = text
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [hours, minutes] => hours.checked_mul(60)?.checked_add(*minutes),
        [hours, minutes, seconds] => {
            let round_up = u32::from(*seconds >= 30);
            hours
                .checked_mul(60)?
                .checked_add(*minutes)?
                .checked_add(round_up)
        }
        _ => None,
    }
}
