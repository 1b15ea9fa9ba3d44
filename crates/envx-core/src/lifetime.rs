//! Session lifetime parsing and wire formatting
//!
//! Lifetimes use the `HhMmSs` form (`2h`, `1h30m`, `15m`, `90s`). Each unit
//! may appear at most once, in hour-minute-second order.

use std::time::Duration;

use crate::errors::{EnvxError, Result};

/// Lifetime requested when none is given
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(2 * 60 * 60);

/// Parse a lifetime such as `1h30m`
///
/// # Errors
///
/// Returns `EnvxError::InvalidLifetime` for malformed or zero durations.
pub fn parse_lifetime(input: &str) -> Result<Duration> {
    let invalid = |reason: &str| EnvxError::InvalidLifetime {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("lifetime is empty"));
    }

    let units = [('h', 3600u64), ('m', 60), ('s', 1)];
    let mut next_unit = 0;
    let mut total: u64 = 0;
    let mut rest = text;

    while !rest.is_empty() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(invalid("expected a number"));
        }
        let amount: u64 = rest[..digits]
            .parse()
            .map_err(|_| invalid("number out of range"))?;
        let unit = rest[digits..]
            .chars()
            .next()
            .ok_or_else(|| invalid("missing unit (h, m or s)"))?;

        let position = units[next_unit..]
            .iter()
            .position(|(u, _)| *u == unit)
            .ok_or_else(|| invalid("units must be h, m, s, each at most once and in that order"))?;
        let (_, scale) = units[next_unit + position];
        next_unit += position + 1;

        total = amount
            .checked_mul(scale)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| invalid("lifetime is too long"))?;
        rest = &rest[digits + unit.len_utf8()..];
    }

    if total == 0 {
        return Err(invalid("lifetime must be greater than zero"));
    }
    Ok(Duration::from_secs(total))
}

/// Render a duration the way the service expects it (`2h0m0s`, `15m0s`, `45s`)
///
/// Sub-second precision is dropped.
pub fn format_lifetime(lifetime: Duration) -> String {
    let secs = lifetime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
