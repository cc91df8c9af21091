use chrono::{DateTime, Duration, Utc};

/// Window length used when `days` is missing, non-numeric or zero.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Lenient parse of the `days` query value.
///
/// Leading whitespace is skipped, an optional sign is honoured and the
/// leading run of digits is used (`"7abc"` → 7). Anything that yields no
/// digits, zero, or a value outside `i64` falls back to
/// [`DEFAULT_WINDOW_DAYS`]. Negative values are returned as-is.
pub fn parse_days(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_WINDOW_DAYS;
    };

    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return DEFAULT_WINDOW_DAYS;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };

    match parsed {
        Ok(0) | Err(_) => DEFAULT_WINDOW_DAYS,
        Ok(days) => days,
    }
}

/// `now` minus `days` whole days. `None` if the result is not representable.
pub fn window_start(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    let span = Duration::try_days(days)?;
    now.checked_sub_signed(span)
}
