//! Timestamp parsing and formatting for subtitle cues.
//!
//! Cue timestamps use the `HH:MM:SS,mmm` form (a `.` is accepted in place
//! of the comma). Display timestamps drop the milliseconds: `HH:MM:SS`.

/// Separator between the start and end timestamp of a cue.
pub const ARROW: &str = "-->";

/// Errors produced when a timestamp string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("expected HH:MM:SS,mmm, got '{0}'")]
    Shape(String),

    #[error("'{field}' is not a number in '{input}'")]
    NotANumber { field: &'static str, input: String },

    #[error("missing end timestamp after '-->' in '{0}'")]
    MissingEnd(String),

    #[error("'{0}' is too large to be a timestamp")]
    OutOfRange(String),
}

/// Parse a single timestamp into seconds.
///
/// Accepts `HH:MM:SS,mmm`, `HH:MM:SS.mmm` and `HH:MM:SS` (zero milliseconds).
/// Fractions shorter than three digits are right-padded (`,5` is 500 ms),
/// longer ones are truncated.
///
/// # Examples
///
/// ```
/// use subfollow::subtitle::parse_timestamp;
///
/// assert_eq!(parse_timestamp("01:02:03,500").unwrap(), 3723.5);
/// assert_eq!(parse_timestamp("00:00:01").unwrap(), 1.0);
/// ```
pub fn parse_timestamp(input: &str) -> Result<f64, TimestampError> {
    let trimmed = input.trim();
    let mut parts = trimmed.split(':');
    let (Some(hours), Some(minutes), Some(rest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimestampError::Shape(trimmed.to_string()));
    };

    let (seconds, fraction) = match rest.split_once([',', '.']) {
        Some((secs, frac)) => (secs, Some(frac)),
        None => (rest, None),
    };

    let hours = parse_digits(hours, "hours", trimmed)?;
    let minutes = parse_digits(minutes, "minutes", trimmed)?;
    let seconds = parse_digits(seconds, "seconds", trimmed)?;
    let millis = match fraction {
        Some(frac) => parse_millis(frac, trimmed)?,
        None => 0,
    };

    let total_ms = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| TimestampError::OutOfRange(trimmed.to_string()))?;
    Ok(total_ms as f64 / 1000.0)
}

/// Parse a timing line into `(start, end)` seconds.
///
/// `start --> end` is the normal form. Position hints some encoders append
/// after the end timestamp are ignored. A line holding a single timestamp
/// yields `end == start`.
pub fn parse_timing_line(line: &str) -> Result<(f64, f64), TimestampError> {
    let line = line.trim();
    match line.split_once(ARROW) {
        Some((start, end)) => {
            let start = parse_timestamp(start)?;
            let end = end
                .split_whitespace()
                .next()
                .ok_or_else(|| TimestampError::MissingEnd(line.to_string()))?;
            Ok((start, parse_timestamp(end)?))
        }
        None => {
            let start = parse_timestamp(line)?;
            Ok((start, start))
        }
    }
}

/// Format seconds as `HH:MM:SS`, dropping the fractional part.
///
/// Hours are not wrapped at 24. Negative and non-finite inputs render as
/// `00:00:00`.
pub fn format_hms(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Format seconds as a full `HH:MM:SS,mmm` cue timestamp.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02},{:03}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1000,
        ms % 1000
    )
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

fn parse_digits(field: &str, name: &'static str, input: &str) -> Result<u64, TimestampError> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::NotANumber {
            field: name,
            input: input.to_string(),
        });
    }
    field.parse().map_err(|_| TimestampError::NotANumber {
        field: name,
        input: input.to_string(),
    })
}

fn parse_millis(fraction: &str, input: &str) -> Result<u64, TimestampError> {
    let fraction = fraction.trim();
    if fraction.is_empty() {
        return Ok(0);
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::NotANumber {
            field: "milliseconds",
            input: input.to_string(),
        });
    }
    // All ASCII digits, so byte slicing is safe
    let mut digits = fraction[..fraction.len().min(3)].to_string();
    while digits.len() < 3 {
        digits.push('0');
    }
    parse_digits(&digits, "milliseconds", input)
}
