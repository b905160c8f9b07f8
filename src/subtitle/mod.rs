//! Subtitle cue parsing
//!
//! Reads `.srt`-style caption text into an ordered list of [`Cue`]s:
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:03,000
//! Hello
//!
//! 2
//! 00:00:03,000 --> 00:00:05,000
//! World
//! ```
//!
//! Parsing is lenient. Lines that don't fit are reported as
//! [`ParseWarning`]s and skipped; only a source that yields no cue at all is
//! treated as a failure.

mod error;
mod source;
mod timestamp;

use serde::Serialize;

pub use error::{ParseWarning, SubtitleError, WarningKind};
pub use source::load_source;
pub use timestamp::{
    format_hms, format_srt_timestamp, parse_timestamp, parse_timing_line, TimestampError, ARROW,
};

/// One timed caption entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    /// Sequence number as written in the source (not validated)
    pub sequence: u64,
    /// Trimmed text lines joined with `\n`
    pub text: String,
    /// Start time in seconds
    pub start_seconds: f64,
    /// End time in seconds
    pub end_seconds: f64,
}

impl Cue {
    pub fn new(sequence: u64, start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            sequence,
            text: text.into(),
            start_seconds,
            end_seconds,
        }
    }

    /// Text on a single row, lines separated by ` / `.
    pub fn display_text(&self) -> String {
        self.text.lines().collect::<Vec<_>>().join(" / ")
    }

    /// Length of the cue in seconds (zero for inverted timings).
    pub fn duration(&self) -> f64 {
        (self.end_seconds - self.start_seconds).max(0.0)
    }
}

/// Result of a parse pass: the cues plus every skipped line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    pub cues: Vec<Cue>,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    /// Whether at least one cue was produced.
    pub fn is_ok(&self) -> bool {
        !self.cues.is_empty()
    }

    /// Turn an empty outcome into [`SubtitleError::NoCues`].
    pub fn into_result(self) -> Result<Vec<Cue>, SubtitleError> {
        if self.cues.is_empty() {
            Err(SubtitleError::NoCues {
                warnings: self.warnings,
            })
        } else {
            Ok(self.cues)
        }
    }
}

/// Cue being assembled while scanning.
struct PendingCue {
    sequence: u64,
    timing: Option<(f64, f64)>,
    lines: Vec<String>,
}

impl PendingCue {
    fn new(sequence: u64) -> Self {
        Self {
            sequence,
            timing: None,
            lines: Vec::new(),
        }
    }

    fn can_take_bare_timestamp(&self) -> bool {
        self.timing.is_none() && self.lines.is_empty()
    }
}

/// Line-by-line scanner state.
#[derive(Default)]
struct Scanner {
    pending: Option<PendingCue>,
    outcome: ParseOutcome,
}

impl Scanner {
    fn warn(&mut self, line: usize, kind: WarningKind) {
        let warning = ParseWarning { line, kind };
        tracing::warn!("{}", warning);
        self.outcome.warnings.push(warning);
    }

    fn flush(&mut self, line: usize) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.timing {
            Some((start, end)) => {
                let text = pending.lines.join("\n").trim().to_string();
                self.outcome
                    .cues
                    .push(Cue::new(pending.sequence, start, end, text));
            }
            None => self.warn(line, WarningKind::MissingTiming(pending.sequence)),
        }
    }

    fn scan_line(&mut self, number: usize, line: &str) {
        if let Some(sequence) = sequence_number(line) {
            self.flush(number);
            self.pending = Some(PendingCue::new(sequence));
            return;
        }

        if line.contains(ARROW) {
            self.scan_timing(number, line);
            return;
        }

        if line.is_empty() {
            return;
        }

        let Some(pending) = self.pending.as_mut() else {
            self.warn(number, WarningKind::ExpectedSequence(line.to_string()));
            return;
        };

        // Single timestamp without an arrow right after the header
        if pending.can_take_bare_timestamp() {
            if let Ok(timing) = parse_timing_line(line) {
                pending.timing = Some(timing);
                return;
            }
        }

        pending.lines.push(line.to_string());
    }

    fn scan_timing(&mut self, number: usize, line: &str) {
        let Some(pending) = self.pending.as_mut() else {
            self.warn(number, WarningKind::ExpectedSequence(line.to_string()));
            return;
        };

        if pending.timing.is_some() {
            let sequence = pending.sequence;
            self.warn(
                number,
                WarningKind::DuplicateTiming {
                    sequence,
                    line: line.to_string(),
                },
            );
            return;
        }

        match parse_timing_line(line) {
            Ok(timing) => pending.timing = Some(timing),
            Err(e) => self.warn(number, WarningKind::MalformedTimestamp(e)),
        }
    }
}

/// A line made only of ASCII digits starts a new cue.
fn sequence_number(line: &str) -> Option<u64> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    line.parse().ok()
}

/// Parse raw caption text into cues.
///
/// Never fails outright: check [`ParseOutcome::is_ok`] or use
/// [`ParseOutcome::into_result`]. Cues come out in source order.
///
/// # Examples
///
/// ```
/// use subfollow::subtitle::parse;
///
/// let outcome = parse("1\n00:00:01,000 --> 00:00:03,000\nHello\n");
/// assert!(outcome.is_ok());
/// assert_eq!(outcome.cues[0].text, "Hello");
/// ```
pub fn parse(raw: &str) -> ParseOutcome {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut scanner = Scanner::default();
    let mut last_line = 0;

    for (idx, line) in raw.split('\n').enumerate() {
        last_line = idx + 1;
        scanner.scan_line(last_line, line.trim());
    }
    scanner.flush(last_line);

    tracing::debug!(
        cues = scanner.outcome.cues.len(),
        warnings = scanner.outcome.warnings.len(),
        "parsed subtitles"
    );
    scanner.outcome
}
