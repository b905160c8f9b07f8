//! Subtitle parsing errors and warnings.

use std::fmt;
use std::path::PathBuf;

use super::timestamp::TimestampError;

/// What went wrong on a skipped line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WarningKind {
    #[error("expected sequence identifier, not '{0}'")]
    ExpectedSequence(String),

    #[error("malformed timestamp line: {0}")]
    MalformedTimestamp(TimestampError),

    #[error("cue {sequence} already has timing, ignoring '{line}'")]
    DuplicateTiming { sequence: u64, line: String },

    #[error("cue {0} has no timestamp line and was dropped")]
    MissingTiming(u64),
}

/// A recoverable problem found while parsing. The line is skipped and
/// parsing continues.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// 1-based line number in the source text
    pub line: usize,
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// Errors surfaced to the caller when a caption source can't be used.
#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    #[error("Failed to parse subtitles: no cues found ({} warning(s))", .warnings.len())]
    NoCues { warnings: Vec<ParseWarning> },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
