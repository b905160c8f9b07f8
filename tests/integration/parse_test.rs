//! Integration tests for subtitle parsing against fixture files

use subfollow::subtitle::{
    format_hms, load_source, parse, parse_timestamp, SubtitleError, WarningKind,
};

use super::helpers::{fixture_path, load_fixture, temp_fixture};

#[test]
fn two_cue_fixture_parses() {
    let outcome = parse(&load_fixture("two_cues.srt"));

    assert!(outcome.warnings.is_empty());
    let starts: Vec<f64> = outcome.cues.iter().map(|c| c.start_seconds).collect();
    assert_eq!(starts, vec![1.0, 3.0]);
    assert_eq!(outcome.cues[0].text, "Hello");
    assert_eq!(outcome.cues[1].text, "World");
}

#[test]
fn multi_line_text_is_joined() {
    let outcome = parse(&load_fixture("song.srt"));

    assert_eq!(outcome.cues.len(), 6);
    assert_eq!(outcome.cues[1].text, "Second line\ncontinues here");
    assert_eq!(outcome.cues[1].end_seconds, 6.25);
    assert_eq!(outcome.cues[5].start_seconds, 65.0);
}

#[test]
fn malformed_lines_become_warnings() {
    let outcome = parse(&load_fixture("malformed.srt"));

    let sequences: Vec<u64> = outcome.cues.iter().map(|c| c.sequence).collect();
    assert_eq!(sequences, vec![1, 3]);
    assert_eq!(outcome.cues[1].start_seconds, 5.0);
    assert_eq!(outcome.cues[1].end_seconds, 6.5);

    let lines: Vec<usize> = outcome.warnings.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![1, 8, 11]);
    assert!(matches!(
        outcome.warnings[0].kind,
        WarningKind::ExpectedSequence(_)
    ));
    assert!(matches!(
        outcome.warnings[1].kind,
        WarningKind::MalformedTimestamp(_)
    ));
    assert_eq!(outcome.warnings[2].kind, WarningKind::MissingTiming(2));
}

#[test]
fn file_without_cues_is_a_failure() {
    let outcome = parse(&load_fixture("no_cues.srt"));
    assert!(!outcome.is_ok());

    match outcome.into_result() {
        Err(SubtitleError::NoCues { warnings }) => assert_eq!(warnings.len(), 2),
        other => panic!("expected NoCues, got {:?}", other),
    }
}

#[test]
fn windows_line_endings_and_bom_are_tolerated() {
    let unix = load_fixture("song.srt");
    let windows = format!("\u{feff}{}", unix.replace('\n', "\r\n"));

    assert_eq!(parse(&windows), parse(&unix));
}

#[test]
fn parsing_is_deterministic() {
    let raw = load_fixture("malformed.srt");
    assert_eq!(parse(&raw), parse(&raw));
}

#[test]
fn load_source_reads_files() {
    let (_dir, path) = temp_fixture("two_cues.srt");
    let raw = load_source(&path).unwrap();
    assert!(raw.contains("Hello"));
}

#[test]
fn load_source_reports_missing_file() {
    let missing = fixture_path("does_not_exist.srt");
    let err = load_source(&missing).unwrap_err();
    assert!(matches!(err, SubtitleError::Read { .. }));
    assert!(err.to_string().contains("does_not_exist.srt"));
}

#[test]
fn fixture_timestamps_round_trip() {
    for line in load_fixture("song.srt").lines() {
        let Some((start, _)) = line.split_once(" --> ") else {
            continue;
        };
        let seconds = parse_timestamp(start).unwrap();
        assert_eq!(format_hms(seconds), start[..8]);
    }
}

#[test]
fn latin1_file_still_parses() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("latin1.srt");
    std::fs::write(
        &path,
        b"1\r\n00:00:01,000 --> 00:00:02,000\r\nd\xe9j\xe0 vu\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nencore\r\n",
    )
    .unwrap();

    let outcome = parse(&load_source(&path).unwrap());
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.cues.len(), 2);
    assert_eq!(outcome.cues[0].text, "d\u{fffd}j\u{fffd} vu");
    assert_eq!(outcome.cues[1].text, "encore");
}
