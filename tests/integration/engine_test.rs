//! Integration tests driving the cue engine over parsed fixtures

use subfollow::player::playback::{
    Clock, CueEngine, EngineError, ManualClock, ManualScheduler, TransportPhase,
};
use subfollow::preferences::{
    store_speed, FilePreferences, PreferenceStore, StoredSpeed,
};
use subfollow::subtitle::parse;
use tempfile::TempDir;

use super::helpers::load_fixture;

const EPS: f64 = 1e-9;

fn engine_for(fixture: &str) -> (CueEngine, ManualClock, ManualScheduler) {
    let clock = ManualClock::new();
    let scheduler = ManualScheduler::new();
    let mut engine = CueEngine::new(clock.clone(), scheduler.clone());
    engine.load(parse(&load_fixture(fixture)).cues);
    (engine, clock, scheduler)
}

/// Fire scheduled ticks every 50ms of wall time until `until` or the end.
fn run_ticks(
    engine: &mut CueEngine,
    clock: &ManualClock,
    scheduler: &ManualScheduler,
    until: f64,
) -> Vec<usize> {
    let mut indices = Vec::new();
    while engine.is_playing() && clock_now(clock) < until {
        clock.advance(0.05);
        scheduler.fire();
        if let Some(report) = engine.poll_tick() {
            indices.push(report.unwrap().index);
        }
    }
    indices
}

fn clock_now(clock: &ManualClock) -> f64 {
    clock.now()
}

#[test]
fn two_cue_walkthrough() {
    let (mut engine, clock, _) = engine_for("two_cues.srt");
    assert_eq!(engine.phase(), TransportPhase::Paused);

    engine.start().unwrap();
    clock.set(2.0);
    let report = engine.tick().unwrap();
    assert_eq!(report.index, 0);
    assert!((report.total_time - 2.0).abs() < EPS);

    clock.set(3.5);
    let report = engine.tick().unwrap();
    assert_eq!(report.index, 1);
    assert!(report.ended);
    assert_eq!(engine.phase(), TransportPhase::Paused);
}

#[test]
fn full_song_plays_in_order_and_stops_at_last_cue() {
    let (mut engine, clock, scheduler) = engine_for("song.srt");
    engine.start().unwrap();

    let indices = run_ticks(&mut engine, &clock, &scheduler, 120.0);

    assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(indices.last(), Some(&5));
    assert_eq!(engine.current_index(), Some(5));
    assert!(!engine.is_playing());
    // Stopped shortly after the final cue's start
    assert!(clock_now(&clock) < 65.2);
}

#[test]
fn pause_in_the_middle_resumes_where_it_left_off() {
    let (mut engine, clock, scheduler) = engine_for("song.srt");
    engine.start().unwrap();
    run_ticks(&mut engine, &clock, &scheduler, 7.0);
    assert_eq!(engine.current_index(), Some(2));

    engine.pause();
    let paused_at = engine.position();
    clock.advance(30.0);
    assert_eq!(engine.position(), paused_at);

    engine.start().unwrap();
    clock.advance(0.05);
    let report = engine.tick().unwrap();
    assert_eq!(report.index, 2);
    assert!((report.total_time - paused_at - 0.05).abs() < 1e-6);
}

#[test]
fn seek_then_play_from_clicked_cue() {
    let (mut engine, clock, _) = engine_for("song.srt");
    clock.set(100.0);
    engine.seek(4).unwrap();
    engine.start().unwrap();

    clock.advance(1.0);
    let report = engine.tick().unwrap();
    assert_eq!(report.index, 4);
    assert!((report.total_time - 13.0).abs() < EPS);
    assert_eq!(report.timestamp, "00:00:13");
}

#[test]
fn stored_speed_file_drives_the_clock() {
    let dir = TempDir::new().unwrap();
    let prefs = FilePreferences::open(dir.path().join("prefs.toml"))
        .unwrap()
        .shared();

    let clock = ManualClock::new();
    let mut engine = CueEngine::new(clock.clone(), ManualScheduler::new())
        .with_speed_source(StoredSpeed::new(prefs.clone(), 1.0));
    engine.load(parse(&load_fixture("song.srt")).cues);

    store_speed(&mut *prefs.borrow_mut(), 2.0, chrono::Duration::days(1)).unwrap();
    engine.start().unwrap();
    clock.set(2.0);
    let report = engine.tick().unwrap();
    assert!((report.total_time - 4.0).abs() < EPS);
    assert_eq!(report.index, 1);

    // The value was written through to disk
    let reopened = FilePreferences::open(dir.path().join("prefs.toml")).unwrap();
    assert_eq!(reopened.get("playback_speed").as_deref(), Some("2"));
}

#[test]
fn reload_replaces_list_and_resets() {
    let (mut engine, clock, scheduler) = engine_for("song.srt");
    engine.start().unwrap();
    run_ticks(&mut engine, &clock, &scheduler, 10.0);

    engine.load(parse(&load_fixture("two_cues.srt")).cues);
    assert_eq!(engine.cues().len(), 2);
    assert_eq!(engine.current_index(), Some(0));
    assert!(scheduler.snapshot().interval.is_none());
    assert_eq!(engine.tick(), Err(EngineError::NotPlaying));
}
