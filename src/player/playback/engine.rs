//! Playback clock and cursor engine.
//!
//! Owns the transport state (play/pause, speed, anchor) and the index of the
//! active cue. The logical playback position is
//!
//! ```text
//! position = anchor_position + (now - anchor_wall_time) * speed_factor
//! ```
//!
//! and every operation that needs "where are we" goes through that one
//! formula, so pause, resume and speed changes agree with what ticks report.

use std::time::Duration;

use crate::idle::{IdleInhibitor, NoopInhibitor};
use crate::preferences::{FixedSpeed, SpeedSource};
use crate::subtitle::{format_hms, Cue};

use super::clock::Clock;
use super::resolve::find_cue_index_at_time;
use super::scheduler::TickScheduler;

/// Transport state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPhase {
    /// No cues loaded
    Idle,
    /// Cues loaded, clock stopped
    Paused,
    /// Clock running, ticks scheduled
    Playing,
}

/// Mutable transport data owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    pub phase: TransportPhase,
    /// Speed in effect for the current anchor
    pub speed_factor: f64,
    /// Wall time the current anchor was taken at
    pub anchor_wall_time: f64,
    /// Logical position (cue time) at `anchor_wall_time`
    pub anchor_position: f64,
    /// Logical position the next `start()` resumes from
    pub paused_offset_seconds: f64,
    /// Active cue, `None` only when no cues are loaded
    pub current_index: Option<usize>,
    /// Wall time of the last tick (speed changes fold in from here)
    pub last_tick_wall_time: f64,
}

impl TransportState {
    fn for_list(len: usize, speed_factor: f64) -> Self {
        let (phase, current_index) = if len == 0 {
            (TransportPhase::Idle, None)
        } else {
            (TransportPhase::Paused, Some(0))
        };
        Self {
            phase,
            speed_factor,
            anchor_wall_time: 0.0,
            anchor_position: 0.0,
            paused_offset_seconds: 0.0,
            current_index,
            last_tick_wall_time: 0.0,
        }
    }

    fn position_at(&self, now: f64) -> f64 {
        let elapsed = (now - self.anchor_wall_time).max(0.0);
        self.anchor_position + elapsed * self.speed_factor
    }
}

/// Rejected transport operations. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("No lyrics loaded.")]
    NothingLoaded,

    #[error("Playback is not running")]
    NotPlaying,

    #[error("Cue {index} is out of range ({len} cues loaded)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What one tick observed.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Active cue after the tick
    pub index: usize,
    /// Logical playback position in seconds
    pub total_time: f64,
    /// `total_time` as `HH:MM:SS`
    pub timestamp: String,
    /// The active cue advanced during this tick
    pub cue_changed: bool,
    /// The final cue is active and playback stopped
    pub ended: bool,
}

/// Read-only view for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub phase: TransportPhase,
    pub index: Option<usize>,
    pub position: f64,
    pub timestamp: String,
    pub speed_factor: f64,
    pub cue_count: usize,
}

/// The playback clock and cursor over a cue list.
///
/// # Usage
///
/// ```
/// use subfollow::player::playback::{CueEngine, ManualClock, ManualScheduler};
/// use subfollow::subtitle::parse;
///
/// let clock = ManualClock::new();
/// let mut engine = CueEngine::new(clock.clone(), ManualScheduler::new());
/// engine.load(parse("1\n00:00:01,000 --> 00:00:02,000\nHi\n").cues);
///
/// engine.start().unwrap();
/// clock.advance(1.5);
/// let report = engine.tick().unwrap();
/// assert_eq!(report.index, 0);
/// assert_eq!(report.timestamp, "00:00:01");
/// ```
pub struct CueEngine {
    cues: Vec<Cue>,
    transport: TransportState,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn TickScheduler>,
    speed: Box<dyn SpeedSource>,
    idle: Box<dyn IdleInhibitor>,
    tick_interval: Duration,
}

impl CueEngine {
    /// Tick cadence used unless configured otherwise.
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

    /// Create an engine with no cues, normal speed and no idle inhibition.
    pub fn new(clock: impl Clock + 'static, scheduler: impl TickScheduler + 'static) -> Self {
        Self {
            cues: Vec::new(),
            transport: TransportState::for_list(0, 1.0),
            clock: Box::new(clock),
            scheduler: Box::new(scheduler),
            speed: Box::new(FixedSpeed(1.0)),
            idle: Box::new(NoopInhibitor::new()),
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
        }
    }

    /// Read the speed factor from `speed` on every tick.
    pub fn with_speed_source(mut self, speed: impl SpeedSource + 'static) -> Self {
        self.transport.speed_factor = sanitize_speed(speed.speed_factor());
        self.speed = Box::new(speed);
        self
    }

    /// Hold `idle` while playing.
    pub fn with_idle_inhibitor(mut self, idle: Box<dyn IdleInhibitor>) -> Self {
        self.idle = idle;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    // === Transitions ===

    /// Replace the cue list and reset the transport.
    ///
    /// Any scheduled tick is cancelled before the list is swapped, so no tick
    /// resolves against a half-replaced list.
    pub fn load(&mut self, cues: Vec<Cue>) {
        self.scheduler.cancel();
        self.release_idle();

        let speed = self.transport.speed_factor;
        self.transport = TransportState::for_list(cues.len(), speed);
        self.cues = cues;
        tracing::debug!(cues = self.cues.len(), "cue list loaded");
    }

    /// Start or resume playback from the paused offset.
    ///
    /// Returns `Ok(false)` if already playing.
    pub fn start(&mut self) -> Result<bool, EngineError> {
        if self.cues.is_empty() {
            return Err(EngineError::NothingLoaded);
        }
        if self.transport.phase == TransportPhase::Playing {
            return Ok(false);
        }

        let now = self.clock.now();
        let speed = self.read_speed();
        let t = &mut self.transport;
        t.speed_factor = speed;
        t.anchor_wall_time = now;
        t.anchor_position = t.paused_offset_seconds;
        t.paused_offset_seconds = 0.0;
        t.last_tick_wall_time = now;
        t.phase = TransportPhase::Playing;

        self.scheduler.schedule_repeating(self.tick_interval);
        self.acquire_idle();
        tracing::debug!(
            position = self.transport.anchor_position,
            speed,
            "playback started"
        );
        Ok(true)
    }

    /// Stop the clock, remembering the current position.
    ///
    /// Returns `false` if playback wasn't running.
    pub fn pause(&mut self) -> bool {
        if self.transport.phase != TransportPhase::Playing {
            return false;
        }

        let now = self.clock.now();
        self.sync_speed();
        let position = self.transport.position_at(now);
        self.transport.paused_offset_seconds = position;
        self.transport.phase = TransportPhase::Paused;

        self.scheduler.cancel();
        self.release_idle();
        tracing::debug!(position, "playback paused");
        true
    }

    /// Play/pause button: pause when playing, start otherwise.
    pub fn toggle(&mut self) -> Result<TransportPhase, EngineError> {
        if self.pause() {
            Ok(TransportPhase::Paused)
        } else {
            self.start()?;
            Ok(TransportPhase::Playing)
        }
    }

    /// Jump to `index` and pause there; the next `start()` resumes at the
    /// beginning of that cue.
    pub fn seek(&mut self, index: usize) -> Result<(), EngineError> {
        if self.cues.is_empty() {
            return Err(EngineError::NothingLoaded);
        }
        let Some(cue) = self.cues.get(index) else {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.cues.len(),
            });
        };
        let start = cue.start_seconds;

        if self.transport.phase == TransportPhase::Playing {
            self.scheduler.cancel();
            self.release_idle();
        }

        let t = &mut self.transport;
        t.phase = TransportPhase::Paused;
        t.current_index = Some(index);
        t.paused_offset_seconds = start;
        tracing::debug!(index, start, "seeked");
        Ok(())
    }

    /// Advance the clock and resolve the active cue.
    pub fn tick(&mut self) -> Result<TickReport, EngineError> {
        if self.transport.phase != TransportPhase::Playing {
            return Err(EngineError::NotPlaying);
        }
        let current = self
            .transport
            .current_index
            .ok_or(EngineError::NothingLoaded)?;
        let last = self.cues.len() - 1;

        // Already on the final cue: nothing left to advance to
        if current >= last {
            self.pause();
            let total_time = self.transport.paused_offset_seconds;
            return Ok(report(current, total_time, false, true));
        }

        let now = self.clock.now();
        self.sync_speed();
        let total_time = self.transport.position_at(now);

        let mut index = current;
        let mut cue_changed = false;
        if let Some(resolved) = find_cue_index_at_time(&self.cues, total_time) {
            if resolved > current {
                // Re-anchor at the new cue's start so later ticks measure
                // forward from it instead of from the old anchor
                let start = self.cues[resolved].start_seconds;
                let t = &mut self.transport;
                t.anchor_position = start;
                t.anchor_wall_time = now - (total_time - start) / t.speed_factor;
                t.current_index = Some(resolved);
                index = resolved;
                cue_changed = true;
                tracing::debug!(index, total_time, "cue changed");
            }
        }
        self.transport.last_tick_wall_time = now;

        let ended = index == last;
        if ended {
            self.pause();
            tracing::debug!("reached final cue");
        }

        Ok(report(index, total_time, cue_changed, ended))
    }

    /// Run a tick if the scheduler says one is due.
    pub fn poll_tick(&mut self) -> Option<Result<TickReport, EngineError>> {
        if !self.scheduler.poll_due() {
            return None;
        }
        Some(self.tick())
    }

    /// How long the host may wait before the next tick, `None` if nothing is
    /// scheduled.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    // === Read-only views ===

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn phase(&self) -> TransportPhase {
        self.transport.phase
    }

    pub fn is_playing(&self) -> bool {
        self.transport.phase == TransportPhase::Playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.transport.current_index
    }

    pub fn current_cue(&self) -> Option<&Cue> {
        self.transport.current_index.and_then(|i| self.cues.get(i))
    }

    /// Speed factor currently in effect.
    pub fn speed_factor(&self) -> f64 {
        self.transport.speed_factor
    }

    /// Logical playback position right now.
    pub fn position(&self) -> f64 {
        match self.transport.phase {
            TransportPhase::Playing => self.transport.position_at(self.clock.now()),
            TransportPhase::Paused | TransportPhase::Idle => {
                self.transport.paused_offset_seconds
            }
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let position = self.position();
        EngineSnapshot {
            phase: self.transport.phase,
            index: self.transport.current_index,
            position,
            timestamp: format_hms(position),
            speed_factor: self.transport.speed_factor,
            cue_count: self.cues.len(),
        }
    }

    // === Internals ===

    fn read_speed(&self) -> f64 {
        sanitize_speed(self.speed.speed_factor())
    }

    /// Pick up a changed speed factor. The stretch since the anchor up to the
    /// previous tick is folded in at the old speed, so the position does not
    /// jump; only the rate from there on changes.
    fn sync_speed(&mut self) {
        let speed = self.read_speed();
        let t = &mut self.transport;
        if speed == t.speed_factor {
            return;
        }
        let fold_at = t.last_tick_wall_time.max(t.anchor_wall_time);
        t.anchor_position = t.position_at(fold_at);
        t.anchor_wall_time = fold_at;
        tracing::debug!(from = t.speed_factor, to = speed, "speed changed");
        t.speed_factor = speed;
    }

    fn acquire_idle(&mut self) {
        if let Err(e) = self.idle.acquire() {
            tracing::warn!("Idle prevention unavailable ({}): {}", self.idle.name(), e);
        }
    }

    fn release_idle(&mut self) {
        if !self.idle.is_held() {
            return;
        }
        if let Err(e) = self.idle.release() {
            tracing::warn!("Failed to release idle prevention ({}): {}", self.idle.name(), e);
        }
    }
}

impl std::fmt::Debug for CueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CueEngine")
            .field("cues", &self.cues.len())
            .field("transport", &self.transport)
            .field("tick_interval", &self.tick_interval)
            .field("idle", &self.idle.name())
            .finish()
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        tracing::warn!("ignoring invalid speed factor {}", speed);
        1.0
    }
}

fn report(index: usize, total_time: f64, cue_changed: bool, ended: bool) -> TickReport {
    TickReport {
        index,
        total_time,
        timestamp: format_hms(total_time),
        cue_changed,
        ended,
    }
}
