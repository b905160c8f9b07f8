//! Playback clock and cue cursor.
//!
//! This module owns the mapping from elapsed playback time to the active cue,
//! plus the injectable clock and tick scheduler it runs on.

mod clock;
mod engine;
mod resolve;
mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    CueEngine, EngineError, EngineSnapshot, TickReport, TransportPhase, TransportState,
};
pub use resolve::find_cue_index_at_time;
pub use scheduler::{IntervalScheduler, ManualSchedule, ManualScheduler, TickScheduler};
