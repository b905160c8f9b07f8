//! Playback-time to cue-index resolution.

use crate::subtitle::Cue;

/// Find the cue that should be showing at `time`.
///
/// Returns the greatest index whose start is at or before `time`. The whole
/// list is considered, so out-of-order input still resolves to the most
/// recently started cue by position; ties go to the highest index.
///
/// # Returns
/// `None` when every cue starts after `time` (or the list is empty).
pub fn find_cue_index_at_time(cues: &[Cue], time: f64) -> Option<usize> {
    cues.iter().rposition(|cue| cue.start_seconds <= time)
}
