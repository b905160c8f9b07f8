//! Idle inhibition errors.

/// Errors from acquiring or releasing an idle inhibitor.
///
/// None of these are fatal: playback continues without the hint.
#[derive(Debug, thiserror::Error)]
pub enum IdleError {
    #[error("Idle inhibitor '{0}' is not installed")]
    NotFound(&'static str),

    #[error("Failed to start '{tool}': {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stop '{tool}': {source}")]
    Release {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
}
