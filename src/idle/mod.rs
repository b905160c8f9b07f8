//! Idle prevention while captions are playing.
//!
//! Playback can run for minutes without any key press, so the player asks
//! the platform not to blank the screen or suspend while it is in the
//! playing state. Support varies by system; a missing or failing tool is
//! logged and otherwise ignored.

mod error;
mod tools;

pub use error::IdleError;
pub use tools::{platform_tools, Caffeinate, SystemdInhibit};

/// A platform capability that keeps the machine awake.
pub trait IdleInhibitor {
    /// Human-readable name for logs.
    fn name(&self) -> &'static str;

    /// Check if this inhibitor can work on this system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Start preventing idle. Calling it while already held is a no-op.
    fn acquire(&mut self) -> Result<(), IdleError>;

    /// Stop preventing idle. Calling it while not held is a no-op.
    fn release(&mut self) -> Result<(), IdleError>;

    /// Whether the inhibitor is currently held.
    fn is_held(&self) -> bool;
}

/// Inhibitor that does nothing (unsupported platforms, or disabled by config).
#[derive(Debug, Default)]
pub struct NoopInhibitor {
    held: bool,
}

impl NoopInhibitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleInhibitor for NoopInhibitor {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn acquire(&mut self) -> Result<(), IdleError> {
        self.held = true;
        Ok(())
    }

    fn release(&mut self) -> Result<(), IdleError> {
        self.held = false;
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held
    }
}

/// Pick the first available platform inhibitor, falling back to
/// [`NoopInhibitor`].
pub fn detect() -> Box<dyn IdleInhibitor> {
    select(platform_tools())
}

fn select(tools: Vec<Box<dyn IdleInhibitor>>) -> Box<dyn IdleInhibitor> {
    match tools.into_iter().find(|tool| tool.is_available()) {
        Some(tool) => {
            tracing::debug!(tool = tool.name(), "idle inhibitor selected");
            tool
        }
        None => {
            tracing::debug!("no idle inhibitor available");
            Box::new(NoopInhibitor::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl IdleInhibitor for Unavailable {
        fn name(&self) -> &'static str {
            "unavailable"
        }
        fn is_available(&self) -> bool {
            false
        }
        fn acquire(&mut self) -> Result<(), IdleError> {
            Err(IdleError::NotFound("unavailable"))
        }
        fn release(&mut self) -> Result<(), IdleError> {
            Ok(())
        }
        fn is_held(&self) -> bool {
            false
        }
    }

    #[test]
    fn noop_tracks_held_state() {
        let mut noop = NoopInhibitor::new();
        assert!(!noop.is_held());
        noop.acquire().unwrap();
        assert!(noop.is_held());
        noop.release().unwrap();
        assert!(!noop.is_held());
    }

    #[test]
    fn select_falls_back_to_noop() {
        let tool = select(vec![Box::new(Unavailable)]);
        assert_eq!(tool.name(), "none");
    }

    #[test]
    fn select_prefers_first_available() {
        let tool = select(vec![Box::new(Unavailable), Box::new(NoopInhibitor::new())]);
        assert_eq!(tool.name(), "none");
        assert!(tool.is_available());
    }
}
