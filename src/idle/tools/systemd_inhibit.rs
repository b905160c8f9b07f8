//! Linux systemd-inhibit idle inhibitor.

use std::process::Command;

use super::{tool_exists, HeldProcess};
use crate::idle::{IdleError, IdleInhibitor};

const TOOL: &str = "systemd-inhibit";

/// Holds an `idle` inhibitor lock through `systemd-inhibit` wrapping a
/// long-running `sleep`.
#[derive(Debug, Default)]
pub struct SystemdInhibit {
    process: HeldProcess,
}

impl SystemdInhibit {
    pub fn new() -> Self {
        Self::default()
    }

    fn command() -> Command {
        let mut command = Command::new(TOOL);
        command.args([
            "--what=idle",
            "--who=subfollow",
            "--why=Following subtitles",
            "--mode=block",
            "sleep",
            "infinity",
        ]);
        command
    }
}

impl IdleInhibitor for SystemdInhibit {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "linux") && tool_exists(TOOL)
    }

    fn acquire(&mut self) -> Result<(), IdleError> {
        self.process.spawn(TOOL, &mut Self::command())
    }

    fn release(&mut self) -> Result<(), IdleError> {
        self.process.kill(TOOL)
    }

    fn is_held(&self) -> bool {
        self.process.is_held()
    }
}
