//! macOS caffeinate idle inhibitor.

use std::process::Command;

use super::{tool_exists, HeldProcess};
use crate::idle::{IdleError, IdleInhibitor};

const TOOL: &str = "caffeinate";

/// Keeps the display and system awake with `caffeinate -di` until released.
#[derive(Debug, Default)]
pub struct Caffeinate {
    process: HeldProcess,
}

impl Caffeinate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleInhibitor for Caffeinate {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "macos") && tool_exists(TOOL)
    }

    fn acquire(&mut self) -> Result<(), IdleError> {
        let mut command = Command::new(TOOL);
        command.arg("-di");
        self.process.spawn(TOOL, &mut command)
    }

    fn release(&mut self) -> Result<(), IdleError> {
        self.process.kill(TOOL)
    }

    fn is_held(&self) -> bool {
        self.process.is_held()
    }
}
