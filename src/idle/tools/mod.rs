//! Platform-specific idle inhibitors.
//!
//! Both tools work the same way: a child process holds the inhibition for
//! as long as it lives, and releasing kills it.

mod caffeinate;
mod systemd_inhibit;

pub use caffeinate::Caffeinate;
pub use systemd_inhibit::SystemdInhibit;

use std::process::{Child, Command, Stdio};

use super::{IdleError, IdleInhibitor};

/// Get the platform-appropriate inhibitors in priority order.
pub fn platform_tools() -> Vec<Box<dyn IdleInhibitor>> {
    #[cfg(target_os = "macos")]
    {
        vec![Box::new(Caffeinate::new())]
    }

    #[cfg(target_os = "linux")]
    {
        vec![Box::new(SystemdInhibit::new())]
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        vec![]
    }
}

/// Check if a binary is on PATH.
fn tool_exists(binary: &str) -> bool {
    Command::new("which")
        .arg(binary)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A child process that holds an inhibition while alive.
#[derive(Debug, Default)]
struct HeldProcess {
    child: Option<Child>,
}

impl HeldProcess {
    fn is_held(&self) -> bool {
        self.child.is_some()
    }

    fn spawn(&mut self, tool: &'static str, command: &mut Command) -> Result<(), IdleError> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| IdleError::Spawn { tool, source })?;
        tracing::debug!(tool, pid = child.id(), "idle inhibitor acquired");
        self.child = Some(child);
        Ok(())
    }

    fn kill(&mut self, tool: &'static str) -> Result<(), IdleError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // The child may already have exited on its own
        if let Ok(Some(_)) = child.try_wait() {
            return Ok(());
        }
        child
            .kill()
            .and_then(|_| child.wait().map(|_| ()))
            .map_err(|source| IdleError::Release { tool, source })?;
        tracing::debug!(tool, "idle inhibitor released");
        Ok(())
    }
}

impl Drop for HeldProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
