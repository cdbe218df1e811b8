use std::any::Any;
use std::cell::RefCell;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use log::debug;

/// Launches external programs for the `run(...)` command.
pub trait SystemCommandExecutor {
    /// Start `command_line` without waiting for it to finish.
    fn spawn_detached(&self, command_line: &str) -> Result<()>;

    fn as_any(&self) -> &dyn Any;
}

/// Runs command lines through the platform shell.
pub struct RealSystemCommandExecutor;

impl SystemCommandExecutor for RealSystemCommandExecutor {
    fn spawn_detached(&self, command_line: &str) -> Result<()> {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(command_line);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(command_line);
            c
        };

        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start '{command_line}'"))?;
        debug!("Started '{command_line}' as pid {}", child.id());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Records command lines instead of running them.
#[derive(Default)]
pub struct MockSystemCommandExecutor {
    executed: RefCell<Vec<String>>,
    fail: bool,
}

impl MockSystemCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every launch fails.
    pub fn failing() -> Self {
        Self {
            executed: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn get_executed_commands(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl SystemCommandExecutor for MockSystemCommandExecutor {
    fn spawn_detached(&self, command_line: &str) -> Result<()> {
        self.executed.borrow_mut().push(command_line.to_string());
        if self.fail {
            anyhow::bail!("launch failed");
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
