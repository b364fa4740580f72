//! Starts the command a grant unlocks and supervises it until it exits or
//! shutdown is requested.

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::{Child, Command};

use crate::shutdown::ShutdownHandle;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No command configured")]
    NoCommand,

    #[error("Command already running")]
    AlreadyRunning,

    #[error("Command not started")]
    NotStarted,

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to kill '{program}': {source}")]
    Kill {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// How a launched command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    /// Exited on its own with this code.
    Exited(i32),
    /// Killed by a signal it did not handle.
    Signaled(i32),
    /// Killed by us because shutdown was requested.
    Stopped,
}

impl LaunchStatus {
    fn from_exit(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signal)) => Self::Signaled(signal),
            (None, None) => Self::Exited(1),
        }
    }

    /// Process exit code to report for this status (shell conventions).
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Signaled(signal) => 128 + signal,
            Self::Stopped => 130,
        }
    }
}

pub struct Launcher {
    command: Vec<String>,
    child: Option<Child>,
}

impl Launcher {
    /// `command` is the program followed by its arguments.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            child: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    fn program(&self) -> String {
        self.command.first().cloned().unwrap_or_default()
    }

    /// Spawn the command with inherited stdio. Returns its pid.
    pub fn start(&mut self) -> Result<Option<u32>, LaunchError> {
        let (program, args) = self.command.split_first().ok_or(LaunchError::NoCommand)?;
        if self.child.is_some() {
            return Err(LaunchError::AlreadyRunning);
        }

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        let pid = child.id();
        tracing::info!(program = %program, pid, "command started");
        self.child = Some(child);
        Ok(pid)
    }

    /// Wait for the running command, killing it if shutdown comes first.
    pub async fn wait_or_stop(
        &mut self,
        shutdown: &ShutdownHandle,
    ) -> Result<LaunchStatus, LaunchError> {
        let program = self.program();
        let child = self.child.as_mut().ok_or(LaunchError::NotStarted)?;

        let exited = tokio::select! {
            status = child.wait() => Some(status),
            _ = shutdown.wait() => None,
        };

        let status = match exited {
            Some(Ok(status)) => Ok(LaunchStatus::from_exit(status)),
            Some(Err(source)) => Err(LaunchError::Wait {
                program: program.clone(),
                source,
            }),
            None => {
                tracing::info!(program = %program, "stopping command");
                child
                    .kill()
                    .await
                    .map(|()| LaunchStatus::Stopped)
                    .map_err(|source| LaunchError::Kill {
                        program: program.clone(),
                        source,
                    })
            }
        };

        self.child = None;
        let status = status?;
        tracing::info!(program = %program, ?status, "command finished");
        Ok(status)
    }
}
