//! Wires configuration, input, terminal mode, the gate session and the
//! launcher into one run of the program.

use std::io;

use thiserror::Error;

use crate::config::{Config, GateConfig};
use crate::host::{
    enter_raw_mode, ConsolePrompt, GateSession, LaunchError, Launcher,
    SessionError, SessionResult, TracingObserver,
};
use crate::shutdown::{listen_for_signals, ShutdownCoordinator};
use term_input::FdReader;

/// Process exit codes.
pub mod exit_code {
    pub const GRANTED: i32 = 0;
    pub const DENIED: i32 = 1;
    pub const ABANDONED: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Map a finished session to the exit code the process reports when
/// nothing is launched afterwards.
pub fn session_exit_code(result: SessionResult) -> i32 {
    match result {
        SessionResult::Granted => exit_code::GRANTED,
        SessionResult::Denied => exit_code::DENIED,
        SessionResult::Abandoned => exit_code::ABANDONED,
        SessionResult::Interrupted => exit_code::INTERRUPTED,
    }
}

fn open_input(gate: &GateConfig) -> io::Result<FdReader> {
    if gate.use_tty {
        FdReader::open_tty()
    } else {
        FdReader::stdin()
    }
}

/// Run the gate and, on a grant, the configured command.
///
/// Returns the exit code the process should report.
pub async fn run(config: Config, shutdown: &ShutdownCoordinator) -> Result<i32, RunError> {
    let handle = shutdown.handle();
    let signals = tokio::spawn(listen_for_signals(handle.clone()));
    let _signals = scopeguard::guard(signals, |task| task.abort());

    let reader = open_input(&config.gate).map_err(SessionError::OpenInput)?;
    let terminal = if config.gate.raw_mode {
        match enter_raw_mode(reader.fd()) {
            Ok(guard) => Some(guard),
            Err(err) => {
                tracing::warn!(error = %err, "raw mode unavailable, reading line-buffered");
                None
            }
        }
    } else {
        None
    };

    let mut session = GateSession::new(config.gate.clone());
    session.add_observer(TracingObserver);
    if config.prompt.enabled {
        session.add_observer(ConsolePrompt::stderr(
            config.prompt.text.clone(),
            terminal.is_some(),
        ));
    }

    let result = session.run(reader, &handle).await?;
    drop(terminal);

    let mut launcher = Launcher::new(config.launch.command.clone());
    let code = if result == SessionResult::Granted && launcher.is_configured() {
        launcher.start()?;
        launcher.wait_or_stop(&handle).await?.exit_code()
    } else {
        session_exit_code(result)
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_per_result() {
        assert_eq!(session_exit_code(SessionResult::Granted), 0);
        assert_eq!(session_exit_code(SessionResult::Denied), 1);
        assert_eq!(session_exit_code(SessionResult::Abandoned), 2);
        assert_eq!(session_exit_code(SessionResult::Interrupted), 130);
    }
}
