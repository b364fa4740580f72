use std::io;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::GateConfig;
use crate::gate::{GateController, GateOutcome, GateState, TERMINATOR};
use crate::input::{ByteSource, InputEvent, InputReader};
use crate::shutdown::ShutdownHandle;

use super::observer::GateObserver;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to open input: {0}")]
    OpenInput(#[source] io::Error),

    #[error("Failed to start input reader: {0}")]
    SpawnReader(#[source] io::Error),
}

/// How a gate session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResult {
    /// The secret was entered.
    Granted,
    /// Attempts ran out.
    Denied,
    /// The input closed or failed before a decision.
    Abandoned,
    /// Shutdown was requested before a decision.
    Interrupted,
}

/// One run of the gate: a reader thread feeding a controller on the
/// calling task.
pub struct GateSession {
    config: GateConfig,
    observers: Vec<Box<dyn GateObserver>>,
}

impl GateSession {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: impl GateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, f: impl Fn(&mut dyn GateObserver)) {
        for observer in &mut self.observers {
            f(observer.as_mut());
        }
    }

    /// Read `source` until the gate decides, the source closes, or
    /// `shutdown` is signaled.
    ///
    /// The reader thread is stopped before this returns, and also when the
    /// returned future is dropped early.
    pub async fn run<S>(
        &mut self,
        source: S,
        shutdown: &ShutdownHandle,
    ) -> Result<SessionResult, SessionError>
    where
        S: ByteSource + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reader = InputReader::spawn(source, tx, self.config.poll_interval())
            .map_err(SessionError::SpawnReader)?;
        let reader = scopeguard::guard(reader, |mut reader| reader.stop());

        let mut gate = GateController::new(
            self.config.policy(),
            GateState::new(self.config.attempts),
        );
        let attempt_policy = self.config.attempt_policy;
        let guesses = attempt_policy.guesses_left(self.config.attempts);
        self.notify(|o| o.on_start(guesses));

        let mut abandoned_reason = String::new();
        let result = loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.wait() => break SessionResult::Interrupted,
                event = rx.recv() => event,
            };

            match event {
                Some(InputEvent::Byte(byte)) => match gate.on_character(byte) {
                    GateOutcome::Continue => {
                        if byte == TERMINATOR {
                            let left = gate.attempts_left().unwrap_or(0);
                            let guesses = attempt_policy.guesses_left(left);
                            tracing::debug!(attempts_left = left, "attempt rejected");
                            self.notify(|o| o.on_retry(guesses));
                        }
                    }
                    GateOutcome::Grant => break SessionResult::Granted,
                    GateOutcome::Deny => break SessionResult::Denied,
                },
                Some(InputEvent::Closed) => {
                    abandoned_reason = "input closed".to_string();
                    break SessionResult::Abandoned;
                }
                Some(InputEvent::Failed(err)) => {
                    abandoned_reason = format!("input failed: {}", err);
                    break SessionResult::Abandoned;
                }
                None => {
                    abandoned_reason = "input reader exited".to_string();
                    break SessionResult::Abandoned;
                }
            }
        };

        drop(reader);

        match result {
            SessionResult::Granted => self.notify(|o| o.on_grant()),
            SessionResult::Denied => self.notify(|o| o.on_deny()),
            SessionResult::Abandoned => self.notify(|o| o.on_abandoned(&abandoned_reason)),
            SessionResult::Interrupted => {
                tracing::debug!("gate interrupted by shutdown");
            }
        }

        Ok(result)
    }
}
