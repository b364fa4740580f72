//! Subscribers to gate progress.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::tty::IsTty;

/// Receives gate progress from [`GateSession`](super::GateSession).
///
/// Callbacks run on the host task between two bytes, so they should
/// return quickly. `guesses_left` counts the guess that would deny.
pub trait GateObserver: Send {
    fn on_start(&mut self, _guesses_left: u32) {}
    fn on_retry(&mut self, _guesses_left: u32) {}
    fn on_grant(&mut self) {}
    fn on_deny(&mut self) {}
    fn on_abandoned(&mut self, _reason: &str) {}
}

/// Records gate progress as tracing events. Never sees the typed bytes.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl GateObserver for TracingObserver {
    fn on_start(&mut self, guesses_left: u32) {
        tracing::info!(guesses_left, "gate waiting for passphrase");
    }

    fn on_retry(&mut self, guesses_left: u32) {
        tracing::info!(guesses_left, "passphrase rejected");
    }

    fn on_grant(&mut self) {
        tracing::info!("access granted");
    }

    fn on_deny(&mut self) {
        tracing::warn!("access denied, attempts exhausted");
    }

    fn on_abandoned(&mut self, reason: &str) {
        tracing::warn!(reason, "gate abandoned without a decision");
    }
}

/// Interactive prompt written to a terminal-like sink (stderr by default).
pub struct ConsolePrompt {
    out: Box<dyn Write + Send>,
    prompt: String,
    styled: bool,
    echo_off: bool,
}

impl ConsolePrompt {
    /// Prompt on stderr, colored when stderr is a terminal.
    pub fn stderr(prompt: impl Into<String>, echo_off: bool) -> Self {
        let styled = io::stderr().is_tty();
        Self::new(Box::new(io::stderr()), prompt, styled, echo_off)
    }

    /// `echo_off` tells the prompt the terminal will not echo the user's
    /// Enter, so messages start on a fresh line themselves.
    pub fn new(
        out: Box<dyn Write + Send>,
        prompt: impl Into<String>,
        styled: bool,
        echo_off: bool,
    ) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            styled,
            echo_off,
        }
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        queue!(self.out, Print(&self.prompt))?;
        self.out.flush()
    }

    fn write_message(&mut self, color: Color, message: &str) -> io::Result<()> {
        if self.echo_off {
            queue!(self.out, Print("\r\n"))?;
        }
        if self.styled {
            queue!(
                self.out,
                SetForegroundColor(color),
                Print(message),
                ResetColor,
                Print("\r\n")
            )?;
        } else {
            queue!(self.out, Print(message), Print("\n"))?;
        }
        self.out.flush()
    }

    fn report(result: io::Result<()>) {
        if let Err(err) = result {
            tracing::debug!(error = %err, "prompt write failed");
        }
    }
}

impl GateObserver for ConsolePrompt {
    fn on_start(&mut self, _guesses_left: u32) {
        let result = self.write_prompt();
        Self::report(result);
    }

    fn on_retry(&mut self, guesses_left: u32) {
        let noun = if guesses_left == 1 { "attempt" } else { "attempts" };
        let message = format!("Access denied. {} {} left.", guesses_left, noun);
        let result = self
            .write_message(Color::Yellow, &message)
            .and_then(|_| self.write_prompt());
        Self::report(result);
    }

    fn on_grant(&mut self) {
        // Silent on success; only finish the line the user could not see.
        if self.echo_off {
            let result = queue!(self.out, Print("\r\n")).and_then(|_| self.out.flush());
            Self::report(result);
        }
    }

    fn on_deny(&mut self) {
        let result = self.write_message(Color::Red, "Access denied.");
        Self::report(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[test]
    fn prompts_and_reports_retries() {
        let sink = Sink::default();
        let mut prompt = ConsolePrompt::new(Box::new(sink.clone()), "> ", false, false);

        prompt.on_start(4);
        prompt.on_retry(3);
        prompt.on_retry(1);
        prompt.on_deny();

        assert_eq!(
            sink.text(),
            "> Access denied. 3 attempts left.\n> Access denied. 1 attempt left.\n> Access denied.\n"
        );
    }

    #[test]
    fn grant_is_silent_with_echo() {
        let sink = Sink::default();
        let mut prompt = ConsolePrompt::new(Box::new(sink.clone()), "> ", false, false);
        prompt.on_grant();
        assert!(sink.text().is_empty());
    }

    #[test]
    fn echo_off_starts_fresh_lines() {
        let sink = Sink::default();
        let mut prompt = ConsolePrompt::new(Box::new(sink.clone()), "> ", false, true);
        prompt.on_grant();
        prompt.on_deny();
        assert_eq!(sink.text(), "\r\n\r\nAccess denied.\n");
    }
}
