use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::source::ByteSource;
use super::InputEvent;

/// Handle to the reader thread.
///
/// The thread stops on its own at end of stream, on a read error, or when
/// the receiving side of the channel is dropped. [`InputReader::stop`]
/// cancels it from outside; the flag is checked between reads, so the
/// thread exits within one poll interval.
pub struct InputReader {
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputReader {
    pub fn spawn<S>(
        source: S,
        events: UnboundedSender<InputEvent>,
        poll_interval: Duration,
    ) -> io::Result<Self>
    where
        S: ByteSource + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let thread = thread::Builder::new()
            .name("input-reader".to_string())
            .spawn(move || read_loop(source, events, flag, poll_interval))?;

        Ok(Self {
            cancel,
            thread: Some(thread),
        })
    }

    /// Cancel the loop and wait for the thread to exit. Idempotent.
    pub fn stop(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("input reader thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop<S: ByteSource>(
    mut source: S,
    events: UnboundedSender<InputEvent>,
    cancel: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    tracing::debug!(poll_ms = poll_interval.as_millis() as u64, "input reader started");
    let mut delivered: u64 = 0;

    loop {
        if cancel.load(Ordering::SeqCst) {
            tracing::debug!(delivered, "input reader cancelled");
            break;
        }

        match source.read_byte(poll_interval) {
            Ok(Some(byte)) => {
                if events.send(InputEvent::Byte(byte)).is_err() {
                    tracing::trace!("input event dropped (receiver gone)");
                    break;
                }
                delivered += 1;
            }
            Ok(None) => {
                // Timeout: loop around to check the cancel flag
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!(delivered, "input source closed");
                let _ = events.send(InputEvent::Closed);
                break;
            }
            Err(err) => {
                tracing::error!(error = %err, "input source read failed");
                let _ = events.send(InputEvent::Failed(err.to_string()));
                break;
            }
        }
    }
}
