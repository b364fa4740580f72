//! Shared test utilities: in-memory byte sources and a recording observer.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use keygate::config::GateConfig;
use keygate::host::GateObserver;
use keygate::input::ByteSource;
use parking_lot::Mutex;

/// Source that replays fixed bytes, then either closes or idles forever.
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
    close_at_end: bool,
}

impl ScriptedSource {
    /// Replays `bytes`, then reports end of stream.
    pub fn closing(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            close_at_end: true,
        }
    }

    /// Replays `bytes`, then times out on every read.
    pub fn idling(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            close_at_end: false,
        }
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if let Some(byte) = self.bytes.pop_front() {
            return Ok(Some(byte));
        }
        if self.close_at_end {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "script done"));
        }
        std::thread::sleep(timeout);
        Ok(None)
    }
}

/// Source fed from another thread; closes when every sender is dropped.
pub struct ChannelSource {
    rx: Receiver<u8>,
}

impl ChannelSource {
    pub fn new() -> (Sender<u8>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl ByteSource for ChannelSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(byte) => Ok(Some(byte)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "sender gone"))
            }
        }
    }
}

/// Observer that records every callback as a short string.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl GateObserver for RecordingObserver {
    fn on_start(&mut self, guesses_left: u32) {
        self.events.lock().push(format!("start:{}", guesses_left));
    }

    fn on_retry(&mut self, guesses_left: u32) {
        self.events.lock().push(format!("retry:{}", guesses_left));
    }

    fn on_grant(&mut self) {
        self.events.lock().push("grant".to_string());
    }

    fn on_deny(&mut self) {
        self.events.lock().push("deny".to_string());
    }

    fn on_abandoned(&mut self, reason: &str) {
        self.events.lock().push(format!("abandoned:{}", reason));
    }
}

/// Gate config with the default secret and a short poll interval.
pub fn fast_gate_config() -> GateConfig {
    GateConfig {
        poll_interval_ms: 5,
        ..GateConfig::default()
    }
}
