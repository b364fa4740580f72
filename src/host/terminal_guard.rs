use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::sync::Arc;

use parking_lot::Mutex;
use term_input::RawMode;

type Cleanup = Box<dyn FnOnce() + Send + 'static>;

/// Restores the terminal on drop, and from the panic hook if the process
/// panics first.
pub struct TerminalGuard {
    cleanup: Arc<Mutex<Option<Cleanup>>>,
}

impl TerminalGuard {
    fn new() -> Self {
        Self {
            cleanup: Arc::new(Mutex::new(None)),
        }
    }

    fn set_cleanup<F: FnOnce() + Send + 'static>(&self, cleanup: F) {
        *self.cleanup.lock() = Some(Box::new(cleanup));
    }

    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Some(cleanup) = cleanup.lock().take() {
                cleanup();
            }
            default_hook(info);
        }));
    }

    /// Undo the terminal change now instead of at drop.
    pub fn restore(&self) {
        if let Some(cleanup) = self.cleanup.lock().take() {
            cleanup();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cleanup.lock().is_some()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Disable canonical mode and echo on the terminal behind `fd`.
///
/// The guard keeps its own duplicate of `fd`, so the terminal can still be
/// restored after the reader that owns `fd` has closed it.
pub fn enter_raw_mode(fd: RawFd) -> io::Result<TerminalGuard> {
    let dup = unsafe { libc::dup(fd) };
    if dup < 0 {
        return Err(io::Error::last_os_error());
    }
    let tty = unsafe { File::from_raw_fd(dup) };
    let raw = RawMode::enable(tty.as_raw_fd())?;
    tracing::debug!("terminal raw mode enabled");

    let guard = TerminalGuard::new();
    guard.set_cleanup(move || {
        let mut raw = raw;
        if let Err(err) = raw.restore() {
            tracing::warn!(error = %err, "failed to restore terminal mode");
        }
        drop(tty);
    });
    guard.install_panic_hook();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixStream;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn raw_mode_requires_a_terminal() {
        let (a, _b) = UnixStream::pair().unwrap();
        assert!(enter_raw_mode(a.as_raw_fd()).is_err());
    }

    #[test]
    fn cleanup_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guard = TerminalGuard::new();
        guard.set_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(guard.is_active());
        guard.restore();
        assert!(!guard.is_active());
        drop(guard);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panic_hook_restores_terminal() {
        let restored = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&restored);
        let guard = TerminalGuard::new();
        guard.set_cleanup(move || flag.store(true, Ordering::SeqCst));
        guard.install_panic_hook();

        let result = std::panic::catch_unwind(|| panic!("boom"));
        // Put the default hook back for the rest of the test binary.
        drop(std::panic::take_hook());

        assert!(result.is_err());
        assert!(restored.load(Ordering::SeqCst));
        assert!(!guard.is_active());
    }
}
