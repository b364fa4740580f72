use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::time::Duration;

/// Byte-level input reader over an owned file descriptor.
///
/// Waits for readiness with `select()` so every read is bounded by a
/// timeout, then hands out the bytes one at a time in arrival order.
pub struct FdReader {
    file: File,
    pending: VecDeque<u8>,
    buf: [u8; 1024],
}

impl FdReader {
    /// Duplicate stdin, whether it is a terminal or a pipe.
    pub fn stdin() -> io::Result<Self> {
        let fd = unsafe { libc::dup(libc::STDIN_FILENO) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self::from_file(unsafe { File::from_raw_fd(fd) }))
    }

    /// Open the controlling terminal, bypassing any redirection of stdin.
    pub fn open_tty() -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
        Ok(Self::from_file(file))
    }

    /// Wrap an already-open file (pipe end, tty, regular file).
    pub fn from_file(file: File) -> Self {
        // Set close-on-exec to prevent leaking fd to child processes
        unsafe {
            libc::fcntl(file.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC);
        }
        Self {
            file,
            pending: VecDeque::new(),
            buf: [0u8; 1024],
        }
    }

    /// Read the next byte, blocking up to `timeout`.
    ///
    /// Returns `Ok(None)` on timeout. End of stream is reported as
    /// `ErrorKind::UnexpectedEof`, but only after every byte read before
    /// it has been handed out.
    pub fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.pop_front() {
            return Ok(Some(byte));
        }

        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        if !self.select(timeout_ms)? {
            return Ok(None);
        }

        // std::io::Read retries on EINTR automatically
        let n = self.file.read(&mut self.buf)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        self.pending.extend(&self.buf[..n]);
        Ok(self.pending.pop_front())
    }

    /// Number of bytes already read from the descriptor but not yet returned.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Raw file descriptor, for terminal mode changes.
    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Wait for data using `select()`, which is more reliable than `poll()` on macOS.
    fn select(&self, timeout_ms: i32) -> io::Result<bool> {
        let fd = self.file.as_raw_fd();
        unsafe {
            let mut read_fds: libc::fd_set = std::mem::zeroed();
            libc::FD_ZERO(&mut read_fds);
            libc::FD_SET(fd, &mut read_fds);

            let mut tv = libc::timeval {
                tv_sec: (timeout_ms / 1000) as libc::time_t,
                tv_usec: ((timeout_ms % 1000) * 1000) as libc::suseconds_t,
            };

            loop {
                let ret = libc::select(
                    fd + 1,
                    &mut read_fds,
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                    &mut tv,
                );
                if ret < 0 {
                    let err = io::Error::last_os_error();
                    if err.kind() == io::ErrorKind::Interrupted {
                        // EINTR: re-init fd_set (select may have clobbered it)
                        libc::FD_ZERO(&mut read_fds);
                        libc::FD_SET(fd, &mut read_fds);
                        continue;
                    }
                    return Err(err);
                }
                return Ok(ret > 0);
            }
        }
    }
}
