use std::io;
use std::os::unix::io::RawFd;

/// Non-canonical, no-echo terminal mode.
///
/// Clears `ICANON` and `ECHO` so bytes arrive as they are typed and are
/// not printed back. Signal keys (`ISIG`) and CR-to-NL translation are left
/// alone, so Enter still produces `\n` and Ctrl-C still interrupts.
/// The saved settings are restored on `restore()` or drop.
pub struct RawMode {
    fd: RawFd,
    saved: Option<libc::termios>,
}

impl RawMode {
    pub fn enable(fd: RawFd) -> io::Result<Self> {
        if unsafe { libc::isatty(fd) } != 1 {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "not a terminal"));
        }

        let mut saved: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut saved) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = saved;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            fd,
            saved: Some(saved),
        })
    }

    /// Put the terminal back the way it was. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if let Some(saved) = self.saved.take() {
            if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &saved) } != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
