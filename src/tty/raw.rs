use std::{io, mem::MaybeUninit, os::unix::io::RawFd};

use crate::error::ConsoleError;

/// Puts the controlling terminal in raw mode for as long as it lives.
///
/// Echo, line buffering, signal keys and output post-processing are all
/// off; the console writes `\n\r` itself.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

impl RawMode {
    pub fn enable() -> Result<Self, ConsoleError> {
        let fd = libc::STDIN_FILENO;
        if unsafe { libc::isatty(fd) } != 1 {
            return Err(ConsoleError::Terminal("stdin is not a terminal".to_string()));
        }

        let mut original = MaybeUninit::<libc::termios>::uninit();
        if unsafe { libc::tcgetattr(fd, original.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error().into());
        }
        // SAFETY: tcgetattr succeeded and filled the struct
        let original = unsafe { original.assume_init() };

        let mut raw = original;
        unsafe { libc::cfmakeraw(&mut raw) };
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error().into());
        }

        tracing::debug!(fd, "raw mode enabled");
        Ok(RawMode { fd, original })
    }

    pub fn restore(&self) {
        if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.original) } != 0 {
            tracing::warn!(error = %io::Error::last_os_error(), "could not restore terminal mode");
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        self.restore();
    }
}
