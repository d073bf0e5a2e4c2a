//! Raw mode and terminal queries through termios.
//!
//! Raw mode turns off line buffering, echo and signal keys so every byte the
//! user types reaches the input parser. Reads return after at most
//! [`READ_TIMEOUT_DECISECONDS`] tenths of a second even with no input, which
//! lets the input thread notice shutdown and resizes without blocking.
//!
//! # Safety
//! The libc calls here operate on plain file descriptors and zeroed structs
//! and have no other preconditions.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// `VTIME` used in raw mode.
pub const READ_TIMEOUT_DECISECONDS: u8 = 1;

/// Restores the saved terminal attributes when dropped.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    saved: libc::termios,
}

impl RawModeGuard {
    /// Switch `fd` to raw mode.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let saved = get_termios(fd)?;
        set_termios(fd, &raw_attributes(saved))?;
        Ok(Self { fd, saved })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = set_termios(self.fd, &self.saved);
    }
}

fn raw_attributes(mut attrs: libc::termios) -> libc::termios {
    attrs.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    attrs.c_oflag &= !libc::OPOST;
    attrs.c_cflag |= libc::CS8;
    attrs.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    attrs.c_cc[libc::VMIN] = 0;
    attrs.c_cc[libc::VTIME] = READ_TIMEOUT_DECISECONDS;
    attrs
}

/// Switch stdin to raw mode.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Whether `fd` refers to a terminal.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty accepts any descriptor
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Size of the terminal on stdout as `(columns, rows)`.
///
/// A terminal reporting a zero dimension is treated as an error.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain data
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: TIOCGWINSZ writes into the winsize passed by pointer
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain data
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr writes into the termios passed by pointer
    if unsafe { libc::tcgetattr(fd, &mut termios) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr only reads the termios passed by pointer
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::FromRawFd;

    fn create_pipe() -> io::Result<(File, File)> {
        let mut fds = [0i32; 2];
        if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: pipe() succeeded, so both descriptors are open and owned here
        Ok(unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) })
    }

    #[test]
    fn test_pipe_and_file_are_not_tty() {
        let (read, write) = create_pipe().unwrap();
        assert!(!is_tty(&read));
        assert!(!is_tty(&write));

        let file = tempfile::tempfile().unwrap();
        assert!(!is_tty(&file));
    }

    #[test]
    fn test_raw_mode_on_pipe_fails() {
        let (read, _write) = create_pipe().unwrap();
        assert!(RawModeGuard::new(&read).is_err());
    }

    #[test]
    fn test_raw_attributes() {
        // SAFETY: termios is plain data
        let mut cooked: libc::termios = unsafe { std::mem::zeroed() };
        cooked.c_lflag = libc::ECHO | libc::ICANON | libc::ISIG;
        cooked.c_iflag = libc::ICRNL | libc::IXON;
        cooked.c_cc[libc::VMIN] = 1;

        let raw = raw_attributes(cooked);
        assert_eq!(raw.c_lflag & (libc::ECHO | libc::ICANON | libc::ISIG), 0);
        assert_eq!(raw.c_iflag & (libc::ICRNL | libc::IXON), 0);
        assert_eq!(raw.c_cflag & libc::CS8, libc::CS8);
        assert_eq!(raw.c_cc[libc::VMIN], 0);
        assert_eq!(raw.c_cc[libc::VTIME], READ_TIMEOUT_DECISECONDS);
    }

    #[test]
    fn test_terminal_size_is_positive_when_known() {
        if let Ok((cols, rows)) = terminal_size() {
            assert!(cols > 0 && rows > 0);
        }
    }
}
