use std::io;
use std::os::fd::{AsRawFd, RawFd};
use std::process::Child;
use libc::c_int;

pub trait ChildKillTermExt {
    fn kill_term(&self) -> Result<(), io::Error>;
}

impl ChildKillTermExt for Child {
    fn kill_term(&self) -> Result<(), io::Error> {
        // SAFETY: a libc call
        match unsafe { libc::kill(self.id().cast_signed(), libc::SIGTERM) } {
            -1 => Err(io::Error::last_os_error()),
            _ => Ok(()),
        }
    }
}

pub trait FdNonblockExt {
    fn set_nonblock(&self, is_nonblock: bool) -> Result<(), io::Error>;
}

impl<T: AsRawFd> FdNonblockExt for T {
    fn set_nonblock(&self, is_nonblock: bool) -> Result<(), io::Error> {
        let flags = fcntl_int(self.as_raw_fd(), libc::F_GETFL, 0)?;
        let flags = if is_nonblock {
            flags | libc::O_NONBLOCK
        } else {
            flags & !libc::O_NONBLOCK
        };
        fcntl_int(self.as_raw_fd(), libc::F_SETFL, flags)?;
        Ok(())
    }
}

fn fcntl_int(fd: RawFd, op: c_int, arg: c_int) -> Result<c_int, io::Error> {
    // SAFETY: only the flag operations are passed here
    match unsafe { libc::fcntl(fd, op, arg) } {
        -1 => Err(io::Error::last_os_error()),
        res => Ok(res),
    }
}
