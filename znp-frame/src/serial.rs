//! # Serial Device
//!
//! A [`Link`] backed by a tty, configured for raw 8N1 transfers at a fixed baud rate.
//!
//! Reads block in `poll(2)` until the device is readable and then return whatever has
//! arrived, which is often less than requested.
use std::{
    fs::{File, OpenOptions},
    io::{self, ErrorKind, Read, Write},
    os::{fd::AsFd, unix::fs::OpenOptionsExt},
    path::{Path, PathBuf},
};

use nix::{
    errno::Errno,
    fcntl::OFlag,
    poll::{PollFd, PollFlags, PollTimeout, poll},
    sys::termios::{self, BaudRate, ControlFlags, SetArg},
};
use znp_client::Link;

/// Baud rates the device can be configured with.
pub const SUPPORTED_BAUD_RATES: &[u32] = &[4800, 9600, 19200, 38400, 57600, 115200, 230400];

fn baud_rate(rate: u32) -> Option<BaudRate> {
    let baud = match rate {
        4800 => BaudRate::B4800,
        9600 => BaudRate::B9600,
        19200 => BaudRate::B19200,
        38400 => BaudRate::B38400,
        57600 => BaudRate::B57600,
        115200 => BaudRate::B115200,
        230400 => BaudRate::B230400,
        _ => return None,
    };
    Some(baud)
}

pub struct SerialPort {
    path: PathBuf,
    rate: u32,
    baud: BaudRate,
    file: Option<File>,
}

impl SerialPort {
    /// Creates a closed port. Use [`Link::open`] to open it.
    pub fn new(path: impl AsRef<Path>, rate: u32) -> io::Result<SerialPort> {
        let baud = baud_rate(rate).ok_or_else(|| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Unsupported baud rate {}, expected one of {:?}",
                    rate, SUPPORTED_BAUD_RATES
                ),
            )
        })?;
        Ok(SerialPort {
            path: path.as_ref().to_path_buf(),
            rate,
            baud,
            file: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn configure(&self, file: &File) -> nix::Result<()> {
        let mut tio = termios::tcgetattr(file)?;
        termios::cfmakeraw(&mut tio);
        termios::cfsetspeed(&mut tio, self.baud)?;
        tio.control_flags |= ControlFlags::CLOCAL | ControlFlags::CREAD;
        tio.control_flags &= !ControlFlags::CSTOPB;
        termios::tcsetattr(file, SetArg::TCSANOW, &tio)
    }

    fn file(&mut self) -> io::Result<&mut File> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| {
            io::Error::new(
                ErrorKind::NotConnected,
                format!("{} is not open", path.display()),
            )
        })
    }
}

/// Blocks until `file` has data to read.
fn wait_readable(file: &File) -> io::Result<()> {
    loop {
        let mut fds = [PollFd::new(file.as_fd(), PollFlags::POLLIN)];
        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(io::Error::from(errno)),
        }
    }
}

impl Read for SerialPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = self.file()?;
        wait_readable(file)?;
        let n = file.read(buf)?;
        log::trace!("Read {} byte(s): {:02x?}", n, &buf[..n]);
        Ok(n)
    }
}

impl Write for SerialPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file()?.write(buf)?;
        log::trace!("Wrote {} byte(s): {:02x?}", n, &buf[..n]);
        Ok(n)
    }

    /// Waits until everything written has been transmitted.
    fn flush(&mut self) -> io::Result<()> {
        let file = self.file()?;
        termios::tcdrain(&*file)?;
        Ok(())
    }
}

impl Link for SerialPort {
    fn open(&mut self) -> io::Result<()> {
        log::debug!("Opening serial device: {}", self.path.display());
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(OFlag::O_NOCTTY.bits())
            .open(&self.path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", self.path.display(), e)))?;
        self.configure(&file).map_err(|errno| {
            io::Error::new(
                io::Error::from(errno).kind(),
                format!("Unable to configure {}: {}", self.path.display(), errno),
            )
        })?;
        log::info!("Opened {} at {} baud", self.path.display(), self.rate);
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) {
        if self.is_open() {
            self.file = None;
            log::debug!("Closed serial device: {}", self.path.display());
        }
    }
}
