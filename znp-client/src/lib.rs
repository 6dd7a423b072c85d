//! # ZNP Client
//!
//! Sends a single request frame to a Zigbee Network Processor and waits for its reply.
//!
//! ## Overview
//!
//! The network processor does not number its frames. Asynchronous indications can arrive
//! at any time, so the reply to a request is recognised by its subsystem byte alone: either
//! the request's own subsystem byte or the same byte with the synchronous response bit set.
//! Everything else is handed to the caller and skipped.
//!
//! The crate is built around three parts:
//!
//! - **[`Link`] Trait**: the byte stream to the device, plus the ability to close and reopen it
//! - **[`matcher::ResponseMatcher`]**: reads frames until one answers the outstanding request
//! - **[`reset::ResetSequencer`]**: the close, wait, wake byte and reopen dance that follows
//!   `SYS_RESET_REQ`
//!
//! [`client::Client`] ties them together.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use znp_client::client::Builder;
//! use znp_protocol::Frame;
//! use std::time::Duration;
//!
//! let mut client = Builder::new()
//!     .reset_delay(Duration::from_secs(2))
//!     .connect(my_link)?;
//! let request = Frame::from_hex_args(&["21", "02"])?;
//! let reply = client.request(&request, |frame| println!("{}", frame))?;
//! ```
//!
//! ## Blocking
//!
//! All operations block the calling thread. There are no timeouts: a device that never
//! answers keeps [`client::Client::request`] waiting forever.
//!
//! ## Logging
//!
//! This crate uses the `log` crate. Frame summaries are logged at debug level,
//! raw bytes at trace level.
use std::{
    io::{self, Read, Write},
    thread,
    time::Duration,
};

use znp_protocol::{Frame, subsystem_name};

pub mod client;
pub mod error;
pub mod matcher;
pub mod reset;

pub use client::write_capture;
pub use error::Error;

/// A byte stream to the network processor that can be closed and reopened.
///
/// `read` may return fewer bytes than requested; it should only return `Ok(0)` when the
/// device is gone.
pub trait Link: Read + Write {
    /// Opens the device, or reopens it after [`Link::close`].
    fn open(&mut self) -> io::Result<()>;

    /// Closes the device. Reads and writes fail until the next [`Link::open`].
    fn close(&mut self);

    /// Blocks for `duration` while the device is closed.
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl<L: Link + ?Sized> Link for &mut L {
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration)
    }
}

/// One-line summary for logs, e.g. `SRSP SYS cmd=02 len=4`.
pub(crate) fn describe(frame: &Frame) -> String {
    format!(
        "{} {} cmd={:02x} len={}",
        frame.message_type(),
        subsystem_name(frame.subsystem_id()).unwrap_or("UNKNOWN"),
        frame.command(),
        frame.payload().len()
    )
}
