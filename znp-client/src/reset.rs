//! Resynchronisation after `SYS_RESET_REQ`.
//!
//! The module drops off the link while it restarts. Before framed traffic resumes the
//! device is closed, left alone for a configurable delay, poked with a single wake byte
//! and opened again.
use std::time::Duration;

use znp_protocol::Frame;

use crate::{Error, Link};

/// Written on its own after a reset to wake the module.
pub const WAKE_BYTE: u8 = 0xEF;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResetSequencer {
    delay: Duration,
}

impl ResetSequencer {
    pub fn new(delay: Duration) -> ResetSequencer {
        ResetSequencer { delay }
    }

    /// Whether sending `request` must be followed by [`ResetSequencer::resynchronise`].
    pub fn applies_to(request: &Frame) -> bool {
        request.is_reset_request()
    }

    /// Runs after the reset request has been written.
    /// The link is open again when this returns successfully.
    pub fn resynchronise(&self, link: &mut impl Link) -> Result<(), Error> {
        log::info!("Reset requested, closing device");
        link.close();

        log::info!("Waiting {:?} before waking the module", self.delay);
        link.wait(self.delay);

        link.open().map_err(Error::Open)?;
        log::debug!("Sending wake byte {:02x}", WAKE_BYTE);
        link.write_all(&[WAKE_BYTE])?;
        link.flush()?;
        link.close();

        link.open().map_err(Error::Open)?;
        log::info!("Device reopened after reset");
        Ok(())
    }
}
