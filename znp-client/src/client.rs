use std::{
    io::{self, Write},
    time::Duration,
};

use znp_protocol::{Frame, LengthField};

use crate::{Error, Link, describe, matcher::ResponseMatcher, reset::ResetSequencer};

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How long the device stays closed after a reset request.
    pub reset_delay: Duration,
    pub length_field: LengthField,
}

/// Builder to create a [Client] instance and modify configuration options
///
/// # Example
///
/// ```ignore
/// use znp_client::client::Builder;
/// use znp_protocol::LengthField;
/// use std::time::Duration;
///
/// let client = Builder::new()
///     .reset_delay(Duration::from_secs(2))
///     .length_field(LengthField::Payload)
///     .connect(my_link)?;
/// ```
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Set the time to wait before waking the module after a reset request.
    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.config.reset_delay = delay;
        self
    }

    /// Set how the length byte of frames is interpreted
    pub fn length_field(mut self, length_field: LengthField) -> Self {
        self.config.length_field = length_field;
        self
    }

    /// Open the link and return the client
    pub fn connect<L: Link>(self, link: L) -> Result<Client<L>, Error> {
        Client::connect(link, self.config)
    }
}

/// Exchanges requests and replies over an open [`Link`].
#[derive(Debug)]
pub struct Client<L: Link> {
    link: L,
    config: Config,
}

impl<L: Link> Client<L> {
    /// Opens `link` and wraps it.
    pub fn connect(mut link: L, config: Config) -> Result<Client<L>, Error> {
        link.open().map_err(Error::Open)?;
        Ok(Client { link, config })
    }

    /// Writes `request` and blocks until its reply arrives.
    ///
    /// A reset request triggers [`ResetSequencer::resynchronise`] between writing and
    /// waiting. `on_frame` sees every frame received while waiting, in order,
    /// ending with the reply.
    pub fn request(
        &mut self,
        request: &Frame,
        on_frame: impl FnMut(&Frame),
    ) -> Result<Frame, Error> {
        let bytes = request.to_bytes(self.config.length_field);
        log::debug!("Sending request {}", describe(request));
        log::trace!("Request bytes: {:02x?}", bytes);
        self.link.write_all(&bytes)?;
        self.link.flush()?;

        if ResetSequencer::applies_to(request) {
            ResetSequencer::new(self.config.reset_delay).resynchronise(&mut self.link)?;
        }

        let reply = ResponseMatcher::new(request, self.config.length_field)
            .wait_for_reply(&mut self.link, on_frame)?;
        Ok(reply)
    }

    /// Closes the link.
    pub fn close(mut self) {
        self.link.close();
        log::debug!("Device closed");
    }
}

/// Writes the encoded `request` verbatim to `out` instead of sending it to a device.
pub fn write_capture(
    request: &Frame,
    length_field: LengthField,
    out: &mut impl Write,
) -> io::Result<()> {
    request.write_to(out, length_field)?;
    out.flush()
}
