use std::io::Read;

use znp_protocol::{Frame, LengthField, error::ReadError};

use crate::describe;

/// Reads frames until one answers the outstanding request.
///
/// Frames that do not answer the request are handed to the caller and then dropped.
/// There is no iteration limit.
#[derive(Debug)]
pub struct ResponseMatcher<'a> {
    request: &'a Frame,
    length_field: LengthField,
    skipped: usize,
}

impl<'a> ResponseMatcher<'a> {
    pub fn new(request: &'a Frame, length_field: LengthField) -> ResponseMatcher<'a> {
        ResponseMatcher {
            request,
            length_field,
            skipped: 0,
        }
    }

    /// Number of unrelated frames seen so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Blocks until the reply arrives.
    /// `on_frame` sees every decoded frame in arrival order, the reply included.
    pub fn wait_for_reply(
        &mut self,
        reader: &mut impl Read,
        mut on_frame: impl FnMut(&Frame),
    ) -> Result<Frame, ReadError> {
        loop {
            let frame = Frame::from_reader(reader, self.length_field)?;
            log::trace!("Received frame: {}", frame);
            on_frame(&frame);
            if frame.answers(self.request) {
                log::debug!(
                    "Received reply {} after {} unrelated frame(s)",
                    describe(&frame),
                    self.skipped
                );
                return Ok(frame);
            }
            log::debug!("Skipping unrelated frame {}", describe(&frame));
            self.skipped += 1;
        }
    }
}
