//! [`tokio_util::codec`] support, enabled by the `tokio` feature.
//!
//! ```
//! use bytes::BytesMut;
//! use tokio_util::codec::{Decoder, Encoder};
//! use znp_protocol::{Frame, framed::ZnpCodec};
//!
//! let mut codec = ZnpCodec::default();
//! let mut buf = BytesMut::new();
//! codec.encode(Frame::new(0x21, 0x02, &[0x01, 0x02]).unwrap(), &mut buf).unwrap();
//! let frame = codec.decode(&mut buf).unwrap().unwrap();
//! assert_eq!(frame.to_string(), "21 02 01 02");
//! ```
use std::io;

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    error::ReadError,
    frame::{Frame, LengthField, SOF},
};

/// Frame codec for use with `FramedRead`/`FramedWrite`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZnpCodec {
    length_field: LengthField,
}

impl ZnpCodec {
    pub fn new(length_field: LengthField) -> ZnpCodec {
        ZnpCodec { length_field }
    }
}

impl Decoder for ZnpCodec {
    type Item = Frame;
    type Error = ReadError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, ReadError> {
        let Some(&sof) = src.first() else {
            return Ok(None);
        };
        if sof != SOF {
            src.advance(1);
            return Err(ReadError::UnexpectedSof(sof));
        }
        let Some(&length) = src.get(1) else {
            return Ok(None);
        };
        let payload_len = match self.length_field.payload_len(length) {
            Ok(len) => len,
            Err(e) => {
                src.advance(2);
                return Err(e);
            }
        };

        let frame_len = payload_len + 5;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let data = src.split_to(frame_len);
        let fcs = data[frame_len - 1];
        let expected = data[1..frame_len - 1].iter().fold(0u8, |acc, b| acc ^ b);
        if expected != fcs {
            return Err(ReadError::ChecksumMismatch {
                expected,
                actual: fcs,
            });
        }

        Frame::new(data[2], data[3], &data[4..frame_len - 1])
            .map(Some)
            .map_err(|_| ReadError::InvalidLength(length))
    }
}

impl Encoder<Frame> for ZnpCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), io::Error> {
        dst.put_slice(&item.to_bytes(self.length_field));
        Ok(())
    }
}
