use std::io::Cursor;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use znp_protocol::{Frame, LengthField, error::ReadError, framed::ZnpCodec};

fn frames() -> Vec<Frame> {
    vec![
        Frame::new(0x41, 0x80, &[0x00, 0x02, 0x00, 0x02, 0x06, 0x03]).unwrap(),
        Frame::new(0x61, 0x02, &[]).unwrap(),
        Frame::new(0x44, 0x81, &[0xAA; 40]).unwrap(),
    ]
}

#[test]
fn codec_agrees_with_blocking_reader() {
    for length_field in [LengthField::Content, LengthField::Payload] {
        let mut codec = ZnpCodec::new(length_field);
        let mut wire = BytesMut::new();
        for frame in frames() {
            codec.encode(frame, &mut wire).unwrap();
        }
        let wire = wire.freeze();

        let mut cursor = Cursor::new(wire.to_vec());
        let blocking: Vec<Frame> = (0..3)
            .map(|_| Frame::from_reader(&mut cursor, length_field).unwrap())
            .collect();

        let mut decoded = Vec::new();
        let mut buf = BytesMut::new();
        for chunk in wire.chunks(7) {
            buf.extend_from_slice(chunk);
            while let Some(frame) = codec.decode(&mut buf).unwrap() {
                decoded.push(frame);
            }
        }

        assert_eq!(decoded, frames());
        assert_eq!(blocking, decoded);
        assert!(buf.is_empty());
    }
}

#[test]
fn codec_reports_short_length() {
    let mut buf = BytesMut::from(&[0xFEu8, 0x01, 0x21][..]);
    assert!(matches!(
        ZnpCodec::new(LengthField::Content).decode(&mut buf),
        Err(ReadError::InvalidLength(0x01))
    ));
    assert_eq!(&buf[..], &[0x21]);
}
