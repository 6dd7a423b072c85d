//! # ZNP Frame Library
//!
//! This crate implements the UART transport framing used by the CC2530 Zigbee Network
//! Processor (ZNP) and similar coordinator radios.
//!
//! ## Overview
//!
//! Every command and every reply travels in a small frame with a one byte length
//! and a one byte XOR checksum. This library allows you to:
//!
//! - Build request frames from hexadecimal text tokens
//! - Serialize frames to any [`std::io::Write`]
//! - Read and validate frames from byte streams that deliver partial reads
//! - Recognise which received frame answers a request
//!
//! ## Basic Usage
//!
//! ### Writing a Request
//!
//! ```
//! use znp_protocol::{Frame, LengthField};
//!
//! let frame = Frame::from_hex_args(&["21", "02", "01", "02"]).expect("Tokens are valid hex");
//! let mut buffer = Vec::new();
//! frame.write_to(&mut buffer, LengthField::Content).expect("Writing to vector shouldn't fail");
//! assert_eq!(buffer, [0xFE, 0x04, 0x21, 0x02, 0x01, 0x02, 0x04 ^ 0x21 ^ 0x02 ^ 0x01 ^ 0x02]);
//! ```
//!
//! ### Reading a Reply
//!
//! ```
//! use znp_protocol::{Frame, LengthField};
//! use std::io::Cursor;
//!
//! let request = Frame::new(0x01, 0x01, &[]).unwrap();
//! let mut reader = Cursor::new([0xFEu8, 0x03, 0x21, 0x01, 0x00, 0x03 ^ 0x21 ^ 0x01]);
//! let reply = Frame::from_reader(&mut reader, LengthField::Content).expect("Frame should parse");
//! assert_eq!(reply.to_string(), "21 01 00");
//! assert!(reply.answers(&request));
//! ```
//!
//! ## Frame Format
//!
//! ```text
//! +------+--------+-----------+---------+-------------------+-----+
//! | 0xFE | length | subsystem | command | payload (0..=253) | fcs |
//! +------+--------+-----------+---------+-------------------+-----+
//! ```
//!
//! - **length**: counts subsystem, command and payload ([`LengthField::Content`]) or the
//!   payload alone ([`LengthField::Payload`], the Z-Stack MT convention)
//! - **subsystem**: message type in the upper 3 bits, subsystem id in the lower 5 bits
//! - **fcs**: XOR of length, subsystem, command and every payload byte
//!
//! ## Error Handling
//!
//! Reading uses [`error::ReadError`]; building frames from text uses [`error::ParseError`].
//! No error is recovered from internally: a bad start byte or checksum is reported as-is.
//!
//! ## Features
//!
//! - `tokio`: a [`tokio_util::codec`] implementation in [`framed`]

pub mod frame;
pub use frame::*;
pub mod codec;
pub mod error;
#[cfg(feature = "tokio")]
pub mod framed;
pub mod read;
