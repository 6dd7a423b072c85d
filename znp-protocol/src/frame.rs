use std::fmt::Display;

use crate::error::{ParseError, ReadError};

/// Start-of-frame marker preceding every frame on the wire.
pub const SOF: u8 = 0xFE;

/// Bit within the subsystem byte that marks a synchronous response.
pub const SYNC_RESPONSE_BIT: u8 = 0x20;

/// The largest payload a single frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 253;

const TYPE_MASK: u8 = 0xE0;
const SUBSYSTEM_MASK: u8 = 0x1F;

/// How the length byte of a frame is interpreted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LengthField {
    /// The length counts subsystem byte, command id and payload.
    #[default]
    Content,
    /// The length counts the payload only, as Z-Stack MT firmware does.
    Payload,
}

impl LengthField {
    /// The length byte for a payload of `payload_len` bytes.
    /// `payload_len` must not exceed [`MAX_PAYLOAD_LEN`].
    pub fn encode(self, payload_len: usize) -> u8 {
        debug_assert!(payload_len <= MAX_PAYLOAD_LEN);
        match self {
            LengthField::Content => (payload_len + 2) as u8,
            LengthField::Payload => payload_len as u8,
        }
    }

    /// The number of payload bytes that follow the header for a received length byte.
    ///
    /// Payloads are capped at [`MAX_PAYLOAD_LEN`] in both conventions, so with
    /// [`LengthField::Payload`] the length bytes 254 and 255 are rejected as well.
    pub fn payload_len(self, length: u8) -> Result<usize, ReadError> {
        let payload_len = match self {
            LengthField::Content => length.checked_sub(2).map(usize::from),
            LengthField::Payload => Some(usize::from(length)),
        };
        payload_len
            .filter(|len| *len <= MAX_PAYLOAD_LEN)
            .ok_or(ReadError::InvalidLength(length))
    }
}

/// The message type encoded in the upper three bits of the subsystem byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageType {
    Poll,
    /// Synchronous request
    Sreq,
    /// Asynchronous request or indication
    Areq,
    /// Synchronous response
    Srsp,
    Reserved(u8),
}

impl MessageType {
    pub fn from_subsystem_byte(byte: u8) -> MessageType {
        match byte & TYPE_MASK {
            0x00 => MessageType::Poll,
            0x20 => MessageType::Sreq,
            0x40 => MessageType::Areq,
            0x60 => MessageType::Srsp,
            other => MessageType::Reserved(other),
        }
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Poll => write!(f, "POLL"),
            MessageType::Sreq => write!(f, "SREQ"),
            MessageType::Areq => write!(f, "AREQ"),
            MessageType::Srsp => write!(f, "SRSP"),
            MessageType::Reserved(bits) => write!(f, "RESERVED({:02x})", bits),
        }
    }
}

/// Name of a Z-Stack MT subsystem id, if it is a known one.
pub fn subsystem_name(id: u8) -> Option<&'static str> {
    let name = match id {
        0x00 => "RPC_ERROR",
        0x01 => "SYS",
        0x02 => "MAC",
        0x03 => "NWK",
        0x04 => "AF",
        0x05 => "ZDO",
        0x06 => "SAPI",
        0x07 => "UTIL",
        0x08 => "DEBUG",
        0x09 => "APP",
        0x0F => "APP_CNF",
        0x15 => "GREENPOWER",
        _ => return None,
    };
    Some(name)
}

/// Parses one or two hexadecimal digits into a byte, e.g. `21` or `f`.
pub fn parse_hex_byte(token: &str) -> Result<u8, ParseError> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHex(token.to_string()));
    }
    u8::from_str_radix(token, 16).map_err(|_| ParseError::InvalidHex(token.to_string()))
}

/// A single frame exchanged with the network processor.
///
/// The frame holds everything between the length byte and the frame check sequence.
/// Both of those are derived when the frame is written.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Frame {
    subsystem: u8,
    command: u8,
    payload: Box<[u8]>,
}

impl Frame {
    /// Creates a frame, rejecting payloads longer than [`MAX_PAYLOAD_LEN`].
    pub fn new(subsystem: u8, command: u8, payload: &[u8]) -> Result<Frame, ParseError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(ParseError::PayloadTooLong {
                max: MAX_PAYLOAD_LEN,
                got: payload.len(),
            });
        }
        Ok(Frame {
            subsystem,
            command,
            payload: payload.into(),
        })
    }

    /// Builds a frame from hexadecimal tokens: subsystem byte, command id and payload bytes.
    pub fn from_hex_args<S: AsRef<str>>(args: &[S]) -> Result<Frame, ParseError> {
        if args.len() < 2 {
            return Err(ParseError::MissingArguments { got: args.len() });
        }
        let bytes = args
            .iter()
            .map(|arg| parse_hex_byte(arg.as_ref()))
            .collect::<Result<Vec<u8>, ParseError>>()?;
        Frame::new(bytes[0], bytes[1], &bytes[2..])
    }

    /// The full subsystem byte, including the message type bits.
    pub fn subsystem(&self) -> u8 {
        self.subsystem
    }

    /// The subsystem id without the message type bits.
    pub fn subsystem_id(&self) -> u8 {
        self.subsystem & SUBSYSTEM_MASK
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::from_subsystem_byte(self.subsystem)
    }

    pub fn command(&self) -> u8 {
        self.command
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The frame check sequence: XOR over length byte, subsystem byte, command id and payload.
    pub fn fcs(&self, length_field: LengthField) -> u8 {
        let length = length_field.encode(self.payload.len());
        self.payload
            .iter()
            .fold(length ^ self.subsystem ^ self.command, |acc, b| acc ^ b)
    }

    /// Whether this is the `SYS_RESET_REQ` command that restarts the module.
    pub fn is_reset_request(&self) -> bool {
        self.subsystem == 0x41 && self.command == 0x00
    }

    /// Whether this frame answers `request`.
    /// There are no sequence numbers, so a reply is recognised by its subsystem byte alone.
    pub fn answers(&self, request: &Frame) -> bool {
        self.subsystem == request.subsystem
            || self.subsystem == request.subsystem | SYNC_RESPONSE_BIT
    }
}

/// Formats the frame as space-separated lowercase hex, without length and FCS.
impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x} {:02x}", self.subsystem, self.command)?;
        for b in self.payload.iter() {
            write!(f, " {:02x}", b)?;
        }
        Ok(())
    }
}
