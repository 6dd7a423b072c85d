/// Read and write implementations for frames
use std::io::{self, Read, Write};

use crate::{
    error::ReadError,
    frame::{Frame, LengthField, SOF},
    read::ExactReader,
};

impl Frame {
    /// The complete wire representation: SOF, length, subsystem, command, payload and FCS.
    pub fn to_bytes(&self, length_field: LengthField) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.payload().len() + 5);
        bytes.push(SOF);
        bytes.push(length_field.encode(self.payload().len()));
        bytes.push(self.subsystem());
        bytes.push(self.command());
        bytes.extend_from_slice(self.payload());
        bytes.push(self.fcs(length_field));
        bytes
    }

    pub fn write_to(&self, writer: &mut impl Write, length_field: LengthField) -> io::Result<()> {
        writer.write_all(&self.to_bytes(length_field))
    }

    /// Reads one frame, blocking until it is complete.
    ///
    /// There is no attempt to resynchronise: if the first byte is not [`SOF`] the read fails
    /// after consuming exactly that byte.
    pub fn from_reader(
        reader: &mut impl Read,
        length_field: LengthField,
    ) -> Result<Frame, ReadError> {
        let mut reader = ExactReader::new(reader);

        let [sof] = reader.read_array::<1>()?;
        if sof != SOF {
            return Err(ReadError::UnexpectedSof(sof));
        }

        let [length, subsystem, command] = reader.read_array::<3>()?;
        let payload = reader.read_vec(length_field.payload_len(length)?)?;
        let [fcs] = reader.read_array::<1>()?;

        let expected = payload
            .iter()
            .fold(length ^ subsystem ^ command, |acc, b| acc ^ b);
        if expected != fcs {
            return Err(ReadError::ChecksumMismatch {
                expected,
                actual: fcs,
            });
        }

        // The length check above keeps the payload within bounds.
        Frame::new(subsystem, command, &payload).map_err(|_| ReadError::InvalidLength(length))
    }
}
