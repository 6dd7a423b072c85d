//! Exact-count reads on top of streams that deliver data in arbitrary pieces.
//!
//! A serial device hands out whatever has arrived so far, so a single `read` routinely
//! returns fewer bytes than asked for. [`ExactReader`] keeps reading until the requested
//! count is satisfied. It only depends on [`std::io::Read`], so it works with anything
//! from a `Cursor` in tests to a polled file descriptor.
use std::io::{self, ErrorKind, Read};

/// Wraps a reader and fills buffers completely, one underlying `read` at a time.
#[derive(Debug)]
pub struct ExactReader<'r, R: Read + ?Sized> {
    inner: &'r mut R,
    reads: usize,
}

impl<'r, R: Read + ?Sized> ExactReader<'r, R> {
    pub fn new(inner: &'r mut R) -> ExactReader<'r, R> {
        ExactReader { inner, reads: 0 }
    }

    /// Number of underlying `read` calls that returned data so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Fills `buf` entirely.
    ///
    /// Interrupted reads are repeated. Any other error ends the read immediately,
    /// as does a stream that reports end-of-file before `buf` is full.
    pub fn fill(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut offset = 0;
        while offset < buf.len() {
            match self.inner.read(&mut buf[offset..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        format!(
                            "Stream ended after {} of {} bytes",
                            offset,
                            buf.len()
                        ),
                    ));
                }
                Ok(n) => {
                    offset += n;
                    self.reads += 1;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `len` bytes into a new vector.
    pub fn read_vec(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod test {
    use super::ExactReader;
    use std::io::{self, ErrorKind, Read};

    /// Hands out at most one byte per call.
    struct Trickle<'a> {
        data: &'a [u8],
        interrupt_next: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            self.interrupt_next = true;
            match self.data.split_first() {
                Some((first, rest)) if !buf.is_empty() => {
                    buf[0] = *first;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn single_byte_deliveries() {
        let data = [0x10, 0x20, 0x30, 0x40, 0x50];
        let mut trickle = Trickle {
            data: &data,
            interrupt_next: false,
        };
        let mut reader = ExactReader::new(&mut trickle);
        assert_eq!(reader.read_vec(4).unwrap(), vec![0x10, 0x20, 0x30, 0x40]);
        assert_eq!(reader.reads(), 4);
        assert_eq!(reader.read_array::<1>().unwrap(), [0x50]);
    }

    #[test]
    fn zero_length_reads_nothing() {
        let mut cursor = io::Cursor::new(vec![1u8]);
        let mut reader = ExactReader::new(&mut cursor);
        assert!(reader.read_vec(0).unwrap().is_empty());
        assert_eq!(reader.reads(), 0);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn short_stream_is_eof() {
        let mut cursor = io::Cursor::new(vec![1u8, 2]);
        let err = ExactReader::new(&mut cursor).read_vec(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn errors_are_not_retried() {
        struct Broken(usize);
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                self.0 += 1;
                Err(io::Error::other("device gone"))
            }
        }
        let mut broken = Broken(0);
        let err = ExactReader::new(&mut broken).read_vec(2).unwrap_err();
        assert_eq!(err.to_string(), "device gone");
        assert_eq!(broken.0, 1);
    }
}
