//! Test support for the ZNP crates.
//!
//! [`MockLink`] stands in for a serial device. It hands out pre-loaded reply bytes in
//! small pieces and records every open, close, write and wait in order, so tests can
//! check the exact sequence of device operations.
use std::{
    collections::VecDeque,
    io::{self, ErrorKind, Read, Write},
    time::Duration,
};

use znp_client::Link;
use znp_protocol::{Frame, LengthField};

/// A device operation recorded by [`MockLink`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Op {
    Open,
    Close,
    Write(Vec<u8>),
    Wait(Duration),
}

#[derive(Debug)]
pub struct MockLink {
    open: bool,
    refuse_open: bool,
    incoming: VecDeque<u8>,
    chunk_size: usize,
    ops: Vec<Op>,
}

impl MockLink {
    /// A closed link with nothing to read that delivers one byte per read.
    pub fn new() -> MockLink {
        MockLink {
            open: false,
            refuse_open: false,
            incoming: VecDeque::new(),
            chunk_size: 1,
            ops: Vec::new(),
        }
    }

    /// Queues `frame` to be read back.
    pub fn push_frame(&mut self, frame: &Frame, length_field: LengthField) {
        self.push_bytes(&frame.to_bytes(length_field));
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes);
    }

    /// Sets the largest number of bytes a single read returns.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        assert!(chunk_size > 0);
        self.chunk_size = chunk_size;
    }

    /// Makes every following `open` fail.
    pub fn refuse_open(&mut self) {
        self.refuse_open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// All recorded operations, oldest first.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of queued bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.incoming.len()
    }

    fn check_open(&self) -> io::Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(io::Error::new(ErrorKind::NotConnected, "mock link is closed"))
        }
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for MockLink {
    /// Returns `Ok(0)` once the queue is drained.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.check_open()?;
        let n = buf.len().min(self.chunk_size).min(self.incoming.len());
        for (slot, byte) in buf.iter_mut().zip(self.incoming.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_open()?;
        self.ops.push(Op::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_open()
    }
}

impl Link for MockLink {
    fn open(&mut self) -> io::Result<()> {
        if self.refuse_open {
            return Err(io::Error::new(ErrorKind::NotFound, "no such device"));
        }
        self.open = true;
        self.ops.push(Op::Open);
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.ops.push(Op::Close);
    }

    fn wait(&mut self, duration: Duration) {
        self.ops.push(Op::Wait(duration));
    }
}
