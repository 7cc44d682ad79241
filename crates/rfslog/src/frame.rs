//! Fixed-size frame decoding from a byte stream.
//!
//! Every frame in a flight dump is exactly [`FRAME_LEN`] bytes, big-endian:
//!
//! ```text
//! [value: i32][field_id: u8][timestamp: u24]
//! ```
//!
//! The reader distinguishes a clean end of stream (no bytes at a frame
//! boundary) from a truncated final frame, which is always an error.

use std::io::{ErrorKind, Read};

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};

/// Size of one frame on the wire.
pub const FRAME_LEN: usize = 8;

/// Largest value a 24-bit timestamp can hold.
pub const TIMESTAMP_MAX: u32 = 0x00FF_FFFF;

/// One decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Raw signed value, before any scaling.
    pub raw_value: i32,
    /// Field id selecting what `raw_value` measures.
    pub field_id: u8,
    /// Recorder timestamp, 24 bits.
    pub timestamp: u32,
}

impl Frame {
    /// Decode a frame from its wire bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self {
            raw_value: i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            field_id: bytes[4],
            timestamp: u32::from_be_bytes([0, bytes[5], bytes[6], bytes[7]]),
        }
    }
}

/// Pulls frames off any [`Read`] source.
///
/// Also usable as an iterator of `Result<Frame>`; iteration stops at the
/// end of the stream or after the first error.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    offset: u64,
    frames_read: u64,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    /// Wrap a byte stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            frames_read: 0,
            done: false,
        }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Complete frames decoded so far.
    #[must_use]
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` when the stream ends exactly on a frame boundary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] if the stream ends inside a frame, or
    /// [`Error::Io`] if the underlying read fails.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut buf = [0u8; FRAME_LEN];
        let filled = self.fill(&mut buf)?;

        if filled == 0 {
            return Ok(None);
        }
        if filled < FRAME_LEN {
            return Err(Error::Truncated {
                offset: self.offset,
                available: filled,
            });
        }

        let frame = Frame::from_bytes(buf);
        trace!(
            offset = self.offset,
            id = frame.field_id,
            value = frame.raw_value,
            timestamp = frame.timestamp,
            "frame"
        );
        self.offset += FRAME_LEN as u64;
        self.frames_read += 1;
        Ok(Some(frame))
    }

    /// Read until `buf` is full or the stream reports EOF.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
