use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};
use tracing::debug;

use crate::codec::{Codec, CodecConfig};
use crate::error::{FrameError, Result};
use crate::frame::{Frame, FRAME_SIZE};
use crate::payload::Payload;

const INITIAL_BUFFER_CAPACITY: usize = 64;
const READ_CHUNK_SIZE: usize = 64;

/// Reads whole frames from any `Read` stream.
///
/// Handles partial reads internally. Frame boundaries are taken as every
/// fifth byte from the start of the stream.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    codec: Codec,
    dropped: u64,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            codec: Codec::new(config),
            dropped: 0,
        }
    }

    /// Read the next five bytes as a frame (blocking). No validation.
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` on EOF at a frame
    /// boundary and `Err(FrameError::Truncated)` on EOF inside a frame.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if self.buf.len() >= FRAME_SIZE {
                let frame = Frame::try_from(&self.buf[..FRAME_SIZE])?;
                self.buf.advance(FRAME_SIZE);
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Err(FrameError::ConnectionClosed);
                }
                return Err(FrameError::Truncated {
                    received: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read frames until one classifies, and decode it.
    ///
    /// Invalid frames are skipped and counted in [`FrameReader::dropped`].
    pub fn read_payload(&mut self) -> Result<Payload> {
        loop {
            let frame = self.read_frame()?;
            match self.codec.decode_payload(&frame) {
                Some(payload) => return Ok(payload),
                None => {
                    self.dropped += 1;
                    debug!(%frame, dropped = self.dropped, "dropping invalid frame");
                }
            }
        }
    }

    /// Number of invalid frames skipped by [`FrameReader::read_payload`].
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current codec configuration.
    pub fn config(&self) -> &CodecConfig {
        self.codec.config()
    }
}
