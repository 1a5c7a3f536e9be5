use std::io::{ErrorKind, Write};

use crate::codec::{Codec, CodecConfig};
use crate::error::{FrameError, Result};
use crate::frame::Frame;
use crate::payload::Payload;

/// Writes whole frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    codec: Codec,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            codec: Codec::new(config),
        }
    }

    /// Write a complete frame (blocking) and flush.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let bytes = frame.as_bytes();
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Encode a payload and write its frame.
    pub fn send(&mut self, payload: &Payload) -> Result<()> {
        let frame = self.codec.encode_payload(payload);
        self.write_frame(&frame)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current codec configuration.
    pub fn config(&self) -> &CodecConfig {
        self.codec.config()
    }
}
