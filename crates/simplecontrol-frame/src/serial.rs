//! `tokio_util` codec for frame streams (requires the `async` feature).

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{Codec, CodecConfig};
use crate::error::{FrameError, Result};
use crate::frame::{Frame, FRAME_SIZE};
use crate::payload::Payload;

/// Splits a byte stream into frames and encodes frames or payloads.
///
/// Decoding yields raw frames; callers classify them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialCodec {
    codec: Codec,
}

impl SerialCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            codec: Codec::new(config),
        }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}

impl Decoder for SerialCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if src.len() < FRAME_SIZE {
            src.reserve(FRAME_SIZE - src.len());
            return Ok(None);
        }
        let frame = Frame::try_from(&src[..FRAME_SIZE])?;
        src.advance(FRAME_SIZE);
        Ok(Some(frame))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::Truncated {
                received: src.len(),
            }),
        }
    }
}

impl Encoder<Frame> for SerialCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(FRAME_SIZE);
        dst.put_slice(frame.as_bytes());
        Ok(())
    }
}

impl Encoder<Payload> for SerialCodec {
    type Error = FrameError;

    fn encode(&mut self, payload: Payload, dst: &mut BytesMut) -> Result<()> {
        let frame = self.codec.encode_payload(&payload);
        Encoder::<Frame>::encode(self, frame, dst)
    }
}
