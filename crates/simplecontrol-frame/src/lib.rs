//! Self-describing 7-bit-clean framing for 32-bit values.
//!
//! Every value travels as exactly five bytes. Each byte carries seven
//! payload bits; bit 7 tags the frame as address (1) or data (0):
//! - An address is an unsigned 32-bit integer
//! - Data is an IEEE-754 single-precision float
//!
//! The receiver recovers the kind from the frame alone with [`classify`].

pub mod codec;
pub mod error;
pub mod frame;
pub mod kind;
pub mod payload;
pub mod reader;
#[cfg(feature = "async")]
pub mod serial;
pub mod writer;

pub use codec::{
    classify, decode, decode_octets, decode_payload, encode, encode_octets, encode_payload,
    is_correct, Codec, CodecConfig,
};
pub use error::{FrameError, Result};
pub use frame::{Frame, FRAME_SIZE};
pub use kind::{Class, Kind};
pub use payload::{ByteOrder, Payload, PAYLOAD_SIZE};
pub use reader::FrameReader;
#[cfg(feature = "async")]
pub use serial::SerialCodec;
pub use writer::FrameWriter;
