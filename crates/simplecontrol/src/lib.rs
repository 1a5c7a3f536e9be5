//! Address/data framing for constrained serial links.
//!
//! A 32-bit address or float travels as five 7-bit-clean bytes that name
//! their own kind. See [`frame`] for the codec.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame container, codec, classification, stream adapters

/// Re-export frame types.
pub mod frame {
    pub use simplecontrol_frame::*;
}

pub use simplecontrol_frame::{classify, decode, encode, Class, Frame, Kind, Payload};
