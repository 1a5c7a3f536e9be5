//! Payload kinds and frame classes.
//!
//! Each frame byte carries its kind in bit 7 (the tag bit). The upper
//! nibble of the last byte repeats the kind as a padding pattern.

use std::fmt;
use std::str::FromStr;

/// Tag bit of every byte in an address frame.
pub const ADDRESS_TAG: u8 = 0b1000_0000;

/// Tag bit of every byte in a data frame.
pub const DATA_TAG: u8 = 0b0000_0000;

/// Mask selecting the tag bit of a frame byte.
pub const TAG_MASK: u8 = 0b1000_0000;

/// Mask selecting the seven payload bits of a frame byte.
pub const PAYLOAD_MASK: u8 = 0b0111_1111;

/// Last-byte upper nibble of an address frame.
pub const ADDRESS_PADDING: u8 = 0b1111_0000;

/// Last-byte upper nibble of a data frame.
pub const DATA_PADDING: u8 = 0b0111_0000;

/// Mask selecting the padding nibble (tag bit included) of the last byte.
pub const PADDING_MASK: u8 = 0b1111_0000;

/// The kind of 32-bit value a frame carries, chosen by the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Unsigned 32-bit address.
    Address,
    /// IEEE-754 single-precision value.
    Data,
}

impl Kind {
    /// The tag bit written into every byte of a frame of this kind.
    pub const fn tag_bit(self) -> u8 {
        match self {
            Kind::Address => ADDRESS_TAG,
            Kind::Data => DATA_TAG,
        }
    }

    /// The pattern written into the last byte's upper nibble.
    pub const fn padding(self) -> u8 {
        match self {
            Kind::Address => ADDRESS_PADDING,
            Kind::Data => DATA_PADDING,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Address => "address",
            Kind::Data => "data",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "address" | "addr" | "a" => Ok(Kind::Address),
            "data" | "d" => Ok(Kind::Data),
            other => Err(format!("unknown kind: {other}")),
        }
    }
}

/// Result of inspecting a received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Address,
    Data,
    /// Mixed tag bits, or a padding nibble that does not match the tag.
    Invalid,
}

impl Class {
    /// The kind this class decodes as, or `None` for [`Class::Invalid`].
    pub const fn kind(self) -> Option<Kind> {
        match self {
            Class::Address => Some(Kind::Address),
            Class::Data => Some(Kind::Data),
            Class::Invalid => None,
        }
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, Class::Invalid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Class::Address => "address",
            Class::Data => "data",
            Class::Invalid => "invalid",
        }
    }
}

impl From<Kind> for Class {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Address => Class::Address,
            Kind::Data => Class::Data,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
