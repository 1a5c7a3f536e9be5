//! The 32-bit values carried by frames.

use std::fmt;

use crate::kind::Kind;

/// Width of a payload in octets.
pub const PAYLOAD_SIZE: usize = 4;

/// Order in which a payload's octets enter the 7-bit packing.
///
/// Both ends of a link must agree. `Little` matches the little-endian
/// microcontrollers and hosts the protocol is used between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the build target.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    pub fn u32_to_octets(self, value: u32) -> [u8; PAYLOAD_SIZE] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub fn u32_from_octets(self, octets: [u8; PAYLOAD_SIZE]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(octets),
            ByteOrder::Big => u32::from_be_bytes(octets),
        }
    }
}

/// A typed 32-bit payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Address(u32),
    Data(f32),
}

impl Payload {
    pub const fn kind(&self) -> Kind {
        match self {
            Payload::Address(_) => Kind::Address,
            Payload::Data(_) => Kind::Data,
        }
    }

    /// Raw bit pattern of the value.
    pub fn to_bits(&self) -> u32 {
        match *self {
            Payload::Address(address) => address,
            Payload::Data(data) => data.to_bits(),
        }
    }

    /// Reinterpret raw bits as a payload of `kind`.
    pub fn from_bits(kind: Kind, bits: u32) -> Self {
        match kind {
            Kind::Address => Payload::Address(bits),
            Kind::Data => Payload::Data(f32::from_bits(bits)),
        }
    }

    pub fn to_bytes(&self, order: ByteOrder) -> [u8; PAYLOAD_SIZE] {
        order.u32_to_octets(self.to_bits())
    }

    pub fn from_bytes(kind: Kind, octets: [u8; PAYLOAD_SIZE], order: ByteOrder) -> Self {
        Self::from_bits(kind, order.u32_from_octets(octets))
    }

    pub fn as_address(&self) -> Option<u32> {
        match *self {
            Payload::Address(address) => Some(address),
            Payload::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<f32> {
        match *self {
            Payload::Data(data) => Some(data),
            Payload::Address(_) => None,
        }
    }
}

impl From<u32> for Payload {
    fn from(address: u32) -> Self {
        Payload::Address(address)
    }
}

impl From<f32> for Payload {
    fn from(data: f32) -> Self {
        Payload::Data(data)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Address(address) => write!(f, "address {address:#010x}"),
            Payload::Data(data) => write!(f, "data {data}"),
        }
    }
}
