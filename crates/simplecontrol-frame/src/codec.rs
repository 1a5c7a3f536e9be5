//! Packing of 32-bit values into 7-bit-clean frames.
//!
//! The four payload octets form a 32-bit stream, octet 0 first, least
//! significant bit first. Frame byte `i` carries stream bits `7i..=7i+6`
//! in its low seven bits:
//!
//! ```text
//! frame byte    0          1          2          3          4
//!            ┌─┬───────┬─┬───────┬─┬───────┬─┬───────┬─┬───┬────┐
//!            │T│ 0..6  │T│ 7..13 │T│14..20 │T│21..27 │T│PPP│28..│
//!            └─┴───────┴─┴───────┴─┴───────┴─┴───────┴─┴───┴────┘
//! T   = tag bit (1 address, 0 data), identical in all five bytes
//! PPP = padding bits, always 111
//! ```
//!
//! Address frames therefore end in an upper nibble of `1111`, data frames
//! in `0111`.

use tracing::trace;

use crate::frame::{Frame, FRAME_SIZE};
use crate::kind::{Class, Kind, PADDING_MASK, PAYLOAD_MASK, TAG_MASK};
use crate::payload::{ByteOrder, Payload, PAYLOAD_SIZE};

/// Masked slice of one source byte, shifted into place.
#[derive(Debug, Clone, Copy)]
struct Slice {
    index: usize,
    mask: u8,
    shift: u32,
}

impl Slice {
    const fn new(index: usize, mask: u8, shift: u32) -> Self {
        Self { index, mask, shift }
    }
}

/// Lower slice is shifted right, upper slice left.
#[derive(Debug, Clone, Copy)]
struct Lane {
    lower: Slice,
    upper: Option<Slice>,
}

impl Lane {
    fn gather(&self, src: &[u8]) -> u8 {
        let lower = (src[self.lower.index] & self.lower.mask) >> self.lower.shift;
        let upper = self
            .upper
            .map_or(0, |slice| (src[slice.index] & slice.mask) << slice.shift);
        lower | upper
    }
}

/// Payload octets to frame bytes.
const ENCODE_LANES: [Lane; FRAME_SIZE] = [
    Lane {
        lower: Slice::new(0, 0b0111_1111, 0),
        upper: None,
    },
    Lane {
        lower: Slice::new(0, 0b1000_0000, 7),
        upper: Some(Slice::new(1, 0b0011_1111, 1)),
    },
    Lane {
        lower: Slice::new(1, 0b1100_0000, 6),
        upper: Some(Slice::new(2, 0b0001_1111, 2)),
    },
    Lane {
        lower: Slice::new(2, 0b1110_0000, 5),
        upper: Some(Slice::new(3, 0b0000_1111, 3)),
    },
    Lane {
        lower: Slice::new(3, 0b1111_0000, 4),
        upper: None,
    },
];

/// Frame bytes to payload octets. Masks never reach the tag bit.
const DECODE_LANES: [Lane; PAYLOAD_SIZE] = [
    Lane {
        lower: Slice::new(0, 0b0111_1111, 0),
        upper: Some(Slice::new(1, 0b0000_0001, 7)),
    },
    Lane {
        lower: Slice::new(1, 0b0111_1110, 1),
        upper: Some(Slice::new(2, 0b0000_0011, 6)),
    },
    Lane {
        lower: Slice::new(2, 0b0111_1100, 2),
        upper: Some(Slice::new(3, 0b0000_0111, 5)),
    },
    Lane {
        lower: Slice::new(3, 0b0111_1000, 3),
        upper: Some(Slice::new(4, 0b0000_1111, 4)),
    },
];

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Order in which payload octets are packed. Default: little-endian.
    pub byte_order: ByteOrder,
}

/// Encoder/decoder bound to a [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub const fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self::new(CodecConfig { byte_order })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Pack raw bits as a frame of `kind`.
    pub fn encode(&self, bits: u32, kind: Kind) -> Frame {
        let frame = encode_octets(self.config.byte_order.u32_to_octets(bits), kind);
        trace!(bits, %kind, %frame, "encoded frame");
        frame
    }

    /// Unpack a frame's raw bits, ignoring its tag and padding.
    pub fn decode_bits(&self, frame: &Frame) -> u32 {
        let bits = self.config.byte_order.u32_from_octets(decode_octets(frame));
        trace!(bits, %frame, "decoded frame");
        bits
    }

    /// Unpack a frame as a payload of `kind`, whatever its tag bits say.
    pub fn decode(&self, frame: &Frame, kind: Kind) -> Payload {
        Payload::from_bits(kind, self.decode_bits(frame))
    }

    pub fn encode_payload(&self, payload: &Payload) -> Frame {
        self.encode(payload.to_bits(), payload.kind())
    }

    /// Classify, then decode. `None` for invalid frames.
    pub fn decode_payload(&self, frame: &Frame) -> Option<Payload> {
        classify(frame).kind().map(|kind| self.decode(frame, kind))
    }
}

/// Pack four payload octets into a frame of `kind`.
pub fn encode_octets(octets: [u8; PAYLOAD_SIZE], kind: Kind) -> Frame {
    let tag = kind.tag_bit();
    let mut bytes = [0u8; FRAME_SIZE];
    for (byte, lane) in bytes.iter_mut().zip(ENCODE_LANES.iter()) {
        *byte = (lane.gather(&octets) & PAYLOAD_MASK) | tag;
    }

    let last = &mut bytes[FRAME_SIZE - 1];
    *last = (*last & !PADDING_MASK) | kind.padding();

    Frame::from_bytes(bytes)
}

/// Recover the four payload octets. Tag and padding bits are discarded.
pub fn decode_octets(frame: &Frame) -> [u8; PAYLOAD_SIZE] {
    let mut clean = *frame.as_bytes();
    for byte in clean.iter_mut() {
        *byte &= PAYLOAD_MASK;
    }

    let mut octets = [0u8; PAYLOAD_SIZE];
    for (octet, lane) in octets.iter_mut().zip(DECODE_LANES.iter()) {
        *octet = lane.gather(&clean);
    }
    octets
}

/// Encode with the default (little-endian) configuration.
pub fn encode(bits: u32, kind: Kind) -> Frame {
    Codec::default().encode(bits, kind)
}

/// Decode with the default (little-endian) configuration.
pub fn decode(frame: &Frame, kind: Kind) -> Payload {
    Codec::default().decode(frame, kind)
}

pub fn encode_payload(payload: &Payload) -> Frame {
    Codec::default().encode_payload(payload)
}

pub fn decode_payload(frame: &Frame) -> Option<Payload> {
    Codec::default().decode_payload(frame)
}

/// Decide whether a frame is an address frame, a data frame, or invalid.
///
/// All five tag bits must agree and the last byte's upper nibble must
/// match the padding of that tag.
pub fn classify(frame: &Frame) -> Class {
    let bytes = frame.as_bytes();
    let tag = bytes[0] & TAG_MASK;
    if bytes.iter().any(|byte| byte & TAG_MASK != tag) {
        return Class::Invalid;
    }

    let kind = if tag == Kind::Address.tag_bit() {
        Kind::Address
    } else {
        Kind::Data
    };
    if frame.last() & PADDING_MASK != kind.padding() {
        return Class::Invalid;
    }

    Class::from(kind)
}

pub fn is_correct(frame: &Frame) -> bool {
    classify(frame).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{ADDRESS_PADDING, DATA_PADDING};

    const KINDS: [Kind; 2] = [Kind::Address, Kind::Data];
    const ORDERS: [ByteOrder; 2] = [ByteOrder::Little, ByteOrder::Big];

    /// Edge values plus a strided sweep across the whole `u32` range.
    fn sample_values() -> impl Iterator<Item = u32> {
        let edges = [
            0,
            1,
            0x7F,
            0x80,
            0xFF,
            0x100,
            0x0FFF_FFFF,
            0x1000_0000,
            0x7FFF_FFFF,
            0x8000_0000,
            0xAAAA_AAAA,
            0x5555_5555,
            0xFFFF_FFFE,
            u32::MAX,
        ];
        let single_bits = (0..32).map(|bit| 1u32 << bit);
        let sweep = (0..=u32::MAX).step_by(65_521);
        edges.into_iter().chain(single_bits).chain(sweep)
    }

    #[test]
    fn roundtrip_all_kinds_and_orders() {
        for order in ORDERS {
            let codec = Codec::with_byte_order(order);
            for value in sample_values() {
                for kind in KINDS {
                    let frame = codec.encode(value, kind);
                    assert_eq!(
                        codec.decode_bits(&frame),
                        value,
                        "{value:#x} {kind} {order:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn encoded_frames_classify_as_their_kind() {
        for value in sample_values() {
            for kind in KINDS {
                let frame = encode(value, kind);
                assert_eq!(classify(&frame), Class::from(kind), "{value:#x}");
            }
        }
    }

    #[test]
    fn each_payload_bit_lands_in_its_frame_position() {
        for bit in 0..32u32 {
            let frame = encode(1 << bit, Kind::Data);
            let byte = (bit / 7) as usize;
            let pos = bit % 7;
            for (i, b) in frame.iter().enumerate() {
                let payload_bits = if i == FRAME_SIZE - 1 {
                    b & 0x0F
                } else {
                    b & PAYLOAD_MASK
                };
                let expected = if i == byte { 1u8 << pos } else { 0 };
                assert_eq!(payload_bits, expected, "bit {bit} byte {i}");
            }
        }
    }

    #[test]
    fn address_zero_vector() {
        let frame = encode(0, Kind::Address);
        assert_eq!(frame.into_bytes(), [0x80, 0x80, 0x80, 0x80, 0xF0]);
        assert!(frame.iter().all(|b| b & TAG_MASK != 0));
        assert_eq!(frame.last() & PADDING_MASK, ADDRESS_PADDING);
    }

    #[test]
    fn data_all_ones_vector() {
        let frame = encode(u32::MAX, Kind::Data);
        assert_eq!(frame.into_bytes(), [0x7F; FRAME_SIZE]);
        assert!(frame.iter().all(|b| b & TAG_MASK == 0));
        assert_eq!(frame.last() & PADDING_MASK, DATA_PADDING);
    }

    #[test]
    fn address_known_vector() {
        let frame = encode(0x1234_5678, Kind::Address);
        assert_eq!(frame.into_bytes(), [0xF8, 0xAC, 0xD1, 0x91, 0xF1]);
        assert_eq!(decode(&frame, Kind::Address), Payload::Address(0x1234_5678));
    }

    #[test]
    fn big_endian_packs_octets_in_reverse() {
        let codec = Codec::with_byte_order(ByteOrder::Big);
        let frame = codec.encode(0x1234_5678, Kind::Data);
        assert_eq!(frame.into_bytes(), [0x12, 0x68, 0x58, 0x42, 0x77]);
        assert_eq!(codec.decode_bits(&frame), 0x1234_5678);
    }

    #[test]
    fn data_float_vector() {
        let frame = encode_payload(&Payload::Data(1.0));
        assert_eq!(frame.into_bytes(), [0x00, 0x00, 0x00, 0x7C, 0x73]);
        assert_eq!(decode_payload(&frame), Some(Payload::Data(1.0)));

        let frame = encode_payload(&Payload::Data(0.3894));
        assert_eq!(frame.into_bytes(), [0x70, 0x3E, 0x1D, 0x76, 0x73]);
        assert_eq!(decode_payload(&frame), Some(Payload::Data(0.3894)));
    }

    #[test]
    fn reference_fixtures_classify() {
        let address = Frame::from_bytes([
            0b1000_0000,
            0b1000_0110,
            0b1001_1100,
            0b1000_0000,
            0b1111_0110,
        ]);
        assert_eq!(classify(&address), Class::Address);
        assert_eq!(decode(&address, Kind::Address), Payload::Address(0x6007_0300));

        let data = Frame::from_bytes([
            0b0110_0100,
            0b0111_1111,
            0b0011_0010,
            0b0100_1111,
            0b0111_0010,
        ]);
        assert_eq!(classify(&data), Class::Data);
        assert_eq!(decode(&data, Kind::Data).to_bits(), 0x29EC_BFE4);
    }

    #[test]
    fn flipping_one_tag_bit_invalidates() {
        for value in [0, 0x1234_5678, u32::MAX] {
            for kind in KINDS {
                let frame = encode(value, kind);
                for i in 0..FRAME_SIZE - 1 {
                    let mut corrupted = frame;
                    *corrupted.get_mut(i).unwrap() ^= TAG_MASK;
                    assert_eq!(classify(&corrupted), Class::Invalid, "{kind} byte {i}");
                }
            }
        }
    }

    #[test]
    fn flipping_last_tag_bit_invalidates() {
        for kind in KINDS {
            let mut frame = encode(0x0BAD_F00D, kind);
            *frame.get_mut(FRAME_SIZE - 1).unwrap() ^= TAG_MASK;
            assert_eq!(classify(&frame), Class::Invalid);
        }
    }

    #[test]
    fn corrupted_padding_invalidates() {
        for kind in KINDS {
            let frame = encode(0xDEAD_BEEF, kind);
            for bit in 4..7 {
                let mut corrupted = frame;
                *corrupted.get_mut(FRAME_SIZE - 1).unwrap() ^= 1 << bit;
                assert_eq!(classify(&corrupted), Class::Invalid, "{kind} padding bit {bit}");
                assert!(!corrupted.is_correct());
            }
        }
    }

    #[test]
    fn zero_frame_is_invalid() {
        let frame = Frame::new();
        assert_eq!(classify(&frame), Class::Invalid);
        assert_eq!(decode_payload(&frame), None);
    }

    #[test]
    fn no_frame_is_both_address_and_data() {
        // xorshift over frame space, plus every possible last byte.
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        for _ in 0..200_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let b = state.to_le_bytes();
            let frame = Frame::from_bytes([b[0], b[1], b[2], b[3], b[4]]);
            assert!(!(frame.is_address() && frame.is_data()));
        }
        for last in 0..=u8::MAX {
            for fill in [0x00, 0x80] {
                let frame = Frame::from_bytes([fill, fill, fill, fill, last]);
                assert!(!(frame.is_address() && frame.is_data()));
                let expect = match (fill, last & PADDING_MASK) {
                    (0x80, ADDRESS_PADDING) => Class::Address,
                    (0x00, DATA_PADDING) => Class::Data,
                    _ => Class::Invalid,
                };
                assert_eq!(classify(&frame), expect, "{fill:#x} {last:#x}");
            }
        }
    }

    #[test]
    fn decode_ignores_tag_bits() {
        let data = encode(0x0102_0304, Kind::Data);
        let address = encode(0x0102_0304, Kind::Address);
        assert_eq!(decode_octets(&data), decode_octets(&address));
        assert_eq!(decode(&data, Kind::Address), Payload::Address(0x0102_0304));
    }

    #[test]
    fn decode_is_total_on_garbage() {
        let frame = Frame::from_bytes([0xFF; FRAME_SIZE]);
        assert_eq!(Codec::default().decode_bits(&frame), u32::MAX);
    }

    #[test]
    fn concurrent_calls_agree() {
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                std::thread::spawn(move || {
                    for v in (t..1_000_000).step_by(9_973) {
                        let frame = encode(v, Kind::Address);
                        assert_eq!(Codec::default().decode_bits(&frame), v);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
