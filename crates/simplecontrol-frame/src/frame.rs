use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::error::{FrameError, Result};
use crate::kind::Class;

/// Number of bytes in every frame on the wire.
pub const FRAME_SIZE: usize = 5;

/// A fixed 5-byte wire frame.
///
/// Construction never validates; [`Frame::classify`] decides whether the
/// bytes form an address frame, a data frame, or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    bytes: [u8; FRAME_SIZE],
}

impl Frame {
    pub const SIZE: usize = FRAME_SIZE;

    /// An all-zero frame.
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_SIZE],
        }
    }

    /// Wrap bytes as received from a transport.
    pub const fn from_bytes(bytes: [u8; FRAME_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a frame from a sequence of any length.
    ///
    /// Longer input is truncated to the first five bytes, shorter input is
    /// zero-filled.
    pub fn from_slice_truncating(src: &[u8]) -> Self {
        let mut frame = Self::new();
        let n = src.len().min(FRAME_SIZE);
        frame.bytes[..n].copy_from_slice(&src[..n]);
        frame
    }

    /// Read the byte at `index`.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.bytes
            .get(index)
            .copied()
            .ok_or(FrameError::OutOfRange {
                index,
                len: FRAME_SIZE,
            })
    }

    /// Overwrite the byte at `index`.
    pub fn set(&mut self, index: usize, byte: u8) -> Result<()> {
        *self.get_mut(index)? = byte;
        Ok(())
    }

    /// Mutably borrow the byte at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut u8> {
        self.bytes.get_mut(index).ok_or(FrameError::OutOfRange {
            index,
            len: FRAME_SIZE,
        })
    }

    /// The last byte, which holds the padding nibble.
    pub const fn last(&self) -> u8 {
        self.bytes[FRAME_SIZE - 1]
    }

    pub const fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }

    pub const fn into_bytes(self) -> [u8; FRAME_SIZE] {
        self.bytes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.bytes.iter()
    }

    /// Reset every byte to zero.
    pub fn clear(&mut self) {
        self.bytes = [0; FRAME_SIZE];
    }

    pub fn classify(&self) -> Class {
        codec::classify(self)
    }

    pub fn is_address(&self) -> bool {
        self.classify() == Class::Address
    }

    pub fn is_data(&self) -> bool {
        self.classify() == Class::Data
    }

    /// True when the frame is either a well-formed address or data frame.
    pub fn is_correct(&self) -> bool {
        codec::is_correct(self)
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(bytes: [u8; FRAME_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Frame> for [u8; FRAME_SIZE] {
    fn from(frame: Frame) -> Self {
        frame.bytes
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(src: &[u8]) -> Result<Self> {
        let bytes: [u8; FRAME_SIZE] = src.try_into().map_err(|_| FrameError::LengthMismatch {
            expected: FRAME_SIZE,
            actual: src.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl TryFrom<Vec<u8>> for Frame {
    type Error = FrameError;

    fn try_from(src: Vec<u8>) -> Result<Self> {
        Self::try_from(src.as_slice())
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl IntoIterator for Frame {
    type Item = u8;
    type IntoIter = std::array::IntoIter<u8, FRAME_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.iter()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Parses `"80 86 9c 80 f6"`, `"0x80,0x86,0x9c,0x80,0xf6"`, `"80869c80f6"`,
/// or `0b`-prefixed binary bytes.
impl FromStr for Frame {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
            .filter(|t| !t.is_empty())
            .collect();

        let bytes = match tokens.as_slice() {
            [single] if !single.starts_with("0b") => split_packed_hex(single)?,
            _ => tokens
                .iter()
                .map(|t| parse_byte(t))
                .collect::<Result<Vec<u8>>>()?,
        };

        Self::try_from(bytes)
    }
}

fn split_packed_hex(token: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(token);
    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return Err(FrameError::InvalidHex(token.to_string()));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| parse_byte(&digits[i..i + 2]))
        .collect()
}

fn parse_byte(token: &str) -> Result<u8> {
    let invalid = || FrameError::InvalidHex(token.to_string());

    // `from_str_radix` tolerates a leading sign; only bare digits are bytes.
    let (digits, radix) = match token.strip_prefix("0b").or_else(|| token.strip_prefix("0B")) {
        Some(bin) => (bin.replace('_', ""), 2),
        None => (strip_hex_prefix(token).to_string(), 16),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    u8::from_str_radix(&digits, radix).map_err(|_| invalid())
}

fn strip_hex_prefix(token: &str) -> &str {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token)
}
