//! Data segments: a mode plus the payload it packs

use super::bit_buffer::BitBuffer;
use crate::error::EncodeError;
use crate::models::qr_code::alphanumeric_value;
use crate::models::{Mode, Version};

/// One run of data encoded in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// ASCII digits
    Numeric(String),
    /// Characters of the 45-symbol set
    Alphanumeric(String),
    /// Arbitrary bytes
    Byte(Vec<u8>),
    /// Shift JIS double-byte characters, two bytes each
    Kanji(Vec<u8>),
}

impl Segment {
    pub fn numeric(data: &str) -> Result<Self, EncodeError> {
        if let Some((position, c)) = data.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(EncodeError::Encoding {
                mode: Mode::Numeric,
                found: c.to_string(),
                position,
            });
        }
        Ok(Segment::Numeric(data.to_owned()))
    }

    pub fn alphanumeric(data: &str) -> Result<Self, EncodeError> {
        if let Some((position, c)) = data
            .chars()
            .enumerate()
            .find(|(_, c)| alphanumeric_value(*c).is_none())
        {
            return Err(EncodeError::Encoding {
                mode: Mode::Alphanumeric,
                found: c.to_string(),
                position,
            });
        }
        Ok(Segment::Alphanumeric(data.to_owned()))
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Segment::Byte(data.into())
    }

    /// Shift JIS bytes; every pair must lie in 0x8140..=0x9FFC or 0xE040..=0xEBBF
    /// with a trail byte in 0x40..=0xFC other than 0x7F
    pub fn kanji(sjis: &[u8]) -> Result<Self, EncodeError> {
        if sjis.len() % 2 != 0 {
            return Err(EncodeError::Encoding {
                mode: Mode::Kanji,
                found: format!("0x{:02X}", sjis[sjis.len() - 1]),
                position: sjis.len() - 1,
            });
        }
        for (i, pair) in sjis.chunks_exact(2).enumerate() {
            let c = u16::from_be_bytes([pair[0], pair[1]]);
            if kanji_value(c).is_none() {
                return Err(EncodeError::Encoding {
                    mode: Mode::Kanji,
                    found: format!("0x{c:04X}"),
                    position: i * 2,
                });
            }
        }
        Ok(Segment::Kanji(sjis.to_vec()))
    }

    /// Densest of Numeric / Alphanumeric / Byte for `data`
    pub fn auto(data: &str) -> Self {
        match Mode::detect(data) {
            Mode::Numeric => Segment::Numeric(data.to_owned()),
            Mode::Alphanumeric => Segment::Alphanumeric(data.to_owned()),
            _ => Segment::Byte(data.as_bytes().to_vec()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Byte(_) => Mode::Byte,
            Segment::Kanji(_) => Mode::Kanji,
        }
    }

    /// Value written to the character count field
    pub fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(s) | Segment::Alphanumeric(s) => s.len(),
            Segment::Byte(b) => b.len(),
            Segment::Kanji(b) => b.len() / 2,
        }
    }

    /// Payload bits, excluding mode indicator and count
    pub fn data_bits(&self) -> usize {
        let n = self.char_count();
        match self {
            Segment::Numeric(_) => 10 * (n / 3) + [0, 4, 7][n % 3],
            Segment::Alphanumeric(_) => 11 * (n / 2) + 6 * (n % 2),
            Segment::Byte(_) => 8 * n,
            Segment::Kanji(_) => 13 * n,
        }
    }

    /// Whether the character count fits the count field at `version`
    pub fn fits_count(&self, version: Version) -> bool {
        self.char_count() < 1 << self.mode().char_count_bits(version)
    }

    /// Mode indicator + count field + payload
    pub fn total_bits(&self, version: Version) -> usize {
        4 + self.mode().char_count_bits(version) + self.data_bits()
    }

    pub fn write(&self, buffer: &mut BitBuffer, version: Version) {
        let mode = self.mode();
        buffer.put(mode.indicator() as u32, 4);
        buffer.put(self.char_count() as u32, mode.char_count_bits(version));

        match self {
            Segment::Numeric(digits) => {
                for chunk in digits.as_bytes().chunks(3) {
                    let value = chunk
                        .iter()
                        .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
                    buffer.put(value, chunk.len() * 3 + 1);
                }
            }
            Segment::Alphanumeric(text) => {
                let values: Vec<u32> = text
                    .chars()
                    .filter_map(alphanumeric_value)
                    .map(u32::from)
                    .collect();
                for pair in values.chunks(2) {
                    match pair {
                        [a, b] => buffer.put(a * 45 + b, 11),
                        [a] => buffer.put(*a, 6),
                        _ => unreachable!(),
                    }
                }
            }
            Segment::Byte(bytes) => {
                for &b in bytes {
                    buffer.put(b as u32, 8);
                }
            }
            Segment::Kanji(sjis) => {
                for pair in sjis.chunks_exact(2) {
                    let c = u16::from_be_bytes([pair[0], pair[1]]);
                    if let Some(value) = kanji_value(c) {
                        buffer.put(value as u32, 13);
                    }
                }
            }
        }
    }
}

/// 13-bit packed value of a Shift JIS character
fn kanji_value(c: u16) -> Option<u16> {
    let trail = c & 0xFF;
    if !(0x40..=0xFC).contains(&trail) || trail == 0x7F {
        return None;
    }
    let offset = match c {
        0x8140..=0x9FFC => c - 0x8140,
        0xE040..=0xEBBF => c - 0xC140,
        _ => return None,
    };
    Some((offset >> 8) * 0xC0 + (offset & 0xFF))
}
