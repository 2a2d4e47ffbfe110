/// Alphanumeric mode decoder (Mode 0010)
/// Pairs = 11 bits, single = 6 bits
use crate::decoder::bitstream::BitReader;
use crate::models::qr_code::ALPHANUMERIC_TABLE;

pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = reader.read(11)? as usize;
                result.push(*ALPHANUMERIC_TABLE.get(value / 45)?);
                result.push(ALPHANUMERIC_TABLE[value % 45]);
                chars_remaining -= 2;
            } else {
                let value = reader.read(6)? as usize;
                result.push(*ALPHANUMERIC_TABLE.get(value)?);
                chars_remaining -= 1;
            }
        }

        Some(result)
    }
}
