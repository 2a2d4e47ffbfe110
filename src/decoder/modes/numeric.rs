/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::decoder::bitstream::BitReader;

pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `character_count` digits; `None` on truncation or a group out of range
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = group_size * 3 + 1;
            let value = reader.read(bits_needed)?;
            if value >= 10u32.pow(group_size as u32) {
                return None;
            }
            result.push_str(&format!("{:0width$}", value, width = group_size));
            chars_remaining -= group_size;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_decode() {
        // 1017 is not a valid 3-digit group
        let data = [0b1111_1110, 0b0100_0000];
        assert_eq!(NumericDecoder::decode(&mut BitReader::new(&data), 3), None);

        // "012" + "34" = 0000001100 0100010
        let data = [0b0000_0011, 0b0001_0001, 0b0000_0000];
        assert_eq!(
            NumericDecoder::decode(&mut BitReader::new(&data), 5).as_deref(),
            Some("01234")
        );
    }

    #[test]
    fn test_numeric_truncated() {
        let data = [0u8];
        assert_eq!(NumericDecoder::decode(&mut BitReader::new(&data), 3), None);
    }
}
