/// Kanji mode decoder (Mode 1000), 13 bits per Shift JIS character
use crate::decoder::bitstream::BitReader;

pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Shift JIS byte pairs for `character_count` characters
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        let mut bytes = Vec::with_capacity(character_count * 2);
        for _ in 0..character_count {
            let value = reader.read(13)?;
            let packed = ((value / 0xC0) << 8) | (value % 0xC0);
            let sjis = if packed < 0x1F00 {
                packed + 0x8140
            } else {
                packed + 0xC140
            };
            bytes.extend_from_slice(&(sjis as u16).to_be_bytes());
        }
        Some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kanji_decode() {
        // 0xD9F → 0x935F, 0x1AAA → 0xE4AA
        let data = [0b0110_1100, 0b1111_1110, 0b1010_1010, 0b1000_0000];
        assert_eq!(
            KanjiDecoder::decode(&mut BitReader::new(&data), 2),
            Some(vec![0x93, 0x5F, 0xE4, 0xAA])
        );
    }
}
