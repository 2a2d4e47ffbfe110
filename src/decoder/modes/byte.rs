/// Byte mode decoder (Mode 0100) for 8-bit data
use crate::decoder::bitstream::BitReader;

pub struct ByteDecoder;

impl ByteDecoder {
    /// Raw bytes; text interpretation is left to the caller
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        (0..character_count)
            .map(|_| reader.read(8).map(|b| b as u8))
            .collect()
    }
}
