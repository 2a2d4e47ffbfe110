/// Bitstream extraction from QR code matrix
use crate::decoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Extract raw bitstream from QR code matrix following zigzag pattern
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Data bits in placement order: column pairs right to left, alternating
    /// up and down, skipping the vertical timing column and function modules
    pub fn extract(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        let dimension = func.size();
        let mut bits = Vec::with_capacity(func.data_modules_count());

        let mut upward = true;
        let mut col = dimension as isize - 1;

        while col > 0 {
            if col == 6 {
                col -= 1;
                continue;
            }

            let pair = [col as usize, col as usize - 1];
            for step in 0..dimension {
                let row = if upward { dimension - 1 - step } else { step };
                for &x in &pair {
                    if !func.is_function(x, row) {
                        bits.push(matrix.get(x, row));
                    }
                }
            }

            upward = !upward;
            col -= 2;
        }

        bits
    }

    /// Pack bits into codewords, dropping trailing remainder bits
    pub fn to_codewords(bits: &[bool]) -> Vec<u8> {
        bits.chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect()
    }
}

/// Sequential MSB-first reader over decoded data codewords
pub struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn available(&self) -> usize {
        self.bytes.len() * 8 - self.position
    }

    /// Read `count` (≤ 32) bits; `None` past the end
    pub fn read(&mut self, count: usize) -> Option<u32> {
        if count > 32 || count > self.available() {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            let byte = self.bytes[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.position += 1;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::placement;
    use crate::models::Version;
    use crate::tables::raw_data_modules;

    #[test]
    fn test_extraction_matches_placement_order() {
        let version = Version::new(3).unwrap();
        let total = raw_data_modules(version) / 8;
        let codewords: Vec<u8> = (0..total).map(|i| (i * 37 + 11) as u8).collect();

        let mut grid = placement::function_patterns(version);
        placement::place_data(&mut grid, &codewords).unwrap();
        let size = version.size();
        let matrix = BitMatrix::from_fn(size, size, |x, y| grid.is_dark(y, x));

        let func = FunctionMask::new(version);
        let bits = BitstreamExtractor::extract(&matrix, &func);
        assert_eq!(bits.len(), raw_data_modules(version));
        assert_eq!(BitstreamExtractor::to_codewords(&bits), codewords);
    }

    #[test]
    fn test_bit_reader() {
        let data = [0b1010_0011, 0b1100_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(4), Some(0b1010));
        assert_eq!(reader.read(6), Some(0b001111));
        assert_eq!(reader.available(), 6);
        assert_eq!(reader.read(7), None);
        assert_eq!(reader.read(6), Some(0));
        assert_eq!(reader.read(0), Some(0));
    }
}
