/// Format information extraction from QR code
use crate::ecc::bch;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Format info is 15 bits (5 data + 10 ECC), stored twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Decode both copies and keep the one closest to a valid codeword;
    /// ties go to the copy beside the top-left finder
    pub fn extract(matrix: &BitMatrix) -> Option<Self> {
        if matrix.width() < 21 {
            return None;
        }
        [Self::read_top_left(matrix), Self::read_split(matrix)]
            .into_iter()
            .filter_map(bch::decode_format)
            .min_by_key(|&(_, _, distance)| distance)
            .map(|(ec_level, mask_pattern, _)| Self {
                ec_level,
                mask_pattern,
            })
    }

    /// Bit i of the top-left copy, index 0 = least significant
    fn read_top_left(matrix: &BitMatrix) -> u16 {
        let mut cells = Vec::with_capacity(15);
        for y in 0..6 {
            cells.push((8, y));
        }
        cells.push((8, 7));
        cells.push((8, 8));
        cells.push((7, 8));
        for i in 9..15 {
            cells.push((14 - i, 8));
        }
        Self::collect(matrix, &cells)
    }

    /// Copy split between the top-right and bottom-left finders
    fn read_split(matrix: &BitMatrix) -> u16 {
        let size = matrix.width();
        let mut cells = Vec::with_capacity(15);
        for i in 0..8 {
            cells.push((size - 1 - i, 8));
        }
        for i in 8..15 {
            cells.push((8, size - 15 + i));
        }
        Self::collect(matrix, &cells)
    }

    fn collect(matrix: &BitMatrix, cells: &[(usize, usize)]) -> u16 {
        cells
            .iter()
            .enumerate()
            .fold(0u16, |bits, (i, &(x, y))| bits | ((matrix.get(x, y) as u16) << i))
    }
}
