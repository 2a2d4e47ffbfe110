//! Capacity, block structure and alignment tables (QR Model 2)

use crate::models::{ECLevel, Version};

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Alignment pattern centre coordinates, indexed by version
const ALIGNMENT_POSITIONS: [&[usize]; 41] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Reed-Solomon block layout for one (version, EC level)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    pub num_blocks: usize,
    pub ecc_per_block: usize,
    /// Codewords (data + EC) in the symbol
    pub total_codewords: usize,
}

impl EcBlockInfo {
    /// Blocks holding one data codeword fewer; they come first
    pub fn num_short_blocks(&self) -> usize {
        self.num_blocks - self.total_codewords % self.num_blocks
    }

    /// Total codewords of a short block
    pub fn short_block_len(&self) -> usize {
        self.total_codewords / self.num_blocks
    }

    /// Data codewords in block `index`
    pub fn data_len(&self, index: usize) -> usize {
        let short = self.short_block_len() - self.ecc_per_block;
        if index < self.num_short_blocks() {
            short
        } else {
            short + 1
        }
    }

    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.ecc_per_block * self.num_blocks
    }
}

pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let idx = ec_level.table_index();
    let v = version.number() as usize;
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize,
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[idx][v] as usize,
        total_codewords: raw_data_modules(version) / 8,
    }
}

/// Modules left for data and EC after function patterns and format/version areas
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let align = v / 7 + 2;
        result -= (25 * align - 10) * align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data codewords available at (version, EC level)
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    ec_block_info(version, ec_level).data_codewords()
}

/// Data capacity in bits at (version, EC level)
pub fn data_capacity_bits(version: Version, ec_level: ECLevel) -> usize {
    data_codewords(version, ec_level) * 8
}

/// Alignment pattern centre coordinates (empty for version 1)
pub fn alignment_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_POSITIONS[version.number() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_data_codewords_known_values() {
        assert_eq!(data_codewords(v(1), ECLevel::L), 19);
        assert_eq!(data_codewords(v(1), ECLevel::M), 16);
        assert_eq!(data_codewords(v(1), ECLevel::Q), 13);
        assert_eq!(data_codewords(v(1), ECLevel::H), 9);
        assert_eq!(data_codewords(v(5), ECLevel::Q), 62);
        assert_eq!(data_codewords(v(40), ECLevel::L), 2956);
        assert_eq!(data_codewords(v(40), ECLevel::H), 1276);
    }

    #[test]
    fn test_raw_modules() {
        assert_eq!(raw_data_modules(v(1)), 208);
        assert_eq!(raw_data_modules(v(7)) / 8, 196);
        assert_eq!(raw_data_modules(v(40)) / 8, 3706);
    }

    #[test]
    fn test_short_blocks_come_first() {
        // 5-Q: 2 blocks of 15 data, 2 of 16
        let info = ec_block_info(v(5), ECLevel::Q);
        assert_eq!(info.num_blocks, 4);
        assert_eq!(info.num_short_blocks(), 2);
        assert_eq!(info.data_len(0), 15);
        assert_eq!(info.data_len(1), 15);
        assert_eq!(info.data_len(2), 16);
        assert_eq!(info.data_len(3), 16);
    }

    #[test]
    fn test_block_sums_match_capacity() {
        for version in Version::all() {
            for ec in ECLevel::ALL {
                let info = ec_block_info(version, ec);
                let sum: usize = (0..info.num_blocks).map(|i| info.data_len(i)).sum();
                assert_eq!(sum, info.data_codewords(), "{version:?} {ec:?}");
            }
        }
    }

    #[test]
    fn test_alignment_positions_match_formula() {
        for version in Version::all().skip(1) {
            let n = version.number() as usize;
            let count = n / 7 + 2;
            let last = version.size() - 7;
            let step = if n == 32 {
                26
            } else {
                (n * 4 + count * 2 + 1) / (count * 2 - 2) * 2
            };
            let mut expected: Vec<usize> = (0..count - 1).map(|i| last - i * step).collect();
            expected.push(6);
            expected.reverse();
            assert_eq!(alignment_positions(version), expected.as_slice(), "v{n}");
        }
        assert!(alignment_positions(v(1)).is_empty());
    }
}
