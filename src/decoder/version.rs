/// Version information extraction for QR codes v7+
use crate::ecc::bch;
use crate::models::{BitMatrix, Version};

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// Version of a sampled symbol. Below 45 modules the size decides; above,
    /// either version block must decode to the version the size implies.
    pub fn extract(matrix: &BitMatrix) -> Option<Version> {
        let size = matrix.width();
        let from_size = Version::from_size(size)?;
        if from_size.number() < 7 {
            return Some(from_size);
        }

        let (decoded, _) = [Self::read_top_right(matrix), Self::read_bottom_left(matrix)]
            .into_iter()
            .filter_map(bch::decode_version)
            .min_by_key(|&(_, distance)| distance)?;
        if decoded == from_size {
            Some(decoded)
        } else {
            None
        }
    }

    /// 6x3 block left of the top-right finder; bit i at (size-11 + i%3, i/3)
    fn read_top_right(matrix: &BitMatrix) -> u32 {
        let size = matrix.width();
        (0..18).fold(0u32, |bits, i| {
            bits | ((matrix.get(size - 11 + i % 3, i / 3) as u32) << i)
        })
    }

    /// 3x6 block above the bottom-left finder, transposed
    fn read_bottom_left(matrix: &BitMatrix) -> u32 {
        let size = matrix.width();
        (0..18).fold(0u32, |bits, i| {
            bits | ((matrix.get(i / 3, size - 11 + i % 3) as u32) << i)
        })
    }
}
