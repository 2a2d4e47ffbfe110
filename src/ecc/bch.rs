//! BCH codes protecting format (15,5) and version (18,6) information

use crate::models::{ECLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u16 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Largest Hamming distance accepted when matching a read codeword
const MAX_CORRECTABLE: u32 = 3;

/// Remainder of `data << (degree)` divided by `generator` (degree = bit length − 1)
fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data;
    for _ in 0..degree {
        rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
    }
    rem & ((1 << degree) - 1)
}

/// 15-bit masked format information for an EC level and mask
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u32) << 3) | mask.bits() as u32;
    let rem = bch_remainder(data, FORMAT_GENERATOR, 10);
    (((data << 10) | rem) as u16) ^ FORMAT_MASK
}

/// 18-bit version information (meaningful for versions 7 and up)
pub fn version_bits(version: Version) -> u32 {
    let data = version.number() as u32;
    (data << 12) | bch_remainder(data, VERSION_GENERATOR, 12)
}

/// Closest valid format codeword within three bit errors, with its distance
pub fn decode_format(bits: u16) -> Option<(ECLevel, MaskPattern, u32)> {
    ECLevel::ALL
        .iter()
        .flat_map(|&ec| MaskPattern::ALL.iter().map(move |&mask| (ec, mask)))
        .map(|(ec, mask)| (ec, mask, (format_bits(ec, mask) ^ bits).count_ones()))
        .min_by_key(|&(_, _, distance)| distance)
        .filter(|&(_, _, distance)| distance <= MAX_CORRECTABLE)
}

/// Closest valid version codeword (7..=40) within three bit errors, with its distance
pub fn decode_version(bits: u32) -> Option<(Version, u32)> {
    Version::all()
        .filter(|v| v.number() >= 7)
        .map(|v| (v, (version_bits(v) ^ bits).count_ones()))
        .min_by_key(|&(_, distance)| distance)
        .filter(|&(_, distance)| distance <= MAX_CORRECTABLE)
}
