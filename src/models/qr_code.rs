use serde::Serialize;

use super::{BitMatrix, Point};

/// QR Code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol version
    pub const MIN: Version = Version(1);
    /// Largest symbol version
    pub const MAX: Version = Version(40);

    /// Create a version, returning `None` outside 1..=40
    pub fn new(number: u8) -> Option<Self> {
        if (1..=40).contains(&number) {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Infer the version from a symbol side length (21, 25, ... 177)
    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Self::new)
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * (self.0 as usize) + 17
    }

    /// All versions in increasing order
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40u8).map(Version)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels, lowest redundancy first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Get error correction level from the 2 format bits (01=L, 00=M, 11=Q, 10=H)
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// The 2 bits stored in the format information
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Row index into the block tables
    pub(crate) fn table_index(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight masks in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Mask index 0-7
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at (row i, column j) should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    /// Digits 0-9, 3 per 10 bits
    Numeric,
    /// 45-symbol set, 2 per 11 bits
    Alphanumeric,
    /// Arbitrary bytes, 8 bits each
    Byte,
    /// Shift JIS double-byte characters, 13 bits each
    Kanji,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u8 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
        }
    }

    /// Mode for a 4-bit indicator (ECI and terminator excluded)
    pub fn from_indicator(bits: u8) -> Option<Self> {
        match bits {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            0b1000 => Some(Mode::Kanji),
            _ => None,
        }
    }

    /// Width of the character count field for a version
    pub fn char_count_bits(&self, version: Version) -> usize {
        let range = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][range],
            Mode::Alphanumeric => [9, 11, 13][range],
            Mode::Byte => [8, 16, 16][range],
            Mode::Kanji => [8, 10, 12][range],
        }
    }

    /// Pick the densest of Numeric / Alphanumeric / Byte that can hold `data`
    pub fn detect(data: &str) -> Self {
        if data.bytes().all(|b| b.is_ascii_digit()) {
            Mode::Numeric
        } else if data.chars().all(is_alphanumeric_char) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
pub const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Index of `c` in the alphanumeric table
pub fn alphanumeric_value(c: char) -> Option<u16> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&t| t == c)
        .map(|p| p as u16)
}

fn is_alphanumeric_char(c: char) -> bool {
    alphanumeric_value(c).is_some()
}

/// QR code recovered by the decoder
#[derive(Debug, Clone)]
pub struct DecodedQr {
    /// Raw decoded bytes (Kanji segments contribute Shift JIS bytes)
    pub data: Vec<u8>,
    /// Decoded content as UTF-8 string
    pub content: String,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern used
    pub mask_pattern: MaskPattern,
    /// Modes of the decoded segments, in stream order
    pub modes: Vec<Mode>,
    /// Codewords repaired by Reed-Solomon
    pub corrected_codewords: usize,
    /// Corner points in image coordinates (TL, TR, BR, BL)
    pub position: [Point; 4],
    /// Sampled module matrix (true = dark)
    pub modules: BitMatrix,
}
