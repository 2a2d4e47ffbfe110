//! QR symbol encoder
//!
//! Pipeline from payload to module matrix:
//! - Mode analysis and version selection
//! - Bit stream assembly (segments, terminator, padding)
//! - Block split, Reed-Solomon EC and interleaving
//! - Function patterns, zigzag data placement
//! - Mask selection by penalty score, format/version information

/// Append-only bit buffer
pub mod bit_buffer;
/// Mask penalty rules
pub mod penalty;
/// Function pattern and data placement
pub mod placement;
/// Data segments per mode
pub mod segment;

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::ecc::ReedSolomonEncoder;
use crate::error::EncodeError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Mode, ModuleGrid, Version};
use crate::tables::{data_capacity_bits, ec_block_info};

pub use bit_buffer::BitBuffer;
pub use segment::Segment;

/// Caller-supplied text to byte conversion (e.g. Shift JIS for Kanji)
pub type StringToBytes = Arc<dyn Fn(&str) -> Vec<u8> + Send + Sync>;

const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Options for [`encode_with`]
#[derive(Clone)]
pub struct EncodeOptions {
    pub ec_level: ECLevel,
    /// Forced mode; detected from the payload when `None`
    pub mode: Option<Mode>,
    /// Fixed version number; `None` or `Some(0)` picks the smallest that fits
    pub version: Option<u8>,
    /// Forced mask; chosen by penalty when `None`
    pub mask: Option<MaskPattern>,
    /// Text to bytes for Byte and Kanji segments; UTF-8 when `None`
    pub string_to_bytes: Option<StringToBytes>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            mode: None,
            version: None,
            mask: None,
            string_to_bytes: None,
        }
    }
}

impl fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("ec_level", &self.ec_level)
            .field("mode", &self.mode)
            .field("version", &self.version)
            .field("mask", &self.mask)
            .field("string_to_bytes", &self.string_to_bytes.is_some())
            .finish()
    }
}

impl EncodeOptions {
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    /// Segment for `data` under these options
    pub fn segment_for(&self, data: &str) -> Result<Segment, EncodeError> {
        let to_bytes = |data: &str| match &self.string_to_bytes {
            Some(f) => f(data),
            None => data.as_bytes().to_vec(),
        };
        match self.mode.unwrap_or_else(|| Mode::detect(data)) {
            Mode::Numeric => Segment::numeric(data),
            Mode::Alphanumeric => Segment::alphanumeric(data),
            Mode::Byte => Ok(Segment::bytes(to_bytes(data))),
            Mode::Kanji => Segment::kanji(&to_bytes(data)),
        }
    }
}

/// Builder for single- or multi-segment symbols
#[derive(Debug, Clone)]
pub struct QrEncoder {
    segments: Vec<Segment>,
    ec_level: ECLevel,
    version: Option<Version>,
    mask: Option<MaskPattern>,
}

impl QrEncoder {
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            segments: Vec::new(),
            ec_level,
            version: None,
            mask: None,
        }
    }

    pub fn add_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Require exactly this version; too-small versions fail instead of growing
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Skip mask selection and use `mask`
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn encode(&self) -> Result<EncodedQr, EncodeError> {
        let (version, used_bits) = self.select_version()?;
        let capacity = data_capacity_bits(version, self.ec_level);
        debug!(
            version = version.number(),
            ec_level = ?self.ec_level,
            used_bits,
            capacity,
            "selected version"
        );

        let data = self.build_bit_stream(version, capacity);
        let codewords = add_ec_and_interleave(&data, version, self.ec_level);

        let mut grid = placement::function_patterns(version);
        placement::place_data(&mut grid, &codewords)?;
        let empty = grid.empty_count();
        if empty != 0 {
            return Err(EncodeError::MatrixPlacement(format!(
                "{empty} modules left unassigned after data placement"
            )));
        }

        let mask = match self.mask {
            Some(mask) => mask,
            None => select_mask(&grid, version, self.ec_level),
        };
        placement::apply_mask(&mut grid, mask);
        placement::draw_format_and_version(&mut grid, version, self.ec_level, mask);

        Ok(EncodedQr {
            version,
            ec_level: self.ec_level,
            mask,
            mode: self.segments.first().map_or(Mode::Byte, Segment::mode),
            grid,
        })
    }

    fn select_version(&self) -> Result<(Version, usize), EncodeError> {
        let candidates: Vec<Version> = match self.version {
            Some(v) => vec![v],
            None => Version::all().collect(),
        };

        let mut required_bits = 0;
        let mut capacity_bits = 0;
        let mut max_version = Version::MIN;
        for version in candidates {
            let used: usize = self.segments.iter().map(|s| s.total_bits(version)).sum();
            let capacity = data_capacity_bits(version, self.ec_level);
            let counts_fit = self.segments.iter().all(|s| s.fits_count(version));
            if counts_fit && used <= capacity {
                return Ok((version, used));
            }
            required_bits = used;
            capacity_bits = capacity;
            max_version = version;
        }

        Err(EncodeError::DataTooLong {
            required_bits,
            capacity_bits,
            max_version: max_version.number(),
        })
    }

    /// Segments, terminator, byte alignment and pad codewords
    fn build_bit_stream(&self, version: Version, capacity: usize) -> Vec<u8> {
        let mut buffer = BitBuffer::new();
        for segment in &self.segments {
            segment.write(&mut buffer, version);
        }

        buffer.put(0, (capacity - buffer.len()).min(4));
        buffer.put(0, (8 - buffer.len() % 8) % 8);
        for &pad in PAD_CODEWORDS.iter().cycle() {
            if buffer.len() >= capacity {
                break;
            }
            buffer.put(pad as u32, 8);
        }
        buffer.to_bytes()
    }
}

/// Split into blocks (short blocks first), append EC codewords and interleave
fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = info.data_len(i);
        let block = &data[offset..offset + len];
        blocks.push((block, rs.encode(block)));
        offset += len;
    }

    let mut result = Vec::with_capacity(info.total_codewords);
    let longest = blocks.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    for i in 0..longest {
        result.extend(blocks.iter().filter_map(|(d, _)| d.get(i)));
    }
    for i in 0..info.ecc_per_block {
        result.extend(blocks.iter().map(|(_, ecc)| ecc[i]));
    }
    result
}

/// Lowest-penalty mask; ties go to the lowest index
fn select_mask(grid: &ModuleGrid, version: Version, ec_level: ECLevel) -> MaskPattern {
    let scores: Vec<(u32, MaskPattern)> = MaskPattern::ALL
        .par_iter()
        .map(|&mask| {
            let mut candidate = grid.clone();
            placement::apply_mask(&mut candidate, mask);
            placement::draw_format_and_version(&mut candidate, version, ec_level, mask);
            (penalty::score(&candidate), mask)
        })
        .collect();

    for (score, mask) in &scores {
        debug!(mask = mask.bits(), score, "mask penalty");
    }

    scores
        .into_iter()
        .min_by_key(|(score, mask)| (*score, mask.bits()))
        .map_or(MaskPattern::Pattern0, |(_, mask)| mask)
}

/// Encoded symbol: module matrix plus the parameters chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedQr {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    mode: Mode,
    grid: ModuleGrid,
}

impl EncodedQr {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Mode of the first segment
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.grid.is_dark(row, col)
    }

    pub fn modules(&self) -> &ModuleGrid {
        &self.grid
    }

    /// Matrix addressed as (x = col, y = row)
    pub fn to_bit_matrix(&self) -> BitMatrix {
        BitMatrix::from_fn(self.size(), self.size(), |x, y| self.is_dark(y, x))
    }
}

impl fmt::Display for EncodedQr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_bit_matrix().fmt(f)
    }
}

/// Encode `data` with automatic mode and version selection
pub fn encode(data: &str, ec_level: ECLevel) -> Result<EncodedQr, EncodeError> {
    encode_with(data, &EncodeOptions::new(ec_level))
}

/// Encode `data` with explicit options
pub fn encode_with(data: &str, options: &EncodeOptions) -> Result<EncodedQr, EncodeError> {
    let mut encoder = QrEncoder::new(options.ec_level).add_segment(options.segment_for(data)?);
    match options.version {
        None | Some(0) => {}
        Some(n) => {
            let version = Version::new(n).ok_or(EncodeError::InvalidVersion(n))?;
            encoder = encoder.with_version(version);
        }
    }
    if let Some(mask) = options.mask {
        encoder = encoder.with_mask(mask);
    }
    encoder.encode()
}
