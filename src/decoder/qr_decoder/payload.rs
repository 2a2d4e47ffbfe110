use crate::decoder::bitstream::{BitReader, BitstreamExtractor};
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, kanji::KanjiDecoder,
    numeric::NumericDecoder,
};
use crate::decoder::unmask::unmask;
use crate::ecc::ReedSolomonDecoder;
use crate::error::DecodeError;
use crate::models::{BitMatrix, ECLevel, Mode, Version};
use crate::tables::ec_block_info;

const MODE_TERMINATOR: u32 = 0b0000;
const MODE_STRUCTURED_APPEND: u32 = 0b0011;
const MODE_FNC1_FIRST: u32 = 0b0101;
const MODE_ECI: u32 = 0b0111;
const MODE_FNC1_SECOND: u32 = 0b1001;

/// Payload recovered from one correctly oriented symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Payload {
    pub data: Vec<u8>,
    pub modes: Vec<Mode>,
    pub corrected: usize,
}

/// Unmask, read codewords, correct them and parse the segments
pub(crate) fn decode_symbol(
    matrix: &BitMatrix,
    version: Version,
    format: &FormatInfo,
) -> Result<Payload, DecodeError> {
    let func = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    unmask(&mut unmasked, format.mask_pattern, &func);

    let bits = BitstreamExtractor::extract(&unmasked, &func);
    let codewords = BitstreamExtractor::to_codewords(&bits);
    let (data_codewords, corrected) =
        deinterleave_and_correct(&codewords, version, format.ec_level)?;
    let (data, modes) = parse_segments(&data_codewords, version)?;

    Ok(Payload {
        data,
        modes,
        corrected,
    })
}

/// Undo block interleaving and run Reed-Solomon on every block
pub(crate) fn deinterleave_and_correct(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<(Vec<u8>, usize), DecodeError> {
    let info = ec_block_info(version, ec_level);
    if codewords.len() < info.total_codewords {
        return Err(DecodeError::Format);
    }

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(info.data_len(b) + info.ecc_per_block))
        .collect();

    let mut source = codewords.iter().copied();
    let longest = info.data_len(info.num_blocks - 1);
    for i in 0..longest {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < info.data_len(b) {
                block.extend(source.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(source.next());
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.data_codewords());
    let mut corrected = 0;
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected += rs.decode(block)?;
        data.extend_from_slice(&block[..info.data_len(b)]);
    }

    Ok((data, corrected))
}

/// Walk the segment headers until the terminator or the end of data
pub(crate) fn parse_segments(
    data_codewords: &[u8],
    version: Version,
) -> Result<(Vec<u8>, Vec<Mode>), DecodeError> {
    let mut reader = BitReader::new(data_codewords);
    let mut data = Vec::new();
    let mut modes = Vec::new();

    while reader.available() >= 4 {
        let indicator = reader.read(4).ok_or(DecodeError::Format)?;
        match indicator {
            MODE_TERMINATOR => break,
            MODE_ECI => skip_eci_designator(&mut reader)?,
            MODE_STRUCTURED_APPEND => {
                reader.read(16).ok_or(DecodeError::Format)?;
            }
            MODE_FNC1_FIRST => {}
            MODE_FNC1_SECOND => {
                reader.read(8).ok_or(DecodeError::Format)?;
            }
            _ => {
                let mode = Mode::from_indicator(indicator as u8).ok_or(DecodeError::Format)?;
                let count = reader
                    .read(mode.char_count_bits(version))
                    .ok_or(DecodeError::Format)? as usize;
                let bytes = match mode {
                    Mode::Numeric => {
                        NumericDecoder::decode(&mut reader, count).map(String::into_bytes)
                    }
                    Mode::Alphanumeric => {
                        AlphanumericDecoder::decode(&mut reader, count).map(String::into_bytes)
                    }
                    Mode::Byte => ByteDecoder::decode(&mut reader, count),
                    Mode::Kanji => KanjiDecoder::decode(&mut reader, count),
                }
                .ok_or(DecodeError::Format)?;
                data.extend(bytes);
                modes.push(mode);
            }
        }
    }

    Ok((data, modes))
}

/// ECI designators are 1, 2 or 3 bytes, announced by their leading bits
fn skip_eci_designator(reader: &mut BitReader<'_>) -> Result<(), DecodeError> {
    let first = reader.read(8).ok_or(DecodeError::Format)?;
    let extra = if first & 0x80 == 0 {
        0
    } else if first & 0xC0 == 0x80 {
        8
    } else if first & 0xE0 == 0xC0 {
        16
    } else {
        return Err(DecodeError::Format);
    };
    reader.read(extra).ok_or(DecodeError::Format)?;
    Ok(())
}
