//! QR symbol decoding
//!
//! Everything after the modules have been sampled:
//! - Format and version information extraction
//! - Unmasking and zigzag bitstream extraction
//! - Deinterleaving with Reed-Solomon correction
//! - Data mode decoding (numeric, alphanumeric, byte, kanji)

/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// QR code unmasking (removes mask patterns)
pub mod unmask;
/// Version information extraction (versions 7-40)
pub mod version;

pub use qr_decoder::QrDecoder;
