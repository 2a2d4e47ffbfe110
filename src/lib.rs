//! styled_qr - QR symbol encoder with scan validation
//!
//! Encodes a payload into a module matrix (mode analysis, Reed-Solomon error
//! correction, penalty-driven mask selection) for an external renderer to
//! paint, then reads the rendered image back to confirm it still scans.
//!
//! ```no_run
//! use styled_qr::{ECLevel, ScanValidator, encode};
//!
//! let qr = encode("HELLO WORLD", ECLevel::Q).unwrap();
//! assert_eq!(qr.size(), 21);
//!
//! let response = ScanValidator::new().validate_encoded(&qr, "HELLO WORLD").unwrap();
//! assert!(response.is_valid);
//! ```

/// Validator configuration and environment overrides
pub mod config;
/// Debug image persistence
mod debug;
/// Symbol decoding (format extraction, unmasking, RS correction, data modes)
pub mod decoder;
/// Symbol location (finder and alignment patterns)
pub mod detector;
/// GF(256), polynomials, Reed-Solomon and BCH codes
pub mod ecc;
/// Payload to module matrix
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (BitMatrix, ModuleGrid, Version, ...)
pub mod models;
/// Binarize, locate and decode over a luminance plane
mod pipeline;
/// Reference rasterizer and SVG output
pub mod render;
/// Capacity, block and alignment tables
pub mod tables;
/// Luminance, binarization and geometry helpers
pub mod utils;
/// Rendered-image validation
pub mod validator;

pub use config::{Binarizer, ValidatorConfig};
pub use decoder::QrDecoder;
pub use encoder::{EncodeOptions, EncodedQr, QrEncoder, Segment, StringToBytes, encode, encode_with};
pub use error::{DecodeError, EncodeError, ErrorCode, ValidateError};
pub use models::{BitMatrix, DecodedQr, ECLevel, MaskPattern, Mode, Point, Version};
pub use render::{RenderOptions, rasterize, to_svg_string};
pub use validator::{
    ImageSource, PixelBuffer, Rasterizer, ScanValidator, ScanValidatorResponse, ValidateOptions,
};
