//! Error types for encoding, decoding and validation.

use serde::Serialize;
use thiserror::Error;

use crate::models::Mode;

/// Encoder errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload holds a character the mode cannot represent.
    #[error("{mode:?} mode cannot encode {found} at position {position}")]
    Encoding {
        /// Mode that rejected the data.
        mode: Mode,
        /// Offending character or byte pair.
        found: String,
        /// Character or byte offset of the violation.
        position: usize,
    },

    /// No allowed version has room for the payload.
    #[error("data too long: {required_bits} bits needed, {capacity_bits} bits available up to version {max_version}")]
    DataTooLong {
        /// Bits needed at the largest allowed version.
        required_bits: usize,
        /// Data capacity in bits at that version.
        capacity_bits: usize,
        /// Largest version that was tried.
        max_version: u8,
    },

    /// The requested version number is outside 1..=40.
    #[error("invalid version {0}: expected 1..=40")]
    InvalidVersion(u8),

    /// Internal layout invariant broken while building the matrix.
    #[error("matrix placement failed: {0}")]
    MatrixPlacement(String),
}

/// Decode failures, ordered by how far the pipeline got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Error)]
pub enum DecodeError {
    /// No usable finder pattern triple was located.
    #[error("no QR pattern found")]
    NotFound,

    /// A symbol was found but its format, version or bit stream is malformed.
    #[error("QR pattern found but format information is invalid")]
    Format,

    /// A symbol was found but Reed-Solomon correction failed.
    #[error("QR pattern found but error correction failed")]
    Checksum,
}

impl DecodeError {
    /// Code reported in a validation response.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::NotFound => ErrorCode::NotFound,
            DecodeError::Format => ErrorCode::Format,
            DecodeError::Checksum => ErrorCode::Checksum,
        }
    }
}

/// Machine-readable failure code of a validation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No QR pattern located in either attempt.
    NotFound,
    /// Pattern located but format/version/bit stream invalid.
    Format,
    /// Pattern located but too damaged for Reed-Solomon.
    Checksum,
    /// Decoded successfully but the text differs from the payload.
    ContentMismatch,
}

/// Errors returned by the validator for misuse, never for decode failure.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Pixel buffer length disagrees with its dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    MalformedBuffer {
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// A zero-sized image was supplied.
    #[error("image has zero width or height")]
    EmptyImage,

    /// Markup was supplied but no rasterizer is configured.
    #[error("markup input requires a rasterizer")]
    MissingRasterizer,

    /// The configured rasterizer failed.
    #[error("rasterizer failed: {0}")]
    Rasterize(String),

    /// Encoded image bytes could not be decoded, or a debug image could not be written.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
