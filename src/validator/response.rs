use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::encoder::StringToBytes;
use crate::error::ErrorCode;

/// Outcome of one validation call.
///
/// Serializes as `{isValid, decodedText, isInverted, attempts, errorCode?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanValidatorResponse {
    /// Decoded and equal to the payload
    pub is_valid: bool,
    /// Text of the decoded symbol, if any attempt decoded
    pub decoded_text: Option<String>,
    /// The successful (or last) attempt read the luminance-inverted image
    pub is_inverted: bool,
    /// Decode attempts made, 1 or 2
    pub attempts: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl ScanValidatorResponse {
    pub(crate) fn decoded(text: String, is_valid: bool, is_inverted: bool, attempts: u8) -> Self {
        Self {
            is_valid,
            decoded_text: Some(text),
            is_inverted,
            attempts,
            error_code: (!is_valid).then_some(ErrorCode::ContentMismatch),
        }
    }

    pub(crate) fn failed(code: ErrorCode, is_inverted: bool, attempts: u8) -> Self {
        Self {
            is_valid: false,
            decoded_text: None,
            is_inverted,
            attempts,
            error_code: Some(code),
        }
    }
}

/// Per-call options for [`super::ScanValidator::validate_with`]
#[derive(Clone, Default)]
pub struct ValidateOptions {
    /// Compare bytes produced by this function instead of text
    pub string_to_bytes: Option<StringToBytes>,
    /// The rendering uses light modules on a dark field; read inverted only
    pub is_inverted: bool,
    /// Write the binarized image of each attempt here
    pub debug_image_path: Option<PathBuf>,
}

impl fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("string_to_bytes", &self.string_to_bytes.is_some())
            .field("is_inverted", &self.is_inverted)
            .field("debug_image_path", &self.debug_image_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok = ScanValidatorResponse::decoded("HI".into(), true, false, 1);
        assert_eq!(ok.error_code, None);
        let mismatch = ScanValidatorResponse::decoded("HO".into(), false, true, 2);
        assert_eq!(mismatch.error_code, Some(ErrorCode::ContentMismatch));
        let failed = ScanValidatorResponse::failed(ErrorCode::NotFound, true, 2);
        assert_eq!(failed.decoded_text, None);
        assert!(!failed.is_valid);
    }

    #[test]
    fn test_options_debug_hides_function() {
        let text = format!("{:?}", ValidateOptions::default());
        assert!(text.contains("string_to_bytes: false"));
    }
}
