//! Scan validation: read a rendered symbol back and compare it with its payload.
//!
//! Each call runs at most two attempts over the same luminance plane: the
//! image as given, then its inversion (light modules on a dark field). An
//! `is_inverted` hint skips straight to the second attempt.

mod response;
mod source;

pub use response::{ScanValidatorResponse, ValidateOptions};
pub use source::{ImageSource, PixelBuffer, Rasterizer};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ValidatorConfig;
use crate::debug::{debug_image_path, save_binary_image};
use crate::encoder::EncodedQr;
use crate::error::{DecodeError, ValidateError};
use crate::models::DecodedQr;
use crate::pipeline;
use crate::render::{RenderOptions, rasterize};
use source::LuminanceSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Normal,
    Inverted,
}

impl Attempt {
    fn label(self) -> &'static str {
        match self {
            Attempt::Normal => "normal",
            Attempt::Inverted => "inverted",
        }
    }
}

/// Decodes rendered symbols and checks them against the payload they encode
#[derive(Clone)]
pub struct ScanValidator {
    config: ValidatorConfig,
    rasterizer: Option<Arc<dyn Rasterizer>>,
}

impl Default for ScanValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanValidator {
    /// Validator using the process-wide configuration
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::global().clone())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            rasterizer: None,
        }
    }

    /// Rasterizer used for [`ImageSource::Markup`] input
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Some(Arc::new(rasterizer));
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Decode `source` and compare the text with `payload`.
    ///
    /// Decode failures are reported in the response; the error is reserved
    /// for unusable input.
    pub fn validate(
        &self,
        source: impl Into<ImageSource>,
        payload: &str,
    ) -> Result<ScanValidatorResponse, ValidateError> {
        self.validate_with(source, payload, &ValidateOptions::default())
    }

    pub fn validate_with(
        &self,
        source: impl Into<ImageSource>,
        payload: &str,
        options: &ValidateOptions,
    ) -> Result<ScanValidatorResponse, ValidateError> {
        let pixels = source.into().into_pixels(self.rasterizer.as_deref())?;
        let luminance = LuminanceSource::from_pixels(&pixels);

        let plan: &[Attempt] = if options.is_inverted {
            &[Attempt::Inverted]
        } else {
            &[Attempt::Normal, Attempt::Inverted]
        };

        let mut worst_case = DecodeError::NotFound;
        let mut attempts = 0u8;
        for &attempt in plan {
            if attempts > 0 && !self.config.retry_delay.is_zero() {
                std::thread::sleep(self.config.retry_delay);
            }
            attempts += 1;

            let outcome = match attempt {
                Attempt::Normal => self.scan(&luminance),
                Attempt::Inverted => self.scan(&luminance.inverted()),
            };
            if let Some(path) = self.debug_path(options, attempt, attempts) {
                save_binary_image(&outcome.binary, &path)?;
            }

            let is_inverted = attempt == Attempt::Inverted;
            match outcome.result {
                Ok(qr) => {
                    let is_valid = matches_payload(&qr, payload, options);
                    if !is_valid {
                        warn!(
                            attempt = attempt.label(),
                            decoded = %qr.content,
                            "decoded text does not match payload"
                        );
                    }
                    return Ok(ScanValidatorResponse::decoded(
                        qr.content,
                        is_valid,
                        is_inverted,
                        attempts,
                    ));
                }
                Err(err) => {
                    warn!(attempt = attempt.label(), %err, "scan attempt failed");
                    worst_case = worst_case.max(err);
                }
            }
        }

        Ok(ScanValidatorResponse::failed(worst_case.code(), true, attempts))
    }

    /// Render `qr` with the reference rasterizer and validate the result
    pub fn validate_encoded(
        &self,
        qr: &EncodedQr,
        payload: &str,
    ) -> Result<ScanValidatorResponse, ValidateError> {
        let img = rasterize(qr, &RenderOptions::default());
        self.validate(img, payload)
    }

    fn scan(&self, luminance: &LuminanceSource) -> pipeline::ScanOutcome {
        debug!(width = luminance.width, height = luminance.height, "scanning luminance");
        pipeline::scan_luminance(&luminance.gray, luminance.width, luminance.height, &self.config)
    }

    /// The caller's path for the first attempt, suffixed for a retry;
    /// otherwise a fresh name in the configured debug directory
    fn debug_path(&self, options: &ValidateOptions, attempt: Attempt, n: u8) -> Option<PathBuf> {
        match (&options.debug_image_path, &self.config.debug_dir) {
            (Some(path), _) if n == 1 => Some(path.clone()),
            (Some(path), _) => Some(suffixed(path, attempt.label())),
            (None, Some(dir)) => Some(debug_image_path(dir, attempt.label())),
            (None, None) => None,
        }
    }
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(name)
}

fn matches_payload(qr: &DecodedQr, payload: &str, options: &ValidateOptions) -> bool {
    match &options.string_to_bytes {
        Some(to_bytes) => to_bytes(payload) == qr.data,
        None => qr.content == payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{StringToBytes, encode};
    use crate::error::ErrorCode;
    use crate::models::ECLevel;

    fn validator() -> ScanValidator {
        ScanValidator::with_config(ValidatorConfig::default())
    }

    #[test]
    fn test_validate_encoded_symbol() {
        let qr = encode("HELLO WORLD", ECLevel::Q).unwrap();
        let response = validator().validate_encoded(&qr, "HELLO WORLD").unwrap();
        assert!(response.is_valid);
        assert_eq!(response.decoded_text.as_deref(), Some("HELLO WORLD"));
        assert_eq!(response.attempts, 1);
        assert!(!response.is_inverted);
        assert_eq!(response.error_code, None);
    }

    #[test]
    fn test_inverted_rendering_needs_second_attempt() {
        let qr = encode("inverted", ECLevel::M).unwrap();
        let img = rasterize(&qr, &RenderOptions::default().inverted());
        let response = validator().validate(img, "inverted").unwrap();
        assert!(response.is_valid);
        assert_eq!(response.attempts, 2);
        assert!(response.is_inverted);
    }

    #[test]
    fn test_inverted_hint_skips_normal_attempt() {
        let qr = encode("inverted", ECLevel::M).unwrap();
        let img = rasterize(&qr, &RenderOptions::default().inverted());
        let options = ValidateOptions {
            is_inverted: true,
            ..ValidateOptions::default()
        };
        let response = validator().validate_with(img, "inverted", &options).unwrap();
        assert!(response.is_valid);
        assert_eq!(response.attempts, 1);
        assert!(response.is_inverted);
    }

    #[test]
    fn test_mismatch_is_reported() {
        let qr = encode("expected", ECLevel::L).unwrap();
        let response = validator().validate_encoded(&qr, "something else").unwrap();
        assert!(!response.is_valid);
        assert_eq!(response.decoded_text.as_deref(), Some("expected"));
        assert_eq!(response.error_code, Some(ErrorCode::ContentMismatch));
        assert_eq!(response.attempts, 1);
    }

    #[test]
    fn test_blank_image_fails_both_attempts() {
        let pixels = PixelBuffer::new(vec![255; 64 * 64 * 4], 64, 64);
        let response = validator().validate(pixels, "anything").unwrap();
        assert!(!response.is_valid);
        assert_eq!(response.decoded_text, None);
        assert_eq!(response.attempts, 2);
        assert!(response.is_inverted);
        assert_eq!(response.error_code, Some(ErrorCode::NotFound));
    }

    #[test]
    fn test_byte_comparison() {
        let qr = encode("bytes", ECLevel::M).unwrap();
        let upper: StringToBytes = Arc::new(|s: &str| s.to_uppercase().into_bytes());
        let options = ValidateOptions {
            string_to_bytes: Some(upper),
            ..ValidateOptions::default()
        };
        let img = rasterize(&qr, &RenderOptions::default());
        let response = validator().validate_with(img.clone(), "bytes", &options).unwrap();
        assert!(!response.is_valid);
        let response = validator()
            .validate_with(img, "bytes", &ValidateOptions::default())
            .unwrap();
        assert!(response.is_valid);
    }

    #[test]
    fn test_markup_goes_through_rasterizer() {
        let qr = encode("markup", ECLevel::M).unwrap();
        let img = rasterize(&qr, &RenderOptions::default());
        let rasterizer = move |_: &str| -> Result<PixelBuffer, String> { Ok(img.clone().into()) };
        let response = validator()
            .with_rasterizer(rasterizer)
            .validate(ImageSource::Markup("<svg/>".into()), "markup")
            .unwrap();
        assert!(response.is_valid);

        let err = validator()
            .validate(ImageSource::Markup("<svg/>".into()), "markup")
            .unwrap_err();
        assert!(matches!(err, ValidateError::MissingRasterizer));
    }

    #[test]
    fn test_debug_images_written_per_attempt() {
        let dir = std::env::temp_dir().join(format!("styled_qr_validator_{}", std::process::id()));
        let path = dir.join("scan.png");
        let options = ValidateOptions {
            debug_image_path: Some(path.clone()),
            ..ValidateOptions::default()
        };
        let blank = PixelBuffer::new(vec![255; 32 * 32 * 4], 32, 32);
        validator().validate_with(blank, "x", &options).unwrap();
        assert!(path.exists());
        assert!(dir.join("scan-inverted.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_suffixed_paths() {
        assert_eq!(
            suffixed(Path::new("out/a.png"), "inverted"),
            PathBuf::from("out/a-inverted.png")
        );
        assert_eq!(suffixed(Path::new("a"), "inverted"), PathBuf::from("a-inverted"));
    }
}
