use image::RgbaImage;

use crate::error::ValidateError;
use crate::utils::grayscale::{invert_luminance, rgba_to_luminance};

/// Straight (non-premultiplied) RGBA pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self { data, width, height }
    }

    /// Dimensions are non-zero and the buffer holds exactly `width * height` pixels
    pub fn check(&self) -> Result<(), ValidateError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidateError::EmptyImage);
        }
        let expected = self.width * self.height * 4;
        if self.data.len() != expected {
            return Err(ValidateError::MalformedBuffer {
                expected,
                actual: self.data.len(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        Self::new(img.into_raw(), width, height)
    }
}

/// Turns markup (SVG and the like) into pixels; rendering lives outside this crate
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, markup: &str) -> Result<PixelBuffer, String>;
}

impl<F> Rasterizer for F
where
    F: Fn(&str) -> Result<PixelBuffer, String> + Send + Sync,
{
    fn rasterize(&self, markup: &str) -> Result<PixelBuffer, String> {
        self(markup)
    }
}

/// What the validator is asked to read
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Rendered markup, rasterized through the configured [`Rasterizer`]
    Markup(String),
    /// Raw RGBA pixels
    Pixels(PixelBuffer),
    /// Encoded image file contents (PNG, JPEG, ...)
    Encoded(Vec<u8>),
}

impl ImageSource {
    /// Resolve to RGBA pixels
    pub fn into_pixels(
        self,
        rasterizer: Option<&dyn Rasterizer>,
    ) -> Result<PixelBuffer, ValidateError> {
        let pixels = match self {
            ImageSource::Markup(markup) => rasterizer
                .ok_or(ValidateError::MissingRasterizer)?
                .rasterize(&markup)
                .map_err(ValidateError::Rasterize)?,
            ImageSource::Pixels(pixels) => pixels,
            ImageSource::Encoded(bytes) => image::load_from_memory(&bytes)?.to_rgba8().into(),
        };
        pixels.check()?;
        Ok(pixels)
    }
}

impl From<PixelBuffer> for ImageSource {
    fn from(pixels: PixelBuffer) -> Self {
        ImageSource::Pixels(pixels)
    }
}

impl From<RgbaImage> for ImageSource {
    fn from(img: RgbaImage) -> Self {
        ImageSource::Pixels(img.into())
    }
}

/// Luminance plane the decoder works on
#[derive(Debug, Clone)]
pub(crate) struct LuminanceSource {
    pub gray: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl LuminanceSource {
    pub fn from_pixels(pixels: &PixelBuffer) -> Self {
        Self {
            gray: rgba_to_luminance(&pixels.data, pixels.width, pixels.height),
            width: pixels.width,
            height: pixels.height,
        }
    }

    pub fn inverted(&self) -> Self {
        Self {
            gray: invert_luminance(&self.gray),
            width: self.width,
            height: self.height,
        }
    }
}
