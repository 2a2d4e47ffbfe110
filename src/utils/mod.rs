//! Image helpers used by the scan validator
//!
//! - Luminance conversion (RGBA composited onto white)
//! - Binarization (Otsu's method and local-mean thresholding)
//! - Perspective transforms between module space and pixels

pub mod binarization;
pub mod geometry;
pub mod grayscale;
