/// RGBA to luminance conversion
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (77*R + 150*G + 29*B) >> 8
///
/// Transparent pixels are composited onto white, so an SVG rendered with a
/// transparent background reads as dark modules on a light field.
use rayon::prelude::*;

/// Coefficients sum to 256 so pure white maps to 255
const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Rows per rayon task
const ROWS_PER_TASK: usize = 16;

#[inline]
fn luminance(px: &[u8]) -> u8 {
    let (r, g, b, a) = (px[0] as u32, px[1] as u32, px[2] as u32, px[3] as u32);
    let lum = ((COEF_R * r + COEF_G * g + COEF_B * b) >> 8).min(255);
    ((lum * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Convert an RGBA buffer to luminance, rows split across the rayon pool
pub fn rgba_to_luminance(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    gray.par_chunks_mut(width * ROWS_PER_TASK)
        .zip(rgba.par_chunks(width * 4 * ROWS_PER_TASK))
        .for_each(|(out, src)| {
            for (g, px) in out.iter_mut().zip(src.chunks_exact(4)) {
                *g = luminance(px);
            }
        });
    gray
}

/// Single-threaded variant, used for small images and as a benchmark baseline
pub fn rgba_to_luminance_scalar(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgba.chunks_exact(4)
        .take(width * height)
        .map(luminance)
        .collect()
}

/// Flip every luminance value (dark becomes light)
pub fn invert_luminance(gray: &[u8]) -> Vec<u8> {
    gray.iter().map(|&g| 255 - g).collect()
}
