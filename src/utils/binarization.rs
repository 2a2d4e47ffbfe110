/// Luminance to binary conversion; true = dark
use crate::models::BitMatrix;

/// Half-width of the band around the local mean that defers to the global threshold
const LOCAL_CONTRAST: i32 = 8;

/// Binarize with Otsu's global threshold
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    threshold_binarize(gray, width, height, otsu_threshold(gray))
}

/// Otsu's optimal threshold: pixels below it are dark
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut below_count = 0.0;
    let mut below_sum = 0.0;
    let mut best_variance = 0.0;
    let mut best_threshold = 128u8;

    // Threshold t puts intensities 0..t in the dark class
    for t in 1..=255usize {
        below_count += histogram[t - 1] as f64;
        below_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }
        let mean_below = below_sum / below_count;
        let mean_above = (sum_all - below_sum) / above_count;
        let variance = below_count * above_count * (mean_below - mean_above).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    BitMatrix::from_fn(width, height, |x, y| gray[y * width + x] < threshold)
}

/// Local-mean binarization over a `window`-sized box (odd, clamped to ≥ 3).
///
/// Pixels clearly darker or lighter than their neighbourhood follow the local
/// mean; pixels inside flat regions fall back to the global Otsu threshold so
/// large uniform areas keep their colour.
pub fn adaptive_binarize(gray: &[u8], width: usize, height: usize, window: usize) -> BitMatrix {
    let global = otsu_threshold(gray) as i32;
    let integral = integral_image(gray, width, height);
    let half = window.max(3) / 2;
    let stride = width + 1;

    BitMatrix::from_fn(width, height, |x, y| {
        let x0 = x.saturating_sub(half);
        let y0 = y.saturating_sub(half);
        let x1 = (x + half + 1).min(width);
        let y1 = (y + half + 1).min(height);
        let area = ((x1 - x0) * (y1 - y0)) as u64;
        let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
            - integral[y0 * stride + x1]
            - integral[y1 * stride + x0];
        let mean = (sum / area) as i32;
        let pixel = gray[y * width + x] as i32;

        if pixel < mean - LOCAL_CONTRAST {
            true
        } else if pixel > mean + LOCAL_CONTRAST {
            false
        } else {
            pixel < global
        }
    })
}

/// Summed-area table with a zero first row and column
fn integral_image(gray: &[u8], width: usize, height: usize) -> Vec<u64> {
    let stride = width + 1;
    let mut table = vec![0u64; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += gray[y * width + x] as u64;
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }
    table
}
