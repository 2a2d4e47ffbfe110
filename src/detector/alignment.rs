/// Alignment pattern search around a predicted position (versions 2+)
use crate::models::{BitMatrix, Point};

/// Most cells of the 5x5 template allowed to disagree
const MAX_MISMATCH: usize = 8;

/// Locate the 5x5 alignment pattern nearest to `predicted`.
///
/// Every pixel within four modules of the prediction is scored against the
/// dark-ring / light-ring / dark-centre template; the best match wins if it is
/// good enough. Ties keep the candidate closest to the prediction.
pub fn find_alignment_center(
    binary: &BitMatrix,
    predicted: Point,
    module_size: f32,
) -> Option<Point> {
    if !predicted.x.is_finite() || !predicted.y.is_finite() || module_size <= 0.0 {
        return None;
    }

    let radius = (module_size * 4.0).max(4.0);
    let max_x = binary.width().saturating_sub(1) as f32;
    let max_y = binary.height().saturating_sub(1) as f32;
    let min_x = (predicted.x - radius).floor().clamp(0.0, max_x) as usize;
    let hi_x = (predicted.x + radius).ceil().clamp(0.0, max_x) as usize;
    let min_y = (predicted.y - radius).floor().clamp(0.0, max_y) as usize;
    let hi_y = (predicted.y + radius).ceil().clamp(0.0, max_y) as usize;

    let mut best: Option<(Point, usize, f32)> = None;
    for y in min_y..=hi_y {
        for x in min_x..=hi_x {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(mismatch) = template_mismatch(binary, &center, module_size) else {
                continue;
            };
            let dist = center.distance_squared(&predicted);
            let better = match best {
                None => true,
                Some((_, m, d)) => mismatch < m || (mismatch == m && dist < d),
            };
            if better {
                best = Some((center, mismatch, dist));
            }
        }
    }

    best.filter(|&(_, mismatch, _)| mismatch <= MAX_MISMATCH)
        .map(|(center, _, _)| center)
}

/// Cells of the 5x5 template that disagree with the image; `None` off-image
fn template_mismatch(binary: &BitMatrix, center: &Point, module_size: f32) -> Option<usize> {
    let mut mismatches = 0;
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let expected = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
            let sx = (center.x + dx as f32 * module_size).floor();
            let sy = (center.y + dy as f32 * module_size).floor();
            if sx < 0.0 || sy < 0.0 {
                return None;
            }
            let (ix, iy) = (sx as usize, sy as usize);
            if ix >= binary.width() || iy >= binary.height() {
                return None;
            }
            if binary.get(ix, iy) != expected {
                mismatches += 1;
            }
        }
    }
    Some(mismatches)
}
