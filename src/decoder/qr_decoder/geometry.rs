use crate::detector::alignment::find_alignment_center;
use crate::models::{BitMatrix, Point, Version};
use crate::tables::alignment_positions;
use crate::utils::geometry::PerspectiveTransform;

/// Fourth corner of the parallelogram spanned by the three finder centres
pub(super) fn estimate_bottom_right(
    top_left: &Point,
    top_right: &Point,
    bottom_left: &Point,
) -> Point {
    Point::new(
        top_right.x + bottom_left.x - top_left.x,
        top_right.y + bottom_left.y - top_left.y,
    )
}

/// Side length implied by the finder spacing, snapped to `17 + 4v`
pub(super) fn estimate_dimension(
    top_left: &Point,
    top_right: &Point,
    bottom_left: &Point,
    module_size: f32,
) -> Option<usize> {
    if module_size <= 0.0 {
        return None;
    }
    let across = (top_left.distance(top_right) + top_left.distance(bottom_left)) / 2.0;
    let raw = across / module_size + 7.0;
    let version = ((raw - 17.0) / 4.0).round();
    if !(1.0..=40.0).contains(&version) {
        return None;
    }
    Some(17 + 4 * version as usize)
}

/// The estimate first, then its neighbours one version either side
pub(super) fn dimension_candidates(estimate: usize) -> Vec<usize> {
    let mut dims = vec![estimate];
    if estimate + 4 <= Version::MAX.size() {
        dims.push(estimate + 4);
    }
    if estimate >= Version::MIN.size() + 4 {
        dims.push(estimate - 4);
    }
    dims
}

/// Module space → image: finder centres sit at 3.5 modules from each edge
pub(super) fn build_transform(
    corners: &[Point; 4],
    dimension: usize,
) -> Option<PerspectiveTransform> {
    let far = dimension as f32 - 3.5;
    let src = [
        Point::new(3.5, 3.5),
        Point::new(far, 3.5),
        Point::new(3.5, far),
        Point::new(far, far),
    ];
    PerspectiveTransform::from_points(&src, corners)
}

/// Re-anchor the fourth corner on the bottom-right alignment pattern.
///
/// `None` when the version has no alignment pattern or it cannot be found
/// near where the finder-only transform predicts it.
pub(super) fn refine_with_alignment(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    corners: &[Point; 4],
    dimension: usize,
    module_size: f32,
) -> Option<PerspectiveTransform> {
    let version = Version::from_size(dimension)?;
    let &last = alignment_positions(version).last()?;
    let align_src = Point::new(last as f32 + 0.5, last as f32 + 0.5);
    let predicted = transform.transform(&align_src)?;
    let found = find_alignment_center(binary, predicted, module_size)?;

    let far = dimension as f32 - 3.5;
    let src = [
        Point::new(3.5, 3.5),
        Point::new(far, 3.5),
        Point::new(3.5, far),
        align_src,
    ];
    let dst = [corners[0], corners[1], corners[2], found];
    PerspectiveTransform::from_points(&src, &dst)
}

/// Sample every module centre, majority-voting a 3x3 pixel neighbourhood
/// once modules are large enough to hold one
pub(super) fn sample_grid(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
    module_size: f32,
) -> BitMatrix {
    let reach: isize = if module_size >= 3.0 { 1 } else { 0 };
    BitMatrix::from_fn(dimension, dimension, |x, y| {
        let Some(p) = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5)) else {
            return false;
        };
        if !p.x.is_finite() || !p.y.is_finite() {
            return false;
        }
        let (cx, cy) = (p.x.floor() as isize, p.y.floor() as isize);

        let mut dark = 0;
        let mut total = 0;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (sx, sy) = (cx + dx, cy + dy);
                if sx < 0
                    || sy < 0
                    || sx as usize >= binary.width()
                    || sy as usize >= binary.height()
                {
                    continue;
                }
                total += 1;
                if binary.get(sx as usize, sy as usize) {
                    dark += 1;
                }
            }
        }
        total > 0 && dark * 2 > total
    })
}

/// Outer symbol corners in image space (TL, TR, BR, BL)
pub(super) fn symbol_corners(transform: &PerspectiveTransform, dimension: usize) -> [Point; 4] {
    let n = dimension as f32;
    [(0.0, 0.0), (n, 0.0), (n, n), (0.0, n)]
        .map(|(x, y)| transform.transform(&Point::new(x, y)).unwrap_or_default())
}
