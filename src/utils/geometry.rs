/// Projective mapping between symbol module space and image pixels
use crate::models::Point;

/// 3x3 homography with the bottom-right entry fixed at 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    m: [f64; 8],
}

impl PerspectiveTransform {
    /// Solve the transform that carries each `src[i]` onto `dst[i]`.
    ///
    /// Returns `None` when the quadrilaterals are degenerate (three collinear
    /// corners, repeated points).
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x as f64, src[i].y as f64);
            let (dx, dy) = (dst[i].x as f64, dst[i].y as f64);

            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;
            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        let m = solve_linear_system(a, b)?;
        m.iter().all(|v| v.is_finite()).then_some(Self { m })
    }

    /// Map a point; `None` when it lands on the line at infinity
    pub fn transform(&self, p: &Point) -> Option<Point> {
        let m = &self.m;
        let (x, y) = (p.x as f64, p.y as f64);
        let w = m[6] * x + m[7] * y + 1.0;
        if w.abs() < 1e-12 {
            return None;
        }
        Some(Point::new(
            ((m[0] * x + m[1] * y + m[2]) / w) as f32,
            ((m[3] * x + m[4] * y + m[5]) / w) as f32,
        ))
    }
}

/// Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    const N: usize = 8;

    for i in 0..N {
        let pivot = (i..N).max_by(|&r, &s| a[r][i].abs().total_cmp(&a[s][i].abs()))?;
        if a[pivot][i].abs() < 1e-12 {
            return None;
        }
        a.swap(i, pivot);
        b.swap(i, pivot);

        for k in (i + 1)..N {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];
            for j in i..N {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f64; N];
    for i in (0..N).rev() {
        let tail: f64 = ((i + 1)..N).map(|j| a[i][j] * x[j]).sum();
        x[i] = (b[i] - tail) / a[i][i];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: Point, x: f32, y: f32) -> bool {
        (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3
    }

    #[test]
    fn test_scale_and_translate() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        let dst = [
            Point::new(5.0, 5.0),
            Point::new(45.0, 5.0),
            Point::new(5.0, 45.0),
            Point::new(45.0, 45.0),
        ];
        let t = PerspectiveTransform::from_points(&src, &dst).unwrap();
        assert!(close(t.transform(&Point::new(5.0, 5.0)).unwrap(), 25.0, 25.0));
        assert!(close(t.transform(&Point::new(2.5, 7.5)).unwrap(), 15.0, 35.0));
    }

    #[test]
    fn test_corners_map_exactly_under_perspective() {
        let src = [
            Point::new(3.5, 3.5),
            Point::new(17.5, 3.5),
            Point::new(3.5, 17.5),
            Point::new(17.5, 17.5),
        ];
        let dst = [
            Point::new(100.0, 120.0),
            Point::new(310.0, 90.0),
            Point::new(80.0, 330.0),
            Point::new(280.0, 300.0),
        ];
        let t = PerspectiveTransform::from_points(&src, &dst).unwrap();
        for (s, d) in src.iter().zip(dst.iter()) {
            let mapped = t.transform(s).unwrap();
            assert!((mapped.x - d.x).abs() < 0.01 && (mapped.y - d.y).abs() < 0.01);
        }
    }

    #[test]
    fn test_degenerate_quad_rejected() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let dst = src;
        assert!(PerspectiveTransform::from_points(&src, &dst).is_none());
    }
}
