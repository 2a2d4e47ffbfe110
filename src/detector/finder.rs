/// Finder pattern detection using 1:1:3:1:1 ratio scanning with cross-checks
use crate::models::{BitMatrix, Point};

/// Allowed deviation of each run from its ideal module multiple
const RATIO_TOLERANCE: f32 = 0.5;

/// Stop collecting after this many candidates on a single row
const MAX_PATTERNS_PER_ROW: usize = 5;

/// One located finder pattern; coordinates are continuous (pixel `i` covers `[i, i + 1)`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    pub center: Point,
    pub module_size: f32,
    /// Number of scan rows that confirmed this pattern
    pub count: usize,
}

impl FinderPattern {
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
            count: 1,
        }
    }

    /// Same pattern seen from another row: centres within a module, sizes alike
    fn about_equals(&self, other: &FinderPattern) -> bool {
        let reach = self.module_size.max(other.module_size);
        (self.center.x - other.center.x).abs() <= reach
            && (self.center.y - other.center.y).abs() <= reach
            && (self.module_size - other.module_size).abs() <= reach.max(1.0) * 0.5
    }

    /// Running average weighted by confirmation count
    fn combine(&self, other: &FinderPattern) -> FinderPattern {
        let total = (self.count + other.count) as f32;
        let (a, b) = (self.count as f32, other.count as f32);
        FinderPattern {
            center: Point::new(
                (self.center.x * a + other.center.x * b) / total,
                (self.center.y * a + other.center.y * b) / total,
            ),
            module_size: (self.module_size * a + other.module_size * b) / total,
            count: self.count + other.count,
        }
    }
}

pub struct FinderDetector;

impl FinderDetector {
    /// Every pattern confirmed horizontally and vertically, most-confirmed first
    pub fn detect(matrix: &BitMatrix) -> Vec<FinderPattern> {
        let mut candidates = Vec::new();
        for y in 0..matrix.height() {
            if !Self::has_significant_edges(matrix, y) {
                continue;
            }
            candidates.extend(Self::scan_row(matrix, y));
        }

        let mut merged = Self::merge_candidates(candidates);
        merged.sort_by(|a, b| b.count.cmp(&a.count));
        merged
    }

    /// Cheap pre-filter: a finder row has at least four colour changes
    fn has_significant_edges(matrix: &BitMatrix, y: usize) -> bool {
        let mut transitions = 0;
        let mut prev = matrix.get(0, y);
        for x in 1..matrix.width() {
            let color = matrix.get(x, y);
            if color != prev {
                transitions += 1;
                if transitions >= 4 {
                    return true;
                }
                prev = color;
            }
        }
        false
    }

    fn scan_row(matrix: &BitMatrix, y: usize) -> Vec<FinderPattern> {
        let width = matrix.width();
        let mut candidates = Vec::new();
        let mut runs: Vec<(bool, usize)> = Vec::new();
        let mut run_start = 0usize;
        let mut current = matrix.get(0, y);

        // x == width flushes the final run
        for x in 1..=width {
            let color = x < width && matrix.get(x, y);
            if x < width && color == current {
                continue;
            }
            runs.push((current, x - run_start));
            run_start = x;
            current = color;

            if runs.len() < 5 {
                continue;
            }
            let window = &runs[runs.len() - 5..];
            let colors_ok =
                window[0].0 && !window[1].0 && window[2].0 && !window[3].0 && window[4].0;
            if !colors_ok {
                continue;
            }
            let lengths = [window[0].1, window[1].1, window[2].1, window[3].1, window[4].1];
            if !Self::quick_ratio_check(&lengths) || !Self::check_ratio(&lengths) {
                continue;
            }

            let center_x =
                x as f32 - lengths[4] as f32 - lengths[3] as f32 - lengths[2] as f32 / 2.0;
            if let Some(pattern) = Self::confirm(matrix, center_x, y, lengths.iter().sum()) {
                candidates.push(pattern);
                if candidates.len() >= MAX_PATTERNS_PER_ROW {
                    break;
                }
            }
        }

        candidates
    }

    /// Integer pre-check before the floating-point ratio test
    fn quick_ratio_check(lengths: &[usize; 5]) -> bool {
        let [b1, w1, b2, w2, b3] = *lengths;
        let total = b1 + w1 + b2 + w2 + b3;
        if total < 7 {
            return false;
        }
        let outer = b1.min(b3).max(1);
        if b2 < outer * 2 || b2 > outer * 5 {
            return false;
        }
        let outer_avg = ((b1 + b3 + w1 + w2) / 4).max(1);
        let similar = outer_avg / 2..=outer_avg * 2;
        similar.contains(&w1) && similar.contains(&w2)
    }

    fn check_ratio(lengths: &[usize; 5]) -> bool {
        let total: usize = lengths.iter().sum();
        if total < 7 || lengths.iter().any(|&l| l == 0) {
            return false;
        }
        let unit = total as f32 / 7.0;
        let tolerance = unit * RATIO_TOLERANCE;
        lengths
            .iter()
            .zip([1.0, 1.0, 3.0, 1.0, 1.0])
            .all(|(&len, ideal)| (len as f32 - ideal * unit).abs() <= tolerance * ideal.max(1.0))
    }

    /// Re-measure the candidate vertically, then horizontally at the refined row
    fn confirm(
        matrix: &BitMatrix,
        center_x: f32,
        y: usize,
        row_total: usize,
    ) -> Option<FinderPattern> {
        let cx = center_x.floor() as usize;
        let (center_y, vertical_total) =
            Self::cross_check(matrix, cx, y, Axis::Vertical, row_total)?;
        let cy = center_y.floor() as usize;
        let (refined_x, horizontal_total) =
            Self::cross_check(matrix, cx, cy, Axis::Horizontal, row_total)?;

        let module_size = (vertical_total + horizontal_total) as f32 / 14.0;
        Some(FinderPattern::new(refined_x, center_y, module_size))
    }

    /// Measure the five runs through `(x, y)` along `axis`.
    ///
    /// Returns the continuous centre coordinate along the axis and the total
    /// run length, or `None` when the runs do not look like a finder or differ
    /// too much from the `expected_total` seen on the scan row.
    fn cross_check(
        matrix: &BitMatrix,
        x: usize,
        y: usize,
        axis: Axis,
        expected_total: usize,
    ) -> Option<(f32, usize)> {
        let (origin, limit) = match axis {
            Axis::Vertical => (y, matrix.height()),
            Axis::Horizontal => (x, matrix.width()),
        };
        let dark_at = |t: usize| match axis {
            Axis::Vertical => matrix.get(x, t),
            Axis::Horizontal => matrix.get(t, y),
        };
        if !dark_at(origin) {
            return None;
        }
        let max_run = expected_total;
        let mut runs = [0usize; 5];

        // Backwards: centre, inner light ring, outer dark ring
        let mut t = origin as isize;
        for (state, want_dark) in [(2usize, true), (1, false), (0, true)] {
            while t >= 0 && dark_at(t as usize) == want_dark && runs[state] <= max_run {
                runs[state] += 1;
                t -= 1;
            }
            if runs[state] == 0 || runs[state] > max_run {
                return None;
            }
        }
        let start = origin - (runs[2] - 1);

        // Forwards from the pixel after the origin
        let mut t = origin + 1;
        for (state, want_dark) in [(2usize, true), (3, false), (4, true)] {
            let before = runs[state];
            while t < limit && dark_at(t) == want_dark && runs[state] <= max_run + before {
                runs[state] += 1;
                t += 1;
            }
            if runs[state] == 0 || runs[state] - before > max_run {
                return None;
            }
        }

        let total: usize = runs.iter().sum();
        if 5 * total.abs_diff(expected_total) >= 2 * expected_total {
            return None;
        }
        if !Self::check_ratio(&runs) {
            return None;
        }
        let end = start + runs[2];
        Some(((start + end) as f32 / 2.0, total))
    }

    fn merge_candidates(candidates: Vec<FinderPattern>) -> Vec<FinderPattern> {
        let mut merged: Vec<FinderPattern> = Vec::new();
        for candidate in candidates {
            match merged.iter_mut().find(|p| p.about_equals(&candidate)) {
                Some(existing) => *existing = existing.combine(&candidate),
                None => merged.push(candidate),
            }
        }
        merged
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}
