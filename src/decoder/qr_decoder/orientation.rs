use crate::models::BitMatrix;

/// Rotate a square matrix by a quarter turn clockwise
pub(super) fn rotate90(matrix: &BitMatrix) -> BitMatrix {
    let n = matrix.width();
    BitMatrix::from_fn(n, n, |x, y| matrix.get(y, n - 1 - x))
}

/// Mirror across the main diagonal (what a symbol printed mirrored looks like
/// after the finders are lined up)
pub(super) fn transpose(matrix: &BitMatrix) -> BitMatrix {
    let n = matrix.width();
    BitMatrix::from_fn(n, n, |x, y| matrix.get(y, x))
}

/// The four rotations followed by the four rotations of the transpose
pub(super) fn orientations(matrix: &BitMatrix) -> Vec<BitMatrix> {
    let mut out = Vec::with_capacity(8);
    for start in [matrix.clone(), transpose(matrix)] {
        let mut current = start;
        for _ in 0..4 {
            let next = rotate90(&current);
            out.push(current);
            current = next;
        }
    }
    out
}

/// Whether the three finder corners hold dark 7x7 rings with a dark 3x3 core
pub(super) fn has_finders_correct(matrix: &BitMatrix) -> bool {
    let n = matrix.width();
    if n < 21 {
        return false;
    }
    [(0, 0), (n - 7, 0), (0, n - 7)]
        .iter()
        .all(|&(ox, oy)| finder_matches(matrix, ox, oy))
}

fn finder_matches(matrix: &BitMatrix, ox: usize, oy: usize) -> bool {
    let mut mismatches = 0;
    for dy in 0..7 {
        for dx in 0..7 {
            let ring = dx.min(dy).min(6 - dx).min(6 - dy);
            let expected = ring != 1;
            if matrix.get(ox + dx, oy + dy) != expected {
                mismatches += 1;
            }
        }
    }
    mismatches <= 4
}
