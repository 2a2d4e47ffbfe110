use tracing::debug;

use crate::config::{Binarizer, ValidatorConfig};
use crate::decoder::QrDecoder;
use crate::detector::finder::{FinderDetector, FinderPattern};
use crate::error::DecodeError;
use crate::models::{BitMatrix, DecodedQr, Point};
use crate::utils::binarization::{adaptive_binarize, otsu_binarize};

/// Neighbouring finders whose module sizes differ by less than this share a bin
const BIN_RATIO: f32 = 1.25;

/// Result of one decode attempt over a luminance image
pub(crate) struct ScanOutcome {
    pub result: Result<DecodedQr, DecodeError>,
    /// Last binarization tried, kept for debug images
    pub binary: BitMatrix,
}

/// Binarize with the configured strategy and decode the first symbol found.
///
/// The hybrid strategy runs Otsu first and falls back to the local-mean
/// binarizer; the more advanced of the two failures is reported.
pub(crate) fn scan_luminance(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &ValidatorConfig,
) -> ScanOutcome {
    let binarizers: &[Binarizer] = match config.binarizer {
        Binarizer::Otsu => &[Binarizer::Otsu],
        Binarizer::Adaptive => &[Binarizer::Adaptive],
        Binarizer::Hybrid => &[Binarizer::Otsu, Binarizer::Adaptive],
    };

    let mut worst_case = DecodeError::NotFound;
    let mut binary = BitMatrix::new(width, height);
    for &strategy in binarizers {
        binary = match strategy {
            Binarizer::Adaptive => adaptive_binarize(gray, width, height, config.adaptive_window),
            _ => otsu_binarize(gray, width, height),
        };
        match decode_binary(&binary, config.max_groups) {
            Ok(qr) => {
                return ScanOutcome {
                    result: Ok(qr),
                    binary,
                };
            }
            Err(err) => {
                debug!(?strategy, %err, "binarization did not decode");
                worst_case = worst_case.max(err);
            }
        }
    }

    ScanOutcome {
        result: Err(worst_case),
        binary,
    }
}

/// Locate finder triples in `binary` and decode the first one that works
pub(crate) fn decode_binary(
    binary: &BitMatrix,
    max_groups: usize,
) -> Result<DecodedQr, DecodeError> {
    let patterns = FinderDetector::detect(binary);
    if patterns.len() < 3 {
        debug!(found = patterns.len(), "too few finder patterns");
        return Err(DecodeError::NotFound);
    }

    let mut groups = group_finder_patterns(&patterns);
    rank_and_trim_groups(&mut groups, &patterns, max_groups);
    debug!(patterns = patterns.len(), groups = groups.len(), "finder grouping");

    let mut worst_case = DecodeError::NotFound;
    for (index, group) in groups.iter().enumerate() {
        let [a, b, c] = (*group).map(|i| &patterns[i]);
        let Some((tl, tr, bl, module_size)) = order_finder_patterns(a, b, c) else {
            continue;
        };
        match QrDecoder::decode_from_finders(binary, &tl, &tr, &bl, module_size) {
            Ok(qr) => {
                debug!(group = index, version = qr.version.number(), "group decoded");
                return Ok(qr);
            }
            Err(err) => {
                debug!(group = index, %err, "group failed");
                worst_case = worst_case.max(err);
            }
        }
    }
    Err(worst_case)
}

/// Label a finder triple (top-left, top-right, bottom-left) and re-estimate
/// the module size from the finder spacing
fn order_finder_patterns(
    a: &FinderPattern,
    b: &FinderPattern,
    c: &FinderPattern,
) -> Option<(Point, Point, Point, f32)> {
    let patterns = [a, b, c];
    if patterns.iter().any(|p| p.module_size < 1.0) {
        return None;
    }

    // Top-left sits at the corner closest to a right angle
    let corner_cos = |i: usize| {
        let p = &patterns[i].center;
        let p1 = &patterns[(i + 1) % 3].center;
        let p2 = &patterns[(i + 2) % 3].center;
        let (v1x, v1y) = (p1.x - p.x, p1.y - p.y);
        let (v2x, v2y) = (p2.x - p.x, p2.y - p.y);
        let denom = (v1x * v1x + v1y * v1y).sqrt() * (v2x * v2x + v2y * v2y).sqrt();
        if denom == 0.0 {
            f32::INFINITY
        } else {
            ((v1x * v2x + v1y * v2y) / denom).abs()
        }
    };
    let best = (0..3).min_by(|&i, &j| corner_cos(i).total_cmp(&corner_cos(j)))?;

    let tl = patterns[best];
    let p1 = patterns[(best + 1) % 3];
    let p2 = patterns[(best + 2) % 3];
    let (tr, bl) = if tl.center.cross(&p1.center, &p2.center) > 0.0 {
        (p1, p2)
    } else {
        (p2, p1)
    };

    let avg_module = (tl.module_size + tr.module_size + bl.module_size) / 3.0;
    let d_tr = tl.center.distance(&tr.center);
    let d_bl = tl.center.distance(&bl.center);
    let dim1 = estimate_dimension_from_distance(d_tr, avg_module)?;
    let dim2 = estimate_dimension_from_distance(d_bl, avg_module)?;
    let dim = if dim1.abs_diff(dim2) <= 4 {
        (dim1 + dim2) / 2 / 4 * 4 + 1
    } else {
        return None;
    };

    let module_size = (d_tr + d_bl) / 2.0 / (dim as f32 - 7.0);
    if !(0.7..=1.3).contains(&(module_size / avg_module)) {
        return None;
    }

    Some((tl.center, tr.center, bl.center, module_size))
}

fn estimate_dimension_from_distance(distance: f32, module_size: f32) -> Option<usize> {
    if module_size <= 0.0 {
        return None;
    }
    let raw_dim = distance / module_size + 7.0;
    let version = ((raw_dim - 17.0) / 4.0).round();
    if !(1.0..=40.0).contains(&version) {
        return None;
    }
    Some(17 + 4 * version as usize)
}

/// Bin finders by module size, then look for right-angled triples within each
/// bin and its larger neighbour
fn group_finder_patterns(patterns: &[FinderPattern]) -> Vec<[usize; 3]> {
    if patterns.len() < 3 {
        return Vec::new();
    }

    let mut indexed: Vec<usize> = (0..patterns.len()).collect();
    indexed.sort_by(|&a, &b| patterns[a].module_size.total_cmp(&patterns[b].module_size));

    let mut bins: Vec<Vec<usize>> = Vec::new();
    let mut bin_min = 0.0f32;
    for idx in indexed {
        let size = patterns[idx].module_size;
        match bins.last_mut() {
            Some(bin) if size <= bin_min * BIN_RATIO => bin.push(idx),
            _ => {
                bins.push(vec![idx]);
                bin_min = size;
            }
        }
    }

    let mut groups = Vec::new();
    for (i, bin) in bins.iter().enumerate() {
        let mut indices = bin.clone();
        if let Some(next) = bins.get(i + 1) {
            indices.extend_from_slice(next);
        }
        for group in build_groups(patterns, &indices) {
            let mut key = group;
            key.sort_unstable();
            if !groups.iter().any(|g: &[usize; 3]| {
                let mut other = *g;
                other.sort_unstable();
                other == key
            }) {
                groups.push(group);
            }
        }
    }
    groups
}

fn build_groups(patterns: &[FinderPattern], indices: &[usize]) -> Vec<[usize; 3]> {
    let mut groups = Vec::new();
    for (a, &i) in indices.iter().enumerate() {
        for (b, &j) in indices.iter().enumerate().skip(a + 1) {
            for &k in indices.iter().skip(b + 1) {
                if plausible_triple(&patterns[i], &patterns[j], &patterns[k]) {
                    groups.push([i, j, k]);
                }
            }
        }
    }
    groups
}

fn plausible_triple(pi: &FinderPattern, pj: &FinderPattern, pk: &FinderPattern) -> bool {
    let sizes = [pi.module_size, pj.module_size, pk.module_size];
    let min_size = sizes.iter().copied().fold(f32::INFINITY, f32::min);
    let max_size = sizes.iter().copied().fold(0.0, f32::max);
    if max_size / min_size > 1.5 {
        return false;
    }

    let d = [
        pi.center.distance(&pj.center),
        pi.center.distance(&pk.center),
        pj.center.distance(&pk.center),
    ];
    let min_d = d.iter().copied().fold(f32::INFINITY, f32::min);
    let max_d = d.iter().copied().fold(0.0, f32::max);
    let avg_module = sizes.iter().sum::<f32>() / 3.0;
    if min_d < avg_module * 3.0 || max_d / min_d > 5.0 {
        return false;
    }

    best_corner_cos(d) < 0.3
}

/// Smallest |cos| among the triangle's three corners
fn best_corner_cos([d_ij, d_ik, d_jk]: [f32; 3]) -> f32 {
    let (a2, b2, c2) = (d_ij * d_ij, d_ik * d_ik, d_jk * d_jk);
    let cos_i = ((a2 + b2 - c2) / (2.0 * d_ij * d_ik)).abs();
    let cos_j = ((a2 + c2 - b2) / (2.0 * d_ij * d_jk)).abs();
    let cos_k = ((b2 + c2 - a2) / (2.0 * d_ik * d_jk)).abs();
    cos_i.min(cos_j).min(cos_k)
}

/// Best-looking triples first; at most `max_groups` survive
fn rank_and_trim_groups(
    groups: &mut Vec<[usize; 3]>,
    patterns: &[FinderPattern],
    max_groups: usize,
) {
    groups.sort_by(|a, b| group_score(patterns, a).total_cmp(&group_score(patterns, b)));
    groups.truncate(max_groups);
}

/// Lower is better: consistent sizes, low distortion, a clean right angle and
/// finders confirmed on many rows
fn group_score(patterns: &[FinderPattern], group: &[usize; 3]) -> f32 {
    let [p0, p1, p2] = (*group).map(|i| &patterns[i]);

    let sizes = [p0.module_size, p1.module_size, p2.module_size];
    let min_size = sizes.iter().copied().fold(f32::INFINITY, f32::min);
    let max_size = sizes.iter().copied().fold(0.0, f32::max);
    let size_ratio = max_size / min_size;

    let d = [
        p0.center.distance(&p1.center),
        p0.center.distance(&p2.center),
        p1.center.distance(&p2.center),
    ];
    let min_d = d.iter().copied().fold(f32::INFINITY, f32::min);
    let max_d = d.iter().copied().fold(0.0, f32::max);
    let distortion = max_d / min_d;

    let confirmations = (p0.count + p1.count + p2.count) as f32;
    size_ratio * 2.0 + distortion + best_corner_cos(d) + 1.0 / confirmations
}
