/// Symbol decoder: sampled module grid (or located finders) to payload
use crate::decoder::format::FormatInfo;
use crate::decoder::version::VersionInfo;
use crate::error::DecodeError;
use crate::models::{BitMatrix, DecodedQr, Point, Version};

mod geometry;
mod orientation;
pub(crate) mod payload;

#[cfg(test)]
mod tests;

/// Main QR decoder that processes a sampled or detected symbol
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a square module grid (true = dark, no quiet zone).
    ///
    /// All four rotations and their mirrors are tried, grids whose finder
    /// corners already look right first. On failure the error of the attempt
    /// that got furthest is returned.
    pub fn decode_matrix(matrix: &BitMatrix) -> Result<DecodedQr, DecodeError> {
        if matrix.width() != matrix.height() {
            return Err(DecodeError::NotFound);
        }
        let version = Version::from_size(matrix.width()).ok_or(DecodeError::NotFound)?;

        let mut candidates = orientation::orientations(matrix);
        candidates.sort_by_key(|m| !orientation::has_finders_correct(m));

        let n = matrix.width() as f32;
        let position = [
            Point::new(0.0, 0.0),
            Point::new(n, 0.0),
            Point::new(n, n),
            Point::new(0.0, n),
        ];

        let mut worst_case = DecodeError::NotFound;
        for grid in candidates {
            match Self::decode_oriented(&grid, version, position) {
                Ok(qr) => return Ok(qr),
                Err(err) => worst_case = worst_case.max(err),
            }
        }
        Err(worst_case)
    }

    /// Decode from three finder centres located in a binarized image.
    ///
    /// Tries the estimated side length and one version either side, each with
    /// and without alignment-pattern refinement.
    pub fn decode_from_finders(
        binary: &BitMatrix,
        top_left: &Point,
        top_right: &Point,
        bottom_left: &Point,
        module_size: f32,
    ) -> Result<DecodedQr, DecodeError> {
        let estimate = geometry::estimate_dimension(top_left, top_right, bottom_left, module_size)
            .ok_or(DecodeError::NotFound)?;
        let bottom_right = geometry::estimate_bottom_right(top_left, top_right, bottom_left);
        let corners = [*top_left, *top_right, *bottom_left, bottom_right];

        let mut worst_case = DecodeError::NotFound;
        for dimension in geometry::dimension_candidates(estimate) {
            let Some(transform) = geometry::build_transform(&corners, dimension) else {
                continue;
            };
            let refined = geometry::refine_with_alignment(
                binary,
                &transform,
                &corners,
                dimension,
                module_size,
            );

            for candidate in refined.iter().chain(std::iter::once(&transform)) {
                let grid = geometry::sample_grid(binary, candidate, dimension, module_size);
                match Self::decode_matrix(&grid) {
                    Ok(mut qr) => {
                        qr.position = geometry::symbol_corners(candidate, dimension);
                        return Ok(qr);
                    }
                    Err(err) => worst_case = worst_case.max(err),
                }
            }
        }
        Err(worst_case)
    }

    fn decode_oriented(
        grid: &BitMatrix,
        version: Version,
        position: [Point; 4],
    ) -> Result<DecodedQr, DecodeError> {
        let format = FormatInfo::extract(grid).ok_or(DecodeError::Format)?;
        if VersionInfo::extract(grid) != Some(version) {
            return Err(DecodeError::Format);
        }

        let decoded = payload::decode_symbol(grid, version, &format)?;
        let content = String::from_utf8_lossy(&decoded.data).into_owned();
        Ok(DecodedQr {
            data: decoded.data,
            content,
            version,
            error_correction: format.ec_level,
            mask_pattern: format.mask_pattern,
            modes: decoded.modes,
            corrected_codewords: decoded.corrected,
            position,
            modules: grid.clone(),
        })
    }
}
