/// Unmask QR code by applying the mask pattern
use crate::decoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Unmask QR code matrix by XORing data modules with the mask pattern
pub fn unmask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}
