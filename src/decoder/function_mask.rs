use crate::encoder::placement;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
///
/// Built from the encoder's own layout so reader and writer agree on every cell.
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let grid = placement::function_patterns(version);
        let size = grid.size();
        let mask = BitMatrix::from_fn(size, size, |x, y| grid.get(y, x).is_function());
        Self { mask, version }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }
}
