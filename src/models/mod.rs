pub mod matrix;
pub mod module_grid;
pub mod point;
pub mod qr_code;

pub use matrix::BitMatrix;
pub use module_grid::{Module, ModuleGrid};
pub use point::Point;
pub use qr_code::{DecodedQr, ECLevel, MaskPattern, Mode, Version};
