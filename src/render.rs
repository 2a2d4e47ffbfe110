//! Plain reference rendering of an encoded symbol.
//!
//! Styled output (dot shapes, gradients, logos) is painted elsewhere; these
//! renderers draw square modules only and exist for self-checks and demos.

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::encoder::EncodedQr;

/// Pixel geometry and colours for [`rasterize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Side of one module in pixels
    pub module_px: u32,
    /// Light border width in modules
    pub quiet_zone: u32,
    pub dark: [u8; 4],
    pub light: [u8; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_px: 8,
            quiet_zone: 4,
            dark: [0, 0, 0, 255],
            light: [255, 255, 255, 255],
        }
    }
}

impl RenderOptions {
    /// Same geometry with dark and light swapped
    pub fn inverted(self) -> Self {
        Self {
            dark: self.light,
            light: self.dark,
            ..self
        }
    }
}

/// Paint the symbol as square modules surrounded by the quiet zone
pub fn rasterize(qr: &EncodedQr, options: &RenderOptions) -> RgbaImage {
    let module_px = options.module_px.max(1);
    let border = options.quiet_zone;
    let side = (qr.size() as u32 + 2 * border) * module_px;

    let mut img: RgbaImage = ImageBuffer::new(side, side);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (mx, my) = (x / module_px, y / module_px);
        let size = qr.size() as u32;
        let inside = mx >= border && my >= border && mx - border < size && my - border < size;
        let dark = inside && qr.is_dark((my - border) as usize, (mx - border) as usize);
        *pixel = Rgba(if dark { options.dark } else { options.light });
    }
    img
}

/// SVG markup with one unit per module, dark modules as a single path
pub fn to_svg_string(qr: &EncodedQr, border: usize) -> String {
    let dimension = qr.size() + 2 * border;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for row in 0..qr.size() {
        for col in 0..qr.size() {
            if qr.is_dark(row, col) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", col + border, row + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}
