//! Expands a [`HalfGrid`] into a square RGBA image.

use super::color::AvatarColor;
use super::pattern::HalfGrid;
use image::{Rgba, RgbaImage};

/// Pixel value of every cell that is not filled.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Half-open pixel span `[start, end)` covered by grid column or row `index`.
///
/// Boundaries are truncated independently, so when `size` is not a multiple
/// of `grid` neighbouring blocks can differ in width by one pixel. Once
/// `grid > size` some spans are empty and their cells paint nothing.
pub fn block_span(index: u32, block: f64) -> (u32, u32) {
    let start = (f64::from(index) * block) as u32;
    let end = (f64::from(index + 1) * block) as u32;
    (start, end)
}

/// Draw each filled cell and its mirror at column `grid - x - 1`.
pub fn rasterize(mask: &HalfGrid, color: AvatarColor, size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, BACKGROUND);
    let grid = mask.grid();
    let block = f64::from(size) / f64::from(grid);
    let fill = color.to_rgba();

    for (x, y) in mask.filled_cells() {
        let rows = block_span(y, block);
        if rows.0 >= rows.1 {
            continue;
        }
        fill_rect(&mut img, block_span(x, block), rows, fill);

        // The centre column of an odd grid is its own mirror; redrawing is harmless.
        let mirror_x = grid - x - 1;
        fill_rect(&mut img, block_span(mirror_x, block), rows, fill);
    }

    img
}

fn fill_rect(img: &mut RgbaImage, cols: (u32, u32), rows: (u32, u32), col: Rgba<u8>) {
    let x_end = cols.1.min(img.width());
    let y_end = rows.1.min(img.height());
    if cols.0 >= x_end || rows.0 >= y_end {
        return;
    }
    for y in rows.0..y_end {
        for x in cols.0..x_end {
            img.put_pixel(x, y, col);
        }
    }
}
