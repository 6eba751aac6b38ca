//! PNG serialization of the pixel buffer.

use crate::error::Result;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

pub const CONTENT_TYPE: &str = "image/png";
pub const EXTENSION: &str = "png";

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
