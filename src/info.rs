use crate::bmp::parse_bmp_header;
use crate::error::BmpError;
use crate::pixel::BmpBitDepth;

/// Header-only description of a BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    /// Absolute height; see `top_down` for the row order.
    pub height: u32,
    pub bit_depth: BmpBitDepth,
    pub top_down: bool,
    /// Offset of the pixel array from the start of the file.
    pub data_offset: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
}

impl ImageInfo {
    /// Read BMP headers without decoding pixels.
    ///
    /// Applies the same header validation as a full decode but does not check
    /// that the pixel data is present.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let header = parse_bmp_header(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            bit_depth: header.depth,
            top_down: header.top_down,
            data_offset: header.file.data_offset,
            x_pixels_per_meter: header.info.x_pixels_per_meter,
            y_pixels_per_meter: header.info.y_pixels_per_meter,
        })
    }
}
