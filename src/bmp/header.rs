//! BMP file header and BITMAPINFOHEADER layout.
//!
//! Both headers are read and written field by field at fixed little-endian
//! offsets. Nothing here validates semantics; see [`super::decode`].

/// Size of the file header (`BITMAPFILEHEADER`).
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of `BITMAPINFOHEADER`, the only DIB header variant supported.
pub const INFO_HEADER_SIZE: usize = 40;
/// Both headers back to back; also the pixel data offset written on encode.
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

pub const MAGIC: [u8; 2] = *b"BM";

/// 2835 pixels per meter is ~72 DPI.
pub const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from the start of the file to the first pixel row.
    pub data_offset: u32,
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Negative means rows are stored top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl FileHeader {
    pub fn parse(headers: &[u8; HEADERS_SIZE]) -> Self {
        Self {
            magic: [headers[0], headers[1]],
            file_size: u32_at(headers, 2),
            reserved1: u16_at(headers, 6),
            reserved2: u16_at(headers, 8),
            data_offset: u32_at(headers, 10),
        }
    }

    /// File header for a 24-bit image whose pixel array directly follows the headers.
    pub fn for_pixel_data(pixel_data_size: u32) -> Option<Self> {
        Some(Self {
            magic: MAGIC,
            file_size: pixel_data_size.checked_add(HEADERS_SIZE as u32)?,
            reserved1: 0,
            reserved2: 0,
            data_offset: HEADERS_SIZE as u32,
        })
    }

    /// Serialize into the first [`FILE_HEADER_SIZE`] bytes of `out`.
    pub fn write_to(&self, out: &mut [u8]) {
        let out = &mut out[..FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
    }
}

impl InfoHeader {
    pub fn parse(headers: &[u8; HEADERS_SIZE]) -> Self {
        Self {
            header_size: u32_at(headers, 14),
            width: i32_at(headers, 18),
            height: i32_at(headers, 22),
            planes: u16_at(headers, 26),
            bits_per_pixel: u16_at(headers, 28),
            compression: u32_at(headers, 30),
            image_size: u32_at(headers, 34),
            x_pixels_per_meter: i32_at(headers, 38),
            y_pixels_per_meter: i32_at(headers, 42),
            colors_used: u32_at(headers, 46),
            colors_important: u32_at(headers, 50),
        }
    }

    /// Header for an uncompressed, bottom-up 24-bit image.
    pub fn bgr24(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Serialize into the first [`INFO_HEADER_SIZE`] bytes of `out`.
    pub fn write_to(&self, out: &mut [u8]) {
        let out = &mut out[..INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// Bytes per row including padding to the next multiple of 4.
///
/// `None` if the row size overflows `usize`.
pub fn row_stride(width: u32, bytes_per_pixel: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(bytes_per_pixel)?
        .checked_add(3)
        .map(|r| r & !3)
}

fn u16_at(b: &[u8; HEADERS_SIZE], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8; HEADERS_SIZE], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8; HEADERS_SIZE], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}
