use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::bmp::BmpHeader;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{BmpBitDepth, RGBA_BYTES};

/// Decode request builder.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits::default().with_max_pixels(64 * 1024 * 1024);
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.pixels().len(), image.width as usize * image.height as usize * 4);
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating pixel memory.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to RGBA8, top row first.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}

/// Decoded image: always RGBA8, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Pixel encoding of the source file.
    pub source_depth: BmpBitDepth,
    /// Whether the source stored its rows top-down (negative height).
    pub source_top_down: bool,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, header: &BmpHeader) -> Self {
        Self {
            pixels,
            width: header.width,
            height: header.height,
            source_depth: header.depth,
            source_top_down: header.top_down,
        }
    }

    /// RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the RGBA8 bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The `[r, g, b, a]` value at column `x`, row `y` (row 0 is the top).
    pub fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * RGBA_BYTES;
        self.pixels.get(off..off + RGBA_BYTES)?.try_into().ok()
    }

    /// Reinterpret pixel data as a typed RGBA8 slice.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.pixels().as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_pixels(), self.width as usize, self.height as usize)
    }

    /// Convert to an owned [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
