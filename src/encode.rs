use alloc::vec::Vec;
use enough::Stop;

use crate::error::BmpError;
use crate::limits::Limits;

/// Encode request builder.
///
/// Output is always an uncompressed, bottom-up, 24-bit BMP at 72 DPI.
/// Input alpha is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images exceeding `limits` before allocating the output.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode RGBA8 pixels, `width * 4` bytes per row, top row first.
    ///
    /// `pixels` may be longer than `width * height * 4`; extra bytes are ignored.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode(pixels, width, height, self.limits, &stop)
    }

    /// Encode a typed image; rows may be strided.
    #[cfg(feature = "imgref")]
    pub fn encode_imgref(
        &self,
        img: imgref::ImgRef<'_, rgb::RGBA8>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode_imgref(img, self.limits, &stop)
    }

    /// Always fails with [`BmpError::NotSupported`]: BMP cannot hold animation.
    pub fn encode_animated<F>(&self, _frames: F) -> Result<Vec<u8>, BmpError>
    where
        F: IntoIterator,
    {
        crate::bmp::encode_animated()
    }
}
