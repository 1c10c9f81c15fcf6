//! BMP decoder and encoder (internal), plus the public header layout model.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], or the
//! request builders.

mod decode;
mod encode;
pub mod header;

pub(crate) use decode::{BmpHeader, parse_bmp_header};

use crate::decode::DecodeOutput;
use crate::error::BmpError;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data to RGBA8, top row first.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let header = decode::parse_bmp_header(data)?;
    header.pixel_data_range(data.len())?;
    if let Some(limits) = limits {
        limits.check(header.width, header.height, header.output_size()?)?;
    }
    stop.check()?;
    let pixels = decode::decode_bmp_pixels(data, &header, stop)?;
    Ok(DecodeOutput::new(pixels, &header))
}

/// Encode RGBA8 pixels to a 24-bit BMP.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(pixels, width, height, limits, stop)
}

#[cfg(feature = "imgref")]
pub(crate) fn encode_imgref(
    img: imgref::ImgRef<'_, rgb::RGBA8>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp_imgref(img, limits, stop)
}

/// BMP has no multi-frame form; every animated encode is rejected.
pub(crate) fn encode_animated() -> Result<Vec<u8>, BmpError> {
    Err(BmpError::NotSupported("BMP format does not support animation"))
}

/// Allocate `len` zeroed bytes, reporting exhaustion instead of aborting.
pub(crate) fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>, BmpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BmpError::AllocationFailure(len))?;
    buf.resize(len, 0);
    Ok(buf)
}
