//! # zenbmp
//!
//! Uncompressed BMP decoder and encoder working on RGBA8 buffers.
//!
//! ## Supported Formats
//!
//! - **Decode**: `BITMAPINFOHEADER` BMP, 24-bit BGR or 32-bit BGRA, bottom-up
//!   or top-down. Output is always RGBA8 with the top row first; 24-bit
//!   sources decode fully opaque.
//! - **Encode**: RGBA8 to 24-bit bottom-up BMP. Alpha is dropped.
//!
//! ## Non-Goals
//!
//! - Palette (1/4/8-bit), 16-bit, RLE and bitfield BMP
//! - BITMAPV4/V5 and OS/2 headers, ICC profiles
//! - Animation (BMP has none; [`encode_bmp_animated`] always fails)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{DecodeRequest, EncodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Inspect headers without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.bit_depth);
//!
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! let encoded = EncodeRequest::new().encode(
//!     decoded.pixels(),
//!     decoded.width,
//!     decoded.height,
//!     Unstoppable,
//! )?;
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod logging;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::BmpBitDepth;

/// Decode a BMP to RGBA8 with no limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode RGBA8 pixels to a 24-bit BMP with no limits.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode(pixels, width, height, stop)
}

/// Always fails with [`BmpError::NotSupported`]: BMP has no animation.
pub fn encode_bmp_animated() -> Result<Vec<u8>, BmpError> {
    bmp::encode_animated()
}
