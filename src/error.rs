use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and encoding.
///
/// Everything except [`BmpError::AllocationFailure`] describes bad input or a
/// caller-imposed limit and is safe to surface to users.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("input too small for BMP headers: got {actual} bytes, need 54")]
    TooSmall { actual: usize },

    #[error("missing BM signature")]
    BadMagic,

    #[error("unsupported DIB header size {0}, only BITMAPINFOHEADER (40) is supported")]
    UnsupportedHeader(u32),

    #[error("unsupported BMP compression {0}, only uncompressed BMP is supported")]
    UnsupportedCompression(u32),

    #[error("unsupported BMP bit depth {0}, only 24 and 32 are supported")]
    UnsupportedBitDepth(u16),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("pixel data offset {0} points inside the BMP headers")]
    InvalidDataOffset(u32),

    #[error("pixel data truncated: need {needed} bytes, got {actual}")]
    TruncatedData { needed: u64, actual: usize },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("{0}")]
    NotSupported(&'static str),

    /// The single output buffer could not be allocated.
    ///
    /// Returned by every decode entry point (`decode_bmp`,
    /// `DecodeRequest::decode`) and every encode entry point (`encode_bmp`,
    /// `EncodeRequest::encode`, `EncodeRequest::encode_imgref`) after all
    /// input validation has passed. No partial output is kept.
    #[error("failed to allocate {0} bytes")]
    AllocationFailure(usize),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
