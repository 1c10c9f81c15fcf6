/// Pixel encodings accepted in BMP input.
///
/// Output is always RGBA8 in memory; this only describes the source file
/// (decode) or the file being written (always [`BmpBitDepth::Bgr24`]).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BmpBitDepth {
    /// 24 bits per pixel, B,G,R byte order, no alpha.
    Bgr24,
    /// 32 bits per pixel, B,G,R,A byte order.
    Bgra32,
}

impl BmpBitDepth {
    /// Map the DIB header's bits-per-pixel field.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    pub fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits_per_pixel() / 8)
    }

    /// Whether the source carries an alpha channel.
    ///
    /// 24-bit sources decode with alpha forced to 255.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Bgra32)
    }
}

/// Bytes per pixel of the in-memory RGBA8 representation.
pub(crate) const RGBA_BYTES: usize = 4;
