use crate::error::BmpError;

/// Resource limits applied before any pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the single output buffer, in bytes.
    ///
    /// For decode this is the RGBA buffer, for encode the whole BMP file.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub fn with_max_width(mut self, max: u64) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn with_max_height(mut self, max: u64) -> Self {
        self.max_height = Some(max);
        self
    }

    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    pub fn with_max_memory_bytes(mut self, max: u64) -> Self {
        self.max_memory_bytes = Some(max);
        self
    }

    /// Check image dimensions and the size of the buffer about to be allocated.
    pub(crate) fn check(&self, width: u32, height: u32, out_bytes: usize) -> Result<(), BmpError> {
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;
        exceeds("output allocation", out_bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, max: Option<u64>) -> Result<(), BmpError> {
    match max {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
