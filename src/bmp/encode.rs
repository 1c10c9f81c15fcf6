//! BMP encoder: RGBA8 in, uncompressed 24-bit bottom-up BMP out.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE, InfoHeader, row_stride};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::logging::trace;
use crate::pixel::RGBA_BYTES;

/// Output sizes for a 24-bit BMP of the given dimensions.
struct Layout {
    stride: usize,
    pixel_data_size: usize,
    file_size: usize,
}

impl Layout {
    fn bgr24(width: u32, height: u32) -> Result<Self, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge { width, height };
        // Width and height are stored as i32 in the DIB header.
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large());
        }
        let stride = row_stride(width, 3).ok_or_else(too_large)?;
        let pixel_data_size = stride
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;
        let file_size = pixel_data_size
            .checked_add(HEADERS_SIZE)
            .ok_or_else(too_large)?;
        // file_size is a u32 header field.
        if u32::try_from(file_size).is_err() {
            return Err(too_large());
        }
        Ok(Self {
            stride,
            pixel_data_size,
            file_size,
        })
    }
}

/// Check dimensions, compute the file layout, and apply limits.
fn prepare(width: u32, height: u32, limits: Option<&Limits>) -> Result<Layout, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    let layout = Layout::bgr24(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height, layout.file_size)?;
    }
    Ok(layout)
}

/// Allocate the zeroed output and write both headers.
///
/// Zero-fill doubles as the row padding; nothing else writes it.
fn start_file(width: u32, height: u32, layout: &Layout) -> Result<Vec<u8>, BmpError> {
    let mut out = super::try_alloc_zeroed(layout.file_size)?;
    // prepare() has bounded both sizes to u32 and both dimensions to i32.
    let pixel_data_size = layout.pixel_data_size as u32;
    let file = FileHeader::for_pixel_data(pixel_data_size)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    file.write_to(&mut out);
    InfoHeader::bgr24(width as i32, height as i32, pixel_data_size)
        .write_to(&mut out[FILE_HEADER_SIZE..]);
    trace!(
        "Encoding {}x{} BMP, stride {}, {} bytes",
        width, height, layout.stride, layout.file_size
    );
    Ok(out)
}

/// Write top-down source rows of RGBA8 as bottom-up BGR rows.
///
/// `rows` must yield exactly `height` rows of at least `width * 4` bytes.
fn write_rows<'r>(
    out: &mut [u8],
    width: usize,
    layout: &Layout,
    rows: impl Iterator<Item = &'r [u8]>,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let pixel_data = &mut out[HEADERS_SIZE..];
    // Destination row `height - 1 - y` for source row `y`: walk the
    // destination rows from the end.
    let dst_rows = pixel_data.chunks_exact_mut(layout.stride).rev();
    for (y, (src, dst)) in rows.zip(dst_rows).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = &src[..width * RGBA_BYTES];
        for (s, d) in src.chunks_exact(RGBA_BYTES).zip(dst.chunks_exact_mut(3)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
        }
    }
    Ok(())
}

/// Encode a packed RGBA8 buffer (`width * 4` bytes per row, top row first).
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(RGBA_BYTES))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(BmpError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let layout = prepare(width, height, limits)?;
    stop.check()?;

    let mut out = start_file(width, height, &layout)?;
    let rows = pixels[..expected].chunks_exact(w * RGBA_BYTES);
    write_rows(&mut out, w, &layout, rows, stop)?;
    Ok(out)
}

/// Encode from a typed, possibly strided image.
#[cfg(feature = "imgref")]
pub(crate) fn encode_bmp_imgref(
    img: imgref::ImgRef<'_, rgb::RGBA8>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    use rgb::ComponentBytes as _;

    let (Ok(width), Ok(height)) = (u32::try_from(img.width()), u32::try_from(img.height()))
    else {
        return Err(BmpError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        });
    };

    let layout = prepare(width, height, limits)?;
    stop.check()?;

    let mut out = start_file(width, height, &layout)?;
    let rows = img.rows().map(|row| row.as_bytes());
    write_rows(&mut out, img.width(), &layout, rows, stop)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn single_pixel_layout() {
        let out = encode_bmp(&[255, 0, 0, 255], 1, 1, None, &Unstoppable).unwrap();
        assert_eq!(out.len(), 58);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 58);
        assert_eq!(&out[6..10], &[0, 0, 0, 0]);
        assert_eq!(u32::from_le_bytes(out[10..14].try_into().unwrap()), 54);
        // B, G, R, padding
        assert_eq!(&out[54..58], &[0, 0, 255, 0]);
    }

    #[test]
    fn info_header_fields() {
        let pixels = vec![7u8; 5 * 3 * 4];
        let out = encode_bmp(&pixels, 5, 3, None, &Unstoppable).unwrap();
        let mut headers = [0u8; HEADERS_SIZE];
        headers.copy_from_slice(&out[..HEADERS_SIZE]);
        let info = InfoHeader::parse(&headers);
        assert_eq!(info.header_size, 40);
        assert_eq!(info.width, 5);
        assert_eq!(info.height, 3);
        assert_eq!(info.planes, 1);
        assert_eq!(info.bits_per_pixel, 24);
        assert_eq!(info.compression, 0);
        // 5 * 3 = 15, padded to 16
        assert_eq!(info.image_size, 48);
        assert_eq!(info.x_pixels_per_meter, 2835);
        assert_eq!(info.y_pixels_per_meter, 2835);
        assert_eq!(info.colors_used, 0);
        assert_eq!(info.colors_important, 0);
        assert_eq!(out.len(), 54 + 48);
    }

    #[test]
    fn rows_written_bottom_up_with_zero_padding() {
        // 1 wide, 2 tall: top row red, bottom row blue
        let pixels = [255, 0, 0, 9, 0, 0, 255, 9];
        let out = encode_bmp(&pixels, 1, 2, None, &Unstoppable).unwrap();
        // First file row is the bottom (blue) image row.
        assert_eq!(&out[54..58], &[255, 0, 0, 0]);
        assert_eq!(&out[58..62], &[0, 0, 255, 0]);
    }

    #[test]
    fn alpha_is_discarded() {
        let a = encode_bmp(&[1, 2, 3, 0], 1, 1, None, &Unstoppable).unwrap();
        let b = encode_bmp(&[1, 2, 3, 255], 1, 1, None, &Unstoppable).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extra_input_bytes_are_ignored() {
        let out = encode_bmp(&[1, 2, 3, 4, 99, 99], 1, 1, None, &Unstoppable).unwrap();
        assert_eq!(out.len(), 58);
        assert_eq!(&out[54..57], &[3, 2, 1]);
    }

    #[test]
    fn buffer_too_small() {
        let err = encode_bmp(&[0; 15], 2, 2, None, &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BmpError::BufferTooSmall {
                needed: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            encode_bmp(&[], 0, 1, None, &Unstoppable),
            Err(BmpError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_bmp(&[], 1, 0, None, &Unstoppable),
            Err(BmpError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_dimensions_rejected_before_allocation() {
        assert!(matches!(
            Layout::bgr24(i32::MAX as u32 + 1, 1),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
        // 4 GiB of pixel data cannot be described by the u32 file size.
        assert!(matches!(
            Layout::bgr24(65536, 65536),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
        let layout = Layout::bgr24(3, 2).unwrap();
        assert_eq!(layout.stride, 12);
        assert_eq!(layout.pixel_data_size, 24);
        assert_eq!(layout.file_size, 78);
    }

    #[test]
    fn limits_checked_against_file_size() {
        let limits = Limits::default().with_max_memory_bytes(57);
        let err = encode_bmp(&[0; 4], 1, 1, Some(&limits), &Unstoppable).unwrap_err();
        assert!(matches!(err, BmpError::LimitExceeded(_)));

        let limits = Limits::default().with_max_memory_bytes(58);
        assert!(encode_bmp(&[0; 4], 1, 1, Some(&limits), &Unstoppable).is_ok());
    }
}
