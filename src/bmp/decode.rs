//! BMP decoder: uncompressed BITMAPINFOHEADER, 24-bit BGR and 32-bit BGRA.
//!
//! Output is always RGBA8, top row first, whatever the source row order.

use alloc::vec::Vec;
use core::ops::Range;

use enough::Stop;

use super::header::{FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE, InfoHeader, MAGIC, row_stride};
use crate::error::BmpError;
use crate::logging::{trace, warning};
use crate::pixel::{BmpBitDepth, RGBA_BYTES};

// ── Parsed BMP header info ──────────────────────────────────────────

#[derive(Debug)]
pub(crate) struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub depth: BmpBitDepth,
    pub width: u32,
    /// Absolute height; row order lives in `top_down`.
    pub height: u32,
    pub top_down: bool,
    /// Source row size including padding.
    pub stride: usize,
}

impl BmpHeader {
    /// Byte range of the pixel array inside `data`, or `TruncatedData`.
    pub fn pixel_data_range(&self, data_len: usize) -> Result<Range<usize>, BmpError> {
        let start = u64::from(self.file.data_offset);
        let end = (self.stride as u64)
            .saturating_mul(u64::from(self.height))
            .saturating_add(start);
        if end > data_len as u64 {
            return Err(BmpError::TruncatedData {
                needed: end,
                actual: data_len,
            });
        }
        // Both bounds are <= data_len here, so they fit in usize.
        Ok(start as usize..end as usize)
    }

    /// Size of the RGBA8 output buffer.
    pub fn output_size(&self) -> Result<usize, BmpError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(RGBA_BYTES))
            .ok_or(BmpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse and validate both headers.
///
/// Checks run in a fixed order and stop at the first failure: length,
/// signature, DIB header size, compression, bit depth, then dimensions and
/// data offset. The pixel extent is checked separately by
/// [`BmpHeader::pixel_data_range`].
pub(crate) fn parse_bmp_header(data: &[u8]) -> Result<BmpHeader, BmpError> {
    let headers: &[u8; HEADERS_SIZE] = data
        .first_chunk()
        .ok_or(BmpError::TooSmall { actual: data.len() })?;

    let file = FileHeader::parse(headers);
    if file.magic != MAGIC {
        return Err(BmpError::BadMagic);
    }

    let info = InfoHeader::parse(headers);
    if info.header_size != INFO_HEADER_SIZE as u32 {
        return Err(BmpError::UnsupportedHeader(info.header_size));
    }
    if info.compression != 0 {
        return Err(BmpError::UnsupportedCompression(info.compression));
    }
    let depth = BmpBitDepth::from_bits(info.bits_per_pixel)
        .ok_or(BmpError::UnsupportedBitDepth(info.bits_per_pixel))?;

    if info.width <= 0 || info.height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: i64::from(info.width),
            height: i64::from(info.height),
        });
    }
    if (file.data_offset as usize) < HEADERS_SIZE {
        return Err(BmpError::InvalidDataOffset(file.data_offset));
    }

    let width = info.width.unsigned_abs();
    let height = info.height.unsigned_abs();
    let top_down = info.height < 0;
    let stride = row_stride(width, depth.bytes_per_pixel())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    // Accepted, but worth knowing about when a file renders oddly elsewhere.
    if info.planes != 1 {
        warning!("BMP planes field is {}, expected 1", info.planes);
    }
    if file.reserved1 != 0 || file.reserved2 != 0 {
        warning!("BMP reserved fields are non-zero");
    }
    if file.file_size != 0 && file.file_size as usize != data.len() {
        warning!(
            "BMP file size field ({}) doesn't match actual size ({})",
            file.file_size,
            data.len()
        );
    }

    trace!("Width: {}", width);
    trace!("Height: {}", height);
    trace!("Bit depth: {:?}", depth);
    trace!("Top-down: {}", top_down);

    Ok(BmpHeader {
        file,
        info,
        depth,
        width,
        height,
        top_down,
        stride,
    })
}

// ── Pixel conversion ────────────────────────────────────────────────

/// Convert the pixel array described by `header` into a fresh RGBA8 buffer.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let range = header.pixel_data_range(data.len())?;
    let pixel_data = &data[range];

    let out_size = header.output_size()?;
    let mut out = super::try_alloc_zeroed(out_size)?;

    let w = header.width as usize;
    let h = header.height as usize;
    let src_row_len = w * header.depth.bytes_per_pixel();

    for (y, dst) in out.chunks_exact_mut(w * RGBA_BYTES).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_y = if header.top_down { y } else { h - 1 - y };
        let row_start = src_y * header.stride;
        let src = &pixel_data[row_start..row_start + src_row_len];
        if header.depth.has_alpha() {
            bgra_to_rgba(src, dst);
        } else {
            bgr_to_rgba(src, dst);
        }
    }

    Ok(out)
}

/// 24-bit sources have no alpha; every pixel becomes fully opaque.
fn bgr_to_rgba(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = 0xFF;
    }
}

fn bgra_to_rgba(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = s[3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    /// Build a BMP with the given raw (already BGR/BGRA, unpadded) rows in file order.
    fn build(width: i32, height: i32, bpp: u16, file_rows: &[&[u8]]) -> Vec<u8> {
        let stride = row_stride(width as u32, usize::from(bpp / 8)).unwrap();
        let mut out = vec![0u8; HEADERS_SIZE + stride * file_rows.len()];
        FileHeader::for_pixel_data((stride * file_rows.len()) as u32)
            .unwrap()
            .write_to(&mut out);
        let mut info = InfoHeader::bgr24(width, height, 0);
        info.bits_per_pixel = bpp;
        info.write_to(&mut out[14..]);
        for (i, row) in file_rows.iter().enumerate() {
            let start = HEADERS_SIZE + i * stride;
            out[start..start + row.len()].copy_from_slice(row);
        }
        out
    }

    fn decode(data: &[u8]) -> Result<(BmpHeader, Vec<u8>), BmpError> {
        let header = parse_bmp_header(data)?;
        let pixels = decode_bmp_pixels(data, &header, &Unstoppable)?;
        Ok((header, pixels))
    }

    #[test]
    fn single_red_pixel_24bit() {
        // B=0, G=0, R=255, then one padding byte
        let data = build(1, 1, 24, &[&[0, 0, 255]]);
        assert_eq!(data.len(), 58);
        let (header, pixels) = decode(&data).unwrap();
        assert_eq!((header.width, header.height), (1, 1));
        assert_eq!(header.stride, 4);
        assert_eq!(pixels, [255, 0, 0, 255]);
    }

    #[test]
    fn bottom_up_rows_are_reflected() {
        // File order is bottom row first.
        let data = build(1, 3, 24, &[&[3, 3, 3], &[2, 2, 2], &[1, 1, 1]]);
        let (header, pixels) = decode(&data).unwrap();
        assert!(!header.top_down);
        assert_eq!(pixels, [1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255]);
    }

    #[test]
    fn top_down_rows_keep_file_order() {
        let data = build(1, -3, 24, &[&[1, 1, 1], &[2, 2, 2], &[3, 3, 3]]);
        let (header, pixels) = decode(&data).unwrap();
        assert!(header.top_down);
        assert_eq!(header.height, 3);
        assert_eq!(pixels, [1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255]);
    }

    #[test]
    fn bgra32_keeps_alpha() {
        let data = build(2, 1, 32, &[&[10, 20, 30, 40, 50, 60, 70, 0]]);
        let (header, pixels) = decode(&data).unwrap();
        assert_eq!(header.depth, BmpBitDepth::Bgra32);
        assert_eq!(pixels, [30, 20, 10, 40, 70, 60, 50, 0]);
    }

    #[test]
    fn padding_bytes_are_skipped() {
        // width 3 at 24 bits: 9 bytes of pixels + 3 padding per row
        let row0 = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let row1 = [11, 12, 13, 14, 15, 16, 17, 18, 19];
        let mut data = build(3, -2, 24, &[&row0, &row1]);
        // Poison the padding so a stride bug would show up in the output.
        data[54 + 9..54 + 12].fill(0xEE);
        let (_, pixels) = decode(&data).unwrap();
        assert_eq!(
            pixels,
            [
                3, 2, 1, 255, 6, 5, 4, 255, 9, 8, 7, 255, //
                13, 12, 11, 255, 16, 15, 14, 255, 19, 18, 17, 255,
            ]
        );
    }

    #[test]
    fn data_offset_past_headers_is_honoured() {
        let mut data = build(1, 1, 24, &[&[0, 255, 0]]);
        // Insert a 6-byte gap between headers and pixels.
        for _ in 0..6 {
            data.insert(HEADERS_SIZE, 0xAA);
        }
        data[10..14].copy_from_slice(&60u32.to_le_bytes());
        let (_, pixels) = decode(&data).unwrap();
        assert_eq!(pixels, [0, 255, 0, 255]);
    }

    #[test]
    fn validation_order() {
        // Too small wins over everything, even without a signature.
        assert!(matches!(
            parse_bmp_header(&[0u8; 53]),
            Err(BmpError::TooSmall { actual: 53 })
        ));

        let good = build(1, 1, 24, &[&[0, 0, 0]]);

        let mut bad = good.clone();
        bad[0] = b'X';
        bad[14] = 12; // also a bad header size; magic is reported first
        assert!(matches!(parse_bmp_header(&bad), Err(BmpError::BadMagic)));

        let mut bad = good.clone();
        bad[14..18].copy_from_slice(&124u32.to_le_bytes());
        bad[30] = 1;
        assert!(matches!(
            parse_bmp_header(&bad),
            Err(BmpError::UnsupportedHeader(124))
        ));

        let mut bad = good.clone();
        bad[30..34].copy_from_slice(&3u32.to_le_bytes());
        bad[28] = 8;
        assert!(matches!(
            parse_bmp_header(&bad),
            Err(BmpError::UnsupportedCompression(3))
        ));

        let mut bad = good.clone();
        bad[28..30].copy_from_slice(&16u16.to_le_bytes());
        assert!(matches!(
            parse_bmp_header(&bad),
            Err(BmpError::UnsupportedBitDepth(16))
        ));
    }

    #[test]
    fn truncated_pixel_data() {
        let data = build(2, 2, 24, &[&[0; 6], &[0; 6]]);
        let short = &data[..data.len() - 1];
        let header = parse_bmp_header(short).unwrap();
        let err = decode_bmp_pixels(short, &header, &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BmpError::TruncatedData {
                needed: 70,
                actual: 69
            }
        ));
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let mut data = build(1, 1, 24, &[&[0, 0, 0]]);
        data[10..14].copy_from_slice(&u32::MAX.to_le_bytes());
        data[22..26].copy_from_slice(&i32::MIN.to_le_bytes());
        let header = parse_bmp_header(&data).unwrap();
        assert_eq!(header.height, 1 << 31);
        assert!(matches!(
            header.pixel_data_range(data.len()),
            Err(BmpError::TruncatedData { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_width_and_zero_height() {
        for (w, h) in [(0, 1), (-1, 1), (1, 0)] {
            let mut data = build(1, 1, 24, &[&[0, 0, 0]]);
            data[18..22].copy_from_slice(&i32::to_le_bytes(w));
            data[22..26].copy_from_slice(&i32::to_le_bytes(h));
            assert!(
                matches!(
                    parse_bmp_header(&data),
                    Err(BmpError::InvalidDimensions { .. })
                ),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn rejects_offset_inside_headers() {
        let mut data = build(1, 1, 24, &[&[0, 0, 0]]);
        data[10..14].copy_from_slice(&14u32.to_le_bytes());
        assert!(matches!(
            parse_bmp_header(&data),
            Err(BmpError::InvalidDataOffset(14))
        ));
    }

    #[test]
    fn informational_fields_are_ignored() {
        let mut data = build(2, 1, 24, &[&[1, 2, 3, 4, 5, 6]]);
        data[2..6].copy_from_slice(&12345u32.to_le_bytes()); // wrong file size
        data[6..8].copy_from_slice(&7u16.to_le_bytes()); // reserved1
        data[26..28].copy_from_slice(&0u16.to_le_bytes()); // planes
        data[34..38].copy_from_slice(&999u32.to_le_bytes()); // image size
        data[46..50].copy_from_slice(&256u32.to_le_bytes()); // colors used

        let (header, pixels) = decode(&data).unwrap();
        assert_eq!(header.file.reserved1, 7);
        assert_eq!(header.info.planes, 0);
        assert_eq!(pixels, [3, 2, 1, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn input_is_not_modified() {
        let data = build(2, 2, 32, &[&[1, 2, 3, 4, 5, 6, 7, 8], &[9, 10, 11, 12, 13, 14, 15, 16]]);
        let copy = data.clone();
        decode(&data).unwrap();
        assert_eq!(data, copy);
    }
}
