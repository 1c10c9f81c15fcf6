#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, pixel_bytes: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&((54 + pixel_bytes.len()) as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(pixel_bytes);
    out
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // 1x1 24-bit red: B, G, R + 1 padding byte
        fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp(1, 1, 24, &[0, 0, 0xff, 0])).unwrap();

        // 2x2 24-bit top-down
        let px = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        fs::write(format!("{dir}/bmp24_2x2_topdown.bmp"), bmp(2, -2, 24, &px)).unwrap();

        // 2x1 32-bit with alpha
        let px = [0xff, 0, 0, 0x80, 0, 0xff, 0, 0xff];
        fs::write(format!("{dir}/bmp32_2x1.bmp"), bmp(2, 1, 32, &px)).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        fs::write(format!("{dir}/bmp24_truncated.bmp"), bmp(4, 4, 24, &[0; 10])).unwrap();
        fs::write(format!("{dir}/bmp8.bmp"), bmp(1, 1, 8, &[0; 4])).unwrap();
    }

    println!("Generated seed corpora in fuzz/corpus/");
}
