#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must keep RGB and
    // dimensions, and a second encode must be byte-identical.
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode_bmp(
        decoded.pixels(),
        decoded.width,
        decoded.height,
        enough::Unstoppable,
    ) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
    for (a, b) in decoded.pixels().chunks_exact(4).zip(decoded2.pixels().chunks_exact(4)) {
        assert_eq!(a[..3], b[..3], "roundtrip pixel mismatch");
        assert_eq!(b[3], 255);
    }

    let again = encode_bmp(
        decoded2.pixels(),
        decoded2.width,
        decoded2.height,
        enough::Unstoppable,
    )
    .expect("second encode failed");
    assert_eq!(reencoded, again, "encode is not idempotent");
});
