#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header inspection and full decode must never panic, and must agree on dimensions.
    let header_info = zenbmp::ImageInfo::from_bytes(data);
    let Ok(decoded) = zenbmp::decode_bmp(data, enough::Unstoppable) else {
        return;
    };
    let info = header_info.expect("header info rejected a decodable file");
    assert_eq!(info.width, decoded.width);
    assert_eq!(info.height, decoded.height);
    assert_eq!(
        decoded.pixels().len(),
        decoded.width as usize * decoded.height as usize * 4
    );
});
