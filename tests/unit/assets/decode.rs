use std::io::Cursor;

use super::*;

fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let decoded = decode_rgba8(&png_bytes(img)).unwrap();
    let prepared = PreparedImage::from_straight(decoded);
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_and_empty_payloads_are_decode_errors() {
    assert_eq!(decode_rgba8(b"<html>404</html>").unwrap_err().kind(), "decode");
    assert_eq!(decode_rgba8(&[]).unwrap_err().kind(), "decode");
}

#[test]
fn resize_hits_requested_dimensions() {
    let img = RgbaImage::from_pixel(4, 2, image::Rgba([9, 9, 9, 255]));
    let out = resize_rgba8(&img, 7, 3);
    assert_eq!(out.dimensions(), (7, 3));
}

#[test]
fn png_encode_unpremultiplies() {
    let premul = vec![64u8, 0, 0, 128, 0, 0, 0, 0];
    let png = encode_png_premul(2, 1, premul).unwrap();
    let back = decode_rgba8(&png).unwrap();
    let p0 = back.get_pixel(0, 0).0;
    assert_eq!(p0[3], 128);
    assert!((i32::from(p0[0]) - 127).abs() <= 1);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn encode_rejects_wrong_length() {
    assert!(encode_png_premul(2, 2, vec![0u8; 4]).is_err());
}
