use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let buf = encode(img, image::ImageFormat::Png);

    let decoded = decode_image(&buf, Some("image/png")).unwrap();
    assert_eq!(decoded.size, Size::new(1, 1).unwrap());
    assert_eq!(decoded.mime, "image/png");
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
    assert_eq!(&*decoded.encoded, buf.as_slice());
}

#[test]
fn unknown_mime_falls_back_to_sniffing() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let buf = encode(img, image::ImageFormat::Png);
    let decoded = decode_image(&buf, Some("application/octet-stream")).unwrap();
    assert_eq!((decoded.size.width, decoded.size.height), (3, 2));
    assert_eq!(decoded.mime, "image/png");

    let decoded = decode_image(&buf, None).unwrap();
    assert_eq!(decoded.mime, "image/png");
}

#[test]
fn corrupt_bytes_are_load_errors() {
    let err = decode_image(b"definitely not an image", None).unwrap_err();
    assert!(matches!(err, AdError::Load(_)));

    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
    let mut buf = encode(img, image::ImageFormat::Png);
    buf.truncate(buf.len() / 2);
    let err = decode_image(&buf, Some("image/png")).unwrap_err();
    assert!(matches!(err, AdError::Load(_)));
}
