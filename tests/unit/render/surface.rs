use super::*;

fn checker() -> RasterSurface {
    let mut data = Vec::new();
    for i in 0..16u32 {
        if i % 2 == 0 {
            data.extend_from_slice(&[255, 0, 0, 255]);
        } else {
            data.extend_from_slice(&[0, 0, 64, 128]);
        }
    }
    RasterSurface::from_premul(4, 4, data, FrameEffect::None).unwrap()
}

#[test]
fn rejects_mismatched_buffers() {
    let err = RasterSurface::from_premul(2, 2, vec![0; 3], FrameEffect::None).unwrap_err();
    assert!(matches!(err, AdError::Surface(_)));
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let s = checker();
    assert_eq!(s.pixel(0, 0).unwrap().r, 255);
    assert_eq!(s.pixel(1, 0).unwrap().a, 128);
    assert!(s.pixel(4, 0).is_none());
}

#[test]
fn png_round_trips_straight_pixels() {
    let s = checker();
    let png = s.encode(ExportFormat::Png).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.as_raw(), &s.to_rgba8_straight());
    // surface stays usable after export
    assert_eq!(s.encode(ExportFormat::Png).unwrap(), png);
}

#[test]
fn jpeg_drops_alpha_and_keeps_size() {
    let s = checker();
    let jpg = s.encode(ExportFormat::jpeg()).unwrap();
    assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&jpg).unwrap();
    assert_eq!((img.width(), img.height()), (4, 4));
}

#[test]
fn format_follows_extension() {
    assert_eq!(
        ExportFormat::from_path(Path::new("a/out.PNG")).unwrap(),
        ExportFormat::Png
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("out.jpeg")).unwrap(),
        ExportFormat::Jpeg { quality: 90 }
    );
    assert!(ExportFormat::from_path(Path::new("out.gif")).is_err());
}
