use std::io::Cursor;

use super::*;
use crate::assets::decode::decode_image;
use crate::foundation::error::AdError;
use crate::style::model::LayoutId;

fn base(w: u32, h: u32) -> AssetSet {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 200, 200, 255]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    AssetSet::new(decode_image(&out, Some("image/png")).unwrap(), None)
}

fn acme() -> BusinessDetails {
    BusinessDetails::new("Acme").with_tel("555-1234")
}

#[test]
fn preview_keeps_natural_size_and_darkens_the_banner() {
    let style = StyleConfig::default().with_layout(LayoutId::BottomBanner);
    let s = render_raster(&style, &base(80, 60), &acme(), RasterOpts::default()).unwrap();
    assert_eq!((s.width(), s.height()), (80, 60));
    let top = s.pixel(40, 10).unwrap();
    assert!(top.r.abs_diff(200) <= 1 && top.a == 255);
    let banner = s.pixel(40, 58).unwrap();
    assert!(banner.r < 80, "banner pixel {banner:?}");
}

#[test]
fn print_adds_bleed_on_every_side() {
    let s = render_raster(
        &StyleConfig::default(),
        &base(80, 60),
        &acme(),
        RasterOpts::print(),
    )
    .unwrap();
    assert_eq!((s.width(), s.height()), (465, 405));
    let inside = s.pixel(150, 150).unwrap();
    assert_eq!(inside.a, 255);
    let bleed = s.pixel(50, 200).unwrap();
    assert_eq!(bleed.a, 0);
}

#[test]
fn invalid_inputs_are_rejected_before_drawing() {
    let style = StyleConfig {
        background_opacity: 1.5,
        ..StyleConfig::default()
    };
    let err = render_raster(&style, &base(4, 4), &acme(), RasterOpts::default()).unwrap_err();
    assert!(matches!(err, AdError::Validation(_)));

    let err = render_vector(
        &StyleConfig::default(),
        &base(4, 4),
        &BusinessDetails::new("  "),
        VectorOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AdError::Validation(_)));
}

#[test]
fn vector_full_parity_keeps_text_for_every_layout() {
    let style = StyleConfig::default().with_layout(LayoutId::TopBanner);
    let doc = render_vector(&style, &base(80, 60), &acme(), VectorOpts::default()).unwrap();
    assert_eq!((doc.width, doc.height), (80, 60));
    assert!(doc.svg.contains("<text "));
    assert!(doc.svg.contains(">Acme</text>"));
    usvg::Tree::from_str(&doc.svg, &usvg::Options::default()).unwrap();
}

#[test]
fn vector_legacy_parity_drops_text_outside_the_banner_layout() {
    let opts = VectorOpts {
        parity: VectorParity::BottomBannerOnly,
    };
    let style = StyleConfig::default().with_layout(LayoutId::TopBanner);
    let doc = render_vector(&style, &base(80, 60), &acme(), opts).unwrap();
    assert!(!doc.svg.contains("<text "));
    assert!(doc.svg.contains(r#"<rect x="0" y="0" width="80" height="60""#));

    let style = StyleConfig::default().with_layout(LayoutId::BottomBanner);
    let doc = render_vector(&style, &base(80, 60), &acme(), opts).unwrap();
    assert!(doc.svg.contains("<text "));
}

#[test]
fn vector_output_never_has_crop_marks() {
    let doc = render_vector(
        &StyleConfig::default(),
        &base(80, 60),
        &acme(),
        VectorOpts::default(),
    )
    .unwrap();
    assert!(!doc.svg.contains("<line "));
}
