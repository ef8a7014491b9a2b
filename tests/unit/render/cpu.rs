use std::io::Cursor;

use super::*;
use crate::assets::decode::decode_image;
use crate::compile::plan::TextRun;
use crate::effects::filter::{Duotone, FilterStep};
use crate::effects::text::text_passes;
use crate::layout::resolver::TextAlign;
use crate::style::model::{FontWeight, TextEffect};

fn solid_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn assets_with(base: [u8; 4]) -> AssetSet {
    let base = decode_image(&solid_png(2, 2, base), Some("image/png")).unwrap();
    AssetSet::new(base, None)
}

fn close(px: Option<crate::foundation::core::Rgba8Premul>, want: [u8; 4]) -> bool {
    let px = px.unwrap();
    [px.r, px.g, px.b, px.a]
        .iter()
        .zip(want)
        .all(|(&a, b)| (i16::from(a) - i16::from(b)).abs() <= 2)
}

#[test]
fn base_image_scales_into_destination() {
    let assets = assets_with([255, 0, 0, 255]);
    let mut be = RasterBackend::new(8, 8, &assets).unwrap();
    be.draw_image(
        ImageRole::Base,
        Rect::new(0.0, 0.0, 8.0, 8.0),
        &FilterChain::default(),
    )
    .unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert_eq!((s.width(), s.height()), (8, 8));
    assert!(close(s.pixel(0, 0), [255, 0, 0, 255]));
    assert!(close(s.pixel(7, 7), [255, 0, 0, 255]));
}

#[test]
fn solid_fill_and_untouched_pixels() {
    let assets = assets_with([0, 0, 0, 255]);
    let mut be = RasterBackend::new(10, 10, &assets).unwrap();
    be.fill_rect(
        Rect::new(0.0, 5.0, 10.0, 10.0),
        &Paint::Solid(Color::rgb(0, 0, 255)),
    )
    .unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert!(close(s.pixel(5, 7), [0, 0, 255, 255]));
    assert!(close(s.pixel(5, 2), [0, 0, 0, 0]));
}

#[test]
fn duotone_filter_remaps_the_base_image() {
    let assets = assets_with([128, 128, 128, 255]);
    let filter = FilterChain {
        steps: vec![],
        duotone: Some(Duotone {
            shadow: Color::rgb(0, 0, 255),
            highlight: Color::rgb(255, 255, 0),
        }),
    };
    let mut be = RasterBackend::new(4, 4, &assets).unwrap();
    be.draw_image(ImageRole::Base, Rect::new(0.0, 0.0, 4.0, 4.0), &filter)
        .unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert!(close(s.pixel(1, 1), [128, 128, 127, 255]));
}

#[test]
fn invert_filter_runs_before_drawing() {
    let assets = assets_with([10, 20, 30, 255]);
    let filter = FilterChain {
        steps: vec![FilterStep::Invert],
        duotone: None,
    };
    let mut be = RasterBackend::new(4, 4, &assets).unwrap();
    be.draw_image(ImageRole::Base, Rect::new(0.0, 0.0, 4.0, 4.0), &filter)
        .unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert!(close(s.pixel(2, 2), [245, 235, 225, 255]));
}

#[test]
fn stroke_rect_and_line_paint_pixels() {
    let assets = assets_with([0, 0, 0, 255]);
    let mut be = RasterBackend::new(20, 20, &assets).unwrap();
    be.stroke_rect(Rect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE, 4.0)
        .unwrap();
    be.stroke_line(
        Point::new(0.0, 10.0),
        Point::new(20.0, 10.0),
        Color::rgb(255, 0, 0),
        2.0,
    )
    .unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert!(close(s.pixel(0, 5), [255, 255, 255, 255]));
    assert!(close(s.pixel(10, 9), [255, 0, 0, 255]));
    assert!(close(s.pixel(10, 5), [0, 0, 0, 0]));
}

#[test]
fn text_without_a_font_is_skipped() {
    let assets = assets_with([0, 0, 0, 255]);
    let mut be = RasterBackend::new(16, 16, &assets).unwrap();
    let run = TextRun {
        text: "Acme".to_owned(),
        anchor: Point::new(2.0, 8.0),
        align: TextAlign::Left,
        font_size: 12.0,
        weight: FontWeight::NORMAL,
        font_family: "sans-serif".to_owned(),
        letter_spacing: 0.0,
        passes: text_passes(TextEffect::Shadow, Color::WHITE, 1.0),
    };
    be.draw_text(&run).unwrap();
    be.draw_text(&run).unwrap();
    let s = be.finish(FrameEffect::None).unwrap();
    assert!(s.data_premul().iter().all(|&b| b == 0));
}

#[test]
fn missing_logo_is_a_surface_error() {
    let assets = assets_with([0, 0, 0, 255]);
    let mut be = RasterBackend::new(4, 4, &assets).unwrap();
    let err = be
        .draw_image(
            ImageRole::Logo,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            &FilterChain::default(),
        )
        .unwrap_err();
    assert!(matches!(err, AdError::Surface(_)));
}

#[test]
fn oversized_surfaces_are_rejected() {
    let assets = assets_with([0, 0, 0, 255]);
    assert!(matches!(
        RasterBackend::new(70_000, 10, &assets),
        Err(AdError::Surface(_))
    ));
    assert!(matches!(
        RasterBackend::new(0, 10, &assets),
        Err(AdError::Surface(_))
    ));
}

#[test]
fn frame_effect_is_carried_to_the_surface() {
    let assets = assets_with([0, 0, 0, 255]);
    let be = RasterBackend::new(2, 2, &assets).unwrap();
    let s = be.finish(FrameEffect::Perspective3d).unwrap();
    assert_eq!(s.frame_effect(), FrameEffect::Perspective3d);
}
