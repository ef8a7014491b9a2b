use super::*;

fn opaque(r: u8, g: u8, b: u8) -> Vec<u8> {
    vec![r, g, b, 255]
}

#[test]
fn default_style_is_identity() {
    let chain = FilterChain::from_style(&StyleConfig::default(), 1.0);
    assert!(chain.is_identity());
    assert_eq!(chain.css(), None);
}

#[test]
fn categorical_filter_precedes_percentages() {
    let style = StyleConfig {
        image_filter: ImageFilter::Sepia,
        brightness: 120.0,
        saturate: 50.0,
        ..StyleConfig::default()
    };
    let chain = FilterChain::from_style(&style, 1.0);
    assert_eq!(
        chain.steps,
        vec![
            FilterStep::Sepia,
            FilterStep::Brightness(1.2),
            FilterStep::Saturate(0.5)
        ]
    );
    assert_eq!(
        chain.css().as_deref(),
        Some("sepia(100%) brightness(120%) saturate(50%)")
    );
}

#[test]
fn blur_filter_scales_with_render_scale() {
    let style = StyleConfig {
        image_filter: ImageFilter::Blur,
        ..StyleConfig::default()
    };
    let chain = FilterChain::from_style(&style, 3.0);
    assert_eq!(chain.steps, vec![FilterStep::Blur { sigma: 15.0 }]);
    assert_eq!(chain.steps[0].css(), "blur(15px)");
}

#[test]
fn duotone_skips_categorical_steps_but_keeps_percentages() {
    let style = StyleConfig {
        image_filter: ImageFilter::Duotone,
        contrast: 150.0,
        ..StyleConfig::default()
    };
    let chain = FilterChain::from_style(&style, 1.0);
    assert_eq!(chain.steps, vec![FilterStep::Contrast(1.5)]);
    let duo = chain.duotone.unwrap();
    assert_eq!(duo.shadow, Color::rgb(0, 0, 255));
    assert_eq!(duo.highlight, Color::rgb(255, 255, 0));
}

#[test]
fn grayscale_and_invert_matrices() {
    let mut px = opaque(255, 0, 0);
    color_matrix_rgba8_premul_in_place(&mut px, FilterStep::Grayscale.matrix().unwrap());
    assert_eq!(px, opaque(54, 54, 54));

    let mut px = opaque(10, 200, 255);
    color_matrix_rgba8_premul_in_place(&mut px, FilterStep::Invert.matrix().unwrap());
    assert_eq!(px, opaque(245, 55, 0));
}

#[test]
fn brightness_and_contrast_matrices() {
    let mut px = opaque(100, 50, 200);
    color_matrix_rgba8_premul_in_place(&mut px, FilterStep::Brightness(2.0).matrix().unwrap());
    assert_eq!(px, opaque(200, 100, 255));

    let mut px = opaque(128, 0, 255);
    color_matrix_rgba8_premul_in_place(&mut px, FilterStep::Contrast(0.0).matrix().unwrap());
    assert_eq!(px, opaque(128, 128, 128));
}

#[test]
fn saturate_one_is_identity() {
    let m = FilterStep::Saturate(1.0).matrix().unwrap();
    let mut px = opaque(12, 34, 56);
    color_matrix_rgba8_premul_in_place(&mut px, m);
    assert_eq!(px, opaque(12, 34, 56));
}

#[test]
fn transparent_pixels_stay_transparent() {
    let mut px = vec![0u8, 0, 0, 0];
    color_matrix_rgba8_premul_in_place(&mut px, FilterStep::Sepia.matrix().unwrap());
    assert_eq!(px, vec![0, 0, 0, 0]);
}

#[test]
fn duotone_gray_input_maps_exactly() {
    let duo = Duotone {
        shadow: Color::rgb(10, 20, 30),
        highlight: Color::rgb(200, 100, 50),
    };
    for v in [0u8, 1, 51, 127, 128, 200, 254, 255] {
        let mut px = opaque(v, v, v);
        duotone_rgba8_premul_in_place(&mut px, duo);
        let n = f64::from(v) / 255.0;
        let expect = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * n).round() as u8;
        assert_eq!(
            px,
            opaque(expect(10, 200), expect(20, 100), expect(30, 50)),
            "v={v}"
        );
    }
}

#[test]
fn duotone_preserves_alpha() {
    let duo = Duotone {
        shadow: Color::BLACK,
        highlight: Color::WHITE,
    };
    let mut px = vec![64u8, 64, 64, 128];
    duotone_rgba8_premul_in_place(&mut px, duo);
    assert_eq!(px[3], 128);
}

#[test]
fn luma_weights_sum_to_one() {
    assert_eq!(luma_bt601(77, 77, 77), 77.0);
    assert_eq!(luma_bt601(255, 0, 0), 76.245);
    assert_eq!(duotone_channel(0, 255, 255.0), 255);
}

#[test]
fn apply_steps_rejects_wrong_length() {
    let chain = FilterChain {
        steps: vec![FilterStep::Invert],
        duotone: None,
    };
    let mut buf = vec![0u8; 5];
    assert!(chain.apply_steps(&mut buf, 1, 1).is_err());
}
