use super::*;

fn alpha_at(buf: &[u8], w: u32, x: u32, y: u32) -> u8 {
    buf[((y * w + x) * 4 + 3) as usize]
}

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    for edge in [EdgeMode::Clamp, EdgeMode::Transparent] {
        assert_eq!(blur_rgba8_premul(&src, 1, 2, 0.0, edge).unwrap(), src);
    }
}

#[test]
fn clamped_edges_keep_a_flat_image_flat() {
    let (w, h) = (6u32, 5u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    assert_eq!(
        blur_rgba8_premul(&src, w, h, 2.0, EdgeMode::Clamp).unwrap(),
        src
    );
}

#[test]
fn transparent_edges_fade_a_flat_image_at_its_border() {
    let (w, h) = (40u32, 40u32);
    let src = [200u8, 100, 50, 255].repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2.0, EdgeMode::Transparent).unwrap();
    assert_eq!(alpha_at(&out, w, 20, 20), 255);
    let corner = alpha_at(&out, w, 0, 0);
    assert!((84..=100).contains(&corner), "corner alpha {corner}");
    let edge = alpha_at(&out, w, 0, 20);
    assert!((145..=161).contains(&edge), "edge alpha {edge}");
}

#[test]
fn output_stays_premultiplied() {
    let (w, h) = (9u32, 3u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    src[..4].copy_from_slice(&[255, 0, 0, 255]);
    src[16..20].copy_from_slice(&[0, 90, 0, 90]);
    for edge in [EdgeMode::Clamp, EdgeMode::Transparent] {
        let out = blur_rgba8_premul(&src, w, h, 1.5, edge).unwrap();
        for px in out.chunks_exact(4) {
            assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3], "{px:?}");
        }
    }
}

#[test]
fn an_interior_dot_spreads_without_losing_coverage() {
    let (w, h) = (15u32, 15u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((7 * w + 7) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 1.0, EdgeMode::Transparent).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    assert!(alpha_at(&out, w, 7, 7) > alpha_at(&out, w, 8, 7));
    assert_eq!(alpha_at(&out, w, 6, 7), alpha_at(&out, w, 8, 7));
    let total: i32 = out.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((total - 255).abs() <= 8, "total={total}");
}

#[test]
fn kernel_is_normalized_and_symmetric() {
    for sigma in [0.5, 1.0, 2.5, 5.0] {
        let k = GaussianKernel::new(sigma).unwrap();
        assert_eq!(k.radius(), blur_radius(sigma) as usize);
        assert_eq!(k.weights().len(), 2 * k.radius() + 1);
        let sum: f32 = k.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        let w = k.weights();
        assert!(w.iter().zip(w.iter().rev()).all(|(a, b)| (a - b).abs() < 1e-7));
    }
    assert!(GaussianKernel::new(0.0).is_none());
    assert!(GaussianKernel::new(f64::NAN).is_none());
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(blur_radius(0.0), 0);
    assert_eq!(blur_radius(2.5), 8);
    assert_eq!(blur_radius(5.0), 15);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let err = blur_rgba8_premul(&[0u8; 7], 1, 2, 1.0, EdgeMode::Clamp).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
