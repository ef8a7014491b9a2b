use super::*;

fn pad4() -> Padding {
    Padding::default()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn bottom_banner_matches_reference_geometry() {
    let r = resolve_layout(Some(LayoutId::BottomBanner), 800.0, 600.0, &pad4(), None);
    assert_eq!(r.panels.len(), 1);
    assert_eq!(r.panels[0].rect, Rect::new(0.0, 510.0, 800.0, 600.0));
    assert!(!r.panels[0].outlined);

    let company = r.texts[0];
    assert_eq!(company.role, TextRole::Company);
    assert_eq!(company.align, TextAlign::Left);
    assert!(approx(company.anchor.x, 32.0));
    assert!(approx(company.anchor.y, 555.0));
    assert!(approx(company.font_size, 27.0));
    assert!(!company.force_bold);

    let contact = r.texts[1];
    assert_eq!(contact.role, TextRole::ContactLine);
    assert_eq!(contact.align, TextAlign::Right);
    assert!(approx(contact.anchor.x, 768.0));
    assert!(approx(contact.font_size, 18.0));
    assert!(r.logo.is_none());
}

#[test]
fn every_layout_is_deterministic() {
    let pad = Padding {
        top: 3.0,
        right: 7.0,
        bottom: 5.0,
        left: 2.0,
    };
    for id in LayoutId::ALL {
        let a = resolve_layout(Some(id), 1024.0, 768.0, &pad, None);
        let b = resolve_layout(Some(id), 1024.0, 768.0, &pad, None);
        assert_eq!(a, b, "{}", id.as_str());
        assert!(!a.panels.is_empty());
        assert!(!a.texts.is_empty());
    }
}

#[test]
fn missing_layout_falls_back_to_bold_banner_without_contact() {
    let r = resolve_layout(None, 800.0, 600.0, &pad4(), None);
    assert_eq!(r.layout, None);
    assert_eq!(r.panels[0].rect, Rect::new(0.0, 510.0, 800.0, 600.0));
    assert_eq!(r.texts.len(), 1);
    assert_eq!(r.texts[0].role, TextRole::Company);
    assert!(r.texts[0].force_bold);
}

#[test]
fn overlap_panel_is_centered_and_outlined() {
    let r = resolve_layout(Some(LayoutId::Overlap), 1000.0, 1000.0, &pad4(), None);
    let p = r.panels[0];
    assert!(p.outlined);
    assert!(approx(p.rect.x0, 150.0));
    assert!(approx(p.rect.y0, 650.0));
    assert!(approx(p.rect.width(), 700.0));
    assert!(approx(p.rect.height(), 250.0));
    assert_eq!(r.texts[0].align, TextAlign::Center);
    assert!(approx(r.texts[0].anchor.x, 500.0));
}

#[test]
fn header_two_column_emits_labels_in_columns() {
    let r = resolve_layout(Some(LayoutId::Header2Col), 800.0, 600.0, &pad4(), None);
    let roles: Vec<_> = r.texts.iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![TextRole::Company, TextRole::TelLabel, TextRole::EmailLabel]
    );
    // bh = 120, pt = 24
    assert!(approx(r.texts[1].anchor.y, 144.0));
    assert!(approx(r.texts[1].anchor.x, 32.0));
    assert!(approx(r.texts[2].anchor.x, 432.0));
    assert!(approx(r.texts[1].font_size, 30.0));
}

#[test]
fn padding_is_not_clamped() {
    let pad = Padding {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 150.0,
    };
    let r = resolve_layout(Some(LayoutId::BottomBanner), 200.0, 100.0, &pad, None);
    assert!(approx(r.texts[0].anchor.x, 300.0));
}

#[test]
fn logo_anchor_is_top_right_and_never_enlarged() {
    let small = Size::new(50, 20).unwrap();
    let r = resolve_layout(Some(LayoutId::TopBanner), 800.0, 600.0, &pad4(), Some(small));
    let logo = r.logo.unwrap();
    assert!(approx(logo.x0, 800.0 - 50.0 - 32.0));
    assert!(approx(logo.y0, 24.0));
    assert!(approx(logo.width(), 50.0));

    let big = Size::new(400, 100).unwrap();
    // min(1, 120/400, 90/100) = 0.3
    assert!(approx(logo_scale(800.0, 600.0, big), 0.3));
    let r = resolve_layout(None, 800.0, 600.0, &pad4(), Some(big));
    let logo = r.logo.unwrap();
    assert!(approx(logo.width(), 120.0));
    assert!(approx(logo.height(), 30.0));
    assert!(approx(logo.x1, 768.0));
}

#[test]
fn absolute_measurements_scale_linearly() {
    let a = resolve_layout(Some(LayoutId::CornerBox), 800.0, 600.0, &pad4(), None);
    let b = resolve_layout(Some(LayoutId::CornerBox), 2400.0, 1800.0, &pad4(), None);
    for (pa, pb) in a.panels.iter().zip(&b.panels) {
        assert!(approx(pa.rect.x0 * 3.0, pb.rect.x0));
        assert!(approx(pa.rect.height() * 3.0, pb.rect.height()));
    }
    for (ta, tb) in a.texts.iter().zip(&b.texts) {
        assert!(approx(ta.font_size * 3.0, tb.font_size));
        assert!(approx(ta.anchor.y * 3.0, tb.anchor.y));
    }
}
