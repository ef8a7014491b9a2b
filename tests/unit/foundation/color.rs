use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));

    let c: Color = "4B0082".parse().unwrap();
    assert_eq!(c, Color::rgb(0x4b, 0x00, 0x82));
}

#[test]
fn rejects_malformed_hex() {
    assert!("#fff".parse::<Color>().is_err());
    assert!("#gg0000".parse::<Color>().is_err());
    assert!(serde_json::from_value::<Color>(json!("#12345")).is_err());
}

#[test]
fn display_and_serialize_use_uppercase_hex() {
    assert_eq!(Color::rgb(0, 0x4b, 0xff).to_string(), "#004BFF");
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    assert_eq!(
        serde_json::to_value(Color::WHITE).unwrap(),
        json!("#FFFFFF")
    );
    assert_eq!(Color::rgb(0xAB, 0, 1).to_hex_rgb(), "#ab0001");
}

#[test]
fn opacity_scales_alpha() {
    let c = Color::BLACK.with_opacity(0.7);
    assert_eq!(c.a, 179);
    assert!((Color::rgba(0, 0, 0, 51).opacity() - 0.2).abs() < 1e-9);
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Color::rgb(0, 0, 255);
    let b = Color::rgb(255, 255, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
}
