use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(64, 32).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 64.0, 32.0));
}

#[test]
fn color_hex_and_alpha() {
    let c = Color::rgba(255, 0, 16, 128);
    assert_eq!(c.to_hex(), "#ff0010");
    assert!(!c.is_opaque());
    assert!((c.alpha() - 128.0 / 255.0).abs() < 1e-9);
    assert!(Color::BLACK.is_opaque());
}

#[test]
fn color_serializes_as_array() {
    let c: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 4));
    assert_eq!(serde_json::to_string(&c).unwrap(), "[1,2,3,4]");
}

#[test]
fn num_trims_trailing_zeros() {
    let f = NumFmt::default();
    assert_eq!(f.num(2.0), "2");
    assert_eq!(f.num(2.5), "2.5");
    assert_eq!(f.num(1.0 / 3.0), "0.333");
    assert_eq!(f.num(-0.0001), "0");
    assert_eq!(f.num(f64::NAN), "0");
    assert_eq!(NumFmt::new(1).num(0.26), "0.3");
}

#[test]
fn path_data_uses_absolute_commands() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 0.0));
    p.quad_to((10.0, 5.0), (5.0, 5.0));
    p.close_path();
    assert_eq!(NumFmt::default().path_data(&p), "M0 0 L10 0 Q10 5 5 5 Z");
}

#[test]
fn matrix_skips_identity() {
    let f = NumFmt::default();
    assert_eq!(f.matrix(Affine::IDENTITY), None);
    assert_eq!(
        f.matrix(Affine::translate((3.0, 4.0))).as_deref(),
        Some("matrix(1 0 0 1 3 4)")
    );
}
