use super::*;

#[test]
fn solid_fills_every_pixel() {
    let img = RasterImage::solid(2, 3, 4, 5, Color::rgba(1, 2, 3, 4));
    assert_eq!(img.rgba.len(), 4 * 5 * 4);
    assert_eq!(&img.rgba[..8], &[1, 2, 3, 4, 1, 2, 3, 4]);
    assert_eq!(img.bounds(), Rect::new(2.0, 3.0, 6.0, 8.0));
}

#[test]
fn payload_length_is_checked() {
    let err = RasterImage::new(0, 0, 2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("expected 16"), "{err}");
    assert!(RasterImage::new(0, 0, 0, 2, vec![]).is_err());
}

#[test]
fn data_uri_is_a_png() {
    use base64::Engine as _;
    let img = RasterImage::solid(0, 0, 3, 2, Color::rgb(0, 128, 255));
    let uri = img.to_png_data_uri().unwrap();
    let b64 = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn json_carries_base64_pixels() {
    let img = RasterImage::solid(0, 0, 1, 1, Color::rgba(255, 0, 0, 255));
    let json = serde_json::to_value(&img).unwrap();
    assert_eq!(json["rgba"], "/wAA/w==");
    let back: RasterImage = serde_json::from_value(json).unwrap();
    assert_eq!(back, img);
}

#[test]
fn dimension_limit_applies_to_payloads() {
    let img = RasterImage::solid(0, 0, 8, 2, Color::BLACK);
    let limits = ResourceLimits {
        max_dimension: 4,
        ..ResourceLimits::default()
    };
    let err = img.check_limits(&limits, "big").unwrap_err();
    assert!(err.to_string().contains("layer 'big'"), "{err}");
}
