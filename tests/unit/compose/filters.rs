use super::*;
use crate::svg::tree::Content;

fn region() -> FilterRegion {
    FilterRegion::new(Canvas::new(100, 50).unwrap(), 10.0, NumFmt::default())
}

fn primitives(filter: &Element) -> Vec<&Element> {
    filter
        .children
        .iter()
        .filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
        .collect()
}

#[test]
fn region_covers_canvas_plus_margin() {
    let f = color_fill("f", region(), Color::WHITE);
    assert_eq!(f.get("filterUnits"), Some("userSpaceOnUse"));
    assert_eq!(f.get("x"), Some("-10"));
    assert_eq!(f.get("width"), Some("120"));
    assert_eq!(f.get("height"), Some("70"));
}

#[test]
fn outer_stroke_dilates_then_cuts_source_alpha() {
    let f = morphology_stroke("s", region(), StrokeAlign::Outer, 2.0, Color::BLACK);
    let p = primitives(&f);
    assert_eq!(p[0].tag, "feMorphology");
    assert_eq!(p[0].get("operator"), Some("dilate"));
    assert_eq!(p[0].get("radius"), Some("2"));
    assert_eq!(p[1].tag, "feComposite");
    assert_eq!(p[1].get("operator"), Some("out"));
    assert_eq!(p[1].get("in2"), Some("SourceAlpha"));
}

#[test]
fn inner_stroke_erodes() {
    let f = morphology_stroke("s", region(), StrokeAlign::Inner, 3.0, Color::BLACK);
    let p = primitives(&f);
    assert_eq!(p[0].get("operator"), Some("erode"));
    assert_eq!(p[0].get("radius"), Some("3"));
    assert_eq!(p[1].get("in"), Some("SourceAlpha"));
    assert_eq!(p[1].get("in2"), Some("eroded"));
}

#[test]
fn center_radii_lean_inward() {
    assert_eq!(morphology_radii(StrokeAlign::Center, 3.0), (2.0, 1.0));
    assert_eq!(morphology_radii(StrokeAlign::Center, 4.0), (2.0, 2.0));
    assert_eq!(morphology_radii(StrokeAlign::Outer, 5.0), (0.0, 5.0));
    let f = morphology_stroke("s", region(), StrokeAlign::Center, 3.0, Color::BLACK);
    let ops: Vec<_> = primitives(&f)
        .iter()
        .filter_map(|e| e.get("operator"))
        .collect();
    assert_eq!(ops, vec!["erode", "dilate", "out", "in"]);
}

#[test]
fn shadow_offset_points_away_from_light() {
    let d = light_offset(90.0, 5.0);
    assert!(d.x.abs() < 1e-9);
    assert!((d.y - 5.0).abs() < 1e-9);
    let d = light_offset(180.0, 2.0);
    assert!((d.x - 2.0).abs() < 1e-9);
}

#[test]
fn drop_shadow_blurs_half_the_size() {
    let f = drop_shadow("d", region(), Color::rgba(0, 0, 0, 128), 120.0, 4.0, 6.0);
    let p = primitives(&f);
    assert_eq!(p[0].get("stdDeviation"), Some("3"));
    assert_eq!(p[0].get("in"), Some("SourceAlpha"));
    assert_eq!(p[2].get("flood-opacity"), Some("0.502"));
}

#[test]
fn glow_spread_adds_dilation() {
    let plain = outer_glow("g", region(), Color::WHITE, 10.0, 0.0);
    assert_eq!(primitives(&plain)[0].tag, "feGaussianBlur");
    let spread = outer_glow("g", region(), Color::WHITE, 10.0, 50.0);
    let p = primitives(&spread);
    assert_eq!(p[0].get("radius"), Some("5"));
    assert_eq!(p[1].get("stdDeviation"), Some("2.5"));
}
