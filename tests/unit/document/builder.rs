use super::*;

#[test]
fn builders_create_expected_structure() {
    let mut b = DocumentBuilder::new(64, 32);
    let group = b.push(LayerBuilder::group("folder").opacity(0.5).build().unwrap());
    let star = b
        .push_child(
            group,
            LayerBuilder::shape(
                "Star",
                Paint::solid(Color::rgb(255, 0, 0)),
                VectorMask::single(rect_path(0.0, 0.0, 8.0, 8.0)),
            )
            .stroke(stroke(2.0, StrokeAlign::Outer, Color::BLACK))
            .build()
            .unwrap(),
        )
        .unwrap();
    let doc = b.build().unwrap();

    assert_eq!(doc.root, vec![group]);
    assert_eq!(doc.children_of(Some(group)), &[star]);
    let layer = doc.layer(star).unwrap();
    assert_eq!(layer.stroke.map(|s| s.alignment), Some(StrokeAlign::Outer));
    assert_eq!(doc.layer(group).unwrap().opacity, 0.5);
}

#[test]
fn push_child_requires_a_group() {
    let mut b = DocumentBuilder::new(10, 10);
    let pixel = b.push(
        LayerBuilder::pixel("p", RasterImage::solid(0, 0, 1, 1, Color::WHITE))
            .build()
            .unwrap(),
    );
    let err = b
        .push_child(pixel, LayerBuilder::group("g").build().unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("not a group"), "{err}");
}

#[test]
fn layer_builder_validates() {
    assert!(LayerBuilder::group("  ").build().is_err());
    assert!(LayerBuilder::group("g").fill_opacity(-0.1).build().is_err());
    assert!(
        LayerBuilder::text("t", 0.0, 0.0, vec![text_run("x", 0.0, Color::BLACK)])
            .build()
            .is_err()
    );
}

#[test]
fn empty_canvas_is_rejected() {
    assert!(DocumentBuilder::new(0, 10).build().is_err());
}
