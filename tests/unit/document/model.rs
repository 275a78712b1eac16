use super::*;
use crate::document::builder::{DocumentBuilder, LayerBuilder, rect_path, text_run};

fn shape(name: &str) -> Layer {
    LayerBuilder::shape(
        name,
        Paint::solid(Color::rgb(255, 0, 0)),
        VectorMask::single(rect_path(0.0, 0.0, 10.0, 10.0)),
    )
    .build()
    .unwrap()
}

fn clipped(name: &str) -> Layer {
    LayerBuilder::text(name, 0.0, 10.0, vec![text_run(name, 12.0, Color::BLACK)])
        .clipping()
        .build()
        .unwrap()
}

#[test]
fn clip_run_is_contiguous_and_stops_at_base() {
    let mut b = DocumentBuilder::new(100, 100);
    let a = b.push(shape("A"));
    b.push(clipped("a1"));
    b.push(clipped("a2"));
    b.push(shape("B"));
    b.push(clipped("b1"));
    let doc = b.build().unwrap();

    let root = doc.root.clone();
    assert_eq!(doc.clip_layers(&root, 0).len(), 2);
    assert_eq!(doc.clip_layers(&root, 0)[0], LayerId(1));
    assert!(!doc.has_clip_layers(&root, 1));
    assert_eq!(doc.clip_layers(&root, 3), &[LayerId(4)]);
    assert!(!doc.has_clip_layers(&root, 4));
    assert!(doc.has_clip_layers(&root, 0));
    assert_eq!(doc.children_of(None)[0], a);
}

#[test]
fn leading_clipping_layer_acts_as_base() {
    let mut b = DocumentBuilder::new(100, 100);
    b.push(clipped("orphan"));
    b.push(clipped("rides_on_orphan"));
    let doc = b.build().unwrap();
    let root = doc.root.clone();
    assert!(!doc.has_base_below(&root, 0));
    assert_eq!(doc.clip_layers(&root, 0), &[LayerId(1)]);
}

#[test]
fn group_children_are_looked_up_by_parent() {
    let mut b = DocumentBuilder::new(10, 10);
    let g = b.push(LayerBuilder::group("g").build().unwrap());
    let child = b.push_child(g, shape("s")).unwrap();
    let doc = b.build().unwrap();
    assert_eq!(doc.children_of(None), &[g]);
    assert_eq!(doc.children_of(Some(g)), &[child]);
    assert!(doc.children_of(Some(child)).is_empty());
    let parents = doc.parents();
    assert_eq!(parents[g.index()], None);
    assert_eq!(parents[child.index()], Some(g));
}

#[test]
fn validate_rejects_cycles_and_shared_children() {
    let group = |name: &str, children: Vec<LayerId>| {
        LayerBuilder::new(name, LayerKind::Group { children })
            .build()
            .unwrap()
    };

    let cyclic = Document {
        width: 10,
        height: 10,
        layers: vec![group("a", vec![LayerId(1)]), group("b", vec![LayerId(0)])],
        root: vec![],
    };
    let err = cyclic.validate().unwrap_err();
    assert!(err.to_string().contains("cycle"), "{err}");
    assert!(err.to_string().contains("layer 'a' (in group 'b')"), "{err}");

    let selfish = Document {
        width: 10,
        height: 10,
        layers: vec![group("a", vec![LayerId(0)])],
        root: vec![LayerId(0)],
    };
    assert!(selfish.validate().is_err());

    let shared = Document {
        width: 10,
        height: 10,
        layers: vec![group("a", vec![LayerId(2)]), group("b", vec![LayerId(2)]), shape("s")],
        root: vec![LayerId(0), LayerId(1)],
    };
    let err = shared.validate().unwrap_err();
    assert!(err.to_string().contains("more than once"), "{err}");

    let dangling = Document {
        width: 10,
        height: 10,
        layers: vec![],
        root: vec![LayerId(7)],
    };
    assert!(dangling.validate().is_err());
}

#[test]
fn validate_rejects_out_of_range_opacity() {
    let mut layer = shape("s");
    layer.opacity = 1.5;
    let doc = Document {
        width: 10,
        height: 10,
        layers: vec![layer],
        root: vec![LayerId(0)],
    };
    assert!(matches!(doc.validate(), Err(LayerSvgError::Validation(_))));
}

#[test]
fn operations_fold_left_deep() {
    use BoolOp::*;
    let expr = ShapeExpr::from_operations(&[Union, Subtract, Xor]).unwrap();
    assert_eq!(
        expr,
        ShapeExpr::xor(
            ShapeExpr::subtract(ShapeExpr::path(0), ShapeExpr::path(1)),
            ShapeExpr::path(2)
        )
    );
    assert_eq!(expr.leaves(), vec![0, 1, 2]);
    assert!(expr.has_non_union());
    assert!(ShapeExpr::from_operations(&[]).is_none());
    assert!(!ShapeExpr::from_operations(&[Union, Union]).unwrap().has_non_union());
}

#[test]
fn vector_mask_reports_bad_path_data() {
    let mask = VectorMask {
        paths: vec![
            SubPath {
                d: rect_path(0.0, 0.0, 1.0, 1.0),
                op: BoolOp::Union,
            },
            SubPath {
                d: "M 0 0 L nonsense".to_string(),
                op: BoolOp::Subtract,
            },
        ],
        expr: None,
    };
    let err = mask.parse_paths().unwrap_err();
    assert!(err.contains("sub-path 1"), "{err}");
}

#[test]
fn effect_phase_defaults_by_kind() {
    let shadow = Effect::new(EffectKind::DropShadow {
        color: Color::BLACK,
        angle_deg: 120.0,
        distance: 4.0,
        size: 4.0,
    });
    assert_eq!(shadow.phase(), EffectPhase::PreFill);
    let overlay = Effect::new(EffectKind::ColorOverlay { color: Color::WHITE });
    assert_eq!(overlay.phase(), EffectPhase::PreStroke);
    assert!(overlay.kind.is_color_overlay());
    let mut late = overlay.clone();
    late.phase = Some(EffectPhase::PostStroke);
    assert_eq!(late.phase(), EffectPhase::PostStroke);
}

#[test]
fn json_form_fills_defaults() {
    let json = r#"{
        "width": 20, "height": 20,
        "layers": [
            { "name": "s", "kind": { "type": "shape", "fill": { "type": "solid", "color": [255, 0, 0, 255] } },
              "vector_mask": { "paths": [ { "d": "M0 0 L10 0 L10 10 Z" } ] } },
            { "name": "t", "clipping": true,
              "kind": { "type": "text", "x": 1, "y": 12,
                        "runs": [ { "text": "hi", "font_family": "serif", "font_size": 10, "color": [0, 0, 0, 255] } ] } }
        ],
        "root": [0, 1]
    }"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    doc.validate().unwrap();
    let s = &doc.layers[0];
    assert!(s.visible && s.fill_enabled);
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.blend_mode, BlendMode::Normal);
    assert!(doc.layers[1].clipping_layer);
    assert_eq!(doc.layers[1].kind.tag(), LayerKindTag::Text);
}

#[test]
fn uniform_text_color() {
    let mut text = TextContent {
        runs: vec![text_run("a", 10.0, Color::BLACK), text_run("b", 10.0, Color::BLACK)],
        x: 0.0,
        y: 0.0,
        transform: None,
    };
    assert_eq!(text.uniform_color(), Some(Color::BLACK));
    text.runs[1].color = Color::WHITE;
    assert_eq!(text.uniform_color(), None);
}
