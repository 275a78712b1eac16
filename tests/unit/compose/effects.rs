use super::*;
use crate::{
    compose::{
        blend::CssBlendMapper,
        emitters::{ShapeEmitter, SvgEffectEmitter, SvgShapeEmitter},
        registry::Registry,
    },
    document::{
        builder::{LayerBuilder, rect_path, stroke},
        model::{Layer, Paint, StrokeAlign, VectorMask},
    },
    foundation::{
        core::{Canvas, Color, NumFmt},
        diag::Diagnostics,
        ids::LayerId,
    },
};

struct Harness {
    registry: Registry,
    diag: Diagnostics,
}

impl Harness {
    fn new() -> Self {
        Self {
            registry: Registry::new(""),
            diag: Diagnostics::default(),
        }
    }

    fn ctx(&mut self) -> EmitCtx<'_> {
        EmitCtx {
            registry: &mut self.registry,
            diag: &mut self.diag,
            blend: &CssBlendMapper,
            canvas: Canvas::new(100, 100).unwrap(),
            fmt: NumFmt::default(),
            embed_images: true,
        }
    }
}

fn shape() -> LayerBuilder {
    LayerBuilder::shape(
        "box",
        Paint::solid(Color::rgb(255, 0, 0)),
        VectorMask::single(rect_path(10.0, 10.0, 50.0, 50.0)),
    )
}

fn overlay(color: Color) -> Effect {
    Effect::new(EffectKind::ColorOverlay { color })
}

fn shadow() -> Effect {
    Effect::new(EffectKind::DropShadow {
        color: Color::BLACK,
        angle_deg: 90.0,
        distance: 4.0,
        size: 2.0,
    })
}

fn lref(layer: &Layer) -> LayerRef<'_> {
    LayerRef {
        id: LayerId(0),
        layer,
    }
}

#[test]
fn plan_sorts_effects_into_slots() {
    let mut post = overlay(Color::WHITE);
    post.phase = Some(EffectPhase::PostStroke);
    let mut glow_pre_stroke = Effect::new(EffectKind::OuterGlow {
        color: Color::WHITE,
        size: 3.0,
        spread: 0.0,
    });
    glow_pre_stroke.phase = Some(EffectPhase::PreStroke);
    let layer = shape()
        .effect(glow_pre_stroke)
        .effect(overlay(Color::BLACK))
        .effect(shadow())
        .effect(post)
        .build()
        .unwrap();

    let mut h = Harness::new();
    let plan = EffectPlan::for_layer(&mut h.ctx(), lref(&layer));
    let idx = |slot: &[(usize, &Effect)]| slot.iter().map(|(i, _)| *i).collect::<Vec<_>>();
    assert_eq!(idx(&plan.pre_fill), vec![2]);
    assert_eq!(idx(&plan.overlays), vec![1]);
    assert_eq!(idx(&plan.pre_stroke), vec![0]);
    assert_eq!(idx(&plan.post_stroke), vec![3]);
}

#[test]
fn disabled_and_malformed_effects_are_dropped() {
    let mut off = shadow();
    off.enabled = false;
    let mut bad = shadow();
    bad.opacity = 2.0;
    let mut worse = shadow();
    worse.opacity = -1.0;
    let layer = shape().effect(off).effect(bad).effect(worse).build().unwrap();

    let mut h = Harness::new();
    let plan = EffectPlan::for_layer(&mut h.ctx(), lref(&layer));
    assert!(plan.is_empty());
    // Two malformed effects, one warning per layer and code.
    assert_eq!(h.diag.warnings().len(), 1);
}

#[test]
fn overlay_repaints_plain_vector_shapes() {
    let layer = shape().effect(overlay(Color::BLACK)).build().unwrap();
    let mut h = Harness::new();
    let def = SvgShapeEmitter.define(&mut h.ctx(), lref(&layer)).unwrap();
    let pass = LayerPass::new(&mut h.ctx(), lref(&layer), &def);
    assert_eq!(pass.overlay, OverlayMode::Repaint);

    let mut defs = Vec::new();
    let out = pass.after_fill(&mut h.ctx(), &SvgEffectEmitter, &mut defs).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].get("fill"), Some("#000000"));
    assert_eq!(out[0].get("filter"), None);
    assert!(defs.is_empty());
}

#[test]
fn stroke_or_filter_chain_forces_filter_overlays() {
    let stroked = shape()
        .stroke(stroke(2.0, StrokeAlign::Center, Color::BLACK))
        .effect(overlay(Color::WHITE))
        .build()
        .unwrap();
    let shadowed = shape()
        .effect(overlay(Color::WHITE))
        .effect(shadow())
        .build()
        .unwrap();

    for layer in [&stroked, &shadowed] {
        let mut h = Harness::new();
        let def = SvgShapeEmitter.define(&mut h.ctx(), lref(layer)).unwrap();
        let pass = LayerPass::new(&mut h.ctx(), lref(layer), &def);
        assert_eq!(pass.overlay, OverlayMode::Filter);

        let mut defs = Vec::new();
        let out = pass.after_fill(&mut h.ctx(), &SvgEffectEmitter, &mut defs).unwrap();
        assert!(out[0].get("filter").is_some());
        assert!(defs.iter().any(|d| d.tag == "filter"));
    }
}

#[test]
fn phases_come_out_in_pipeline_order() {
    let mut post = shadow();
    post.phase = Some(EffectPhase::PostStroke);
    let layer = shape()
        .stroke(stroke(2.0, StrokeAlign::Center, Color::BLACK))
        .effect(post)
        .effect(overlay(Color::WHITE))
        .effect(shadow())
        .build()
        .unwrap();

    let mut h = Harness::new();
    let def = SvgShapeEmitter.define(&mut h.ctx(), lref(&layer)).unwrap();
    let pass = LayerPass::new(&mut h.ctx(), lref(&layer), &def);
    let mut defs = Vec::new();
    let bottom = pass.bottom(&mut h.ctx(), &SvgEffectEmitter, &mut defs).unwrap();
    let top = pass.top(&mut h.ctx(), &SvgEffectEmitter, &mut defs).unwrap();

    // shadow, fill, overlay
    assert_eq!(bottom.len(), 3);
    assert!(bottom[0].get("filter").is_some());
    assert_eq!(bottom[1].get("fill"), Some("#ff0000"));
    assert!(bottom[2].get("filter").is_some());
    // stroke, post-stroke shadow
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].get("stroke"), Some("#000000"));
    assert!(top[1].get("filter").is_some());
}

#[test]
fn fill_proxy_honours_fill_opacity_and_disabled_fill() {
    let layer = shape().fill_opacity(0.5).build().unwrap();
    let mut h = Harness::new();
    let def = SvgShapeEmitter.define(&mut h.ctx(), lref(&layer)).unwrap();
    let pass = LayerPass::new(&mut h.ctx(), lref(&layer), &def);
    let fill = pass.fill(&mut h.ctx()).unwrap();
    assert_eq!(fill.get("opacity"), Some("0.5"));
    assert!(pass.is_plain());

    let hollow = shape().no_fill().build().unwrap();
    let def = SvgShapeEmitter.define(&mut h.ctx(), lref(&hollow)).unwrap();
    let pass = LayerPass::new(&mut h.ctx(), lref(&hollow), &def);
    assert!(pass.fill(&mut h.ctx()).is_none());
}
