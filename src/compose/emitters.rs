//! Capability interfaces used by the compositor and their SVG implementations.
//!
//! Emitters build detached [`Element`] fragments; nothing here touches the output tree.
//! Ids come from the session [`Registry`] carried in [`EmitCtx`].

use crate::{
    compose::{
        blend::{BlendMapper, BlendMapping},
        boolean::{self, canvas_rect, mask_element},
        filters::{self, FilterRegion},
        registry::{DefKey, DefRole, Registry},
    },
    document::model::{
        BlendMode, Effect, EffectKind, Gradient, Layer, LayerKind, Paint, StrokeAlign,
        StrokeSpec, TextContent, VectorMask,
    },
    foundation::{
        core::{BezPath, Canvas, Color, NumFmt, Rect, Shape as _},
        diag::{Diagnostics, WarningKind},
        error::{LayerSvgError, LayerSvgResult},
        ids::LayerId,
    },
    svg::tree::{Element, href, url},
};

/// Per-call view of the session state an emitter may use.
pub struct EmitCtx<'s> {
    pub registry: &'s mut Registry,
    pub diag: &'s mut Diagnostics,
    pub blend: &'s dyn BlendMapper,
    pub canvas: Canvas,
    pub fmt: NumFmt,
    pub embed_images: bool,
}

impl EmitCtx<'_> {
    pub fn warn(&mut self, layer: LayerRef<'_>, kind: WarningKind) {
        self.diag.warn(layer.id, &layer.layer.name, kind);
    }

    /// `style` value for `mode`, warning once per layer when it has to be substituted.
    pub fn blend_style(&mut self, layer: LayerRef<'_>, mode: BlendMode) -> Option<String> {
        let mapping = self.blend.map(mode);
        match mapping {
            BlendMapping::Native(_) => {}
            BlendMapping::Approximate(css) => {
                tracing::debug!(
                    layer = layer.layer.name.as_str(),
                    mode = mode.name(),
                    substitute = css.as_str(),
                    "approximating blend mode"
                );
            }
            BlendMapping::Unsupported(css) => self.warn(
                layer,
                WarningKind::UnsupportedBlend {
                    mode: mode.name().to_string(),
                    substitute: css.as_str().to_string(),
                },
            ),
        }
        mapping.css().style()
    }

    /// Set `opacity` when below one.
    pub fn opacity(&self, el: &mut Element, opacity: f64) {
        if opacity < 1.0 {
            el.set("opacity", self.fmt.num(opacity.clamp(0.0, 1.0)));
        }
    }
}

/// A layer together with its arena id.
#[derive(Clone, Copy, Debug)]
pub struct LayerRef<'a> {
    pub id: LayerId,
    pub layer: &'a Layer,
}

/// How a definition's coverage was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Geometry {
    /// One resolved sub-path.
    Path,
    /// Several sub-paths; `boolean` when combined with anything but union.
    Compound { boolean: bool },
    /// Pixels (raster layer or degraded vector geometry).
    Raster,
    /// Glyph runs.
    Text,
    /// Group body emitted in place.
    Group,
    /// Nothing to draw.
    Empty,
}

/// Paint a proxy applies to a paintable definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyPaint {
    /// `fill` value (`#rrggbb` or `url(#...)`).
    pub fill: String,
    /// `fill-opacity` value.
    pub opacity: f64,
}

/// The canonical definition of a layer's content.
#[derive(Clone, Debug)]
pub struct Definition {
    pub id: String,
    /// Content of the layer's definition container, definition element last.
    pub defs: Vec<Element>,
    pub geometry: Geometry,
    /// Whether proxies can recolor the definition through `fill`.
    pub paintable: bool,
    /// Fill applied by the fill proxy, if any.
    pub paint: Option<ProxyPaint>,
    /// Coverage bounds, when known.
    pub bounds: Option<Rect>,
}

impl Definition {
    /// Group body: the `<g>` itself is emitted by the walker.
    pub fn group(id: String) -> Self {
        Self {
            id,
            defs: Vec::new(),
            geometry: Geometry::Group,
            paintable: false,
            paint: None,
            bounds: None,
        }
    }

    /// Whether geometry strokes natively (vector paths or uniform text).
    pub fn strokes_natively(&self) -> bool {
        match self.geometry {
            Geometry::Path | Geometry::Compound { .. } => true,
            Geometry::Text => self.paintable,
            Geometry::Raster | Geometry::Group | Geometry::Empty => false,
        }
    }
}

/// How a clip target restricts its clipping layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipKind {
    /// `clipPath` built from the target's single path.
    Path,
    /// `mask` built from the target's alpha.
    Mask,
}

/// Reference to a clip definition, as an attribute on the restricted element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipRef {
    pub kind: ClipKind,
    pub id: String,
}

impl ClipRef {
    pub fn attr(&self) -> &'static str {
        match self.kind {
            ClipKind::Path => "clip-path",
            ClipKind::Mask => "mask",
        }
    }

    pub fn apply(&self, el: Element) -> Element {
        el.attr(self.attr(), url(&self.id))
    }
}

/// Clip kind for a target: a path clip only for shape layers with single-path geometry.
pub fn clip_kind(layer: &Layer, def: Option<&Definition>) -> ClipKind {
    match (&layer.kind, def.map(|d| d.geometry)) {
        (LayerKind::Shape { .. }, Some(Geometry::Path)) => ClipKind::Path,
        _ => ClipKind::Mask,
    }
}

/// The target's clip definition, shared by the clip section and inner strokes.
///
/// Returns the element to emit on first use, `None` afterwards.
pub fn clip_for(
    ctx: &mut EmitCtx<'_>,
    layer: LayerRef<'_>,
    def: Option<&Definition>,
) -> (ClipRef, Option<Element>) {
    let kind = clip_kind(layer.layer, def);
    let defined = ctx.registry.define(DefKey::new(layer.id, DefRole::Clip));
    let clip = ClipRef {
        kind,
        id: defined.id().to_string(),
    };
    if !defined.is_new() {
        return (clip, None);
    }
    let el = match (kind, def) {
        (ClipKind::Path, Some(def)) => Element::new("clipPath")
            .attr("id", defined.id())
            .attr("clipPathUnits", "userSpaceOnUse")
            .child(Element::new("use").attr("href", href(&def.id))),
        (_, Some(def)) => {
            let mut mask = mask_element(defined.id(), ctx.canvas, ctx.fmt);
            if def.paintable {
                mask.push(Element::new("use").attr("href", href(&def.id)).attr("fill", "#fff"));
            } else {
                mask.set("mask-type", "alpha");
                if def.geometry != Geometry::Empty {
                    mask.push(Element::new("use").attr("href", href(&def.id)));
                }
            }
            mask
        }
        (_, None) => mask_element(defined.id(), ctx.canvas, ctx.fmt)
            .child(canvas_rect(ctx.canvas, ctx.fmt).attr("fill", "#fff")),
    };
    (clip, Some(el))
}

/// `<use>` proxy of a definition.
pub fn proxy(def: &Definition) -> Element {
    Element::new("use").attr("href", href(&def.id))
}

/// Builds shape and raster definitions.
pub trait ShapeEmitter {
    /// Definition of a shape or pixel layer. Unresolvable vector geometry degrades to
    /// the layer's raster preview with a warning.
    fn define(&self, ctx: &mut EmitCtx<'_>, layer: LayerRef<'_>) -> LayerSvgResult<Definition>;

    /// Clip restricting non-shape content to `mask`; `None` when it cannot be resolved.
    fn vector_clip(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        mask: &VectorMask,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<ClipRef>>;
}

/// Builds text definitions.
pub trait TextEmitter {
    fn define_text(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        text: &TextContent,
    ) -> LayerSvgResult<Definition>;
}

/// How a color overlay is realized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayMode {
    /// Second proxy painted with the overlay color.
    Repaint,
    /// Flood composited through the definition's alpha.
    Filter,
}

/// Builds effect and stroke proxies; auxiliary definitions go to `defs`.
pub trait EffectEmitter {
    /// Proxy for the effect at `index`, or `None` when it was skipped.
    fn effect(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        index: usize,
        effect: &Effect,
        def: &Definition,
        overlay: OverlayMode,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<Element>>;

    /// Stroke proxy: native stroke attributes for vector geometry, a morphology filter
    /// for everything else.
    fn stroke(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        stroke: &StrokeSpec,
        def: &Definition,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<Element>>;
}

/// Default [`ShapeEmitter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgShapeEmitter;

/// Parsed sub-paths plus the boolean tree over them.
struct ResolvedPaths {
    paths: Vec<BezPath>,
    expr: crate::document::model::ShapeExpr,
}

fn resolve(mask: &VectorMask) -> Result<ResolvedPaths, String> {
    let paths = mask.parse_paths()?;
    let expr = mask.expr().ok_or_else(|| "no sub-paths".to_string())?;
    if let Some(bad) = expr.leaves().into_iter().find(|i| *i >= paths.len()) {
        return Err(format!("boolean expression references missing sub-path {bad}"));
    }
    Ok(ResolvedPaths { paths, expr })
}

impl SvgShapeEmitter {
    fn raster_def(
        &self,
        ctx: &mut EmitCtx<'_>,
        id: String,
        image: &crate::document::raster::RasterImage,
    ) -> LayerSvgResult<Definition> {
        let f = ctx.fmt;
        let mut el = Element::new("image")
            .attr("id", &id)
            .attr("x", f.num(f64::from(image.x)))
            .attr("y", f.num(f64::from(image.y)))
            .attr("width", f.num(f64::from(image.width)))
            .attr("height", f.num(f64::from(image.height)))
            .attr("preserveAspectRatio", "none");
        if ctx.embed_images {
            el.set("href", image.to_png_data_uri()?);
        }
        Ok(Definition {
            id,
            defs: vec![el],
            geometry: Geometry::Raster,
            paintable: false,
            paint: None,
            bounds: Some(image.bounds()),
        })
    }

    fn degraded(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        id: String,
        reason: String,
    ) -> LayerSvgResult<Definition> {
        ctx.warn(layer, WarningKind::ClipDegraded { reason });
        match &layer.layer.raster {
            Some(raster) => self.raster_def(ctx, id, raster),
            None => Ok(Definition {
                defs: vec![Element::new("g").attr("id", &id)],
                id,
                geometry: Geometry::Empty,
                paintable: false,
                paint: None,
                bounds: None,
            }),
        }
    }

    fn shape_def(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        id: String,
        fill: &Paint,
    ) -> LayerSvgResult<Definition> {
        let resolved = match layer.layer.vector_mask.as_ref().map(resolve) {
            Some(Ok(r)) => r,
            Some(Err(reason)) => return self.degraded(ctx, layer, id, reason),
            None => return self.degraded(ctx, layer, id, "shape has no vector geometry".into()),
        };

        let mut defs = Vec::new();
        let leaves = sorted_leaves(&resolved.expr);
        let bounds = leaves
            .iter()
            .map(|i| resolved.paths[*i].bounding_box())
            .reduce(|a, b| a.union(b));

        let geometry = if let [single] = leaves.as_slice() {
            let mut path = Element::new("path")
                .attr("id", &id)
                .attr("d", ctx.fmt.path_data(&resolved.paths[*single]));
            if !layer.layer.fill_enabled && layer.layer.stroke.is_none() {
                path.set("fill", "transparent");
            }
            defs.push(path);
            Geometry::Path
        } else {
            let boolean = resolved.expr.has_non_union();
            let mut leaf_ids = vec![String::new(); resolved.paths.len()];
            let mut body = Element::new("g").attr("id", &id);
            if !layer.layer.fill_enabled && layer.layer.stroke.is_none() {
                body.set("fill", "transparent");
            }
            for i in &leaves {
                let leaf = ctx.registry.fresh("leaf");
                body.push(
                    Element::new("path")
                        .attr("id", &leaf)
                        .attr("d", ctx.fmt.path_data(&resolved.paths[*i])),
                );
                leaf_ids[*i] = leaf;
            }
            if boolean {
                let chain =
                    boolean::compile(&resolved.expr, &leaf_ids, ctx.canvas, ctx.fmt, ctx.registry)?;
                body.set("mask", url(&chain.final_id));
                defs.extend(chain.masks);
            }
            defs.push(body);
            Geometry::Compound { boolean }
        };

        let mut aux = Vec::new();
        let paint = paint_for(ctx, layer, fill, bounds, &mut aux)?;
        aux.extend(defs);
        Ok(Definition {
            id,
            defs: aux,
            geometry,
            paintable: true,
            paint: Some(paint),
            bounds,
        })
    }
}

fn sorted_leaves(expr: &crate::document::model::ShapeExpr) -> Vec<usize> {
    let mut leaves = expr.leaves();
    leaves.sort_unstable();
    leaves.dedup();
    leaves
}

/// Proxy paint for `fill`, emitting a gradient definition when needed.
fn paint_for(
    ctx: &mut EmitCtx<'_>,
    layer: LayerRef<'_>,
    fill: &Paint,
    bounds: Option<Rect>,
    defs: &mut Vec<Element>,
) -> LayerSvgResult<ProxyPaint> {
    Ok(match fill {
        Paint::Solid { color } => ProxyPaint {
            fill: color.to_hex(),
            opacity: color.alpha(),
        },
        Paint::LinearGradient(gradient) => {
            let defined = ctx
                .registry
                .define(DefKey::new(layer.id, DefRole::Gradient));
            if defined.is_new() {
                defs.push(gradient_element(
                    defined.id(),
                    gradient,
                    bounds.unwrap_or_else(|| ctx.canvas.rect()),
                    ctx.fmt,
                ));
            }
            ProxyPaint {
                fill: url(defined.id()),
                opacity: 1.0,
            }
        }
    })
}

/// `<linearGradient>` across `bounds` at the gradient's angle.
pub fn gradient_element(id: &str, gradient: &Gradient, bounds: Rect, fmt: NumFmt) -> Element {
    let theta = gradient.angle_deg.to_radians();
    let (dx, dy) = (theta.cos(), -theta.sin());
    let c = bounds.center();
    let half = (bounds.width() / 2.0 * dx).abs() + (bounds.height() / 2.0 * dy).abs();
    let mut el = Element::new("linearGradient")
        .attr("id", id)
        .attr("gradientUnits", "userSpaceOnUse")
        .attr("x1", fmt.num(c.x - dx * half))
        .attr("y1", fmt.num(c.y - dy * half))
        .attr("x2", fmt.num(c.x + dx * half))
        .attr("y2", fmt.num(c.y + dy * half));
    for stop in &gradient.stops {
        let mut s = Element::new("stop")
            .attr("offset", fmt.num(stop.offset.clamp(0.0, 1.0)))
            .attr("stop-color", stop.color.to_hex());
        if !stop.color.is_opaque() {
            s.set("stop-opacity", fmt.num(stop.color.alpha()));
        }
        el.push(s);
    }
    el
}

impl ShapeEmitter for SvgShapeEmitter {
    fn define(&self, ctx: &mut EmitCtx<'_>, layer: LayerRef<'_>) -> LayerSvgResult<Definition> {
        let id = ctx
            .registry
            .define(DefKey::new(layer.id, DefRole::Shape))
            .id()
            .to_string();
        match &layer.layer.kind {
            LayerKind::Shape { fill } => self.shape_def(ctx, layer, id, fill),
            LayerKind::Pixel { image } => self.raster_def(ctx, id, image),
            LayerKind::Text(_) | LayerKind::Group { .. } | LayerKind::Adjustment { .. } => {
                Err(LayerSvgError::internal(format!(
                    "shape emitter cannot define {:?} layer '{}'",
                    layer.layer.kind.tag(),
                    layer.layer.name
                )))
            }
        }
    }

    fn vector_clip(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        mask: &VectorMask,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<ClipRef>> {
        let resolved = match resolve(mask) {
            Ok(r) => r,
            Err(reason) => {
                ctx.warn(layer, WarningKind::ClipDegraded { reason });
                return Ok(None);
            }
        };
        let id = ctx
            .registry
            .define(DefKey::new(layer.id, DefRole::VectorClip))
            .id()
            .to_string();
        let leaves = sorted_leaves(&resolved.expr);
        if let [single] = leaves.as_slice() {
            defs.push(
                Element::new("clipPath")
                    .attr("id", &id)
                    .attr("clipPathUnits", "userSpaceOnUse")
                    .child(
                        Element::new("path").attr("d", ctx.fmt.path_data(&resolved.paths[*single])),
                    ),
            );
            return Ok(Some(ClipRef {
                kind: ClipKind::Path,
                id,
            }));
        }

        let mut leaf_ids = vec![String::new(); resolved.paths.len()];
        for i in &leaves {
            let leaf = format!("{id}-p{i}");
            defs.push(
                Element::new("path")
                    .attr("id", &leaf)
                    .attr("d", ctx.fmt.path_data(&resolved.paths[*i])),
            );
            leaf_ids[*i] = leaf;
        }
        let chain = boolean::compile(&resolved.expr, &leaf_ids, ctx.canvas, ctx.fmt, ctx.registry)?;
        defs.extend(chain.masks);
        Ok(Some(ClipRef {
            kind: ClipKind::Mask,
            id: chain.final_id,
        }))
    }
}

/// Default [`TextEmitter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgTextEmitter;

fn font_family(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '<' | '>' | '&'))
        .collect()
}

impl TextEmitter for SvgTextEmitter {
    fn define_text(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        text: &TextContent,
    ) -> LayerSvgResult<Definition> {
        let id = ctx
            .registry
            .define(DefKey::new(layer.id, DefRole::Shape))
            .id()
            .to_string();
        let f = ctx.fmt;
        let uniform = text.uniform_color();

        let mut el = Element::new("text")
            .attr("id", &id)
            .attr("x", f.num(text.x))
            .attr("y", f.num(text.y))
            .attr("xml:space", "preserve");
        if let Some(m) = f.matrix(text.affine()) {
            el.set("transform", m);
        }
        for run in &text.runs {
            let mut span = Element::new("tspan")
                .attr("font-family", font_family(&run.font_family))
                .attr("font-size", f.num(run.font_size));
            if run.bold {
                span.set("font-weight", "bold");
            }
            if run.italic {
                span.set("font-style", "italic");
            }
            if uniform.is_none() {
                span.set("fill", run.color.to_hex());
                if !run.color.is_opaque() {
                    span.set("fill-opacity", f.num(run.color.alpha()));
                }
            }
            el.push(span.text(run.text.as_str()));
        }

        Ok(Definition {
            id,
            defs: vec![el],
            geometry: Geometry::Text,
            paintable: uniform.is_some(),
            paint: uniform.map(|c: Color| ProxyPaint {
                fill: c.to_hex(),
                opacity: c.alpha(),
            }),
            bounds: None,
        })
    }
}

/// Default [`EffectEmitter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgEffectEmitter;

impl SvgEffectEmitter {
    fn filter_proxy(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        role: DefRole,
        def: &Definition,
        defs: &mut Vec<Element>,
        build: impl FnOnce(&str) -> Element,
    ) -> Element {
        let defined = ctx.registry.define(DefKey::new(layer.id, role));
        if defined.is_new() {
            defs.push(build(defined.id()));
        }
        proxy(def).attr("filter", url(defined.id()))
    }

    fn knockout(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        def: &Definition,
        defs: &mut Vec<Element>,
    ) -> String {
        let defined = ctx
            .registry
            .define(DefKey::new(layer.id, DefRole::Knockout));
        if defined.is_new() {
            defs.push(
                mask_element(defined.id(), ctx.canvas, ctx.fmt)
                    .child(canvas_rect(ctx.canvas, ctx.fmt).attr("fill", "#fff"))
                    .child(proxy(def).attr("fill", "#000")),
            );
        }
        defined.id().to_string()
    }
}

/// Reason an effect cannot be rendered, if any.
pub fn effect_defect(effect: &Effect) -> Option<String> {
    let bad = |v: f64| !v.is_finite() || v < 0.0;
    if !effect.opacity.is_finite() || !(0.0..=1.0).contains(&effect.opacity) {
        return Some("opacity must be in [0, 1]".to_string());
    }
    match &effect.kind {
        EffectKind::DropShadow {
            angle_deg,
            distance,
            size,
            ..
        }
        | EffectKind::InnerShadow {
            angle_deg,
            distance,
            size,
            ..
        } => {
            if !angle_deg.is_finite() || bad(*distance) || bad(*size) {
                return Some("angle, distance and size must be finite, distance and size >= 0".into());
            }
        }
        EffectKind::OuterGlow { size, spread, .. } => {
            if bad(*size) || bad(*spread) {
                return Some("size and spread must be finite and >= 0".to_string());
            }
        }
        EffectKind::ColorOverlay { .. } => {}
        EffectKind::GradientOverlay { gradient } => {
            if gradient.stops.len() < 2 {
                return Some("gradient needs at least two stops".to_string());
            }
            if gradient.stops.iter().any(|s| !s.offset.is_finite()) || !gradient.angle_deg.is_finite() {
                return Some("gradient angle and stop offsets must be finite".to_string());
            }
        }
    }
    None
}

impl EffectEmitter for SvgEffectEmitter {
    fn effect(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        index: usize,
        effect: &Effect,
        def: &Definition,
        overlay: OverlayMode,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<Element>> {
        let canvas = ctx.canvas;
        let fmt = ctx.fmt;
        let role = DefRole::Filter(index as u32);
        let mut el = match &effect.kind {
            EffectKind::DropShadow {
                color,
                angle_deg,
                distance,
                size,
            } => {
                let region = FilterRegion::new(canvas, distance + 1.5 * size + 1.0, fmt);
                self.filter_proxy(ctx, layer, role, def, defs, |id| {
                    filters::drop_shadow(id, region, *color, *angle_deg, *distance, *size)
                })
            }
            EffectKind::OuterGlow {
                color,
                size,
                spread,
            } => {
                let region = FilterRegion::new(canvas, 1.5 * size + 1.0, fmt);
                self.filter_proxy(ctx, layer, role, def, defs, |id| {
                    filters::outer_glow(id, region, *color, *size, *spread)
                })
            }
            EffectKind::InnerShadow {
                color,
                angle_deg,
                distance,
                size,
            } => {
                let region = FilterRegion::new(canvas, 1.0, fmt);
                self.filter_proxy(ctx, layer, role, def, defs, |id| {
                    filters::inner_shadow(id, region, *color, *angle_deg, *distance, *size)
                })
            }
            EffectKind::ColorOverlay { color } => match overlay {
                OverlayMode::Repaint => {
                    let mut el = proxy(def).attr("fill", color.to_hex());
                    if !color.is_opaque() {
                        el.set("fill-opacity", fmt.num(color.alpha()));
                    }
                    el
                }
                OverlayMode::Filter => {
                    let region = FilterRegion::new(canvas, 1.0, fmt);
                    self.filter_proxy(ctx, layer, role, def, defs, |id| {
                        filters::color_fill(id, region, *color)
                    })
                }
            },
            EffectKind::GradientOverlay { gradient } => {
                if !def.paintable {
                    ctx.warn(
                        layer,
                        WarningKind::UnsupportedContent {
                            what: "gradient overlay on non-vector content".to_string(),
                        },
                    );
                    return Ok(None);
                }
                let grad = ctx.registry.fresh("grad");
                defs.push(gradient_element(
                    &grad,
                    gradient,
                    def.bounds.unwrap_or_else(|| canvas.rect()),
                    fmt,
                ));
                proxy(def).attr("fill", url(&grad))
            }
        };

        let opacity = if effect.kind.is_color_overlay() {
            effect.opacity * layer.layer.fill_opacity
        } else {
            effect.opacity
        };
        ctx.opacity(&mut el, opacity);
        if let Some(style) = ctx.blend_style(layer, effect.blend_mode) {
            el.set("style", style);
        }
        Ok(Some(el))
    }

    fn stroke(
        &self,
        ctx: &mut EmitCtx<'_>,
        layer: LayerRef<'_>,
        stroke: &StrokeSpec,
        def: &Definition,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Option<Element>> {
        if stroke.width <= 0.0 || def.geometry == Geometry::Empty {
            return Ok(None);
        }
        if matches!(def.geometry, Geometry::Compound { .. }) {
            ctx.warn(layer, WarningKind::StrokeOnBooleanShape);
        }
        if layer.layer.vector_mask.is_some() && !matches!(layer.layer.kind, LayerKind::Shape { .. })
        {
            ctx.warn(layer, WarningKind::StrokeOnMaskedShape);
        }
        let fmt = ctx.fmt;
        let opacity = stroke.opacity * stroke.color.alpha();

        if !def.strokes_natively() {
            let region = FilterRegion::new(ctx.canvas, stroke.width + 1.0, fmt);
            let (align, width, color) = (stroke.alignment, stroke.width, stroke.color);
            let mut el = self.filter_proxy(ctx, layer, DefRole::StrokeFilter, def, defs, |id| {
                filters::morphology_stroke(id, region, align, width, Color { a: 255, ..color })
            });
            ctx.opacity(&mut el, opacity);
            return Ok(Some(el));
        }

        let width = match stroke.alignment {
            StrokeAlign::Center => stroke.width,
            StrokeAlign::Inner | StrokeAlign::Outer => stroke.width * 2.0,
        };
        let mut el = proxy(def)
            .attr("fill", "transparent")
            .attr("stroke", stroke.color.to_hex())
            .attr("stroke-width", fmt.num(width));
        if opacity < 1.0 {
            el.set("stroke-opacity", fmt.num(opacity));
        }
        match stroke.alignment {
            StrokeAlign::Center => {}
            StrokeAlign::Inner => {
                let (clip, clip_el) = clip_for(ctx, layer, Some(def));
                defs.extend(clip_el);
                el = clip.apply(el);
            }
            StrokeAlign::Outer => {
                let knock = self.knockout(ctx, layer, def, defs);
                el.set("mask", url(&knock));
            }
        }
        Ok(Some(el))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/emitters.rs"]
mod tests;
