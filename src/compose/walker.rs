//! Depth-first layer traversal.
//!
//! Each call to [`Compositor::compose`] opens one session holding the id registry, the
//! warning sink and the resource budget. Layers are turned into detached fragments in
//! paint order and committed to the output tree once the traversal succeeded.

use crate::{
    compose::{
        blend::{BlendMapper, CssBlendMapper},
        boolean::{canvas_rect, mask_element},
        effects::LayerPass,
        emitters::{
            ClipKind, Definition, EffectEmitter, EmitCtx, Geometry, LayerRef,
            ShapeEmitter, SvgEffectEmitter, SvgShapeEmitter, SvgTextEmitter, TextEmitter,
            clip_for,
        },
        registry::{DefKey, DefRole, Registry},
        section::ClipSection,
    },
    document::model::{BlendMode, Document, LayerKind, LayerMask},
    foundation::{
        core::{Canvas, Color, NumFmt},
        diag::{Diagnostics, Warning, WarningKind},
        error::{LayerSvgError, LayerSvgResult},
        ids::LayerId,
        limits::{Budget, ResourceLimits},
    },
    svg::tree::{Element, SvgTree, url},
};

/// Per-conversion settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub limits: ResourceLimits,
    /// Prepended to every generated id.
    pub id_prefix: String,
    /// Embed raster pixels as PNG data URIs; when off, images are empty placeholders.
    pub embed_images: bool,
    /// Decimal places in emitted numbers.
    pub precision: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            limits: ResourceLimits::default(),
            id_prefix: String::new(),
            embed_images: true,
            precision: 3,
        }
    }
}

/// Result of one conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub tree: SvgTree,
    pub warnings: Vec<Warning>,
}

impl Conversion {
    pub fn to_svg_string(&self) -> String {
        self.tree.to_svg_string()
    }
}

/// Layer walker holding one implementation of each emitter capability.
pub struct Compositor {
    shapes: Box<dyn ShapeEmitter>,
    text: Box<dyn TextEmitter>,
    effects: Box<dyn EffectEmitter>,
    blend: Box<dyn BlendMapper>,
    options: ConvertOptions,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl Compositor {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            shapes: Box::new(SvgShapeEmitter),
            text: Box::new(SvgTextEmitter),
            effects: Box::new(SvgEffectEmitter),
            blend: Box::new(CssBlendMapper),
            options,
        }
    }

    pub fn with_shape_emitter(mut self, shapes: impl ShapeEmitter + 'static) -> Self {
        self.shapes = Box::new(shapes);
        self
    }

    pub fn with_text_emitter(mut self, text: impl TextEmitter + 'static) -> Self {
        self.text = Box::new(text);
        self
    }

    pub fn with_effect_emitter(mut self, effects: impl EffectEmitter + 'static) -> Self {
        self.effects = Box::new(effects);
        self
    }

    pub fn with_blend_mapper(mut self, blend: impl BlendMapper + 'static) -> Self {
        self.blend = Box::new(blend);
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `doc` in a fresh session.
    #[tracing::instrument(
        skip(self, doc),
        fields(width = doc.width, height = doc.height, layers = doc.layers.len())
    )]
    pub fn compose(&self, doc: &Document) -> LayerSvgResult<Conversion> {
        doc.validate()?;
        let canvas = doc.canvas()?;
        let limits = &self.options.limits;
        limits.check_dimension("canvas", canvas.width, canvas.height)?;
        for layer in &doc.layers {
            if let LayerKind::Pixel { image } = &layer.kind {
                image.check_limits(limits, &layer.name)?;
            }
            if let Some(mask) = &layer.mask {
                mask.image.check_limits(limits, &layer.name)?;
            }
            if let Some(raster) = &layer.raster {
                raster.check_limits(limits, &layer.name)?;
            }
        }

        let mut session = Session {
            doc,
            compositor: self,
            registry: Registry::new(self.options.id_prefix.clone()),
            diag: Diagnostics::default(),
            budget: Budget::start(limits),
            canvas,
            fmt: NumFmt::new(self.options.precision),
        };
        let nodes = session.siblings(None)?;

        let mut tree = SvgTree::new(canvas);
        for node in nodes {
            tree.append(None, node)?;
        }
        let warnings = session.diag.into_warnings();
        tracing::debug!(
            nodes = tree.len(),
            ids = session.registry.issued(),
            warnings = warnings.len(),
            "composed document"
        );
        Ok(Conversion { tree, warnings })
    }
}

/// Convert `doc` with the default emitters.
pub fn convert(doc: &Document, options: &ConvertOptions) -> LayerSvgResult<Conversion> {
    Compositor::new(options.clone()).compose(doc)
}

struct Session<'d> {
    doc: &'d Document,
    compositor: &'d Compositor,
    registry: Registry,
    diag: Diagnostics,
    budget: Budget,
    canvas: Canvas,
    fmt: NumFmt,
}

/// Elements that define resources rather than paint.
fn is_resource(el: &Element) -> bool {
    matches!(
        el.tag,
        "defs" | "clipPath" | "mask" | "filter" | "linearGradient"
    )
}

fn defs_container(content: Vec<Element>) -> Option<Element> {
    if content.is_empty() {
        return None;
    }
    let mut defs = Element::new("defs");
    for el in content {
        defs.push(el);
    }
    Some(defs)
}

impl<'d> Session<'d> {
    fn ctx(&mut self) -> EmitCtx<'_> {
        EmitCtx {
            registry: &mut self.registry,
            diag: &mut self.diag,
            blend: self.compositor.blend.as_ref(),
            canvas: self.canvas,
            fmt: self.fmt,
            embed_images: self.compositor.options.embed_images,
        }
    }

    /// Fragments for the children of `parent` (top level for `None`), back to front.
    fn siblings(&mut self, parent: Option<LayerId>) -> LayerSvgResult<Vec<Element>> {
        let doc = self.doc;
        let ids = doc.children_of(parent);
        let mut out = Vec::new();
        let mut i = 0;
        while i < ids.len() {
            let run = doc.clip_layers(ids, i);
            out.extend(self.layer(ids[i], run)?);
            i += 1 + run.len();
        }
        Ok(out)
    }

    fn layer(&mut self, id: LayerId, run: &[LayerId]) -> LayerSvgResult<Vec<Element>> {
        let doc = self.doc;
        let layer = doc.layer(id)?;
        if !layer.visible {
            tracing::trace!(layer = layer.name.as_str(), clipped = run.len(), "hidden");
            return Ok(Vec::new());
        }
        self.budget.enter(&layer.name)?;
        let out = self.compose_layer(LayerRef { id, layer }, run);
        self.budget.leave();
        out
    }

    fn compose_layer(
        &mut self,
        lr: LayerRef<'d>,
        run: &[LayerId],
    ) -> LayerSvgResult<Vec<Element>> {
        if let LayerKind::Adjustment { adjustment } = &lr.layer.kind {
            self.ctx().warn(
                lr,
                WarningKind::UnsupportedContent {
                    what: format!("adjustment layer '{adjustment}'"),
                },
            );
            if run.is_empty() {
                return Ok(Vec::new());
            }
            let (clip, clip_def) = clip_for(&mut self.ctx(), lr, None);
            let mut section = ClipSection::begin(clip, None, clip_def);
            let children = self.clip_members(run)?;
            section.wrap_children(children)?;
            let nodes = section.end()?;
            return self.frame(lr, nodes, 1.0);
        }

        let def = self.define(lr)?;
        let c = self.compositor;
        let fx = c.effects.as_ref();
        let pass = LayerPass::new(&mut self.ctx(), lr, &def);

        if run.is_empty() && pass.is_plain() {
            let nodes = self.inline(lr, &def);
            return self.frame(lr, nodes, lr.layer.fill_opacity);
        }

        let mut aux = Vec::new();
        let mut bottom = pass.pre_fill(&mut self.ctx(), fx, &mut aux)?;
        match def.geometry {
            Geometry::Group => bottom.push(self.group_body(lr, &def)?),
            _ => bottom.extend(pass.fill(&mut self.ctx())),
        }
        bottom.extend(pass.after_fill(&mut self.ctx(), fx, &mut aux)?);

        // The section's clip definition is claimed before inner strokes can claim it.
        let section_clip = if run.is_empty() {
            None
        } else {
            Some(clip_for(&mut self.ctx(), lr, Some(&def)))
        };
        let top = pass.top(&mut self.ctx(), fx, &mut aux)?;

        let mut content = def.defs.clone();
        content.extend(aux);
        let container = defs_container(content);

        let nodes = match section_clip {
            None => {
                let mut nodes: Vec<Element> = container.into_iter().collect();
                nodes.extend(bottom);
                nodes.extend(top);
                nodes
            }
            Some((clip, clip_def)) => {
                let mut section = ClipSection::begin(clip, container, clip_def);
                section.bottom(bottom)?;
                let children = self.clip_members(run)?;
                section.wrap_children(children)?;
                section.top(top)?;
                section.end()?
            }
        };
        self.frame(lr, nodes, 1.0)
    }

    fn define(&mut self, lr: LayerRef<'_>) -> LayerSvgResult<Definition> {
        let c = self.compositor;
        match &lr.layer.kind {
            LayerKind::Shape { .. } | LayerKind::Pixel { .. } => c.shapes.define(&mut self.ctx(), lr),
            LayerKind::Text(text) => c.text.define_text(&mut self.ctx(), lr, text),
            LayerKind::Group { .. } => {
                let id = self.registry.define(DefKey::new(lr.id, DefRole::Group));
                Ok(Definition::group(id.id().to_string()))
            }
            LayerKind::Adjustment { .. } => Err(LayerSvgError::internal(format!(
                "adjustment layer '{}' has no definition",
                lr.layer.name
            ))),
        }
    }

    /// The definition painted in place: no proxy, no container entry.
    fn inline(&mut self, lr: LayerRef<'_>, def: &Definition) -> Vec<Element> {
        if !lr.layer.fill_enabled || def.geometry == Geometry::Empty {
            return Vec::new();
        }
        let mut defs = def.defs.clone();
        let Some(mut el) = defs.pop() else {
            return Vec::new();
        };
        if let Some(paint) = &def.paint {
            el.set("fill", paint.fill.as_str());
            if paint.opacity < 1.0 {
                el.set("fill-opacity", self.fmt.num(paint.opacity));
            }
        }
        let mut nodes: Vec<Element> = defs_container(defs).into_iter().collect();
        nodes.push(el);
        nodes
    }

    fn group_body(&mut self, lr: LayerRef<'_>, def: &Definition) -> LayerSvgResult<Element> {
        let mut body = Element::new("g").attr("id", &def.id);
        if lr.layer.blend_mode != BlendMode::PassThrough {
            body.set("style", "isolation:isolate");
        }
        for child in self.siblings(Some(lr.id))? {
            body.push(child);
        }
        Ok(body)
    }

    /// One node per visible clipping layer, in sibling order.
    fn clip_members(&mut self, run: &[LayerId]) -> LayerSvgResult<Vec<Element>> {
        let mut children = Vec::with_capacity(run.len());
        for id in run {
            let mut nodes = self.layer(*id, &[])?;
            match nodes.len() {
                0 => {}
                1 => children.extend(nodes.pop()),
                _ => {
                    let mut g = Element::new("g");
                    for node in nodes {
                        g.push(node);
                    }
                    children.push(g);
                }
            }
        }
        Ok(children)
    }

    /// Apply layer opacity, blend, regular mask and (for non-shape layers) the vector
    /// mask around `nodes`. `opacity_factor` folds the fill opacity in for inlined layers.
    fn frame(
        &mut self,
        lr: LayerRef<'_>,
        nodes: Vec<Element>,
        opacity_factor: f64,
    ) -> LayerSvgResult<Vec<Element>> {
        if nodes.is_empty() {
            return Ok(nodes);
        }
        let layer = lr.layer;
        let opacity = layer.opacity * opacity_factor;
        let style = self.ctx().blend_style(lr, layer.blend_mode);

        let mut defs = Vec::new();
        let vclip = match (&layer.kind, &layer.vector_mask) {
            (LayerKind::Shape { .. }, _) | (_, None) => None,
            (_, Some(mask)) => {
                let c = self.compositor;
                c.shapes.vector_clip(&mut self.ctx(), lr, mask, &mut defs)?
            }
        };
        let lmask = match &layer.mask {
            Some(mask) if !mask.disabled => Some(self.layer_mask(lr, mask, &mut defs)?),
            _ => None,
        };

        if vclip.is_none() && lmask.is_none() {
            let mut rendered = nodes.iter().filter(|n| !is_resource(n));
            let single = match (rendered.next(), rendered.next()) {
                (Some(el), None) => {
                    el.get("opacity").is_none() && (style.is_none() || el.get("style").is_none())
                }
                _ => false,
            };
            if opacity >= 1.0 && style.is_none() {
                return Ok(nodes);
            }
            if single {
                let mut nodes = nodes;
                if let Some(el) = nodes.iter_mut().find(|n| !is_resource(n)) {
                    self.ctx().opacity(el, opacity);
                    if let Some(style) = style {
                        el.set("style", style);
                    }
                }
                return Ok(nodes);
            }
        }

        let mut inner = nodes;
        let mut wrapper = Element::new("g");
        match (vclip, &lmask) {
            (Some(clip), Some(_)) if clip.kind == ClipKind::Mask => {
                let mut g = clip.apply(Element::new("g"));
                for node in inner {
                    g.push(node);
                }
                inner = vec![g];
            }
            (Some(clip), _) => wrapper = clip.apply(wrapper),
            (None, _) => {}
        }
        if let Some(id) = &lmask {
            wrapper.set("mask", url(id));
        }
        self.ctx().opacity(&mut wrapper, opacity);
        if let Some(style) = style {
            wrapper.set("style", style);
        }
        wrapper.children.reserve(inner.len() + 1);
        if let Some(container) = defs_container(defs) {
            wrapper.push(container);
        }
        for node in inner {
            wrapper.push(node);
        }
        Ok(vec![wrapper])
    }

    /// Luminance mask from the layer's regular mask; outside its bounds the default
    /// gray applies.
    fn layer_mask(
        &mut self,
        lr: LayerRef<'_>,
        mask: &LayerMask,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<String> {
        let defined = self.registry.define(DefKey::new(lr.id, DefRole::LayerMask));
        let id = defined.id().to_string();
        if !defined.is_new() {
            return Ok(id);
        }
        let f = self.fmt;
        let gray = mask.default_color;
        let image = &mask.image;
        let mut img = Element::new("image")
            .attr("x", f.num(f64::from(image.x)))
            .attr("y", f.num(f64::from(image.y)))
            .attr("width", f.num(f64::from(image.width)))
            .attr("height", f.num(f64::from(image.height)))
            .attr("preserveAspectRatio", "none");
        if self.compositor.options.embed_images {
            img.set("href", image.to_png_data_uri()?);
        }
        defs.push(
            mask_element(&id, self.canvas, f)
                .child(canvas_rect(self.canvas, f).attr("fill", Color::rgb(gray, gray, gray).to_hex()))
                .child(img),
        );
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/walker.rs"]
mod tests;
