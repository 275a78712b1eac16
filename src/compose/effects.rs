//! Per-layer effect ordering.
//!
//! A layer renders as `definition, pre-fill, fill, overlays, pre-stroke, stroke,
//! post-stroke`. Overlay-kind effects tagged pre-stroke take the overlay slot; other
//! pre-stroke effects follow them. Each slot is a list of proxies referencing the
//! layer's [`Definition`].

use crate::{
    compose::emitters::{
        Definition, EffectEmitter, EmitCtx, Geometry, LayerRef, OverlayMode, effect_defect,
        proxy,
    },
    document::model::{Effect, EffectKind, EffectPhase},
    foundation::{diag::WarningKind, error::LayerSvgResult},
    svg::tree::Element,
};

/// Enabled, well-formed effects of one layer sorted into their slots.
#[derive(Clone, Debug, Default)]
pub struct EffectPlan<'l> {
    pub pre_fill: Vec<(usize, &'l Effect)>,
    pub overlays: Vec<(usize, &'l Effect)>,
    pub pre_stroke: Vec<(usize, &'l Effect)>,
    pub post_stroke: Vec<(usize, &'l Effect)>,
}

impl<'l> EffectPlan<'l> {
    /// Sort `layer`'s effects; malformed ones are dropped with a warning.
    pub fn for_layer(ctx: &mut EmitCtx<'_>, layer: LayerRef<'l>) -> Self {
        let mut plan = Self::default();
        for (index, effect) in layer.layer.effects.iter().enumerate() {
            if !effect.enabled {
                continue;
            }
            if let Some(reason) = effect_defect(effect) {
                ctx.warn(
                    layer,
                    WarningKind::MalformedEffect {
                        effect: effect.kind.name().to_string(),
                        reason,
                    },
                );
                continue;
            }
            let slot = match effect.phase() {
                EffectPhase::PreFill => &mut plan.pre_fill,
                EffectPhase::PreStroke if effect.kind.is_color_overlay() => &mut plan.overlays,
                EffectPhase::PreStroke => &mut plan.pre_stroke,
                EffectPhase::PostStroke => &mut plan.post_stroke,
            };
            slot.push((index, effect));
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.pre_fill.is_empty()
            && self.overlays.is_empty()
            && self.pre_stroke.is_empty()
            && self.post_stroke.is_empty()
    }

    fn all(&self) -> impl Iterator<Item = &(usize, &'l Effect)> {
        self.pre_fill
            .iter()
            .chain(&self.overlays)
            .chain(&self.pre_stroke)
            .chain(&self.post_stroke)
    }

    /// Whether any planned effect is realized through a filter regardless of mode.
    pub fn has_filter_chain(&self) -> bool {
        self.all().any(|(_, e)| {
            matches!(
                e.kind,
                EffectKind::DropShadow { .. }
                    | EffectKind::OuterGlow { .. }
                    | EffectKind::InnerShadow { .. }
            )
        })
    }
}

/// Repaint only when the definition takes a fill, there is no stroke and no filter chain.
pub fn overlay_mode(layer: LayerRef<'_>, def: &Definition, plan: &EffectPlan<'_>) -> OverlayMode {
    if def.paintable && layer.layer.stroke.is_none() && !plan.has_filter_chain() {
        OverlayMode::Repaint
    } else {
        OverlayMode::Filter
    }
}

/// One layer's pass through the pipeline.
pub struct LayerPass<'a, 'l> {
    pub layer: LayerRef<'l>,
    pub def: &'a Definition,
    pub plan: EffectPlan<'l>,
    pub overlay: OverlayMode,
}

impl<'a, 'l> LayerPass<'a, 'l> {
    pub fn new(ctx: &mut EmitCtx<'_>, layer: LayerRef<'l>, def: &'a Definition) -> Self {
        let plan = EffectPlan::for_layer(ctx, layer);
        let overlay = overlay_mode(layer, def, &plan);
        Self {
            layer,
            def,
            plan,
            overlay,
        }
    }

    /// Whether the layer reduces to its definition painted once.
    pub fn is_plain(&self) -> bool {
        self.plan.is_empty() && self.layer.layer.stroke.is_none() && self.def.geometry != Geometry::Group
    }

    fn effects(
        &self,
        ctx: &mut EmitCtx<'_>,
        fx: &dyn EffectEmitter,
        slot: &[(usize, &Effect)],
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Vec<Element>> {
        let mut out = Vec::new();
        for (index, effect) in slot {
            if let Some(el) = fx.effect(ctx, self.layer, *index, effect, self.def, self.overlay, defs)? {
                out.push(el);
            }
        }
        Ok(out)
    }

    pub fn pre_fill(
        &self,
        ctx: &mut EmitCtx<'_>,
        fx: &dyn EffectEmitter,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Vec<Element>> {
        self.effects(ctx, fx, &self.plan.pre_fill, defs)
    }

    /// Fill proxy; groups paint their body in place instead.
    pub fn fill(&self, ctx: &mut EmitCtx<'_>) -> Option<Element> {
        if !self.layer.layer.fill_enabled
            || matches!(self.def.geometry, Geometry::Group | Geometry::Empty)
        {
            return None;
        }
        let mut el = proxy(self.def);
        if let Some(paint) = &self.def.paint {
            el.set("fill", paint.fill.as_str());
            if paint.opacity < 1.0 {
                el.set("fill-opacity", ctx.fmt.num(paint.opacity));
            }
        }
        ctx.opacity(&mut el, self.layer.layer.fill_opacity);
        Some(el)
    }

    /// Overlays, then the remaining pre-stroke effects.
    pub fn after_fill(
        &self,
        ctx: &mut EmitCtx<'_>,
        fx: &dyn EffectEmitter,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Vec<Element>> {
        let mut out = self.effects(ctx, fx, &self.plan.overlays, defs)?;
        out.extend(self.effects(ctx, fx, &self.plan.pre_stroke, defs)?);
        Ok(out)
    }

    /// Everything below the stroke: pre-fill, fill, overlays and pre-stroke.
    pub fn bottom(
        &self,
        ctx: &mut EmitCtx<'_>,
        fx: &dyn EffectEmitter,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Vec<Element>> {
        let mut out = self.pre_fill(ctx, fx, defs)?;
        out.extend(self.fill(ctx));
        out.extend(self.after_fill(ctx, fx, defs)?);
        Ok(out)
    }

    /// Stroke, then post-stroke effects.
    pub fn top(
        &self,
        ctx: &mut EmitCtx<'_>,
        fx: &dyn EffectEmitter,
        defs: &mut Vec<Element>,
    ) -> LayerSvgResult<Vec<Element>> {
        let mut out = Vec::new();
        if let Some(stroke) = &self.layer.layer.stroke
            && let Some(el) = fx.stroke(ctx, self.layer, stroke, self.def, defs)?
        {
            out.push(el);
        }
        out.extend(self.effects(ctx, fx, &self.plan.post_stroke, defs)?);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/effects.rs"]
mod tests;
