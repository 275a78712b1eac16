use crate::{
    document::{
        model::{
            BlendMode, Document, Effect, Layer, LayerKind, LayerMask, Paint, StrokeAlign, StrokeSpec,
            TextContent, TextRun, VectorMask,
        },
        raster::RasterImage,
    },
    foundation::{
        core::Color,
        error::{LayerSvgError, LayerSvgResult},
        ids::LayerId,
    },
};

/// Incrementally assembles a [`Document`] arena.
pub struct DocumentBuilder {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    root: Vec<LayerId>,
}

impl DocumentBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
            root: Vec::new(),
        }
    }

    /// Append a top-level layer above the existing ones.
    pub fn push(&mut self, layer: Layer) -> LayerId {
        let id = self.alloc(layer);
        self.root.push(id);
        id
    }

    /// Append `layer` as the topmost child of `group`.
    pub fn push_child(&mut self, group: LayerId, layer: Layer) -> LayerSvgResult<LayerId> {
        if !matches!(
            self.layers.get(group.index()).map(|l| &l.kind),
            Some(LayerKind::Group { .. })
        ) {
            return Err(LayerSvgError::validation(format!(
                "layer {} is not a group",
                group.0
            )));
        }
        let id = self.alloc(layer);
        if let Some(LayerKind::Group { children }) =
            self.layers.get_mut(group.index()).map(|l| &mut l.kind)
        {
            children.push(id);
        }
        Ok(id)
    }

    fn alloc(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        self.layers.push(layer);
        id
    }

    pub fn build(self) -> LayerSvgResult<Document> {
        let doc = Document {
            width: self.width,
            height: self.height,
            layers: self.layers,
            root: self.root,
        };
        doc.validate()?;
        Ok(doc)
    }
}

/// Fluent constructor for a single [`Layer`].
pub struct LayerBuilder {
    layer: Layer,
}

impl LayerBuilder {
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            layer: Layer {
                name: name.into(),
                kind,
                visible: true,
                clipping_layer: false,
                opacity: 1.0,
                fill_opacity: 1.0,
                blend_mode: BlendMode::Normal,
                fill_enabled: true,
                stroke: None,
                vector_mask: None,
                mask: None,
                effects: Vec::new(),
                raster: None,
            },
        }
    }

    /// Shape layer filled with `fill` whose geometry is `geometry`.
    pub fn shape(name: impl Into<String>, fill: Paint, geometry: VectorMask) -> Self {
        Self::new(name, LayerKind::Shape { fill }).vector_mask(geometry)
    }

    pub fn pixel(name: impl Into<String>, image: RasterImage) -> Self {
        Self::new(name, LayerKind::Pixel { image })
    }

    /// Text layer with one run per entry, baseline at `(x, y)`.
    pub fn text(name: impl Into<String>, x: f64, y: f64, runs: Vec<TextRun>) -> Self {
        Self::new(
            name,
            LayerKind::Text(TextContent {
                runs,
                x,
                y,
                transform: None,
            }),
        )
    }

    /// Empty group; add children with [`DocumentBuilder::push_child`].
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(
            name,
            LayerKind::Group {
                children: Vec::new(),
            },
        )
    }

    pub fn adjustment(name: impl Into<String>, adjustment: impl Into<String>) -> Self {
        Self::new(
            name,
            LayerKind::Adjustment {
                adjustment: adjustment.into(),
            },
        )
    }

    pub fn hidden(mut self) -> Self {
        self.layer.visible = false;
        self
    }

    pub fn clipping(mut self) -> Self {
        self.layer.clipping_layer = true;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.layer.opacity = opacity;
        self
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.layer.fill_opacity = opacity;
        self
    }

    pub fn blend(mut self, mode: BlendMode) -> Self {
        self.layer.blend_mode = mode;
        self
    }

    pub fn no_fill(mut self) -> Self {
        self.layer.fill_enabled = false;
        self
    }

    pub fn stroke(mut self, stroke: StrokeSpec) -> Self {
        self.layer.stroke = Some(stroke);
        self
    }

    pub fn vector_mask(mut self, mask: VectorMask) -> Self {
        self.layer.vector_mask = Some(mask);
        self
    }

    pub fn mask(mut self, mask: LayerMask) -> Self {
        self.layer.mask = Some(mask);
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.layer.effects.push(effect);
        self
    }

    pub fn raster(mut self, raster: RasterImage) -> Self {
        self.layer.raster = Some(raster);
        self
    }

    pub fn build(self) -> LayerSvgResult<Layer> {
        if self.layer.name.trim().is_empty() {
            return Err(LayerSvgError::validation("layer name must be non-empty"));
        }
        self.layer.validate()?;
        Ok(self.layer)
    }
}

/// Opaque stroke of `width` pixels.
pub fn stroke(width: f64, alignment: StrokeAlign, color: Color) -> StrokeSpec {
    StrokeSpec {
        width,
        alignment,
        color,
        opacity: 1.0,
    }
}

/// Regular-weight run in a generic sans-serif family.
pub fn text_run(text: impl Into<String>, size: f64, color: Color) -> TextRun {
    TextRun {
        text: text.into(),
        font_family: "sans-serif".to_string(),
        font_size: size,
        color,
        bold: false,
        italic: false,
    }
}

/// Closed rectangle path data.
pub fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> String {
    format!("M{x0} {y0} L{x1} {y0} L{x1} {y1} L{x0} {y1} Z")
}

#[cfg(test)]
#[path = "../../tests/unit/document/builder.rs"]
mod tests;
