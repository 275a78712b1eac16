use crate::{
    document::raster::RasterImage,
    foundation::core::{Affine, BezPath, Canvas, Color},
    foundation::error::{LayerSvgError, LayerSvgResult},
    foundation::ids::LayerId,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A layered document: an arena of layers plus the ordered top-level siblings.
///
/// Groups refer to their children by [`LayerId`]; sibling order is painter's order
/// (index 0 is painted first). The document is read-only input to the compositor and is
/// checked with [`Document::validate`] before any traversal.
pub struct Document {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Layer arena.
    pub layers: Vec<Layer>,
    /// Top-level siblings, back to front.
    pub root: Vec<LayerId>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One layer of the document.
pub struct Layer {
    /// Display name (used in diagnostics).
    pub name: String,
    /// Kind-specific payload.
    pub kind: LayerKind,
    /// Hidden layers emit nothing.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Clipped to the nearest preceding non-clipping sibling.
    #[serde(default, rename = "clipping")]
    pub clipping_layer: bool,
    /// Whole-layer opacity in `[0, 1]`, effects included.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Opacity of fill and overlays only, in `[0, 1]`.
    #[serde(default = "default_one")]
    pub fill_opacity: f64,
    /// Blend mode of the layer against its backdrop.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Whether the layer's own content (fill, pixels, glyphs) is painted.
    #[serde(default = "default_true")]
    pub fill_enabled: bool,
    /// Optional stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeSpec>,
    /// Vector mask; for shape layers this is the geometry itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_mask: Option<VectorMask>,
    /// Regular pixel mask, stacked independently of `vector_mask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<LayerMask>,
    /// Layer effects in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    /// Rasterized preview, used when the vector geometry cannot be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raster: Option<RasterImage>,
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Closed set of layer kinds.
pub enum LayerKind {
    /// Raster pixels.
    Pixel {
        /// Layer pixels positioned on the canvas.
        image: RasterImage,
    },
    /// Vector shape; geometry lives in [`Layer::vector_mask`].
    Shape {
        /// Fill paint.
        fill: Paint,
    },
    /// Laid-out text runs.
    Text(TextContent),
    /// Folder of child layers.
    Group {
        /// Children, back to front.
        children: Vec<LayerId>,
    },
    /// Adjustment (backdrop filter) layer.
    Adjustment {
        /// Source adjustment identifier (e.g. `curves`, `hue_saturation`).
        adjustment: String,
    },
}

/// Field-less mirror of [`LayerKind`] for logging and dispatch tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKindTag {
    Pixel,
    Shape,
    Text,
    Group,
    Adjustment,
}

impl LayerKind {
    /// Variant tag without payload.
    pub fn tag(&self) -> LayerKindTag {
        match self {
            Self::Pixel { .. } => LayerKindTag::Pixel,
            Self::Shape { .. } => LayerKindTag::Shape,
            Self::Text(_) => LayerKindTag::Text,
            Self::Group { .. } => LayerKindTag::Group,
            Self::Adjustment { .. } => LayerKindTag::Adjustment,
        }
    }
}

/// Source blend modes, as stored in layered documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    /// Groups only: children blend straight into the group's backdrop.
    PassThrough,
    Dissolve,
    Darken,
    Multiply,
    ColorBurn,
    LinearBurn,
    DarkerColor,
    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    LighterColor,
    Overlay,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    Difference,
    Exclusion,
    Subtract,
    Divide,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Every mode, in the source's menu order.
    pub const ALL: [BlendMode; 28] = [
        Self::Normal,
        Self::PassThrough,
        Self::Dissolve,
        Self::Darken,
        Self::Multiply,
        Self::ColorBurn,
        Self::LinearBurn,
        Self::DarkerColor,
        Self::Lighten,
        Self::Screen,
        Self::ColorDodge,
        Self::LinearDodge,
        Self::LighterColor,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::VividLight,
        Self::LinearLight,
        Self::PinLight,
        Self::HardMix,
        Self::Difference,
        Self::Exclusion,
        Self::Subtract,
        Self::Divide,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Snake-case identifier, as used in the JSON form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::PassThrough => "pass_through",
            Self::Dissolve => "dissolve",
            Self::Darken => "darken",
            Self::Multiply => "multiply",
            Self::ColorBurn => "color_burn",
            Self::LinearBurn => "linear_burn",
            Self::DarkerColor => "darker_color",
            Self::Lighten => "lighten",
            Self::Screen => "screen",
            Self::ColorDodge => "color_dodge",
            Self::LinearDodge => "linear_dodge",
            Self::LighterColor => "lighter_color",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft_light",
            Self::HardLight => "hard_light",
            Self::VividLight => "vivid_light",
            Self::LinearLight => "linear_light",
            Self::PinLight => "pin_light",
            Self::HardMix => "hard_mix",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Subtract => "subtract",
            Self::Divide => "divide",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Fill or overlay paint.
pub enum Paint {
    /// Flat color.
    Solid {
        /// Color; alpha becomes an opacity attribute.
        color: Color,
    },
    /// Linear gradient across the canvas.
    LinearGradient(Gradient),
}

impl Paint {
    /// Solid paint shorthand.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Linear gradient description.
pub struct Gradient {
    /// Direction in degrees, counter-clockwise from the positive x axis.
    #[serde(default = "default_gradient_angle")]
    pub angle_deg: f64,
    /// Color stops ordered by offset.
    pub stops: Vec<GradientStop>,
}

fn default_gradient_angle() -> f64 {
    90.0
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One gradient color stop.
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where the stroke sits relative to the shape outline.
pub enum StrokeAlign {
    /// Entirely inside the outline.
    Inner,
    /// Straddling the outline.
    #[default]
    Center,
    /// Entirely outside the outline.
    Outer,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stroke specification.
pub struct StrokeSpec {
    /// Stroke width in pixels.
    pub width: f64,
    /// Alignment relative to the outline.
    #[serde(default)]
    pub alignment: StrokeAlign,
    /// Stroke color.
    pub color: Color,
    /// Stroke opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Boolean operator combining a sub-path with what precedes it.
pub enum BoolOp {
    /// Add the area (the source calls it "combine").
    #[default]
    Union,
    /// Remove the area.
    Subtract,
    /// Keep only the overlap.
    Intersect,
    /// Keep the non-overlapping parts.
    Xor,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Boolean expression over the sub-paths of a [`VectorMask`].
pub enum ShapeExpr {
    /// Index into [`VectorMask::paths`].
    Path(usize),
    /// Binary combination.
    Op {
        /// Operator.
        op: BoolOp,
        /// Left operand.
        lhs: Box<ShapeExpr>,
        /// Right operand.
        rhs: Box<ShapeExpr>,
    },
}

impl ShapeExpr {
    pub fn path(index: usize) -> Self {
        Self::Path(index)
    }

    pub fn op(op: BoolOp, lhs: Self, rhs: Self) -> Self {
        Self::Op {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn union(lhs: Self, rhs: Self) -> Self {
        Self::op(BoolOp::Union, lhs, rhs)
    }

    pub fn subtract(lhs: Self, rhs: Self) -> Self {
        Self::op(BoolOp::Subtract, lhs, rhs)
    }

    pub fn intersect(lhs: Self, rhs: Self) -> Self {
        Self::op(BoolOp::Intersect, lhs, rhs)
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Self::op(BoolOp::Xor, lhs, rhs)
    }

    /// Left-deep tree from a per-path operation list, the way the source stores vector
    /// masks: path `i` is combined with everything before it using `ops[i]`. The first
    /// operation is ignored.
    pub fn from_operations(ops: &[BoolOp]) -> Option<Self> {
        let mut iter = ops.iter().enumerate();
        let (_, _) = iter.next()?;
        let mut expr = Self::Path(0);
        for (i, op) in iter {
            expr = Self::op(*op, expr, Self::Path(i));
        }
        Some(expr)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Sub-path indices in left-to-right order (duplicates kept).
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            Self::Path(i) => out.push(*i),
            Self::Op { lhs, rhs, .. } => {
                lhs.collect_leaves(out);
                rhs.collect_leaves(out);
            }
        }
    }

    /// Whether any operator other than union occurs.
    pub fn has_non_union(&self) -> bool {
        match self {
            Self::Path(_) => false,
            Self::Op { op, lhs, rhs } => {
                *op != BoolOp::Union || lhs.has_non_union() || rhs.has_non_union()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One sub-path of a vector mask.
pub struct SubPath {
    /// SVG path data in canvas coordinates.
    pub d: String,
    /// How this sub-path combines with the ones before it.
    #[serde(default)]
    pub op: BoolOp,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Sub-paths plus the boolean tree combining them.
pub struct VectorMask {
    /// Sub-paths in source order.
    pub paths: Vec<SubPath>,
    /// Explicit tree; when absent the tree is folded from the per-path operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<ShapeExpr>,
}

impl VectorMask {
    /// Single-path mask.
    pub fn single(d: impl Into<String>) -> Self {
        Self {
            paths: vec![SubPath {
                d: d.into(),
                op: BoolOp::Union,
            }],
            expr: None,
        }
    }

    /// The effective boolean tree, or `None` when there are no sub-paths.
    pub fn expr(&self) -> Option<ShapeExpr> {
        if let Some(expr) = &self.expr {
            return Some(expr.clone());
        }
        let ops: Vec<BoolOp> = self.paths.iter().map(|p| p.op).collect();
        ShapeExpr::from_operations(&ops)
    }

    /// Parse every sub-path; the error names the first unparsable one.
    pub fn parse_paths(&self) -> Result<Vec<BezPath>, String> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                BezPath::from_svg(&p.d).map_err(|e| format!("sub-path {i} is not valid path data: {e}"))
            })
            .collect()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Regular grayscale layer mask.
pub struct LayerMask {
    /// Mask pixels; luminance is used, white reveals.
    pub image: RasterImage,
    /// Gray level outside the mask bounds (0 hides, 255 reveals).
    #[serde(default)]
    pub default_color: u8,
    /// Disabled masks are ignored.
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Placement of an effect relative to the layer's fill and stroke.
pub enum EffectPhase {
    /// Painted before (below) the fill.
    PreFill,
    /// Painted after the fill, before the stroke.
    #[default]
    PreStroke,
    /// Painted after the stroke.
    PostStroke,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One layer effect.
pub struct Effect {
    /// Kind and kind-specific parameters.
    pub kind: EffectKind,
    /// Explicit phase; defaults per kind (see [`EffectKind::default_phase`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<EffectPhase>,
    /// Disabled effects are ignored.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Blend mode of the effect against what is below it.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Effect opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
}

impl Effect {
    /// Enabled effect with default phase, normal blend and full opacity.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            phase: None,
            enabled: true,
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
        }
    }

    pub fn phase(&self) -> EffectPhase {
        self.phase.unwrap_or_else(|| self.kind.default_phase())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Effect kinds.
pub enum EffectKind {
    /// Offset, blurred silhouette below the layer.
    DropShadow {
        /// Shadow color.
        color: Color,
        /// Light angle in degrees.
        #[serde(default = "default_light_angle")]
        angle_deg: f64,
        /// Offset distance in pixels.
        distance: f64,
        /// Blur size in pixels.
        size: f64,
    },
    /// Blurred halo around the layer.
    OuterGlow {
        /// Glow color.
        color: Color,
        /// Blur size in pixels.
        size: f64,
        /// Percentage of `size` that is solid (choke) rather than blurred.
        #[serde(default)]
        spread: f64,
    },
    /// Shadow cast inside the layer's alpha.
    InnerShadow {
        /// Shadow color.
        color: Color,
        /// Light angle in degrees.
        #[serde(default = "default_light_angle")]
        angle_deg: f64,
        /// Offset distance in pixels.
        distance: f64,
        /// Blur size in pixels.
        size: f64,
    },
    /// Flat color over the layer's alpha.
    ColorOverlay {
        /// Overlay color.
        color: Color,
    },
    /// Gradient over the layer's alpha.
    GradientOverlay {
        /// Overlay gradient.
        gradient: Gradient,
    },
}

fn default_light_angle() -> f64 {
    120.0
}

impl EffectKind {
    /// Stable snake-case name, as used in the JSON form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DropShadow { .. } => "drop_shadow",
            Self::OuterGlow { .. } => "outer_glow",
            Self::InnerShadow { .. } => "inner_shadow",
            Self::ColorOverlay { .. } => "color_overlay",
            Self::GradientOverlay { .. } => "gradient_overlay",
        }
    }

    /// Color/overlay kinds occupy the slot right after the fill.
    pub fn is_color_overlay(&self) -> bool {
        matches!(
            self,
            Self::InnerShadow { .. } | Self::ColorOverlay { .. } | Self::GradientOverlay { .. }
        )
    }

    pub fn default_phase(&self) -> EffectPhase {
        match self {
            Self::DropShadow { .. } | Self::OuterGlow { .. } => EffectPhase::PreFill,
            Self::InnerShadow { .. } | Self::ColorOverlay { .. } | Self::GradientOverlay { .. } => {
                EffectPhase::PreStroke
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text layer payload: already laid-out runs on one baseline.
pub struct TextContent {
    /// Runs in reading order.
    pub runs: Vec<TextRun>,
    /// Baseline origin x.
    pub x: f64,
    /// Baseline origin y.
    pub y: f64,
    /// Optional affine `[a, b, c, d, e, f]` applied to the whole text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<[f64; 6]>,
}

impl TextContent {
    pub fn affine(&self) -> Affine {
        self.transform.map_or(Affine::IDENTITY, Affine::new)
    }

    /// The single color shared by every run, if any.
    pub fn uniform_color(&self) -> Option<Color> {
        let first = self.runs.first()?.color;
        self.runs
            .iter()
            .all(|r| r.color == first)
            .then_some(first)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One styled run of text.
pub struct TextRun {
    /// Run text.
    pub text: String,
    /// Resolved font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Fill color.
    pub color: Color,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic style.
    #[serde(default)]
    pub italic: bool,
}

impl Document {
    pub fn canvas(&self) -> LayerSvgResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.index())
    }

    /// Layer by id; ids are checked by [`Document::validate`].
    pub fn layer(&self, id: LayerId) -> LayerSvgResult<&Layer> {
        self.get(id).ok_or_else(|| {
            LayerSvgError::validation(format!("layer id {} is out of range", id.0))
        })
    }

    /// Ordered children of `parent`, or the top-level siblings for `None`.
    pub fn children_of(&self, parent: Option<LayerId>) -> &[LayerId] {
        match parent {
            None => &self.root,
            Some(id) => match self.get(id).map(|l| &l.kind) {
                Some(LayerKind::Group { children }) => children,
                _ => &[],
            },
        }
    }

    /// Lookup-only parent index: `parents()[i]` is the group owning layer `i`.
    pub fn parents(&self) -> Vec<Option<LayerId>> {
        let mut parents = vec![None; self.layers.len()];
        for (i, layer) in self.layers.iter().enumerate() {
            if let LayerKind::Group { children } = &layer.kind {
                for child in children {
                    if let Some(slot) = parents.get_mut(child.index()) {
                        *slot = Some(LayerId(i as u32));
                    }
                }
            }
        }
        parents
    }

    /// The contiguous run of clipping layers directly after `siblings[index]`.
    ///
    /// Empty when `siblings[index]` is itself a clipping layer or is followed by a
    /// non-clipping sibling.
    pub fn clip_layers<'a>(&self, siblings: &'a [LayerId], index: usize) -> &'a [LayerId] {
        if !self.has_clip_layers(siblings, index) {
            return &[];
        }
        let start = index + 1;
        let mut end = start;
        while end < siblings.len() && self.is_clipping(siblings[end]) {
            end += 1;
        }
        &siblings[start..end]
    }

    /// Whether `siblings[index]` is a clip target, i.e. it is a base and the sibling
    /// right above it is a clipping layer.
    pub fn has_clip_layers(&self, siblings: &[LayerId], index: usize) -> bool {
        let Some(base) = siblings.get(index).and_then(|id| self.get(*id)) else {
            return false;
        };
        // A leading clipping layer has nothing to clip against and acts as a base.
        if base.clipping_layer && self.has_base_below(siblings, index) {
            return false;
        }
        siblings
            .get(index + 1)
            .is_some_and(|id| self.is_clipping(*id))
    }

    fn is_clipping(&self, id: LayerId) -> bool {
        self.get(id).is_some_and(|layer| layer.clipping_layer)
    }

    /// Whether a clipping layer at `siblings[index]` has a non-clipping sibling below it
    /// to clip against.
    pub fn has_base_below(&self, siblings: &[LayerId], index: usize) -> bool {
        siblings[..index.min(siblings.len())]
            .iter()
            .any(|id| self.get(*id).is_some_and(|l| !l.clipping_layer))
    }

    /// Check the document-source contract: indices in range, single ownership, no
    /// cycles, sane opacities and payload sizes.
    pub fn validate(&self) -> LayerSvgResult<()> {
        self.canvas()?;
        let n = self.layers.len();
        let mut owners = vec![0u32; n];

        let mut check_ref = |id: LayerId, owner: &str| -> LayerSvgResult<()> {
            let Some(count) = owners.get_mut(id.index()) else {
                return Err(LayerSvgError::validation(format!(
                    "{owner} references missing layer {}",
                    id.0
                )));
            };
            *count += 1;
            if *count > 1 {
                return Err(LayerSvgError::validation(format!(
                    "layer {} is referenced more than once",
                    id.0
                )));
            }
            Ok(())
        };

        for id in &self.root {
            check_ref(*id, "document root")?;
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if let LayerKind::Group { children } = &layer.kind {
                for child in children {
                    if child.index() == i {
                        return Err(LayerSvgError::validation(format!(
                            "group '{}' contains itself",
                            layer.name
                        )));
                    }
                    check_ref(*child, &format!("group '{}'", layer.name))?;
                }
            }
        }

        // Single ownership plus reachability from the root rules out cycles: a cycle
        // would consist of owned layers that no root path reaches.
        let mut reachable = vec![false; n];
        let mut stack: Vec<LayerId> = self.root.clone();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut reachable[id.index()], true) {
                continue;
            }
            stack.extend_from_slice(self.children_of(Some(id)));
        }
        let parents = self.parents();
        for (i, count) in owners.iter().enumerate() {
            if *count > 0 && !reachable[i] {
                let owner = parents[i]
                    .and_then(|p| self.get(p))
                    .map_or("?", |g| g.name.as_str());
                return Err(LayerSvgError::validation(format!(
                    "layer '{}' (in group '{owner}') is part of a group cycle",
                    self.layers[i].name
                )));
            }
        }

        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}

impl Layer {
    pub(crate) fn validate(&self) -> LayerSvgResult<()> {
        for (field, value) in [("opacity", self.opacity), ("fill_opacity", self.fill_opacity)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(LayerSvgError::validation(format!(
                    "layer '{}' {field} must be finite and in [0, 1]",
                    self.name
                )));
            }
        }
        if let Some(stroke) = &self.stroke
            && (!stroke.width.is_finite() || stroke.width < 0.0)
        {
            return Err(LayerSvgError::validation(format!(
                "layer '{}' stroke width must be finite and >= 0",
                self.name
            )));
        }
        match &self.kind {
            LayerKind::Pixel { image } => image.validate(&self.name)?,
            LayerKind::Text(text) => {
                for run in &text.runs {
                    if !run.font_size.is_finite() || run.font_size <= 0.0 {
                        return Err(LayerSvgError::validation(format!(
                            "layer '{}' text run font_size must be finite and > 0",
                            self.name
                        )));
                    }
                }
            }
            LayerKind::Shape { .. } | LayerKind::Group { .. } | LayerKind::Adjustment { .. } => {}
        }
        if let Some(mask) = &self.mask {
            mask.image.validate(&self.name)?;
        }
        if let Some(raster) = &self.raster {
            raster.validate(&self.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
