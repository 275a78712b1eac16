//! Layered document to SVG compositor.
//!
//! A [`Document`] (raster, shape, text, group and adjustment layers with clipping runs,
//! boolean vector masks, blend modes and layer effects) is translated into an
//! [`SvgTree`] that reproduces the composite with SVG primitives only: masks stand in
//! for path booleans, proxies for attribute overrides, and filters for strokes and
//! effects the format cannot express natively.
//!
//! ```no_run
//! use layersvg::{ConvertOptions, DocumentBuilder, LayerBuilder, Paint, Color, VectorMask};
//!
//! let mut doc = DocumentBuilder::new(64, 64);
//! doc.push(
//!     LayerBuilder::shape(
//!         "box",
//!         Paint::solid(Color::rgb(255, 0, 0)),
//!         VectorMask::single("M8 8 L56 8 L56 56 L8 56 Z"),
//!     )
//!     .build()?,
//! );
//! let out = layersvg::convert(&doc.build()?, &ConvertOptions::default())?;
//! println!("{}", out.to_svg_string());
//! # Ok::<(), layersvg::LayerSvgError>(())
//! ```
#![forbid(unsafe_code)]

mod compose;
mod document;
mod foundation;
mod svg;

pub use compose::{
    blend::{BlendMapper, BlendMapping, CssBlend, CssBlendMapper, map_blend},
    boolean::{MaskChain, compile as compile_boolean},
    effects::{EffectPlan, LayerPass, overlay_mode},
    emitters::{
        ClipKind, ClipRef, Definition, EffectEmitter, EmitCtx, Geometry, LayerRef, OverlayMode,
        ProxyPaint, ShapeEmitter, SvgEffectEmitter, SvgShapeEmitter, SvgTextEmitter,
        TextEmitter, clip_for, clip_kind, effect_defect, proxy,
    },
    registry::{DefKey, DefRole, Defined, Registry},
    section::{ClipSection, SectionState},
    walker::{Compositor, Conversion, ConvertOptions, convert},
};
pub use document::{
    builder::{DocumentBuilder, LayerBuilder, rect_path, stroke, text_run},
    model::{
        BlendMode, BoolOp, Document, Effect, EffectKind, EffectPhase, Gradient, GradientStop,
        Layer, LayerKind, LayerKindTag, LayerMask, Paint, ShapeExpr, StrokeAlign, StrokeSpec,
        SubPath, TextContent, TextRun, VectorMask,
    },
    raster::RasterImage,
};
pub use foundation::{
    core::{Canvas, Color, NumFmt},
    diag::{Diagnostics, Warning, WarningCode, WarningKind},
    error::{LayerSvgError, LayerSvgResult},
    ids::{LayerId, NodeId},
    limits::{Budget, LimitKind, ResourceLimits},
};
pub use self::svg::tree::{Content, Element, NodeKind, SvgNode, SvgTree};
