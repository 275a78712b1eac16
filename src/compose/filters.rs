use crate::{
    document::model::StrokeAlign,
    foundation::core::{Canvas, Color, NumFmt, Rect, Vec2},
    svg::tree::Element,
};

/// User-space filter region: the canvas grown by a margin on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterRegion {
    pub rect: Rect,
    pub fmt: NumFmt,
}

impl FilterRegion {
    pub fn new(canvas: Canvas, margin: f64, fmt: NumFmt) -> Self {
        Self {
            rect: canvas.rect().inflate(margin.max(0.0), margin.max(0.0)),
            fmt,
        }
    }

    fn filter(&self, id: &str) -> Element {
        let f = self.fmt;
        Element::new("filter")
            .attr("id", id)
            .attr("filterUnits", "userSpaceOnUse")
            .attr("x", f.num(self.rect.x0))
            .attr("y", f.num(self.rect.y0))
            .attr("width", f.num(self.rect.width()))
            .attr("height", f.num(self.rect.height()))
            .attr("color-interpolation-filters", "sRGB")
    }
}

/// Shadow offset for a light at `angle_deg`: the shadow falls away from the light.
pub fn light_offset(angle_deg: f64, distance: f64) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(-distance * theta.cos(), distance * theta.sin())
}

fn flood(color: Color, result: &str) -> Element {
    Element::new("feFlood")
        .attr("flood-color", color.to_hex())
        .attr("flood-opacity", NumFmt::default().num(color.alpha()))
        .attr("result", result)
}

fn composite(input: &str, in2: &str, operator: &str, result: &str) -> Element {
    Element::new("feComposite")
        .attr("in", input)
        .attr("in2", in2)
        .attr("operator", operator)
        .attr("result", result)
}

fn blur(f: NumFmt, input: &str, std_dev: f64, result: &str) -> Element {
    Element::new("feGaussianBlur")
        .attr("in", input)
        .attr("stdDeviation", f.num(std_dev.max(0.0)))
        .attr("result", result)
}

fn offset(f: NumFmt, input: &str, d: Vec2, result: &str) -> Element {
    Element::new("feOffset")
        .attr("in", input)
        .attr("dx", f.num(d.x))
        .attr("dy", f.num(d.y))
        .attr("result", result)
}

fn morphology(f: NumFmt, operator: &str, input: &str, radius: f64, result: &str) -> Element {
    Element::new("feMorphology")
        .attr("operator", operator)
        .attr("in", input)
        .attr("radius", f.num(radius))
        .attr("result", result)
}

/// Blurred, offset silhouette flooded with `color`.
pub fn drop_shadow(
    id: &str,
    region: FilterRegion,
    color: Color,
    angle_deg: f64,
    distance: f64,
    size: f64,
) -> Element {
    let f = region.fmt;
    region
        .filter(id)
        .child(blur(f, "SourceAlpha", size / 2.0, "blur"))
        .child(offset(f, "blur", light_offset(angle_deg, distance), "shifted"))
        .child(flood(color, "color"))
        .child(composite("color", "shifted", "in", "shadow"))
}

/// Halo around the silhouette; `spread` percent of `size` is solid before blurring.
pub fn outer_glow(id: &str, region: FilterRegion, color: Color, size: f64, spread: f64) -> Element {
    let f = region.fmt;
    let solid = size * spread.clamp(0.0, 100.0) / 100.0;
    let mut filter = region.filter(id);
    let source = if solid > 0.0 {
        filter.push(morphology(f, "dilate", "SourceAlpha", solid, "spread"));
        "spread"
    } else {
        "SourceAlpha"
    };
    filter
        .child(blur(f, source, (size - solid) / 2.0, "blur"))
        .child(flood(color, "color"))
        .child(composite("color", "blur", "in", "glow"))
}

/// Shadow inside the silhouette, cast by an offset copy of it.
pub fn inner_shadow(
    id: &str,
    region: FilterRegion,
    color: Color,
    angle_deg: f64,
    distance: f64,
    size: f64,
) -> Element {
    let f = region.fmt;
    region
        .filter(id)
        .child(offset(f, "SourceAlpha", light_offset(angle_deg, distance), "shifted"))
        .child(blur(f, "shifted", size / 2.0, "blur"))
        .child(composite("SourceAlpha", "blur", "out", "inside"))
        .child(flood(color, "color"))
        .child(composite("color", "inside", "in", "shadow"))
}

/// Flat `color` composited through the source alpha.
pub fn color_fill(id: &str, region: FilterRegion, color: Color) -> Element {
    region
        .filter(id)
        .child(flood(color, "color"))
        .child(composite("color", "SourceAlpha", "in", "overlay"))
}

/// Erode/dilate radii for a stroke of `width` at `align`.
///
/// Center strokes erode by `ceil(width / 2)` and dilate by the remainder, so odd
/// widths lean into the shape.
pub fn morphology_radii(align: StrokeAlign, width: f64) -> (f64, f64) {
    match align {
        StrokeAlign::Outer => (0.0, width),
        StrokeAlign::Inner => (width, 0.0),
        StrokeAlign::Center => {
            let erode = (width / 2.0).ceil();
            (erode, (width - erode).max(0.0))
        }
    }
}

/// Stroke emulated on the source alpha with morphology.
pub fn morphology_stroke(
    id: &str,
    region: FilterRegion,
    align: StrokeAlign,
    width: f64,
    color: Color,
) -> Element {
    let f = region.fmt;
    let (erode, dilate) = morphology_radii(align, width);
    let mut filter = region.filter(id);
    match align {
        StrokeAlign::Outer => {
            filter.push(morphology(f, "dilate", "SourceAlpha", dilate, "dilated"));
            filter.push(composite("dilated", "SourceAlpha", "out", "ring"));
        }
        StrokeAlign::Inner => {
            filter.push(morphology(f, "erode", "SourceAlpha", erode, "eroded"));
            filter.push(composite("SourceAlpha", "eroded", "out", "ring"));
        }
        StrokeAlign::Center => {
            filter.push(morphology(f, "erode", "SourceAlpha", erode, "eroded"));
            filter.push(morphology(f, "dilate", "SourceAlpha", dilate, "dilated"));
            filter.push(composite("dilated", "eroded", "out", "ring"));
        }
    }
    filter
        .child(flood(color, "color"))
        .child(composite("color", "ring", "in", "stroke"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/filters.rs"]
mod tests;
