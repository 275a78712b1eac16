//! Boolean shape compilation.
//!
//! The target format has no path boolean operations, so a [`ShapeExpr`] is compiled into
//! a chain of luminance masks. Leaves are painted white (or black, to erase) by
//! referencing their sub-path definitions; a non-leaf operand that cannot be painted
//! in place is materialized as its own mask and painted through a canvas-sized rect.

use crate::{
    compose::registry::Registry,
    document::model::{BoolOp, ShapeExpr},
    foundation::{
        core::{Canvas, NumFmt},
        error::{LayerSvgError, LayerSvgResult},
    },
    svg::tree::{Element, href, url},
};

const WHITE: &str = "#fff";
const BLACK: &str = "#000";

/// Masks in dependency order; the last one is referenced as `final_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskChain {
    pub masks: Vec<Element>,
    pub final_id: String,
}

impl MaskChain {
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

/// Compile `expr` over sub-paths defined under `leaves` (indexed by path number).
pub fn compile(
    expr: &ShapeExpr,
    leaves: &[String],
    canvas: Canvas,
    fmt: NumFmt,
    registry: &mut Registry,
) -> LayerSvgResult<MaskChain> {
    if let Some(bad) = expr.leaves().into_iter().find(|i| *i >= leaves.len()) {
        return Err(LayerSvgError::internal(format!(
            "boolean expression references sub-path {bad} of {}",
            leaves.len()
        )));
    }
    let mut compiler = Compiler {
        registry,
        leaves,
        canvas,
        fmt,
        masks: Vec::new(),
    };
    let final_id = compiler.mask_for(expr);
    Ok(MaskChain {
        masks: compiler.masks,
        final_id,
    })
}

/// A compiled operand: a sub-path painted directly, or a mask painted through a rect.
enum Operand {
    Leaf(usize),
    Mask(String),
}

struct Compiler<'a> {
    registry: &'a mut Registry,
    leaves: &'a [String],
    canvas: Canvas,
    fmt: NumFmt,
    masks: Vec<Element>,
}

impl Compiler<'_> {
    /// Emit the mask(s) representing `expr`; returns the id of the last one.
    fn mask_for(&mut self, expr: &ShapeExpr) -> String {
        match expr {
            ShapeExpr::Op {
                op: BoolOp::Intersect,
                lhs,
                rhs,
            } => {
                let lhs_mask = self.mask_for(lhs);
                let mut inner = Vec::new();
                self.paint_operand(rhs, WHITE, &mut inner);
                let mut body = Element::new("g").attr("mask", url(&lhs_mask));
                for el in inner {
                    body.push(el);
                }
                self.push_mask(vec![body])
            }
            ShapeExpr::Op {
                op: BoolOp::Xor,
                lhs,
                rhs,
            } => {
                // (A ∪ B) minus (A ∩ B), with each operand compiled once.
                let a = self.operand(lhs);
                let b = self.operand(rhs);
                let a_mask = match &a {
                    Operand::Leaf(_) => {
                        let el = self.paint(&a, WHITE);
                        self.push_mask(vec![el])
                    }
                    Operand::Mask(id) => id.clone(),
                };
                let overlap = Element::new("g")
                    .attr("mask", url(&a_mask))
                    .child(self.paint(&b, WHITE));
                let overlap = self.push_mask(vec![overlap]);
                let body = vec![
                    self.paint(&a, WHITE),
                    self.paint(&b, WHITE),
                    self.canvas_rect(BLACK).attr("mask", url(&overlap)),
                ];
                self.push_mask(body)
            }
            ShapeExpr::Path(_)
            | ShapeExpr::Op {
                op: BoolOp::Union | BoolOp::Subtract,
                ..
            } => {
                let mut body = Vec::new();
                self.paint_running(expr, &mut body);
                self.push_mask(body)
            }
        }
    }

    /// Paint `expr` white onto mask content that so far holds only what this call
    /// painted. Left-deep union/subtract sequences stay in place.
    fn paint_running(&mut self, expr: &ShapeExpr, body: &mut Vec<Element>) {
        match expr {
            ShapeExpr::Path(_) => self.paint_operand(expr, WHITE, body),
            ShapeExpr::Op {
                op: op @ (BoolOp::Union | BoolOp::Subtract),
                lhs,
                rhs,
            } => {
                self.paint_running(lhs, body);
                let color = if *op == BoolOp::Union { WHITE } else { BLACK };
                self.paint_operand(rhs, color, body);
            }
            ShapeExpr::Op { .. } => self.paint_operand(expr, WHITE, body),
        }
    }

    /// Paint `expr` in `color`: leaves directly, anything else through its own mask.
    fn paint_operand(&mut self, expr: &ShapeExpr, color: &str, body: &mut Vec<Element>) {
        let operand = self.operand(expr);
        body.push(self.paint(&operand, color));
    }

    /// Resolve `expr` once; non-leaf operands are compiled to their mask here.
    fn operand(&mut self, expr: &ShapeExpr) -> Operand {
        match expr {
            ShapeExpr::Path(i) => Operand::Leaf(*i),
            ShapeExpr::Op { .. } => Operand::Mask(self.mask_for(expr)),
        }
    }

    fn paint(&self, operand: &Operand, color: &str) -> Element {
        match operand {
            Operand::Leaf(i) => Element::new("use")
                .attr("href", href(&self.leaves[*i]))
                .attr("fill", color),
            Operand::Mask(id) => self.canvas_rect(color).attr("mask", url(id)),
        }
    }

    fn canvas_rect(&self, fill: &str) -> Element {
        canvas_rect(self.canvas, self.fmt).attr("fill", fill)
    }

    fn push_mask(&mut self, content: Vec<Element>) -> String {
        let id = self.registry.fresh("bool");
        let mut mask = mask_element(&id, self.canvas, self.fmt);
        for el in content {
            mask.push(el);
        }
        self.masks.push(mask);
        id
    }
}

/// `<mask>` in user space covering the canvas.
pub fn mask_element(id: &str, canvas: Canvas, fmt: NumFmt) -> Element {
    let r = canvas.rect();
    Element::new("mask")
        .attr("id", id)
        .attr("maskUnits", "userSpaceOnUse")
        .attr("x", fmt.num(r.x0))
        .attr("y", fmt.num(r.y0))
        .attr("width", fmt.num(r.width()))
        .attr("height", fmt.num(r.height()))
}

/// Unpainted canvas-sized `<rect>`.
pub fn canvas_rect(canvas: Canvas, fmt: NumFmt) -> Element {
    let r = canvas.rect();
    Element::new("rect")
        .attr("x", fmt.num(r.x0))
        .attr("y", fmt.num(r.y0))
        .attr("width", fmt.num(r.width()))
        .attr("height", fmt.num(r.height()))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/boolean.rs"]
mod tests;
