use svg::Node as _;

use crate::{
    foundation::ids::NodeId,
    svg::tree::{NodeKind, SvgTree},
};

impl SvgTree {
    /// The tree as an `svg` crate document sized to the canvas.
    pub fn to_document(&self) -> svg::Document {
        let canvas = self.canvas();
        let mut doc = svg::Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", canvas.width.to_string())
            .set("height", canvas.height.to_string())
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width, canvas.height),
            );
        for id in self.top_level() {
            if let Some(node) = self.to_node(*id) {
                doc.append(node);
            }
        }
        doc
    }

    /// Serialized SVG text.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn to_node(&self, id: NodeId) -> Option<Box<dyn svg::Node>> {
        match &self.get(id)?.kind {
            NodeKind::Text(t) => Some(Box::new(svg::node::Text::new(t.as_str()))),
            NodeKind::Element { tag, attrs } => {
                let mut el = svg::node::element::Element::new(*tag);
                for (name, value) in attrs {
                    el.assign(*name, value.as_str());
                }
                for child in self.children(id) {
                    if let Some(node) = self.to_node(*child) {
                        el.append(node);
                    }
                }
                Some(Box::new(el))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/write.rs"]
mod tests;
