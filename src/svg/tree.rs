use std::collections::HashMap;

use crate::foundation::{
    core::Canvas,
    error::{LayerSvgError, LayerSvgResult},
    ids::NodeId,
};

/// Owned element fragment, assembled by emitters before it is committed to an [`SvgTree`].
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Content>,
}

/// Child of an [`Element`] fragment.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set `name`, replacing any previous value.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, el: Element) -> Self {
        self.children.push(Content::Element(el));
        self
    }

    pub fn push(&mut self, el: Element) {
        self.children.push(Content::Element(el));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Element children, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }
}

/// Kind of an arena node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
    },
    Text(String),
}

/// One node of the output arena.
#[derive(Clone, Debug)]
pub struct SvgNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SvgNode {
    pub fn tag(&self) -> Option<&'static str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(*tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Element { .. } => None,
        }
    }
}

/// Append-only output tree.
///
/// Nodes are never removed or edited after [`SvgTree::append`]; sibling order is
/// painter's order. Every `id` attribute is unique across the tree.
#[derive(Clone, Debug)]
pub struct SvgTree {
    canvas: Canvas,
    nodes: Vec<SvgNode>,
    top: Vec<NodeId>,
    ids: HashMap<String, NodeId>,
}

impl SvgTree {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            nodes: Vec::new(),
            top: Vec::new(),
            ids: HashMap::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Commit `el` (and its subtree) as the last child of `parent`, or as the last
    /// top-level node when `parent` is `None`.
    pub fn append(&mut self, parent: Option<NodeId>, el: Element) -> LayerSvgResult<NodeId> {
        if let Some(p) = parent
            && !matches!(
                self.nodes.get(p.index()).map(|n| &n.kind),
                Some(NodeKind::Element { .. })
            )
        {
            return Err(LayerSvgError::internal(format!(
                "cannot append under node {}",
                p.0
            )));
        }
        self.append_element(parent, el)
    }

    fn append_element(&mut self, parent: Option<NodeId>, el: Element) -> LayerSvgResult<NodeId> {
        let id = self.push_node(
            parent,
            NodeKind::Element {
                tag: el.tag,
                attrs: el.attrs,
            },
        );
        if let Some(key) = self.nodes[id.index()].attr("id").map(str::to_string)
            && self.ids.insert(key.clone(), id).is_some()
        {
            return Err(LayerSvgError::internal(format!(
                "duplicate element id '{key}'"
            )));
        }
        for child in el.children {
            match child {
                Content::Element(e) => {
                    self.append_element(Some(id), e)?;
                }
                Content::Text(t) => {
                    self.push_node(Some(id), NodeKind::Text(t));
                }
            }
        }
        Ok(id)
    }

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SvgNode {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.top.push(id),
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SvgNode> {
        self.nodes.get(id.index())
    }

    /// Node by id. Ids come from this tree, so out-of-range is a caller bug.
    pub fn node(&self, id: NodeId) -> &SvgNode {
        &self.nodes[id.index()]
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Element children only (text nodes skipped).
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).tag().is_some())
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SvgNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Nodes with the given tag, in document order of insertion.
    pub fn elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.iter().filter(move |(_, n)| n.is(tag)).map(|(id, _)| id)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.elements(tag).count()
    }

    /// Concatenated text content below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        if let Some(t) = node.text() {
            out.push_str(t);
        }
        for c in &node.children {
            self.collect_text(*c, out);
        }
    }
}

/// `url(#id)` reference value.
pub fn url(id: &str) -> String {
    format!("url(#{id})")
}

/// `#id` href value.
pub fn href(id: &str) -> String {
    format!("#{id}")
}

#[cfg(test)]
#[path = "../../tests/unit/svg/tree.rs"]
mod tests;
