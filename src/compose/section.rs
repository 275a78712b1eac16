//! Clip section state machine.
//!
//! A clip target and its trailing clipping layers are emitted as
//! `[definition container, clip definition, bottom proxies, <g clip>(children), top proxies]`.
//! Steps must run in order; anything else is an internal error.

use crate::{
    compose::emitters::ClipRef,
    foundation::error::{LayerSvgError, LayerSvgResult},
    svg::tree::Element,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    Closed,
    BottomEmitted,
    ChildrenWrapped,
    TopEmitted,
}

/// Emission state of one clip section.
#[derive(Debug)]
pub struct ClipSection {
    state: SectionState,
    clip: ClipRef,
    nodes: Vec<Element>,
}

impl ClipSection {
    /// Open a section with the target's definition container and its clip definition
    /// (absent when an inner stroke already emitted it).
    pub fn begin(clip: ClipRef, container: Option<Element>, clip_def: Option<Element>) -> Self {
        let mut nodes = Vec::with_capacity(2);
        nodes.extend(container);
        nodes.extend(clip_def);
        Self {
            state: SectionState::BottomEmitted,
            clip,
            nodes,
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn clip(&self) -> &ClipRef {
        &self.clip
    }

    fn expect(&self, step: &str, allowed: &[SectionState]) -> LayerSvgResult<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(LayerSvgError::internal(format!(
            "clip section step '{step}' in state {:?}",
            self.state
        )))
    }

    /// Pre-fill, fill, overlay and pre-stroke proxies.
    pub fn bottom(&mut self, els: Vec<Element>) -> LayerSvgResult<()> {
        self.expect("bottom", &[SectionState::BottomEmitted])?;
        self.nodes.extend(els);
        Ok(())
    }

    /// The group holding the clipping layers, restricted by the clip definition.
    pub fn wrap_children(&mut self, children: Vec<Element>) -> LayerSvgResult<()> {
        self.expect("children", &[SectionState::BottomEmitted])?;
        let mut group = self.clip.apply(Element::new("g"));
        for child in children {
            group.push(child);
        }
        self.nodes.push(group);
        self.state = SectionState::ChildrenWrapped;
        Ok(())
    }

    /// Stroke and post-stroke proxies, as siblings after the clipped group.
    pub fn top(&mut self, els: Vec<Element>) -> LayerSvgResult<()> {
        self.expect("top", &[SectionState::ChildrenWrapped, SectionState::TopEmitted])?;
        self.nodes.extend(els);
        self.state = SectionState::TopEmitted;
        Ok(())
    }

    /// Close the section and hand back its nodes in paint order.
    pub fn end(&mut self) -> LayerSvgResult<Vec<Element>> {
        self.expect("end", &[SectionState::ChildrenWrapped, SectionState::TopEmitted])?;
        self.state = SectionState::Closed;
        Ok(std::mem::take(&mut self.nodes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/section.rs"]
mod tests;
