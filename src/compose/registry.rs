use std::collections::HashMap;

use crate::foundation::ids::LayerId;

/// What a definition stands for, relative to its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefRole {
    /// Canonical shape/image/text referenced by proxies.
    Shape,
    /// Clip definition (`clipPath` or `mask`) of a clip target.
    Clip,
    /// Group body referenced by pre-fill proxies.
    Group,
    /// Regular layer mask.
    LayerMask,
    /// Vector mask applied to non-shape content.
    VectorClip,
    /// Knockout mask used by outer strokes.
    Knockout,
    /// Fill gradient.
    Gradient,
    /// Filter for the effect at the given index.
    Filter(u32),
    /// Morphology filter emulating the stroke.
    StrokeFilter,
}

impl DefRole {
    fn kind(self) -> &'static str {
        match self {
            Self::Shape => "def",
            Self::Clip => "clip",
            Self::Group => "grp",
            Self::LayerMask => "lmask",
            Self::VectorClip => "vmask",
            Self::Knockout => "knock",
            Self::Gradient => "grad",
            Self::Filter(_) => "fx",
            Self::StrokeFilter => "stroke",
        }
    }
}

/// Identity of a definition: the owning layer plus its role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefKey {
    pub layer: LayerId,
    pub role: DefRole,
}

impl DefKey {
    pub fn new(layer: LayerId, role: DefRole) -> Self {
        Self { layer, role }
    }
}

/// Outcome of [`Registry::define`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Defined {
    /// First request: the caller must emit the definition under this id.
    New(String),
    /// Already emitted; reference it.
    Existing(String),
}

impl Defined {
    pub fn id(&self) -> &str {
        match self {
            Self::New(id) | Self::Existing(id) => id,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// Session-scoped id allocator and definition table.
#[derive(Debug)]
pub struct Registry {
    prefix: String,
    next: u32,
    defined: HashMap<DefKey, String>,
}

impl Registry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
            defined: HashMap::new(),
        }
    }

    /// A never-before-returned id of the form `{prefix}{kind}-{n}`.
    pub fn fresh(&mut self, kind: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}{kind}-{n}", self.prefix)
    }

    /// Id for `key`, allocating it on first use.
    pub fn define(&mut self, key: DefKey) -> Defined {
        if let Some(id) = self.defined.get(&key) {
            return Defined::Existing(id.clone());
        }
        let id = self.fresh(key.role.kind());
        self.defined.insert(key, id.clone());
        Defined::New(id)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/registry.rs"]
mod tests;
