use crate::document::model::BlendMode;

/// Target-side blend keywords (`mix-blend-mode` values).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssBlend {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl CssBlend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// `style` value for a non-normal mode.
    pub fn style(self) -> Option<String> {
        (self != Self::Normal).then(|| format!("mix-blend-mode:{}", self.as_str()))
    }
}

/// Classification of a source blend mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMapping {
    /// Exact equivalent.
    Native(CssBlend),
    /// Visually close substitute; no warning.
    Approximate(CssBlend),
    /// No reasonable equivalent; substitute and warn.
    Unsupported(CssBlend),
}

impl BlendMapping {
    pub fn css(self) -> CssBlend {
        match self {
            Self::Native(b) | Self::Approximate(b) | Self::Unsupported(b) => b,
        }
    }
}

/// Maps source blend modes to target compositing.
pub trait BlendMapper {
    fn map(&self, mode: BlendMode) -> BlendMapping;
}

/// The standard table onto CSS compositing keywords.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssBlendMapper;

impl BlendMapper for CssBlendMapper {
    fn map(&self, mode: BlendMode) -> BlendMapping {
        map_blend(mode)
    }
}

pub fn map_blend(mode: BlendMode) -> BlendMapping {
    use BlendMapping::{Approximate, Native, Unsupported};
    match mode {
        BlendMode::Normal | BlendMode::PassThrough => Native(CssBlend::Normal),
        BlendMode::Multiply => Native(CssBlend::Multiply),
        BlendMode::Screen => Native(CssBlend::Screen),
        BlendMode::Overlay => Native(CssBlend::Overlay),
        BlendMode::Darken => Native(CssBlend::Darken),
        BlendMode::Lighten => Native(CssBlend::Lighten),
        BlendMode::ColorDodge => Native(CssBlend::ColorDodge),
        BlendMode::ColorBurn => Native(CssBlend::ColorBurn),
        BlendMode::HardLight => Native(CssBlend::HardLight),
        BlendMode::SoftLight => Native(CssBlend::SoftLight),
        BlendMode::Difference => Native(CssBlend::Difference),
        BlendMode::Exclusion => Native(CssBlend::Exclusion),
        BlendMode::Hue => Native(CssBlend::Hue),
        BlendMode::Saturation => Native(CssBlend::Saturation),
        BlendMode::Color => Native(CssBlend::Color),
        BlendMode::Luminosity => Native(CssBlend::Luminosity),

        BlendMode::Dissolve => Approximate(CssBlend::Normal),
        BlendMode::LinearBurn => Approximate(CssBlend::Multiply),
        BlendMode::DarkerColor => Approximate(CssBlend::Darken),
        BlendMode::LinearDodge => Approximate(CssBlend::Screen),
        BlendMode::LighterColor => Approximate(CssBlend::Lighten),

        BlendMode::VividLight => Unsupported(CssBlend::ColorDodge),
        BlendMode::LinearLight => Unsupported(CssBlend::HardLight),
        BlendMode::PinLight => Unsupported(CssBlend::Normal),
        BlendMode::HardMix => Unsupported(CssBlend::Normal),
        BlendMode::Subtract => Unsupported(CssBlend::Difference),
        BlendMode::Divide => Unsupported(CssBlend::Normal),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blend.rs"]
mod tests;
