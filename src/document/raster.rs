use base64::Engine as _;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::foundation::{
    core::{Color, Rect},
    error::{LayerSvgError, LayerSvgResult},
    limits::ResourceLimits,
};

/// Straight RGBA8 pixels placed on the canvas at `(x, y)`.
///
/// In the JSON form `rgba` is a base64 string.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RasterImage {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(with = "rgba_base64")]
    pub rgba: Vec<u8>,
}

impl RasterImage {
    pub fn new(x: i32, y: i32, width: u32, height: u32, rgba: Vec<u8>) -> LayerSvgResult<Self> {
        let img = Self {
            x,
            y,
            width,
            height,
            rgba,
        };
        img.validate("<new>")?;
        Ok(img)
    }

    /// Rectangle of one flat color.
    pub fn solid(x: i32, y: i32, width: u32, height: u32, color: Color) -> Self {
        let px: [u8; 4] = color.into();
        let rgba = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            x,
            y,
            width,
            height,
            rgba,
        }
    }

    pub fn bounds(&self) -> Rect {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        Rect::new(x, y, x + f64::from(self.width), y + f64::from(self.height))
    }

    pub(crate) fn validate(&self, layer_name: &str) -> LayerSvgResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LayerSvgError::validation(format!(
                "layer '{layer_name}' raster must be non-empty"
            )));
        }
        let expected = u64::from(self.width) * u64::from(self.height) * 4;
        if self.rgba.len() as u64 != expected {
            return Err(LayerSvgError::validation(format!(
                "layer '{layer_name}' raster is {}x{} but carries {} bytes (expected {expected})",
                self.width,
                self.height,
                self.rgba.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn check_limits(&self, limits: &ResourceLimits, layer_name: &str) -> LayerSvgResult<()> {
        limits.check_dimension(&format!("raster of layer '{layer_name}'"), self.width, self.height)
    }

    /// `data:image/png;base64,...` for embedding in an `<image>` href.
    pub fn to_png_data_uri(&self) -> LayerSvgResult<String> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.rgba, self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|e| LayerSvgError::encode(format!("png encode failed: {e}")))?;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
        Ok(format!("data:image/png;base64,{b64}"))
    }
}

mod rgba_base64 {
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        base64::engine::general_purpose::STANDARD
            .decode(s.trim())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/raster.rs"]
mod tests;
