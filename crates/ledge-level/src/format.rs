//! Level file format definitions
//!
//! Every field is optional at this layer so that validation can name exactly
//! which required field is missing instead of surfacing a decoder message.

use serde::{Deserialize, Serialize};

/// Root structure of a level file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<SpawnDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<PlatformDef>>,
    #[serde(default)]
    pub coins: Vec<SpawnDef>,
    #[serde(default, alias = "enemies")]
    pub spiders: Vec<SpawnDef>,
    #[serde(default)]
    pub decoration: Vec<DecorationDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<SpawnDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door: Option<SpawnDef>,
}

/// A spawn point
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

impl SpawnDef {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// A platform placement: top-left position plus the image it is drawn with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Explicit extent; overrides the size implied by `image`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl PlatformDef {
    pub fn new(x: f32, y: f32, image: impl Into<String>) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            image: Some(image.into()),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// A purely visual decoration sprite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecorationDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default)]
    pub frame: u32,
}
