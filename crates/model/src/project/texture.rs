use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::media::{RawBitmap, TextureSize};

/// How transparent pixels of a texture are treated.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TransparencyControl {
    #[default]
    Opaque,
    SpaceFilled,
    SpaceAndColorFilled,
}

/// Authoritative data for one wall/floor texture.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureState {
    pub name: String,
    pub climbable: bool,
    pub transparency_control: TransparencyControl,
    pub animation_group: u8,
    pub animation_index: u8,
    pub images: BTreeMap<TextureSize, RawBitmap>,
}

impl TextureState {
    /// Applies a partial update; present fields overwrite, absent fields stay.
    pub fn apply(&mut self, patch: &TextureProperties) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(climbable) = patch.climbable {
            self.climbable = climbable;
        }
        if let Some(transparency_control) = patch.transparency_control {
            self.transparency_control = transparency_control;
        }
        if let Some(animation_group) = patch.animation_group {
            self.animation_group = animation_group;
        }
        if let Some(animation_index) = patch.animation_index {
            self.animation_index = animation_index;
        }
    }

    /// Full properties snapshot, as echoed by mutations.
    pub fn properties(&self) -> TextureProperties {
        TextureProperties {
            name: Some(self.name.clone()),
            climbable: Some(self.climbable),
            transparency_control: Some(self.transparency_control),
            animation_group: Some(self.animation_group),
            animation_index: Some(self.animation_index),
        }
    }

    /// Sizes currently carrying an image, ascending.
    pub fn available_sizes(&self) -> Vec<TextureSize> {
        self.images.keys().copied().collect()
    }
}

/// Partial texture update; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureProperties {
    pub name: Option<String>,
    pub climbable: Option<bool>,
    pub transparency_control: Option<TransparencyControl>,
    pub animation_group: Option<u8>,
    pub animation_index: Option<u8>,
}

/// Texture read view: id, current properties, and stored sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub id: usize,
    pub properties: TextureProperties,
    pub sizes: Vec<TextureSize>,
}
