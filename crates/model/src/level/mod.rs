//! Level-scoped state: properties, tiles, objects, surveillance, animations.

mod animation;
mod object;
mod surveillance;
mod tile;

pub use animation::{AnimationLoopKind, TextureAnimation, TextureAnimationProperties};
pub use object::{
    HackingData, LevelObject, LevelObjectProperties, LevelObjectState, LevelObjectTemplate,
    ObjectId,
};
pub use surveillance::SurveillanceObject;
pub use tile::{
    CalculatedWallHeights, HeightUnit, RealWorldTileProperties, RealWorldTileState, TileGrid,
    TileMap, TileProperties, TileState, TileType,
};

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Slot list of texture ids available to a level's tiles.
pub type LevelTextureSlots = ArrayVec<usize, { LevelState::MAX_TEXTURES }>;

/// Authoritative state of one level slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub cyberspace: bool,
    /// Height-map scale exponent, 0..=[`Self::MAX_HEIGHT_SHIFT`].
    pub height_shift: u8,
    pub ceiling_has_radiation: bool,
    pub ceiling_effect_level: u8,
    pub floor_has_biohazard: bool,
    pub floor_effect_level: u8,
    pub tiles: TileMap,
    pub texture_ids: LevelTextureSlots,
    pub texture_animations: [TextureAnimation; LevelState::ANIMATION_GROUPS],
    pub objects: BTreeMap<ObjectId, LevelObjectState>,
    next_object_id: u32,
    pub surveillance: [SurveillanceObject; LevelState::SURVEILLANCE_SLOTS],
}

impl LevelState {
    /// Side length of the square tile grid.
    pub const GRID_SIZE: u32 = 64;
    /// Texture slots available to a level.
    pub const MAX_TEXTURES: usize = 54;
    /// Texture animation groups per level.
    pub const ANIMATION_GROUPS: usize = 4;
    /// Surveillance link slots per level.
    pub const SURVEILLANCE_SLOTS: usize = 8;
    pub const MAX_HEIGHT_SHIFT: u8 = 7;

    pub fn new() -> Self {
        Self {
            cyberspace: false,
            height_shift: 3,
            ceiling_has_radiation: false,
            ceiling_effect_level: 0,
            floor_has_biohazard: false,
            floor_effect_level: 0,
            tiles: TileMap::default(),
            texture_ids: LevelTextureSlots::new(),
            texture_animations: [TextureAnimation::default(); Self::ANIMATION_GROUPS],
            objects: BTreeMap::new(),
            next_object_id: 1,
            surveillance: [SurveillanceObject::default(); Self::SURVEILLANCE_SLOTS],
        }
    }

    /// Applies a level-properties patch; `height_shift` clamps to its range.
    pub fn apply_properties(&mut self, patch: &LevelProperties) {
        if let Some(cyberspace) = patch.cyberspace {
            self.cyberspace = cyberspace;
        }
        if let Some(height_shift) = patch.height_shift {
            self.height_shift = height_shift.min(Self::MAX_HEIGHT_SHIFT);
        }
        if let Some(ceiling_has_radiation) = patch.ceiling_has_radiation {
            self.ceiling_has_radiation = ceiling_has_radiation;
        }
        if let Some(ceiling_effect_level) = patch.ceiling_effect_level {
            self.ceiling_effect_level = ceiling_effect_level;
        }
        if let Some(floor_has_biohazard) = patch.floor_has_biohazard {
            self.floor_has_biohazard = floor_has_biohazard;
        }
        if let Some(floor_effect_level) = patch.floor_effect_level {
            self.floor_effect_level = floor_effect_level;
        }
    }

    /// Full level-properties snapshot, as echoed by mutations.
    pub fn properties(&self) -> LevelProperties {
        LevelProperties {
            cyberspace: Some(self.cyberspace),
            height_shift: Some(self.height_shift),
            ceiling_has_radiation: Some(self.ceiling_has_radiation),
            ceiling_effect_level: Some(self.ceiling_effect_level),
            floor_has_biohazard: Some(self.floor_has_biohazard),
            floor_effect_level: Some(self.floor_effect_level),
        }
    }

    /// Replaces the texture slot list whole, truncating to
    /// [`Self::MAX_TEXTURES`]; returns the stored list.
    pub fn replace_texture_ids(&mut self, ids: Vec<usize>) -> Vec<usize> {
        self.texture_ids.clear();
        self.texture_ids
            .extend(ids.into_iter().take(Self::MAX_TEXTURES));
        self.texture_id_list()
    }

    pub fn texture_id_list(&self) -> Vec<usize> {
        self.texture_ids.iter().copied().collect()
    }

    /// Places an object under a freshly assigned id. Ids are never reused,
    /// removal leaves a permanent gap.
    pub fn add_object(&mut self, state: LevelObjectState) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        self.objects.insert(id, state);
        id
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<LevelObjectState> {
        self.objects.remove(&id)
    }

    /// Read views of all placed objects, ascending by id.
    pub fn object_views(&self) -> Vec<LevelObject> {
        self.objects
            .iter()
            .map(|(id, state)| state.view(*id))
            .collect()
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update of level-wide properties; `None` leaves a field unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProperties {
    pub cyberspace: Option<bool>,
    pub height_shift: Option<u8>,
    pub ceiling_has_radiation: Option<bool>,
    pub ceiling_effect_level: Option<u8>,
    pub floor_has_biohazard: Option<bool>,
    pub floor_effect_level: Option<u8>,
}
