use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::level::LevelState;
use crate::project::ObjectTriple;

/// Identifier of an object placed in a level.
///
/// Ids are assigned by the store starting at 1 and are never reused within
/// a level; 0 is the reserved null link.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Null link used by slots that point at no object.
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque per-object payloads from the class tables.
///
/// Contents are preserved verbatim and never interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackingData {
    pub unknown_0013: Vec<i32>,
    pub unknown_0015: Vec<i32>,
    pub unknown_0017: Vec<i32>,
}

/// Authoritative state of one placed level object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelObjectState {
    pub triple: ObjectTriple,
    /// Grid coordinates, 0..[`LevelState::GRID_SIZE`].
    pub tile_x: u8,
    pub tile_y: u8,
    /// Position within the tile, 128 is the center.
    pub fine_x: u8,
    pub fine_y: u8,
    pub z: u8,
    pub rotation_x: u8,
    pub rotation_y: u8,
    pub rotation_z: u8,
    pub hitpoints: u16,
    pub hacking: HackingData,
}

impl LevelObjectState {
    pub fn from_template(template: &LevelObjectTemplate, hitpoints: u16) -> Self {
        Self {
            triple: template.triple,
            tile_x: template.tile_x,
            tile_y: template.tile_y,
            fine_x: template.fine_x,
            fine_y: template.fine_y,
            z: template.z,
            hitpoints,
            ..Self::default()
        }
    }

    /// Applies a partial update, validating first so nothing lands on error.
    ///
    /// A present `hacking` block replaces the stored one whole.
    pub fn apply(&mut self, patch: &LevelObjectProperties) -> Result<(), PatchError> {
        let next_x = patch.tile_x.unwrap_or(self.tile_x);
        let next_y = patch.tile_y.unwrap_or(self.tile_y);
        ensure_on_grid(next_x, next_y)?;

        if let Some(tile_x) = patch.tile_x {
            self.tile_x = tile_x;
        }
        if let Some(tile_y) = patch.tile_y {
            self.tile_y = tile_y;
        }
        if let Some(fine_x) = patch.fine_x {
            self.fine_x = fine_x;
        }
        if let Some(fine_y) = patch.fine_y {
            self.fine_y = fine_y;
        }
        if let Some(z) = patch.z {
            self.z = z;
        }
        if let Some(rotation_x) = patch.rotation_x {
            self.rotation_x = rotation_x;
        }
        if let Some(rotation_y) = patch.rotation_y {
            self.rotation_y = rotation_y;
        }
        if let Some(rotation_z) = patch.rotation_z {
            self.rotation_z = rotation_z;
        }
        if let Some(hitpoints) = patch.hitpoints {
            self.hitpoints = hitpoints;
        }
        if let Some(hacking) = &patch.hacking {
            self.hacking = hacking.clone();
        }
        Ok(())
    }

    /// Full properties snapshot, as echoed by mutations.
    pub fn properties(&self) -> LevelObjectProperties {
        LevelObjectProperties {
            tile_x: Some(self.tile_x),
            tile_y: Some(self.tile_y),
            fine_x: Some(self.fine_x),
            fine_y: Some(self.fine_y),
            z: Some(self.z),
            rotation_x: Some(self.rotation_x),
            rotation_y: Some(self.rotation_y),
            rotation_z: Some(self.rotation_z),
            hitpoints: Some(self.hitpoints),
            hacking: Some(self.hacking.clone()),
        }
    }

    /// Read view with the placed id attached.
    pub fn view(&self, id: ObjectId) -> LevelObject {
        LevelObject {
            id,
            triple: self.triple,
            properties: self.properties(),
        }
    }
}

/// Partial update for a placed object; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelObjectProperties {
    pub tile_x: Option<u8>,
    pub tile_y: Option<u8>,
    pub fine_x: Option<u8>,
    pub fine_y: Option<u8>,
    pub z: Option<u8>,
    pub rotation_x: Option<u8>,
    pub rotation_y: Option<u8>,
    pub rotation_z: Option<u8>,
    pub hitpoints: Option<u16>,
    /// Present replaces the whole opaque block.
    pub hacking: Option<HackingData>,
}

/// Placement request for a new level object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelObjectTemplate {
    pub triple: ObjectTriple,
    pub tile_x: u8,
    pub tile_y: u8,
    pub fine_x: u8,
    pub fine_y: u8,
    pub z: u8,
}

impl LevelObjectTemplate {
    pub fn at(triple: ObjectTriple, tile_x: u8, tile_y: u8) -> Self {
        Self {
            triple,
            tile_x,
            tile_y,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PatchError> {
        ensure_on_grid(self.tile_x, self.tile_y)
    }
}

impl Default for LevelObjectTemplate {
    fn default() -> Self {
        Self {
            triple: ObjectTriple::default(),
            tile_x: 0,
            tile_y: 0,
            fine_x: 128,
            fine_y: 128,
            z: 0,
        }
    }
}

/// Read view of a placed object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelObject {
    pub id: ObjectId,
    pub triple: ObjectTriple,
    pub properties: LevelObjectProperties,
}

fn ensure_on_grid(x: u8, y: u8) -> Result<(), PatchError> {
    let side = LevelState::GRID_SIZE as u8;
    if x >= side || y >= side {
        return Err(PatchError::PositionOutsideGrid { x, y });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_center_fine_coordinates() {
        let template = LevelObjectTemplate::at(ObjectTriple::new(0, 2, 8), 30, 22);
        assert_eq!(template.fine_x, 128);
        assert_eq!(template.fine_y, 128);
        assert!(template.validate().is_ok());
        assert!(
            LevelObjectTemplate::at(ObjectTriple::default(), 64, 0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn patch_moves_are_validated_against_the_grid() {
        let template = LevelObjectTemplate::at(ObjectTriple::new(0, 2, 8), 30, 22);
        let mut state = LevelObjectState::from_template(&template, 25);

        let err = state
            .apply(&LevelObjectProperties {
                tile_x: Some(200),
                hitpoints: Some(5),
                ..LevelObjectProperties::default()
            })
            .unwrap_err();
        assert!(matches!(err, PatchError::PositionOutsideGrid { .. }));
        assert_eq!(state.hitpoints, 25);

        state
            .apply(&LevelObjectProperties {
                tile_x: Some(31),
                ..LevelObjectProperties::default()
            })
            .unwrap();
        assert_eq!(state.tile_x, 31);
        assert_eq!(state.tile_y, 22);
    }

    #[test]
    fn present_hacking_block_replaces_whole() {
        let mut state = LevelObjectState::default();
        state.hacking.unknown_0013 = vec![1, 2, 3];

        state
            .apply(&LevelObjectProperties {
                hacking: Some(HackingData {
                    unknown_0015: vec![9],
                    ..HackingData::default()
                }),
                ..LevelObjectProperties::default()
            })
            .unwrap();

        assert!(state.hacking.unknown_0013.is_empty());
        assert_eq!(state.hacking.unknown_0015, vec![9]);
    }

    #[test]
    fn view_carries_id_triple_and_full_properties() {
        let template = LevelObjectTemplate::at(ObjectTriple::new(6, 0, 1), 10, 12);
        let state = LevelObjectState::from_template(&template, 40);
        let view = state.view(ObjectId(7));

        assert_eq!(view.id, ObjectId(7));
        assert_eq!(view.triple, ObjectTriple::new(6, 0, 1));
        assert_eq!(view.properties.tile_x, Some(10));
        assert_eq!(view.properties.hitpoints, Some(40));
    }
}
