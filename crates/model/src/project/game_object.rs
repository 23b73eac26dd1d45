use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;
use crate::media::RawBitmap;

/// Identity of a game-object template: class, subclass, type.
///
/// The canonical text form is `"c/s/t"`, also used as the persisted map key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct ObjectTriple {
    pub class: u8,
    pub subclass: u8,
    pub object_type: u8,
}

impl ObjectTriple {
    pub const fn new(class: u8, subclass: u8, object_type: u8) -> Self {
        Self {
            class,
            subclass,
            object_type,
        }
    }
}

impl fmt::Display for ObjectTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.class, self.subclass, self.object_type)
    }
}

impl FromStr for ObjectTriple {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeyParseError::new(s, "c/s/t");
        let mut parts = s.split('/');
        let class = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let subclass = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let object_type = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            class,
            subclass,
            object_type,
        })
    }
}

impl From<ObjectTriple> for String {
    fn from(triple: ObjectTriple) -> Self {
        triple.to_string()
    }
}

impl TryFrom<String> for ObjectTriple {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Authoritative template data for one game object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectState {
    pub short_name: String,
    pub long_name: String,
    pub mass: i32,
    pub default_hitpoints: u16,
    pub armor: u8,
    pub icon: Option<RawBitmap>,
}

impl GameObjectState {
    /// Applies a partial update; present fields overwrite, absent fields stay.
    pub fn apply(&mut self, patch: &GameObjectProperties) {
        if let Some(short_name) = &patch.short_name {
            self.short_name = short_name.clone();
        }
        if let Some(long_name) = &patch.long_name {
            self.long_name = long_name.clone();
        }
        if let Some(mass) = patch.mass {
            self.mass = mass;
        }
        if let Some(default_hitpoints) = patch.default_hitpoints {
            self.default_hitpoints = default_hitpoints;
        }
        if let Some(armor) = patch.armor {
            self.armor = armor;
        }
    }

    /// Full properties snapshot, as echoed by mutations.
    pub fn properties(&self) -> GameObjectProperties {
        GameObjectProperties {
            short_name: Some(self.short_name.clone()),
            long_name: Some(self.long_name.clone()),
            mass: Some(self.mass),
            default_hitpoints: Some(self.default_hitpoints),
            armor: Some(self.armor),
        }
    }
}

/// Partial game-object update; `None` leaves a field unchanged.
///
/// The icon travels through its own bitmap operations, not through here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectProperties {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub mass: Option<i32>,
    pub default_hitpoints: Option<u16>,
    pub armor: Option<u8>,
}

/// Game-object read view: identity plus current properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub triple: ObjectTriple,
    pub properties: GameObjectProperties,
}
