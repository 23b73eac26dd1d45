use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;

/// Class of a keyed resource cluster.
///
/// The value space is open: projects may carry clusters of types this crate
/// has no constant for, and those round-trip untouched.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ResourceType(pub u16);

impl ResourceType {
    /// Image chips shown on multi-function displays.
    pub const MFD_DATA_IMAGES: Self = Self(0x0028);
    /// Fixed-layout paper sheet texts.
    pub const PAPER_TEXTS: Self = Self(0x003C);
    /// Messages shown when a trap triggers.
    pub const TRAP_MESSAGES: Self = Self(0x0867);
    /// Interface word dictionary.
    pub const WORDS: Self = Self(0x0868);
    /// Audio log category names.
    pub const LOG_CATEGORIES: Self = Self(0x0870);
    /// Short on-screen status messages.
    pub const SCREEN_MESSAGES: Self = Self(0x0877);
    /// Access card names, two strings per card.
    pub const ACCESS_CARD_NAMES: Self = Self(0x0879);
    /// Datalet message texts.
    pub const DATALET_MESSAGES: Self = Self(0x087A);
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Address of one entry within a typed resource cluster.
///
/// Keys pack into a single `u32` as `(type << 16) | index`, the form used in
/// archive directories. The canonical text form is `0x%04X:%03d`, e.g.
/// `0x0868:007`; it is used for logging and as the persisted map key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct ResourceKey {
    pub resource_type: ResourceType,
    pub index: u16,
}

impl ResourceKey {
    pub const fn new(resource_type: ResourceType, index: u16) -> Self {
        Self {
            resource_type,
            index,
        }
    }

    /// Unpacks a key from its 32-bit directory form.
    pub const fn from_int(value: u32) -> Self {
        Self {
            resource_type: ResourceType((value >> 16) as u16),
            index: value as u16,
        }
    }

    /// Packs the key into its 32-bit directory form.
    pub const fn to_int(self) -> u32 {
        ((self.resource_type.0 as u32) << 16) | self.index as u32
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:03}", self.resource_type, self.index)
    }
}

impl FromStr for ResourceKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeyParseError::new(s, "0xTTTT:III");
        let (type_part, index_part) = s.split_once(':').ok_or_else(err)?;
        let hex = type_part
            .strip_prefix("0x")
            .or_else(|| type_part.strip_prefix("0X"))
            .ok_or_else(err)?;
        let resource_type = u16::from_str_radix(hex, 16).map_err(|_| err())?;
        let index = index_part.parse::<u16>().map_err(|_| err())?;
        Ok(Self {
            resource_type: ResourceType(resource_type),
            index,
        })
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
