//! Shared validation errors for the patch-apply and parse paths.
//!
//! Domain rules live next to the types they guard; the error types here are
//! shared because several entity families reject patches for the same
//! reasons. A rejected patch is never partially applied.

use crate::level::TileType;

/// Why a partial update was rejected. Nothing is applied on failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("slope height requires a sloped tile type, got {tile_type}")]
    SlopeOnFlatTile { tile_type: TileType },

    #[error("texture slot {index} is outside the level texture table ({limit} slots)")]
    TextureSlotOutOfRange { index: usize, limit: usize },

    #[error("position ({x}, {y}) is outside the tile grid")]
    PositionOutsideGrid { x: u8, y: u8 },

    #[error("pixel buffer of {actual} bytes does not match {width}x{height} dimensions")]
    MalformedBitmap { width: u16, height: u16, actual: usize },

    #[error("palette must carry exactly {expected} colors, got {actual}")]
    MalformedPalette { expected: usize, actual: usize },
}

/// Failure to parse a canonical identifier string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {value:?} as {expected}")]
pub struct KeyParseError {
    pub value: String,
    pub expected: &'static str,
}

impl KeyParseError {
    pub fn new(value: &str, expected: &'static str) -> Self {
        Self {
            value: value.to_string(),
            expected,
        }
    }
}
