use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::level::LevelState;

/// Tile shapes of the level grid.
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
pub enum TileType {
    #[default]
    Solid,
    Open,
    DiagonalOpenSouthEast,
    DiagonalOpenSouthWest,
    DiagonalOpenNorthWest,
    DiagonalOpenNorthEast,
    SlopeSouthToNorth,
    SlopeWestToEast,
    SlopeNorthToSouth,
    SlopeEastToWest,
    ValleySouthEastToNorthWest,
    ValleySouthWestToNorthEast,
    ValleyNorthWestToSouthEast,
    ValleyNorthEastToSouthWest,
    RidgeNorthWestToSouthEast,
    RidgeNorthEastToSouthWest,
    RidgeSouthEastToNorthWest,
    RidgeSouthWestToNorthEast,
}

impl TileType {
    /// True for shapes whose floor or ceiling runs at an angle.
    pub const fn has_slope(self) -> bool {
        !matches!(
            self,
            Self::Solid
                | Self::Open
                | Self::DiagonalOpenSouthEast
                | Self::DiagonalOpenSouthWest
                | Self::DiagonalOpenNorthWest
                | Self::DiagonalOpenNorthEast
        )
    }

    /// True for every shape except fully solid rock.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Solid)
    }
}

/// Vertical measure in level height units, 0..=31.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HeightUnit(pub u8);

impl HeightUnit {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(31);

    /// Clamps an arbitrary value into the valid range.
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Wall heights a viewer inside a tile sees toward each neighbor.
///
/// Derived from the grid on every read, never stored. Rows grow northward:
/// north is `y + 1`, east is `x + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedWallHeights {
    pub north: HeightUnit,
    pub east: HeightUnit,
    pub south: HeightUnit,
    pub west: HeightUnit,
}

/// Textures and rotations applied to a tile in real-world levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealWorldTileState {
    /// Index into the level texture slot list.
    pub floor_texture: usize,
    pub ceiling_texture: usize,
    pub wall_texture: usize,
    /// Quarter turns, 0..=3.
    pub floor_texture_rotations: u8,
    pub ceiling_texture_rotations: u8,
}

impl RealWorldTileState {
    fn apply(&mut self, patch: &RealWorldTileProperties) {
        if let Some(floor_texture) = patch.floor_texture {
            self.floor_texture = floor_texture;
        }
        if let Some(ceiling_texture) = patch.ceiling_texture {
            self.ceiling_texture = ceiling_texture;
        }
        if let Some(wall_texture) = patch.wall_texture {
            self.wall_texture = wall_texture;
        }
        if let Some(rotations) = patch.floor_texture_rotations {
            self.floor_texture_rotations = rotations % 4;
        }
        if let Some(rotations) = patch.ceiling_texture_rotations {
            self.ceiling_texture_rotations = rotations % 4;
        }
    }

    fn properties(&self) -> RealWorldTileProperties {
        RealWorldTileProperties {
            floor_texture: Some(self.floor_texture),
            ceiling_texture: Some(self.ceiling_texture),
            wall_texture: Some(self.wall_texture),
            floor_texture_rotations: Some(self.floor_texture_rotations),
            ceiling_texture_rotations: Some(self.ceiling_texture_rotations),
        }
    }
}

/// Partial update of a tile's real-world texturing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealWorldTileProperties {
    pub floor_texture: Option<usize>,
    pub ceiling_texture: Option<usize>,
    pub wall_texture: Option<usize>,
    pub floor_texture_rotations: Option<u8>,
    pub ceiling_texture_rotations: Option<u8>,
}

impl RealWorldTileProperties {
    fn validate(&self) -> Result<(), PatchError> {
        for index in [self.floor_texture, self.ceiling_texture, self.wall_texture]
            .into_iter()
            .flatten()
        {
            if index >= LevelState::MAX_TEXTURES {
                return Err(PatchError::TextureSlotOutOfRange {
                    index,
                    limit: LevelState::MAX_TEXTURES,
                });
            }
        }
        Ok(())
    }
}

/// Authoritative state of one grid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub tile_type: TileType,
    pub floor_height: HeightUnit,
    pub ceiling_height: HeightUnit,
    pub slope_height: HeightUnit,
    pub real_world: RealWorldTileState,
}

impl TileState {
    /// Applies a partial update, validating first so nothing lands on error.
    ///
    /// Heights clamp into 0..=31; a nonzero slope on a shape without slopes
    /// rejects the whole patch. A supplied `calculated_wall_heights` is
    /// ignored, the field is derived.
    pub fn apply(&mut self, patch: &TileProperties) -> Result<(), PatchError> {
        let next_type = patch.tile_type.unwrap_or(self.tile_type);
        let next_slope = patch.slope_height.unwrap_or(self.slope_height);
        if !next_slope.is_zero() && !next_type.has_slope() {
            return Err(PatchError::SlopeOnFlatTile {
                tile_type: next_type,
            });
        }
        if let Some(real_world) = &patch.real_world {
            real_world.validate()?;
        }

        if let Some(tile_type) = patch.tile_type {
            self.tile_type = tile_type;
        }
        if let Some(height) = patch.floor_height {
            self.floor_height = HeightUnit::clamped(height.0);
        }
        if let Some(height) = patch.ceiling_height {
            self.ceiling_height = HeightUnit::clamped(height.0);
        }
        if let Some(height) = patch.slope_height {
            self.slope_height = HeightUnit::clamped(height.0);
        }
        if let Some(real_world) = &patch.real_world {
            self.real_world.apply(real_world);
        }
        Ok(())
    }

    /// Full properties snapshot with the supplied derived wall heights.
    pub fn properties(&self, walls: CalculatedWallHeights) -> TileProperties {
        TileProperties {
            tile_type: Some(self.tile_type),
            floor_height: Some(self.floor_height),
            ceiling_height: Some(self.ceiling_height),
            slope_height: Some(self.slope_height),
            calculated_wall_heights: Some(walls),
            real_world: Some(self.real_world.properties()),
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self {
            tile_type: TileType::default(),
            floor_height: HeightUnit::ZERO,
            ceiling_height: HeightUnit::MAX,
            slope_height: HeightUnit::ZERO,
            real_world: RealWorldTileState::default(),
        }
    }
}

/// Partial tile update and full echo form; `None` leaves a field unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProperties {
    pub tile_type: Option<TileType>,
    pub floor_height: Option<HeightUnit>,
    pub ceiling_height: Option<HeightUnit>,
    pub slope_height: Option<HeightUnit>,
    /// Derived on read; ignored when supplied in a patch.
    pub calculated_wall_heights: Option<CalculatedWallHeights>,
    pub real_world: Option<RealWorldTileProperties>,
}

/// Fixed-size tile grid of one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileState>,
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileState::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn tile(&self, x: u32, y: u32) -> Option<&TileState> {
        let index = self.index_of(x, y)?;
        self.tiles.get(index)
    }

    pub fn tile_mut(&mut self, x: u32, y: u32) -> Option<&mut TileState> {
        let index = self.index_of(x, y)?;
        self.tiles.get_mut(index)
    }

    /// Wall heights seen from `(x, y)`, derived from the current grid.
    ///
    /// Solid tiles have no interior, so every wall reads zero. Toward a
    /// solid or off-grid neighbor the wall spans the tile's own opening;
    /// toward an open neighbor it is the visible floor step.
    pub fn wall_heights(&self, x: u32, y: u32) -> Option<CalculatedWallHeights> {
        let tile = self.tile(x, y)?;
        if !tile.tile_type.is_open() {
            return Some(CalculatedWallHeights::default());
        }
        let north = y.checked_add(1).and_then(|ny| self.tile(x, ny));
        let east = x.checked_add(1).and_then(|nx| self.tile(nx, y));
        let south = y.checked_sub(1).and_then(|ny| self.tile(x, ny));
        let west = x.checked_sub(1).and_then(|nx| self.tile(nx, y));
        Some(CalculatedWallHeights {
            north: Self::wall_toward(tile, north),
            east: Self::wall_toward(tile, east),
            south: Self::wall_toward(tile, south),
            west: Self::wall_toward(tile, west),
        })
    }

    fn wall_toward(tile: &TileState, neighbor: Option<&TileState>) -> HeightUnit {
        match neighbor {
            Some(other) if other.tile_type.is_open() => {
                HeightUnit::clamped(other.floor_height.0.saturating_sub(tile.floor_height.0))
            }
            _ => HeightUnit::clamped(tile.ceiling_height.0.saturating_sub(tile.floor_height.0)),
        }
    }

    /// Properties snapshot of one tile including derived wall heights.
    pub fn properties_at(&self, x: u32, y: u32) -> Option<TileProperties> {
        let tile = self.tile(x, y)?;
        let walls = self.wall_heights(x, y)?;
        Some(tile.properties(walls))
    }

    /// Full-grid snapshot, rows from `y = 0` upward.
    pub fn grid(&self) -> TileGrid {
        let mut rows = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let mut row = Vec::with_capacity(self.width as usize);
            for x in 0..self.width {
                if let Some(properties) = self.properties_at(x, y) {
                    row.push(properties);
                }
            }
            rows.push(row);
        }
        TileGrid {
            width: self.width,
            height: self.height,
            rows,
        }
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(LevelState::GRID_SIZE, LevelState::GRID_SIZE)
    }
}

/// Immutable snapshot of every tile's properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<TileProperties>>,
}

impl TileGrid {
    pub fn tile(&self, x: u32, y: u32) -> Option<&TileProperties> {
        self.rows.get(y as usize)?.get(x as usize)
    }
}
