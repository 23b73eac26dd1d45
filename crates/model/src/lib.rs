//! Canonical data model for hierarchical game-asset projects.
//!
//! `asset-model` defines resource addressing (typed keys and the capacity
//! catalog), media payloads, and the project/archive/level entity families
//! together with their partial-update semantics. Everything here is plain
//! data with synchronous logic; the asynchronous access layer lives in
//! `asset-store` and depends on the types re-exported here.
pub mod error;
pub mod level;
pub mod media;
pub mod project;
pub mod resource;

pub use error::{KeyParseError, PatchError};
pub use level::{
    AnimationLoopKind, CalculatedWallHeights, HackingData, HeightUnit, LevelObject,
    LevelObjectProperties, LevelObjectState, LevelObjectTemplate, LevelProperties, LevelState,
    LevelTextureSlots, ObjectId, RealWorldTileProperties, RealWorldTileState, SurveillanceObject,
    TextureAnimation, TextureAnimationProperties, TileGrid, TileMap, TileProperties, TileState,
    TileType,
};
pub use media::{AudioClip, Color, Font, Language, Palette, RawBitmap, TextureSize};
pub use project::{
    ArchiveState, ElectronicMessageProperties, ElectronicMessageState, ElectronicMessageType,
    GameObject, GameObjectProperties, GameObjectState, ObjectTriple, ProjectState, Texture,
    TextureProperties, TextureState, TransparencyControl,
};
pub use resource::{ResourceCatalog, ResourceKey, ResourceType};
