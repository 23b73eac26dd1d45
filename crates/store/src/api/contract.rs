//! The asynchronous data-access contract.
//!
//! Every operation resolves exactly once, success or failure. Requests that
//! target the same resource address apply in a total order and each one
//! observes the effects of previously completed requests to that address;
//! nothing is promised across distinct addresses. Failures are opaque:
//! causes are logged store-side, callers only ever see [`RequestFailed`].
//!
//! [`RequestFailed`]: super::errors::RequestFailed

use async_trait::async_trait;

use asset_model::{
    AudioClip, ElectronicMessageProperties, ElectronicMessageType, Font, GameObject,
    GameObjectProperties, Language, LevelObject, LevelObjectProperties, LevelObjectTemplate,
    LevelProperties, ObjectId, ObjectTriple, Palette, RawBitmap, ResourceKey, SurveillanceObject,
    Texture, TextureAnimation, TextureAnimationProperties, TextureProperties, TextureSize,
    TileGrid, TileProperties,
};

use super::errors::Result;

/// Access to hierarchical game-asset projects.
///
/// Mutating operations (`set_*`, `add_*`) materialize missing archives and
/// level slots on demand; queries never do. Collection queries on absent
/// containers succeed with empty results, single-resource queries on absent
/// resources fail. Every `set_*` echoes the full resulting state of the
/// patched entity, not the input patch.
#[async_trait]
pub trait DataStore: Send + Sync {
    // --- projects ---

    /// All known project ids: loaded projects plus repository entries,
    /// sorted and deduplicated.
    async fn projects(&self) -> Result<Vec<String>>;

    /// Creates an empty in-memory project. Fails on duplicate or malformed
    /// ids. Nothing is persisted until [`Self::save_project`].
    async fn new_project(&self, project_id: &str) -> Result<()>;

    /// Fire-and-forget persistence: snapshots the project and enqueues it
    /// for the save worker. No completion signal; the queue drains before
    /// shutdown returns.
    async fn save_project(&self, project_id: &str);

    // --- project-scoped resources ---

    async fn font(&self, project_id: &str, font_id: usize) -> Result<Font>;

    async fn palette(&self, project_id: &str, palette_id: &str) -> Result<Palette>;

    async fn text(&self, project_id: &str, key: ResourceKey) -> Result<String>;

    /// Capacity-checked upsert of a keyed text; echoes the stored string.
    async fn set_text(&self, project_id: &str, key: ResourceKey, text: String) -> Result<String>;

    async fn bitmap(&self, project_id: &str, key: ResourceKey) -> Result<RawBitmap>;

    /// Capacity- and well-formedness-checked upsert of a keyed bitmap.
    async fn set_bitmap(
        &self,
        project_id: &str,
        key: ResourceKey,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap>;

    async fn audio(&self, project_id: &str, key: ResourceKey) -> Result<AudioClip>;

    async fn set_audio(
        &self,
        project_id: &str,
        key: ResourceKey,
        clip: AudioClip,
    ) -> Result<AudioClip>;

    // --- game objects ---

    /// All game-object templates, ordered by triple.
    async fn game_objects(&self, project_id: &str) -> Result<Vec<GameObject>>;

    async fn set_game_object(
        &self,
        project_id: &str,
        triple: ObjectTriple,
        properties: GameObjectProperties,
    ) -> Result<GameObjectProperties>;

    async fn game_object_bitmap(
        &self,
        project_id: &str,
        triple: ObjectTriple,
    ) -> Result<RawBitmap>;

    async fn set_game_object_bitmap(
        &self,
        project_id: &str,
        triple: ObjectTriple,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap>;

    // --- electronic messages ---

    async fn electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<ElectronicMessageProperties>;

    async fn set_electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        properties: ElectronicMessageProperties,
    ) -> Result<ElectronicMessageProperties>;

    /// Removes an existing message; queries for it fail afterwards.
    async fn remove_electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<()>;

    async fn electronic_message_audio(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
    ) -> Result<AudioClip>;

    async fn set_electronic_message_audio(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
        clip: AudioClip,
    ) -> Result<AudioClip>;

    // --- textures ---

    /// All textures with their stored sizes, ordered by id.
    async fn textures(&self, project_id: &str) -> Result<Vec<Texture>>;

    async fn set_texture_properties(
        &self,
        project_id: &str,
        texture_id: usize,
        properties: TextureProperties,
    ) -> Result<TextureProperties>;

    async fn texture_bitmap(
        &self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
    ) -> Result<RawBitmap>;

    async fn set_texture_bitmap(
        &self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap>;

    // --- levels ---

    /// Ascending ids of the materialized level slots; empty for unknown
    /// archives.
    async fn levels(&self, project_id: &str, archive_id: &str) -> Result<Vec<usize>>;

    async fn level_properties(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<LevelProperties>;

    async fn set_level_properties(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        properties: LevelProperties,
    ) -> Result<LevelProperties>;

    async fn level_textures(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<usize>>;

    /// Atomic whole-list replacement of the level texture slots, silently
    /// truncated to the slot capacity; echoes the stored list.
    async fn set_level_textures(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        texture_ids: Vec<usize>,
    ) -> Result<Vec<usize>>;

    async fn level_texture_animations(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<TextureAnimation>>;

    async fn set_level_texture_animation(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        group: usize,
        properties: TextureAnimationProperties,
    ) -> Result<TextureAnimation>;

    // --- tiles ---

    /// Snapshot of the whole tile grid, derived wall heights included.
    async fn tiles(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<TileGrid>;

    async fn tile(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
    ) -> Result<TileProperties>;

    async fn set_tile(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
        properties: TileProperties,
    ) -> Result<TileProperties>;

    // --- level objects ---

    /// All placed objects, ascending by id.
    async fn level_objects(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<LevelObject>>;

    /// Places a new object; the store assigns an id starting at 1, never
    /// reused within the level.
    async fn add_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        template: LevelObjectTemplate,
    ) -> Result<LevelObject>;

    async fn remove_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
    ) -> Result<()>;

    async fn set_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
        properties: LevelObjectProperties,
    ) -> Result<LevelObjectProperties>;

    // --- surveillance ---

    async fn level_surveillance_objects(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<SurveillanceObject>>;

    /// Sets one surveillance slot; echoes all slots.
    async fn set_level_surveillance_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        index: usize,
        surveillance: SurveillanceObject,
    ) -> Result<Vec<SurveillanceObject>>;
}
