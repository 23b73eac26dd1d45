//! Cloneable facade for issuing requests to the store.
//!
//! [`StoreHandle`] hides the channel plumbing: each call builds a command
//! with a oneshot reply, sends it to the store worker, and awaits the
//! answer. A handle whose store is gone answers every request with
//! [`RequestFailed`] instead of hanging.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use asset_model::{
    AudioClip, ElectronicMessageProperties, ElectronicMessageType, Font, GameObject,
    GameObjectProperties, Language, LevelObject, LevelObjectProperties, LevelObjectTemplate,
    LevelProperties, ObjectId, ObjectTriple, Palette, RawBitmap, ResourceKey, SurveillanceObject,
    Texture, TextureAnimation, TextureAnimationProperties, TextureProperties, TextureSize,
    TileGrid, TileProperties,
};

use super::contract::DataStore;
use super::errors::{RequestFailed, Result};
use crate::workers::Command;

/// Client-facing handle to interact with the store.
#[derive(Clone)]
pub struct StoreHandle {
    command_tx: mpsc::Sender<Command>,
}

impl StoreHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    /// Sends one command and awaits its reply.
    ///
    /// A closed command channel or a dropped reply both mean the store went
    /// away; either way the request resolves once, with the opaque failure.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        if self.command_tx.send(make(reply_tx)).await.is_err() {
            debug!(target: "asset_store::handle", "command channel closed, store is gone");
            return Err(RequestFailed);
        }

        match reply_rx.await {
            Ok(result) => result,
            Err(_) => {
                debug!(target: "asset_store::handle", "reply dropped before resolution");
                Err(RequestFailed)
            }
        }
    }
}

#[async_trait]
impl DataStore for StoreHandle {
    async fn projects(&self) -> Result<Vec<String>> {
        self.request(|reply| Command::Projects { reply }).await
    }

    async fn new_project(&self, project_id: &str) -> Result<()> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::NewProject { project_id, reply })
            .await
    }

    async fn save_project(&self, project_id: &str) {
        let command = Command::SaveProject {
            project_id: project_id.to_string(),
        };
        if self.command_tx.send(command).await.is_err() {
            warn!(
                target: "asset_store::handle",
                project_id,
                "command channel closed, dropping save request"
            );
        }
    }

    async fn font(&self, project_id: &str, font_id: usize) -> Result<Font> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::Font {
            project_id,
            font_id,
            reply,
        })
        .await
    }

    async fn palette(&self, project_id: &str, palette_id: &str) -> Result<Palette> {
        let project_id = project_id.to_string();
        let palette_id = palette_id.to_string();
        self.request(|reply| Command::Palette {
            project_id,
            palette_id,
            reply,
        })
        .await
    }

    async fn text(&self, project_id: &str, key: ResourceKey) -> Result<String> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::Text {
            project_id,
            key,
            reply,
        })
        .await
    }

    async fn set_text(&self, project_id: &str, key: ResourceKey, text: String) -> Result<String> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetText {
            project_id,
            key,
            text,
            reply,
        })
        .await
    }

    async fn bitmap(&self, project_id: &str, key: ResourceKey) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::Bitmap {
            project_id,
            key,
            reply,
        })
        .await
    }

    async fn set_bitmap(
        &self,
        project_id: &str,
        key: ResourceKey,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetBitmap {
            project_id,
            key,
            bitmap,
            reply,
        })
        .await
    }

    async fn audio(&self, project_id: &str, key: ResourceKey) -> Result<AudioClip> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::Audio {
            project_id,
            key,
            reply,
        })
        .await
    }

    async fn set_audio(
        &self,
        project_id: &str,
        key: ResourceKey,
        clip: AudioClip,
    ) -> Result<AudioClip> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetAudio {
            project_id,
            key,
            clip,
            reply,
        })
        .await
    }

    async fn game_objects(&self, project_id: &str) -> Result<Vec<GameObject>> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::GameObjects { project_id, reply })
            .await
    }

    async fn set_game_object(
        &self,
        project_id: &str,
        triple: ObjectTriple,
        properties: GameObjectProperties,
    ) -> Result<GameObjectProperties> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetGameObject {
            project_id,
            triple,
            properties,
            reply,
        })
        .await
    }

    async fn game_object_bitmap(
        &self,
        project_id: &str,
        triple: ObjectTriple,
    ) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::GameObjectBitmap {
            project_id,
            triple,
            reply,
        })
        .await
    }

    async fn set_game_object_bitmap(
        &self,
        project_id: &str,
        triple: ObjectTriple,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetGameObjectBitmap {
            project_id,
            triple,
            bitmap,
            reply,
        })
        .await
    }

    async fn electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<ElectronicMessageProperties> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::ElectronicMessage {
            project_id,
            message_type,
            id,
            reply,
        })
        .await
    }

    async fn set_electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        properties: ElectronicMessageProperties,
    ) -> Result<ElectronicMessageProperties> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetElectronicMessage {
            project_id,
            message_type,
            id,
            properties,
            reply,
        })
        .await
    }

    async fn remove_electronic_message(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<()> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::RemoveElectronicMessage {
            project_id,
            message_type,
            id,
            reply,
        })
        .await
    }

    async fn electronic_message_audio(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
    ) -> Result<AudioClip> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::ElectronicMessageAudio {
            project_id,
            message_type,
            id,
            language,
            reply,
        })
        .await
    }

    async fn set_electronic_message_audio(
        &self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
        clip: AudioClip,
    ) -> Result<AudioClip> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetElectronicMessageAudio {
            project_id,
            message_type,
            id,
            language,
            clip,
            reply,
        })
        .await
    }

    async fn textures(&self, project_id: &str) -> Result<Vec<Texture>> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::Textures { project_id, reply })
            .await
    }

    async fn set_texture_properties(
        &self,
        project_id: &str,
        texture_id: usize,
        properties: TextureProperties,
    ) -> Result<TextureProperties> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetTextureProperties {
            project_id,
            texture_id,
            properties,
            reply,
        })
        .await
    }

    async fn texture_bitmap(
        &self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
    ) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::TextureBitmap {
            project_id,
            texture_id,
            size,
            reply,
        })
        .await
    }

    async fn set_texture_bitmap(
        &self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap> {
        let project_id = project_id.to_string();
        self.request(|reply| Command::SetTextureBitmap {
            project_id,
            texture_id,
            size,
            bitmap,
            reply,
        })
        .await
    }

    async fn levels(&self, project_id: &str, archive_id: &str) -> Result<Vec<usize>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::Levels {
            project_id,
            archive_id,
            reply,
        })
        .await
    }

    async fn level_properties(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<LevelProperties> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::LevelProperties {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn set_level_properties(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        properties: LevelProperties,
    ) -> Result<LevelProperties> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetLevelProperties {
            project_id,
            archive_id,
            level_id,
            properties,
            reply,
        })
        .await
    }

    async fn level_textures(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<usize>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::LevelTextures {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn set_level_textures(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        texture_ids: Vec<usize>,
    ) -> Result<Vec<usize>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetLevelTextures {
            project_id,
            archive_id,
            level_id,
            texture_ids,
            reply,
        })
        .await
    }

    async fn level_texture_animations(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<TextureAnimation>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::LevelTextureAnimations {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn set_level_texture_animation(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        group: usize,
        properties: TextureAnimationProperties,
    ) -> Result<TextureAnimation> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetLevelTextureAnimation {
            project_id,
            archive_id,
            level_id,
            group,
            properties,
            reply,
        })
        .await
    }

    async fn tiles(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<TileGrid> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::Tiles {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn tile(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
    ) -> Result<TileProperties> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::Tile {
            project_id,
            archive_id,
            level_id,
            x,
            y,
            reply,
        })
        .await
    }

    async fn set_tile(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
        properties: TileProperties,
    ) -> Result<TileProperties> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetTile {
            project_id,
            archive_id,
            level_id,
            x,
            y,
            properties,
            reply,
        })
        .await
    }

    async fn level_objects(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<LevelObject>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::LevelObjects {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn add_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        template: LevelObjectTemplate,
    ) -> Result<LevelObject> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::AddLevelObject {
            project_id,
            archive_id,
            level_id,
            template,
            reply,
        })
        .await
    }

    async fn remove_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
    ) -> Result<()> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::RemoveLevelObject {
            project_id,
            archive_id,
            level_id,
            object_id,
            reply,
        })
        .await
    }

    async fn set_level_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
        properties: LevelObjectProperties,
    ) -> Result<LevelObjectProperties> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetLevelObject {
            project_id,
            archive_id,
            level_id,
            object_id,
            properties,
            reply,
        })
        .await
    }

    async fn level_surveillance_objects(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<SurveillanceObject>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::LevelSurveillanceObjects {
            project_id,
            archive_id,
            level_id,
            reply,
        })
        .await
    }

    async fn set_level_surveillance_object(
        &self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        index: usize,
        surveillance: SurveillanceObject,
    ) -> Result<Vec<SurveillanceObject>> {
        let project_id = project_id.to_string();
        let archive_id = archive_id.to_string();
        self.request(|reply| Command::SetLevelSurveillanceObject {
            project_id,
            archive_id,
            level_id,
            index,
            surveillance,
            reply,
        })
        .await
    }
}
