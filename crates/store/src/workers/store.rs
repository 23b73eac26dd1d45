//! Store worker that owns the authoritative [`Workspace`].
//!
//! Receives commands from [`StoreHandle`], executes them one at a time
//! against the workspace, and answers each through its oneshot reply.
//! Single ownership is what serializes same-address requests; there is no
//! locking anywhere in the pipeline.
//!
//! [`StoreHandle`]: crate::api::StoreHandle

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use asset_model::{
    AudioClip, ElectronicMessageProperties, ElectronicMessageType, Font, GameObject,
    GameObjectProperties, Language, LevelObject, LevelObjectProperties, LevelObjectTemplate,
    LevelProperties, ObjectId, ObjectTriple, Palette, RawBitmap, ResourceKey, SurveillanceObject,
    Texture, TextureAnimation, TextureAnimationProperties, TextureProperties, TextureSize,
    TileGrid, TileProperties,
};

use crate::api::{RequestFailed, Result, StoreError};
use crate::workers::saver::SaveRequest;
use crate::workspace::Workspace;

/// Commands that can be sent to the store worker.
///
/// One variant per contract operation; every variant except `SaveProject`
/// carries the oneshot that resolves the caller's request.
pub(crate) enum Command {
    Projects {
        reply: oneshot::Sender<Result<Vec<String>>>,
    },
    NewProject {
        project_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Fire-and-forget: snapshots the project onto the save queue.
    SaveProject { project_id: String },
    Font {
        project_id: String,
        font_id: usize,
        reply: oneshot::Sender<Result<Font>>,
    },
    Palette {
        project_id: String,
        palette_id: String,
        reply: oneshot::Sender<Result<Palette>>,
    },
    Text {
        project_id: String,
        key: ResourceKey,
        reply: oneshot::Sender<Result<String>>,
    },
    SetText {
        project_id: String,
        key: ResourceKey,
        text: String,
        reply: oneshot::Sender<Result<String>>,
    },
    Bitmap {
        project_id: String,
        key: ResourceKey,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    SetBitmap {
        project_id: String,
        key: ResourceKey,
        bitmap: RawBitmap,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    Audio {
        project_id: String,
        key: ResourceKey,
        reply: oneshot::Sender<Result<AudioClip>>,
    },
    SetAudio {
        project_id: String,
        key: ResourceKey,
        clip: AudioClip,
        reply: oneshot::Sender<Result<AudioClip>>,
    },
    GameObjects {
        project_id: String,
        reply: oneshot::Sender<Result<Vec<GameObject>>>,
    },
    SetGameObject {
        project_id: String,
        triple: ObjectTriple,
        properties: GameObjectProperties,
        reply: oneshot::Sender<Result<GameObjectProperties>>,
    },
    GameObjectBitmap {
        project_id: String,
        triple: ObjectTriple,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    SetGameObjectBitmap {
        project_id: String,
        triple: ObjectTriple,
        bitmap: RawBitmap,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    ElectronicMessage {
        project_id: String,
        message_type: ElectronicMessageType,
        id: usize,
        reply: oneshot::Sender<Result<ElectronicMessageProperties>>,
    },
    SetElectronicMessage {
        project_id: String,
        message_type: ElectronicMessageType,
        id: usize,
        properties: ElectronicMessageProperties,
        reply: oneshot::Sender<Result<ElectronicMessageProperties>>,
    },
    RemoveElectronicMessage {
        project_id: String,
        message_type: ElectronicMessageType,
        id: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    ElectronicMessageAudio {
        project_id: String,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
        reply: oneshot::Sender<Result<AudioClip>>,
    },
    SetElectronicMessageAudio {
        project_id: String,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
        clip: AudioClip,
        reply: oneshot::Sender<Result<AudioClip>>,
    },
    Textures {
        project_id: String,
        reply: oneshot::Sender<Result<Vec<Texture>>>,
    },
    SetTextureProperties {
        project_id: String,
        texture_id: usize,
        properties: TextureProperties,
        reply: oneshot::Sender<Result<TextureProperties>>,
    },
    TextureBitmap {
        project_id: String,
        texture_id: usize,
        size: TextureSize,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    SetTextureBitmap {
        project_id: String,
        texture_id: usize,
        size: TextureSize,
        bitmap: RawBitmap,
        reply: oneshot::Sender<Result<RawBitmap>>,
    },
    Levels {
        project_id: String,
        archive_id: String,
        reply: oneshot::Sender<Result<Vec<usize>>>,
    },
    LevelProperties {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<LevelProperties>>,
    },
    SetLevelProperties {
        project_id: String,
        archive_id: String,
        level_id: usize,
        properties: LevelProperties,
        reply: oneshot::Sender<Result<LevelProperties>>,
    },
    LevelTextures {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<Vec<usize>>>,
    },
    SetLevelTextures {
        project_id: String,
        archive_id: String,
        level_id: usize,
        texture_ids: Vec<usize>,
        reply: oneshot::Sender<Result<Vec<usize>>>,
    },
    LevelTextureAnimations {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<Vec<TextureAnimation>>>,
    },
    SetLevelTextureAnimation {
        project_id: String,
        archive_id: String,
        level_id: usize,
        group: usize,
        properties: TextureAnimationProperties,
        reply: oneshot::Sender<Result<TextureAnimation>>,
    },
    Tiles {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<TileGrid>>,
    },
    Tile {
        project_id: String,
        archive_id: String,
        level_id: usize,
        x: u32,
        y: u32,
        reply: oneshot::Sender<Result<TileProperties>>,
    },
    SetTile {
        project_id: String,
        archive_id: String,
        level_id: usize,
        x: u32,
        y: u32,
        properties: TileProperties,
        reply: oneshot::Sender<Result<TileProperties>>,
    },
    LevelObjects {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<Vec<LevelObject>>>,
    },
    AddLevelObject {
        project_id: String,
        archive_id: String,
        level_id: usize,
        template: LevelObjectTemplate,
        reply: oneshot::Sender<Result<LevelObject>>,
    },
    RemoveLevelObject {
        project_id: String,
        archive_id: String,
        level_id: usize,
        object_id: ObjectId,
        reply: oneshot::Sender<Result<()>>,
    },
    SetLevelObject {
        project_id: String,
        archive_id: String,
        level_id: usize,
        object_id: ObjectId,
        properties: LevelObjectProperties,
        reply: oneshot::Sender<Result<LevelObjectProperties>>,
    },
    LevelSurveillanceObjects {
        project_id: String,
        archive_id: String,
        level_id: usize,
        reply: oneshot::Sender<Result<Vec<SurveillanceObject>>>,
    },
    SetLevelSurveillanceObject {
        project_id: String,
        archive_id: String,
        level_id: usize,
        index: usize,
        surveillance: SurveillanceObject,
        reply: oneshot::Sender<Result<Vec<SurveillanceObject>>>,
    },
}

/// Background task that processes store commands.
pub(crate) struct StoreWorker {
    workspace: Workspace,
    command_rx: mpsc::Receiver<Command>,
    save_tx: mpsc::Sender<SaveRequest>,
}

impl StoreWorker {
    pub(crate) fn new(
        workspace: Workspace,
        command_rx: mpsc::Receiver<Command>,
        save_tx: mpsc::Sender<SaveRequest>,
    ) -> Self {
        Self {
            workspace,
            command_rx,
            save_tx,
        }
    }

    /// Main worker loop. Returns once every handle clone is dropped, which
    /// also drops `save_tx` and lets the save worker drain out.
    pub(crate) async fn run(mut self) {
        debug!(target: "asset_store::worker", "store worker started");
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }
        debug!(target: "asset_store::worker", "command channel closed, store worker stopping");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Projects { reply } => finish("Projects", reply, self.workspace.projects()),
            Command::NewProject { project_id, reply } => {
                finish("NewProject", reply, self.workspace.new_project(&project_id))
            }
            Command::SaveProject { project_id } => self.enqueue_save(project_id).await,
            Command::Font {
                project_id,
                font_id,
                reply,
            } => finish("Font", reply, self.workspace.font(&project_id, font_id)),
            Command::Palette {
                project_id,
                palette_id,
                reply,
            } => finish(
                "Palette",
                reply,
                self.workspace.palette(&project_id, &palette_id),
            ),
            Command::Text {
                project_id,
                key,
                reply,
            } => finish("Text", reply, self.workspace.text(&project_id, key)),
            Command::SetText {
                project_id,
                key,
                text,
                reply,
            } => finish(
                "SetText",
                reply,
                self.workspace.set_text(&project_id, key, text),
            ),
            Command::Bitmap {
                project_id,
                key,
                reply,
            } => finish("Bitmap", reply, self.workspace.bitmap(&project_id, key)),
            Command::SetBitmap {
                project_id,
                key,
                bitmap,
                reply,
            } => finish(
                "SetBitmap",
                reply,
                self.workspace.set_bitmap(&project_id, key, bitmap),
            ),
            Command::Audio {
                project_id,
                key,
                reply,
            } => finish("Audio", reply, self.workspace.audio(&project_id, key)),
            Command::SetAudio {
                project_id,
                key,
                clip,
                reply,
            } => finish(
                "SetAudio",
                reply,
                self.workspace.set_audio(&project_id, key, clip),
            ),
            Command::GameObjects { project_id, reply } => {
                finish("GameObjects", reply, self.workspace.game_objects(&project_id))
            }
            Command::SetGameObject {
                project_id,
                triple,
                properties,
                reply,
            } => finish(
                "SetGameObject",
                reply,
                self.workspace
                    .set_game_object(&project_id, triple, &properties),
            ),
            Command::GameObjectBitmap {
                project_id,
                triple,
                reply,
            } => finish(
                "GameObjectBitmap",
                reply,
                self.workspace.game_object_bitmap(&project_id, triple),
            ),
            Command::SetGameObjectBitmap {
                project_id,
                triple,
                bitmap,
                reply,
            } => finish(
                "SetGameObjectBitmap",
                reply,
                self.workspace
                    .set_game_object_bitmap(&project_id, triple, bitmap),
            ),
            Command::ElectronicMessage {
                project_id,
                message_type,
                id,
                reply,
            } => finish(
                "ElectronicMessage",
                reply,
                self.workspace
                    .electronic_message(&project_id, message_type, id),
            ),
            Command::SetElectronicMessage {
                project_id,
                message_type,
                id,
                properties,
                reply,
            } => finish(
                "SetElectronicMessage",
                reply,
                self.workspace
                    .set_electronic_message(&project_id, message_type, id, &properties),
            ),
            Command::RemoveElectronicMessage {
                project_id,
                message_type,
                id,
                reply,
            } => finish(
                "RemoveElectronicMessage",
                reply,
                self.workspace
                    .remove_electronic_message(&project_id, message_type, id),
            ),
            Command::ElectronicMessageAudio {
                project_id,
                message_type,
                id,
                language,
                reply,
            } => finish(
                "ElectronicMessageAudio",
                reply,
                self.workspace
                    .electronic_message_audio(&project_id, message_type, id, language),
            ),
            Command::SetElectronicMessageAudio {
                project_id,
                message_type,
                id,
                language,
                clip,
                reply,
            } => finish(
                "SetElectronicMessageAudio",
                reply,
                self.workspace.set_electronic_message_audio(
                    &project_id,
                    message_type,
                    id,
                    language,
                    clip,
                ),
            ),
            Command::Textures { project_id, reply } => {
                finish("Textures", reply, self.workspace.textures(&project_id))
            }
            Command::SetTextureProperties {
                project_id,
                texture_id,
                properties,
                reply,
            } => finish(
                "SetTextureProperties",
                reply,
                self.workspace
                    .set_texture_properties(&project_id, texture_id, &properties),
            ),
            Command::TextureBitmap {
                project_id,
                texture_id,
                size,
                reply,
            } => finish(
                "TextureBitmap",
                reply,
                self.workspace.texture_bitmap(&project_id, texture_id, size),
            ),
            Command::SetTextureBitmap {
                project_id,
                texture_id,
                size,
                bitmap,
                reply,
            } => finish(
                "SetTextureBitmap",
                reply,
                self.workspace
                    .set_texture_bitmap(&project_id, texture_id, size, bitmap),
            ),
            Command::Levels {
                project_id,
                archive_id,
                reply,
            } => finish(
                "Levels",
                reply,
                self.workspace.levels(&project_id, &archive_id),
            ),
            Command::LevelProperties {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "LevelProperties",
                reply,
                self.workspace
                    .level_properties(&project_id, &archive_id, level_id),
            ),
            Command::SetLevelProperties {
                project_id,
                archive_id,
                level_id,
                properties,
                reply,
            } => finish(
                "SetLevelProperties",
                reply,
                self.workspace
                    .set_level_properties(&project_id, &archive_id, level_id, &properties),
            ),
            Command::LevelTextures {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "LevelTextures",
                reply,
                self.workspace
                    .level_textures(&project_id, &archive_id, level_id),
            ),
            Command::SetLevelTextures {
                project_id,
                archive_id,
                level_id,
                texture_ids,
                reply,
            } => finish(
                "SetLevelTextures",
                reply,
                self.workspace
                    .set_level_textures(&project_id, &archive_id, level_id, texture_ids),
            ),
            Command::LevelTextureAnimations {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "LevelTextureAnimations",
                reply,
                self.workspace
                    .level_texture_animations(&project_id, &archive_id, level_id),
            ),
            Command::SetLevelTextureAnimation {
                project_id,
                archive_id,
                level_id,
                group,
                properties,
                reply,
            } => finish(
                "SetLevelTextureAnimation",
                reply,
                self.workspace.set_level_texture_animation(
                    &project_id,
                    &archive_id,
                    level_id,
                    group,
                    &properties,
                ),
            ),
            Command::Tiles {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "Tiles",
                reply,
                self.workspace.tiles(&project_id, &archive_id, level_id),
            ),
            Command::Tile {
                project_id,
                archive_id,
                level_id,
                x,
                y,
                reply,
            } => finish(
                "Tile",
                reply,
                self.workspace.tile(&project_id, &archive_id, level_id, x, y),
            ),
            Command::SetTile {
                project_id,
                archive_id,
                level_id,
                x,
                y,
                properties,
                reply,
            } => finish(
                "SetTile",
                reply,
                self.workspace
                    .set_tile(&project_id, &archive_id, level_id, x, y, &properties),
            ),
            Command::LevelObjects {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "LevelObjects",
                reply,
                self.workspace
                    .level_objects(&project_id, &archive_id, level_id),
            ),
            Command::AddLevelObject {
                project_id,
                archive_id,
                level_id,
                template,
                reply,
            } => finish(
                "AddLevelObject",
                reply,
                self.workspace
                    .add_level_object(&project_id, &archive_id, level_id, &template),
            ),
            Command::RemoveLevelObject {
                project_id,
                archive_id,
                level_id,
                object_id,
                reply,
            } => finish(
                "RemoveLevelObject",
                reply,
                self.workspace
                    .remove_level_object(&project_id, &archive_id, level_id, object_id),
            ),
            Command::SetLevelObject {
                project_id,
                archive_id,
                level_id,
                object_id,
                properties,
                reply,
            } => finish(
                "SetLevelObject",
                reply,
                self.workspace.set_level_object(
                    &project_id,
                    &archive_id,
                    level_id,
                    object_id,
                    &properties,
                ),
            ),
            Command::LevelSurveillanceObjects {
                project_id,
                archive_id,
                level_id,
                reply,
            } => finish(
                "LevelSurveillanceObjects",
                reply,
                self.workspace
                    .level_surveillance_objects(&project_id, &archive_id, level_id),
            ),
            Command::SetLevelSurveillanceObject {
                project_id,
                archive_id,
                level_id,
                index,
                surveillance,
                reply,
            } => finish(
                "SetLevelSurveillanceObject",
                reply,
                self.workspace.set_level_surveillance_object(
                    &project_id,
                    &archive_id,
                    level_id,
                    index,
                    surveillance,
                ),
            ),
        }
    }

    /// Snapshots the project and hands it to the save worker. Unknown
    /// projects are logged and dropped; there is no caller to answer.
    async fn enqueue_save(&mut self, project_id: String) {
        match self.workspace.snapshot(&project_id) {
            Ok(state) => {
                let request = SaveRequest { project_id, state };
                if self.save_tx.send(request).await.is_err() {
                    warn!(
                        target: "asset_store::worker",
                        "save queue closed, dropping save request"
                    );
                }
            }
            Err(error) => {
                debug!(
                    target: "asset_store::worker",
                    %project_id,
                    %error,
                    "ignoring save request"
                );
            }
        }
    }
}

/// Logs the outcome, collapses it to the opaque failure, and answers the
/// caller. Repository errors are warnings, domain rejections stay at debug.
fn finish<T>(
    op: &'static str,
    reply: oneshot::Sender<Result<T>>,
    outcome: std::result::Result<T, StoreError>,
) {
    let result = outcome.map_err(|error| {
        match error {
            StoreError::Repository(_) => {
                warn!(target: "asset_store::worker", op, %error, "request failed");
            }
            _ => {
                debug!(target: "asset_store::worker", op, %error, "request rejected");
            }
        }
        RequestFailed
    });
    if reply.send(result).is_err() {
        debug!(target: "asset_store::worker", op, "reply channel closed (caller dropped)");
    }
}
