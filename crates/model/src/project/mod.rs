//! Project-scoped state: archives, keyed resource clusters, entity tables.

mod game_object;
mod message;
mod texture;

pub use game_object::{GameObject, GameObjectProperties, GameObjectState, ObjectTriple};
pub use message::{ElectronicMessageProperties, ElectronicMessageState, ElectronicMessageType};
pub use texture::{Texture, TextureProperties, TextureState, TransparencyControl};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::LevelState;
use crate::media::{AudioClip, Font, Palette, RawBitmap};
use crate::resource::ResourceKey;

/// One archive: a sparse set of level slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveState {
    pub levels: BTreeMap<usize, LevelState>,
}

impl ArchiveState {
    /// Number of addressable level slots per archive.
    pub const MAX_LEVELS: usize = 16;

    /// Ascending ids of the materialized level slots.
    pub fn level_ids(&self) -> Vec<usize> {
        self.levels.keys().copied().collect()
    }

    pub fn level(&self, level_id: usize) -> Option<&LevelState> {
        self.levels.get(&level_id)
    }

    /// Level slot for mutation, created empty on first touch.
    ///
    /// Returns `None` for slot ids beyond [`Self::MAX_LEVELS`].
    pub fn materialize_level(&mut self, level_id: usize) -> Option<&mut LevelState> {
        if level_id >= Self::MAX_LEVELS {
            return None;
        }
        Some(self.levels.entry(level_id).or_insert_with(LevelState::new))
    }
}

/// Authoritative in-memory state of one project.
///
/// This is also the unit of persistence: a project serializes whole, with
/// keyed maps using the canonical text form of their keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub archives: BTreeMap<String, ArchiveState>,
    pub fonts: BTreeMap<usize, Font>,
    pub palettes: BTreeMap<String, Palette>,
    pub texts: BTreeMap<ResourceKey, String>,
    pub bitmaps: BTreeMap<ResourceKey, RawBitmap>,
    pub audio: BTreeMap<ResourceKey, AudioClip>,
    pub game_objects: BTreeMap<ObjectTriple, GameObjectState>,
    pub textures: BTreeMap<usize, TextureState>,
    pub messages: BTreeMap<ElectronicMessageType, BTreeMap<usize, ElectronicMessageState>>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn archive(&self, archive_id: &str) -> Option<&ArchiveState> {
        self.archives.get(archive_id)
    }

    /// Archive for mutation, created empty on first touch.
    pub fn materialize_archive(&mut self, archive_id: &str) -> &mut ArchiveState {
        self.archives.entry(archive_id.to_string()).or_default()
    }

    pub fn message(
        &self,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Option<&ElectronicMessageState> {
        self.messages.get(&message_type)?.get(&id)
    }

    /// Message for mutation, created empty on first touch.
    pub fn materialize_message(
        &mut self,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> &mut ElectronicMessageState {
        self.messages
            .entry(message_type)
            .or_default()
            .entry(id)
            .or_default()
    }

    pub fn remove_message(
        &mut self,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Option<ElectronicMessageState> {
        let cluster = self.messages.get_mut(&message_type)?;
        let removed = cluster.remove(&id);
        if cluster.is_empty() {
            self.messages.remove(&message_type);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archives_cap_their_level_slots() {
        let mut archive = ArchiveState::default();
        assert!(archive.materialize_level(ArchiveState::MAX_LEVELS).is_none());
        assert!(archive.materialize_level(0).is_some());
        assert!(archive.materialize_level(15).is_some());
        assert_eq!(archive.level_ids(), vec![0, 15]);
    }

    #[test]
    fn queries_do_not_materialize() {
        let mut project = ProjectState::new();
        assert!(project.archive("alpha").is_none());
        assert!(project.message(ElectronicMessageType::Log, 3).is_none());

        project.materialize_archive("alpha");
        assert!(project.archive("alpha").is_some());
    }

    #[test]
    fn removing_the_last_message_drops_the_cluster() {
        let mut project = ProjectState::new();
        project
            .materialize_message(ElectronicMessageType::Mail, 2)
            .title = "hello".into();

        assert!(project.remove_message(ElectronicMessageType::Mail, 2).is_some());
        assert!(project.messages.is_empty());
        assert!(project.remove_message(ElectronicMessageType::Mail, 2).is_none());
    }
}
