//! Project-scoped resource operations: fonts, palettes, keyed clusters,
//! game objects, textures, and electronic messages.
//!
//! Keyed and id-addressed `set_*` operations upsert; the contract has no
//! paired `add_*` for them. Echoes always reflect the stored state.

use asset_model::{
    AudioClip, ElectronicMessageProperties, ElectronicMessageType, Font, GameObject,
    GameObjectProperties, Language, ObjectTriple, Palette, RawBitmap, ResourceKey, Texture,
    TextureProperties, TextureSize,
};

use crate::api::StoreError;

use super::Workspace;

impl Workspace {
    pub(crate) fn font(&mut self, project_id: &str, font_id: usize) -> Result<Font, StoreError> {
        self.project(project_id)?
            .fonts
            .get(&font_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "font",
                id: font_id.to_string(),
            })
    }

    pub(crate) fn palette(
        &mut self,
        project_id: &str,
        palette_id: &str,
    ) -> Result<Palette, StoreError> {
        self.project(project_id)?
            .palettes
            .get(palette_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "palette",
                id: palette_id.to_string(),
            })
    }

    pub(crate) fn text(
        &mut self,
        project_id: &str,
        key: ResourceKey,
    ) -> Result<String, StoreError> {
        self.project(project_id)?
            .texts
            .get(&key)
            .cloned()
            .ok_or(StoreError::UnknownResource(key))
    }

    pub(crate) fn set_text(
        &mut self,
        project_id: &str,
        key: ResourceKey,
        text: String,
    ) -> Result<String, StoreError> {
        self.admit(key)?;
        let project = self.project_mut(project_id)?;
        project.texts.insert(key, text.clone());
        Ok(text)
    }

    pub(crate) fn bitmap(
        &mut self,
        project_id: &str,
        key: ResourceKey,
    ) -> Result<RawBitmap, StoreError> {
        self.project(project_id)?
            .bitmaps
            .get(&key)
            .cloned()
            .ok_or(StoreError::UnknownResource(key))
    }

    pub(crate) fn set_bitmap(
        &mut self,
        project_id: &str,
        key: ResourceKey,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap, StoreError> {
        bitmap.ensure_well_formed()?;
        self.admit(key)?;
        let project = self.project_mut(project_id)?;
        project.bitmaps.insert(key, bitmap.clone());
        Ok(bitmap)
    }

    pub(crate) fn audio(
        &mut self,
        project_id: &str,
        key: ResourceKey,
    ) -> Result<AudioClip, StoreError> {
        self.project(project_id)?
            .audio
            .get(&key)
            .cloned()
            .ok_or(StoreError::UnknownResource(key))
    }

    pub(crate) fn set_audio(
        &mut self,
        project_id: &str,
        key: ResourceKey,
        clip: AudioClip,
    ) -> Result<AudioClip, StoreError> {
        self.admit(key)?;
        let project = self.project_mut(project_id)?;
        project.audio.insert(key, clip.clone());
        Ok(clip)
    }

    pub(crate) fn game_objects(
        &mut self,
        project_id: &str,
    ) -> Result<Vec<GameObject>, StoreError> {
        Ok(self
            .project(project_id)?
            .game_objects
            .iter()
            .map(|(triple, state)| GameObject {
                triple: *triple,
                properties: state.properties(),
            })
            .collect())
    }

    pub(crate) fn set_game_object(
        &mut self,
        project_id: &str,
        triple: ObjectTriple,
        properties: &GameObjectProperties,
    ) -> Result<GameObjectProperties, StoreError> {
        let project = self.project_mut(project_id)?;
        let state = project.game_objects.entry(triple).or_default();
        state.apply(properties);
        Ok(state.properties())
    }

    pub(crate) fn game_object_bitmap(
        &mut self,
        project_id: &str,
        triple: ObjectTriple,
    ) -> Result<RawBitmap, StoreError> {
        self.project(project_id)?
            .game_objects
            .get(&triple)
            .and_then(|state| state.icon.clone())
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "game object icon",
                id: triple.to_string(),
            })
    }

    pub(crate) fn set_game_object_bitmap(
        &mut self,
        project_id: &str,
        triple: ObjectTriple,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap, StoreError> {
        bitmap.ensure_well_formed()?;
        let project = self.project_mut(project_id)?;
        let state = project.game_objects.entry(triple).or_default();
        state.icon = Some(bitmap.clone());
        Ok(bitmap)
    }

    pub(crate) fn electronic_message(
        &mut self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<ElectronicMessageProperties, StoreError> {
        self.project(project_id)?
            .message(message_type, id)
            .map(|state| state.properties())
            .ok_or_else(|| unknown_message(message_type, id))
    }

    pub(crate) fn set_electronic_message(
        &mut self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        properties: &ElectronicMessageProperties,
    ) -> Result<ElectronicMessageProperties, StoreError> {
        let project = self.project_mut(project_id)?;
        let state = project.materialize_message(message_type, id);
        state.apply(properties);
        Ok(state.properties())
    }

    pub(crate) fn remove_electronic_message(
        &mut self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        project
            .remove_message(message_type, id)
            .map(|_| ())
            .ok_or_else(|| unknown_message(message_type, id))
    }

    pub(crate) fn electronic_message_audio(
        &mut self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
    ) -> Result<AudioClip, StoreError> {
        self.project(project_id)?
            .message(message_type, id)
            .ok_or_else(|| unknown_message(message_type, id))?
            .audio
            .get(&language)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "electronic message audio",
                id: format!("{message_type}/{id}/{language}"),
            })
    }

    pub(crate) fn set_electronic_message_audio(
        &mut self,
        project_id: &str,
        message_type: ElectronicMessageType,
        id: usize,
        language: Language,
        clip: AudioClip,
    ) -> Result<AudioClip, StoreError> {
        let project = self.project_mut(project_id)?;
        let state = project.materialize_message(message_type, id);
        state.audio.insert(language, clip.clone());
        Ok(clip)
    }

    pub(crate) fn textures(&mut self, project_id: &str) -> Result<Vec<Texture>, StoreError> {
        Ok(self
            .project(project_id)?
            .textures
            .iter()
            .map(|(id, state)| Texture {
                id: *id,
                properties: state.properties(),
                sizes: state.available_sizes(),
            })
            .collect())
    }

    pub(crate) fn set_texture_properties(
        &mut self,
        project_id: &str,
        texture_id: usize,
        properties: &TextureProperties,
    ) -> Result<TextureProperties, StoreError> {
        let project = self.project_mut(project_id)?;
        let state = project.textures.entry(texture_id).or_default();
        state.apply(properties);
        Ok(state.properties())
    }

    pub(crate) fn texture_bitmap(
        &mut self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
    ) -> Result<RawBitmap, StoreError> {
        self.project(project_id)?
            .textures
            .get(&texture_id)
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "texture",
                id: texture_id.to_string(),
            })?
            .images
            .get(&size)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntry {
                kind: "texture image",
                id: format!("{texture_id}/{size}"),
            })
    }

    pub(crate) fn set_texture_bitmap(
        &mut self,
        project_id: &str,
        texture_id: usize,
        size: TextureSize,
        bitmap: RawBitmap,
    ) -> Result<RawBitmap, StoreError> {
        bitmap.ensure_well_formed()?;
        let project = self.project_mut(project_id)?;
        let state = project.textures.entry(texture_id).or_default();
        state.images.insert(size, bitmap.clone());
        Ok(bitmap)
    }
}

fn unknown_message(message_type: ElectronicMessageType, id: usize) -> StoreError {
    StoreError::UnknownEntry {
        kind: "electronic message",
        id: format!("{message_type}/{id}"),
    }
}

#[cfg(test)]
mod tests {
    use asset_model::{PatchError, ResourceType};

    use super::super::tests::workspace;
    use super::*;

    #[test]
    fn keyed_upserts_respect_catalog_capacity() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let last_word = ResourceKey::new(ResourceType::WORDS, 511);
        assert_eq!(
            ws.set_text("p1", last_word, "energy".into()).unwrap(),
            "energy"
        );

        let beyond = ResourceKey::new(ResourceType::WORDS, 512);
        assert!(matches!(
            ws.set_text("p1", beyond, "x".into()),
            Err(StoreError::CapacityExceeded { limit: 512, .. })
        ));

        let unknown_type = ResourceKey::new(ResourceType(0xBEEF), u16::MAX);
        ws.set_text("p1", unknown_type, "unbounded".into()).unwrap();

        assert_eq!(ws.text("p1", last_word).unwrap(), "energy");
        assert!(matches!(
            ws.text("p1", beyond),
            Err(StoreError::UnknownResource(_))
        ));
    }

    #[test]
    fn malformed_bitmaps_are_rejected_before_storage() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let key = ResourceKey::new(ResourceType::MFD_DATA_IMAGES, 0);
        let torn = RawBitmap::new(8, 8, vec![0; 3]);
        assert!(matches!(
            ws.set_bitmap("p1", key, torn),
            Err(StoreError::InvalidPatch(PatchError::MalformedBitmap { .. }))
        ));
        assert!(matches!(
            ws.bitmap("p1", key),
            Err(StoreError::UnknownResource(_))
        ));

        ws.set_bitmap("p1", key, RawBitmap::filled(8, 8, 5)).unwrap();
        assert_eq!(ws.bitmap("p1", key).unwrap().pixels.len(), 64);
    }

    #[test]
    fn game_object_patches_upsert_and_echo_full_state() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let triple = ObjectTriple::new(0, 2, 8);
        let echoed = ws
            .set_game_object(
                "p1",
                triple,
                &GameObjectProperties {
                    short_name: Some("battery".into()),
                    ..GameObjectProperties::default()
                },
            )
            .unwrap();
        assert_eq!(echoed.short_name, Some("battery".into()));
        assert_eq!(echoed.mass, Some(0));

        let listed = ws.game_objects("p1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].triple, triple);

        assert!(matches!(
            ws.game_object_bitmap("p1", triple),
            Err(StoreError::UnknownEntry { .. })
        ));
        ws.set_game_object_bitmap("p1", triple, RawBitmap::filled(16, 16, 9))
            .unwrap();
        assert_eq!(ws.game_object_bitmap("p1", triple).unwrap().width, 16);
    }

    #[test]
    fn message_remove_requires_existence_and_kills_queries() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let kind = ElectronicMessageType::Log;
        ws.set_electronic_message(
            "p1",
            kind,
            7,
            &ElectronicMessageProperties {
                title: Some("reactor".into()),
                ..ElectronicMessageProperties::default()
            },
        )
        .unwrap();
        ws.set_electronic_message_audio("p1", kind, 7, Language::French, AudioClip::default())
            .unwrap();

        assert!(ws.electronic_message("p1", kind, 7).is_ok());
        assert!(ws
            .electronic_message_audio("p1", kind, 7, Language::French)
            .is_ok());
        assert!(matches!(
            ws.electronic_message_audio("p1", kind, 7, Language::German),
            Err(StoreError::UnknownEntry { .. })
        ));

        ws.remove_electronic_message("p1", kind, 7).unwrap();
        assert!(matches!(
            ws.electronic_message("p1", kind, 7),
            Err(StoreError::UnknownEntry { .. })
        ));
        assert!(matches!(
            ws.remove_electronic_message("p1", kind, 7),
            Err(StoreError::UnknownEntry { .. })
        ));
    }

    #[test]
    fn texture_images_are_stored_per_size() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        ws.set_texture_bitmap("p1", 3, TextureSize::Large, RawBitmap::filled(128, 128, 1))
            .unwrap();
        ws.set_texture_bitmap("p1", 3, TextureSize::Icon, RawBitmap::filled(16, 16, 1))
            .unwrap();

        let listed = ws.textures("p1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sizes, vec![TextureSize::Icon, TextureSize::Large]);

        assert_eq!(
            ws.texture_bitmap("p1", 3, TextureSize::Icon).unwrap().width,
            16
        );
        assert!(matches!(
            ws.texture_bitmap("p1", 3, TextureSize::Medium),
            Err(StoreError::UnknownEntry { .. })
        ));
        assert!(matches!(
            ws.texture_bitmap("p1", 9, TextureSize::Icon),
            Err(StoreError::UnknownEntry { .. })
        ));
    }
}
