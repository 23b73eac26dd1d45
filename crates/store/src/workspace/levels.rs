//! Archive- and level-scoped operations: properties, texture slots,
//! animations, tiles, placed objects, and surveillance links.
//!
//! Patch and add mutations materialize the addressed archive and level slot
//! on demand (slot ids are capped by
//! [`asset_model::ArchiveState::MAX_LEVELS`]); queries and removes never
//! materialize anything.

use asset_model::{
    LevelObject, LevelObjectProperties, LevelObjectState, LevelObjectTemplate, LevelProperties,
    LevelState, ObjectId, SurveillanceObject, TextureAnimation, TextureAnimationProperties,
    TileGrid, TileProperties,
};

use crate::api::StoreError;

use super::Workspace;

impl Workspace {
    /// Ascending ids of materialized level slots; empty for unknown archives.
    pub(crate) fn levels(
        &mut self,
        project_id: &str,
        archive_id: &str,
    ) -> Result<Vec<usize>, StoreError> {
        Ok(self
            .project(project_id)?
            .archive(archive_id)
            .map(|archive| archive.level_ids())
            .unwrap_or_default())
    }

    pub(crate) fn level_properties(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<LevelProperties, StoreError> {
        Ok(self.level(project_id, archive_id, level_id)?.properties())
    }

    pub(crate) fn set_level_properties(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        properties: &LevelProperties,
    ) -> Result<LevelProperties, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        level.apply_properties(properties);
        Ok(level.properties())
    }

    pub(crate) fn level_textures(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<usize>, StoreError> {
        Ok(self
            .existing_level(project_id, archive_id, level_id)?
            .map(|level| level.texture_id_list())
            .unwrap_or_default())
    }

    pub(crate) fn set_level_textures(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        texture_ids: Vec<usize>,
    ) -> Result<Vec<usize>, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        Ok(level.replace_texture_ids(texture_ids))
    }

    pub(crate) fn level_texture_animations(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<TextureAnimation>, StoreError> {
        Ok(self
            .existing_level(project_id, archive_id, level_id)?
            .map(|level| level.texture_animations.to_vec())
            .unwrap_or_default())
    }

    pub(crate) fn set_level_texture_animation(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        group: usize,
        properties: &TextureAnimationProperties,
    ) -> Result<TextureAnimation, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        let animation =
            level
                .texture_animations
                .get_mut(group)
                .ok_or(StoreError::SlotOutOfRange {
                    name: "texture animation group",
                    index: group,
                    limit: LevelState::ANIMATION_GROUPS,
                })?;
        animation.apply(properties);
        Ok(*animation)
    }

    pub(crate) fn tiles(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<TileGrid, StoreError> {
        Ok(self.level(project_id, archive_id, level_id)?.tiles.grid())
    }

    pub(crate) fn tile(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
    ) -> Result<TileProperties, StoreError> {
        self.level(project_id, archive_id, level_id)?
            .tiles
            .properties_at(x, y)
            .ok_or(StoreError::TileOutOfBounds { x, y })
    }

    pub(crate) fn set_tile(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        x: u32,
        y: u32,
        properties: &TileProperties,
    ) -> Result<TileProperties, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        level
            .tiles
            .tile_mut(x, y)
            .ok_or(StoreError::TileOutOfBounds { x, y })?
            .apply(properties)?;
        level
            .tiles
            .properties_at(x, y)
            .ok_or(StoreError::TileOutOfBounds { x, y })
    }

    pub(crate) fn level_objects(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<LevelObject>, StoreError> {
        Ok(self
            .existing_level(project_id, archive_id, level_id)?
            .map(|level| level.object_views())
            .unwrap_or_default())
    }

    /// Places a new object. Hitpoints seed from the project's game-object
    /// template for the triple, zero when no template exists.
    pub(crate) fn add_level_object(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        template: &LevelObjectTemplate,
    ) -> Result<LevelObject, StoreError> {
        template.validate()?;

        let project = self.project_mut(project_id)?;
        let hitpoints = project
            .game_objects
            .get(&template.triple)
            .map(|object| object.default_hitpoints)
            .unwrap_or_default();

        let level = project
            .materialize_archive(archive_id)
            .materialize_level(level_id)
            .ok_or_else(|| unknown_level(archive_id, level_id))?;

        let state = LevelObjectState::from_template(template, hitpoints);
        let id = level.add_object(state.clone());
        Ok(state.view(id))
    }

    /// Removing from a level that was never materialized fails without
    /// creating the slot.
    pub(crate) fn remove_level_object(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
    ) -> Result<(), StoreError> {
        let level = self.level_mut(project_id, archive_id, level_id)?;
        level
            .remove_object(object_id)
            .map(|_| ())
            .ok_or(StoreError::UnknownObject(object_id))
    }

    pub(crate) fn set_level_object(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        object_id: ObjectId,
        properties: &LevelObjectProperties,
    ) -> Result<LevelObjectProperties, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        let object = level
            .objects
            .get_mut(&object_id)
            .ok_or(StoreError::UnknownObject(object_id))?;
        object.apply(properties)?;
        Ok(object.properties())
    }

    pub(crate) fn level_surveillance_objects(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Vec<SurveillanceObject>, StoreError> {
        Ok(self
            .existing_level(project_id, archive_id, level_id)?
            .map(|level| level.surveillance.to_vec())
            .unwrap_or_default())
    }

    pub(crate) fn set_level_surveillance_object(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
        index: usize,
        surveillance: SurveillanceObject,
    ) -> Result<Vec<SurveillanceObject>, StoreError> {
        let level = self.materialize_level(project_id, archive_id, level_id)?;
        let slot = level
            .surveillance
            .get_mut(index)
            .ok_or(StoreError::SlotOutOfRange {
                name: "surveillance",
                index,
                limit: LevelState::SURVEILLANCE_SLOTS,
            })?;
        *slot = surveillance;
        Ok(level.surveillance.to_vec())
    }

    /// The level if both the archive and the slot are materialized.
    fn existing_level(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<Option<&LevelState>, StoreError> {
        Ok(self
            .project(project_id)?
            .archive(archive_id)
            .and_then(|archive| archive.level(level_id)))
    }

    fn level(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<&LevelState, StoreError> {
        self.existing_level(project_id, archive_id, level_id)?
            .ok_or_else(|| unknown_level(archive_id, level_id))
    }

    /// Mutable access to an already materialized level; never creates slots.
    fn level_mut(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<&mut LevelState, StoreError> {
        self.project_mut(project_id)?
            .archives
            .get_mut(archive_id)
            .and_then(|archive| archive.levels.get_mut(&level_id))
            .ok_or_else(|| unknown_level(archive_id, level_id))
    }

    fn materialize_level(
        &mut self,
        project_id: &str,
        archive_id: &str,
        level_id: usize,
    ) -> Result<&mut LevelState, StoreError> {
        self.project_mut(project_id)?
            .materialize_archive(archive_id)
            .materialize_level(level_id)
            .ok_or_else(|| unknown_level(archive_id, level_id))
    }
}

fn unknown_level(archive_id: &str, level_id: usize) -> StoreError {
    StoreError::UnknownLevel {
        archive_id: archive_id.to_string(),
        level_id,
    }
}

#[cfg(test)]
mod tests {
    use asset_model::{ArchiveState, GameObjectProperties, HeightUnit, ObjectTriple, TileType};

    use super::super::tests::workspace;
    use super::*;

    #[test]
    fn queries_never_materialize_but_mutations_do() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        assert_eq!(ws.levels("p1", "a1").unwrap(), Vec::<usize>::new());
        assert!(ws.level_textures("p1", "a1", 0).unwrap().is_empty());
        assert!(matches!(
            ws.level_properties("p1", "a1", 0),
            Err(StoreError::UnknownLevel { .. })
        ));
        assert_eq!(ws.levels("p1", "a1").unwrap(), Vec::<usize>::new());

        ws.set_level_properties("p1", "a1", 2, &LevelProperties::default())
            .unwrap();
        assert_eq!(ws.levels("p1", "a1").unwrap(), vec![2]);
        assert!(ws.level_properties("p1", "a1", 2).is_ok());
    }

    #[test]
    fn level_slots_are_capped_at_sixteen() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        assert!(matches!(
            ws.set_level_properties(
                "p1",
                "a1",
                ArchiveState::MAX_LEVELS,
                &LevelProperties::default()
            ),
            Err(StoreError::UnknownLevel { .. })
        ));
        ws.set_level_properties(
            "p1",
            "a1",
            ArchiveState::MAX_LEVELS - 1,
            &LevelProperties::default(),
        )
        .unwrap();
    }

    #[test]
    fn texture_list_replacement_echoes_the_stored_list() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let stored = ws
            .set_level_textures("p1", "a1", 0, (0..60).collect())
            .unwrap();
        assert_eq!(stored.len(), LevelState::MAX_TEXTURES);
        assert_eq!(ws.level_textures("p1", "a1", 0).unwrap(), stored);
    }

    #[test]
    fn animation_groups_are_addressed_zero_to_three() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let echoed = ws
            .set_level_texture_animation(
                "p1",
                "a1",
                0,
                3,
                &TextureAnimationProperties {
                    frame_count: Some(6),
                    ..TextureAnimationProperties::default()
                },
            )
            .unwrap();
        assert_eq!(echoed.frame_count, 6);

        assert!(matches!(
            ws.set_level_texture_animation(
                "p1",
                "a1",
                0,
                4,
                &TextureAnimationProperties::default()
            ),
            Err(StoreError::SlotOutOfRange { limit: 4, .. })
        ));
        assert_eq!(ws.level_texture_animations("p1", "a1", 0).unwrap().len(), 4);
    }

    #[test]
    fn tile_patches_echo_derived_wall_heights() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let patch = TileProperties {
            tile_type: Some(TileType::Open),
            floor_height: Some(HeightUnit(4)),
            ceiling_height: Some(HeightUnit(20)),
            ..TileProperties::default()
        };
        let echoed = ws.set_tile("p1", "a1", 0, 10, 10, &patch).unwrap();
        assert_eq!(echoed.tile_type, Some(TileType::Open));
        // Neighbors stay solid, so every wall shows the full opening span.
        let walls = echoed.calculated_wall_heights.unwrap();
        assert_eq!(walls.north.0, 16);

        assert!(matches!(
            ws.tile("p1", "a1", 0, 64, 0),
            Err(StoreError::TileOutOfBounds { .. })
        ));
        assert!(matches!(
            ws.set_tile("p1", "a1", 0, 0, 64, &TileProperties::default()),
            Err(StoreError::TileOutOfBounds { .. })
        ));
    }

    #[test]
    fn placed_objects_inherit_template_hitpoints() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let triple = ObjectTriple::new(0, 2, 8);
        ws.set_game_object(
            "p1",
            triple,
            &GameObjectProperties {
                default_hitpoints: Some(40),
                ..GameObjectProperties::default()
            },
        )
        .unwrap();

        let placed = ws
            .add_level_object("p1", "a1", 0, &LevelObjectTemplate::at(triple, 8, 9))
            .unwrap();
        assert_eq!(placed.id, ObjectId(1));
        assert_eq!(placed.properties.hitpoints, Some(40));

        let unknown_triple = ObjectTriple::new(9, 9, 9);
        let bare = ws
            .add_level_object(
                "p1",
                "a1",
                0,
                &LevelObjectTemplate::at(unknown_triple, 1, 1),
            )
            .unwrap();
        assert_eq!(bare.id, ObjectId(2));
        assert_eq!(bare.properties.hitpoints, Some(0));
    }

    #[test]
    fn failed_removes_do_not_materialize_level_slots() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        assert!(matches!(
            ws.remove_level_object("p1", "a1", 3, ObjectId(7)),
            Err(StoreError::UnknownLevel { .. })
        ));
        assert_eq!(ws.levels("p1", "a1").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn object_removal_is_terminal() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let placed = ws
            .add_level_object(
                "p1",
                "a1",
                0,
                &LevelObjectTemplate::at(ObjectTriple::default(), 5, 5),
            )
            .unwrap();

        ws.remove_level_object("p1", "a1", 0, placed.id).unwrap();
        assert!(matches!(
            ws.remove_level_object("p1", "a1", 0, placed.id),
            Err(StoreError::UnknownObject(_))
        ));
        assert!(matches!(
            ws.set_level_object(
                "p1",
                "a1",
                0,
                placed.id,
                &LevelObjectProperties::default()
            ),
            Err(StoreError::UnknownObject(_))
        ));
        assert!(ws.level_objects("p1", "a1", 0).unwrap().is_empty());
    }

    #[test]
    fn surveillance_slots_echo_all_eight() {
        let mut ws = workspace();
        ws.new_project("p1").unwrap();

        let link = SurveillanceObject::new(ObjectId(3), ObjectId(4));
        let echoed = ws
            .set_level_surveillance_object("p1", "a1", 0, 5, link)
            .unwrap();
        assert_eq!(echoed.len(), LevelState::SURVEILLANCE_SLOTS);
        assert_eq!(echoed[5], link);
        assert!(echoed[0].is_unset());

        assert!(matches!(
            ws.set_level_surveillance_object("p1", "a1", 0, 8, link),
            Err(StoreError::SlotOutOfRange { limit: 8, .. })
        ));
    }
}
