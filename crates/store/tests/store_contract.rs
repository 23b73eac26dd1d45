//! End-to-end contract behavior through a running store.

use asset_model::{
    AudioClip, ElectronicMessageProperties, ElectronicMessageType, Font, GameObjectProperties,
    HeightUnit, Language, LevelObjectProperties, LevelObjectTemplate, LevelState, ObjectId,
    ObjectTriple, Palette, ProjectState, RawBitmap, ResourceKey, ResourceType, SurveillanceObject,
    TileProperties, TileType,
};
use asset_store::{
    AssetStore, DataStore, InMemoryProjectRepository, ProjectRepository, RequestFailed,
};

#[tokio::test]
async fn fresh_project_scenario() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();

    handle.new_project("p1").await.unwrap();

    // Collection queries on the untouched archive succeed empty; the
    // single-value query fails. Neither materializes anything.
    assert_eq!(handle.levels("p1", "a1").await.unwrap(), Vec::<usize>::new());
    assert!(handle.level_objects("p1", "a1", 0).await.unwrap().is_empty());
    assert!(handle.level_properties("p1", "a1", 0).await.is_err());
    assert_eq!(handle.levels("p1", "a1").await.unwrap(), Vec::<usize>::new());

    // First mutation materializes archive and level slot.
    let placed = handle
        .add_level_object(
            "p1",
            "a1",
            0,
            LevelObjectTemplate::at(ObjectTriple::new(0, 2, 8), 10, 12),
        )
        .await
        .unwrap();
    assert_eq!(placed.id, ObjectId(1));
    assert_eq!(handle.levels("p1", "a1").await.unwrap(), vec![0]);
    assert!(handle.level_properties("p1", "a1", 0).await.is_ok());

    // An empty patch echoes the unchanged object.
    let echoed = handle
        .set_level_object("p1", "a1", 0, placed.id, LevelObjectProperties::default())
        .await
        .unwrap();
    assert_eq!(echoed, placed.properties);

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn failures_are_opaque_at_the_boundary() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();

    handle.new_project("p1").await.unwrap();

    assert_eq!(handle.new_project("p1").await, Err(RequestFailed));
    assert_eq!(handle.new_project("two words").await, Err(RequestFailed));

    let key = ResourceKey::new(ResourceType::WORDS, 0);
    assert_eq!(handle.text("ghost", key).await.unwrap_err(), RequestFailed);
    assert_eq!(
        handle.levels("ghost", "a1").await.unwrap_err(),
        RequestFailed
    );

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn set_operations_echo_the_full_resulting_state() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let key = ResourceKey::new(ResourceType::SCREEN_MESSAGES, 3);
    let echoed = handle
        .set_text("p1", key, "ACCESS DENIED".to_string())
        .await
        .unwrap();
    assert_eq!(echoed, "ACCESS DENIED");
    assert_eq!(handle.text("p1", key).await.unwrap(), "ACCESS DENIED");

    // First patch creates the template through the upsert.
    let triple = ObjectTriple::new(0, 2, 8);
    let echoed = handle
        .set_game_object(
            "p1",
            triple,
            GameObjectProperties {
                long_name: Some("laser rapier".to_string()),
                mass: Some(-5),
                ..GameObjectProperties::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(echoed.long_name.as_deref(), Some("laser rapier"));
    assert_eq!(echoed.mass, Some(-5));
    assert_eq!(echoed.armor, Some(0));

    // A later patch touching another field preserves the first one.
    let echoed = handle
        .set_game_object(
            "p1",
            triple,
            GameObjectProperties {
                armor: Some(4),
                ..GameObjectProperties::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(echoed.long_name.as_deref(), Some("laser rapier"));
    assert_eq!(echoed.armor, Some(4));

    // Icon round trip.
    let icon = RawBitmap::filled(8, 8, 7);
    handle
        .set_game_object_bitmap("p1", triple, icon.clone())
        .await
        .unwrap();
    assert_eq!(handle.game_object_bitmap("p1", triple).await.unwrap(), icon);

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn level_texture_lists_truncate_to_capacity() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let stored = handle
        .set_level_textures("p1", "a1", 0, (0..60).collect())
        .await
        .unwrap();
    assert_eq!(stored.len(), LevelState::MAX_TEXTURES);
    assert_eq!(stored[..4], [0, 1, 2, 3]);
    assert_eq!(handle.level_textures("p1", "a1", 0).await.unwrap(), stored);

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_tile_patches_leave_the_tile_unchanged() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    // Nonzero slope on a flat shape rejects the whole patch, including the
    // heights that would otherwise be valid.
    let bad = TileProperties {
        floor_height: Some(HeightUnit(5)),
        slope_height: Some(HeightUnit(2)),
        ..TileProperties::default()
    };
    assert_eq!(
        handle.set_tile("p1", "a1", 0, 3, 3, bad).await,
        Err(RequestFailed)
    );

    let tile = handle.tile("p1", "a1", 0, 3, 3).await.unwrap();
    assert_eq!(tile.tile_type, Some(TileType::Solid));
    assert_eq!(tile.floor_height, Some(HeightUnit(0)));

    // The valid version of the same edit lands.
    let good = TileProperties {
        tile_type: Some(TileType::SlopeSouthToNorth),
        floor_height: Some(HeightUnit(5)),
        slope_height: Some(HeightUnit(2)),
        ..TileProperties::default()
    };
    let echoed = handle.set_tile("p1", "a1", 0, 3, 3, good).await.unwrap();
    assert_eq!(echoed.tile_type, Some(TileType::SlopeSouthToNorth));
    assert_eq!(echoed.slope_height, Some(HeightUnit(2)));

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn message_links_distinguish_absent_from_cleared() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let echoed = handle
        .set_electronic_message(
            "p1",
            ElectronicMessageType::Log,
            7,
            ElectronicMessageProperties {
                title: Some("maintenance".to_string()),
                next_message: Some(Some(8)),
                ..ElectronicMessageProperties::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(echoed.next_message, Some(Some(8)));

    // An absent field leaves the link alone.
    let echoed = handle
        .set_electronic_message(
            "p1",
            ElectronicMessageType::Log,
            7,
            ElectronicMessageProperties::default(),
        )
        .await
        .unwrap();
    assert_eq!(echoed.next_message, Some(Some(8)));
    assert_eq!(echoed.title.as_deref(), Some("maintenance"));

    // An explicit None clears it.
    let echoed = handle
        .set_electronic_message(
            "p1",
            ElectronicMessageType::Log,
            7,
            ElectronicMessageProperties {
                next_message: Some(None),
                ..ElectronicMessageProperties::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(echoed.next_message, Some(None));

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn removed_messages_are_gone_for_every_query() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    handle
        .set_electronic_message(
            "p1",
            ElectronicMessageType::Mail,
            2,
            ElectronicMessageProperties::default(),
        )
        .await
        .unwrap();
    handle
        .set_electronic_message_audio(
            "p1",
            ElectronicMessageType::Mail,
            2,
            Language::German,
            AudioClip::new(22050, vec![0x80; 64]),
        )
        .await
        .unwrap();

    handle
        .remove_electronic_message("p1", ElectronicMessageType::Mail, 2)
        .await
        .unwrap();

    assert!(
        handle
            .electronic_message("p1", ElectronicMessageType::Mail, 2)
            .await
            .is_err()
    );
    assert!(
        handle
            .electronic_message_audio("p1", ElectronicMessageType::Mail, 2, Language::German)
            .await
            .is_err()
    );
    assert!(
        handle
            .remove_electronic_message("p1", ElectronicMessageType::Mail, 2)
            .await
            .is_err()
    );

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn keyed_capacities_are_enforced() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let last = ResourceKey::new(ResourceType::WORDS, 511);
    handle
        .set_text("p1", last, "edge".to_string())
        .await
        .unwrap();

    let beyond = ResourceKey::new(ResourceType::WORDS, 512);
    assert_eq!(
        handle.set_text("p1", beyond, "spill".to_string()).await,
        Err(RequestFailed)
    );

    // Types the catalog does not know are unbounded.
    let foreign = ResourceKey::new(ResourceType(0xBEEF), u16::MAX);
    handle
        .set_text("p1", foreign, "anything".to_string())
        .await
        .unwrap();

    // So are the image clusters; only the text clusters carry caps.
    let image = ResourceKey::new(ResourceType::MFD_DATA_IMAGES, 8);
    let stored = handle
        .set_bitmap("p1", image, RawBitmap::filled(2, 2, 7))
        .await
        .unwrap();
    assert_eq!(handle.bitmap("p1", image).await.unwrap(), stored);

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn surveillance_writes_echo_every_slot() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let link = SurveillanceObject::new(ObjectId(3), ObjectId(9));
    let slots = handle
        .set_level_surveillance_object("p1", "a1", 0, 2, link)
        .await
        .unwrap();
    assert_eq!(slots.len(), LevelState::SURVEILLANCE_SLOTS);
    assert_eq!(slots[2], link);
    assert!(slots[0].is_unset());

    assert_eq!(
        handle
            .set_level_surveillance_object("p1", "a1", 0, 8, link)
            .await,
        Err(RequestFailed)
    );

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn repository_seeded_projects_serve_fonts_and_palettes() {
    let repository = InMemoryProjectRepository::new();
    let mut state = ProjectState::new();
    state.fonts.insert(
        3,
        Font {
            monochrome: true,
            first_character: 32,
            glyph_x_offsets: vec![0, 4, 9],
            bitmap: RawBitmap::filled(9, 7, 1),
        },
    );
    state
        .palettes
        .insert("citadel".to_string(), Palette::grayscale());
    repository.save("seeded", &state).unwrap();

    let store = AssetStore::builder().repository(repository).build().await;
    let handle = store.handle();

    let font = handle.font("seeded", 3).await.unwrap();
    assert_eq!(font.glyph_count(), 2);
    let palette = handle.palette("seeded", "citadel").await.unwrap();
    assert_eq!(palette.colors().len(), Palette::SIZE);

    assert!(handle.font("seeded", 9).await.is_err());
    assert!(handle.palette("seeded", "nope").await.is_err());

    drop(handle);
    store.shutdown().await.unwrap();
}
