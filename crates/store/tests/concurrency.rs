//! Resolution and ordering guarantees under concurrent handles.

use tokio::task::JoinSet;

use asset_model::{HeightUnit, ResourceKey, ResourceType, TileProperties, TileType};
use asset_store::{AssetStore, DataStore, Result};

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_requests_each_resolve_exactly_once() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let mut tasks: JoinSet<Result<String>> = JoinSet::new();
    for i in 0..32u16 {
        let handle = handle.clone();
        tasks.spawn(async move {
            let key = ResourceKey::new(ResourceType::WORDS, i);
            let text = format!("word-{i}");
            let echoed = handle.set_text("p1", key, text.clone()).await?;
            assert_eq!(echoed, text);
            handle.text("p1", key).await
        });
    }

    let mut resolved = 0;
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
        resolved += 1;
    }
    assert_eq!(resolved, 32);

    // Every write is visible afterwards.
    for i in 0..32u16 {
        let key = ResourceKey::new(ResourceType::WORDS, i);
        assert_eq!(handle.text("p1", key).await.unwrap(), format!("word-{i}"));
    }

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_patches_to_one_tile_both_land() {
    let store = AssetStore::builder().build().await;
    let handle = store.handle();
    handle.new_project("p1").await.unwrap();

    let floor = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .set_tile(
                    "p1",
                    "a1",
                    0,
                    7,
                    7,
                    TileProperties {
                        tile_type: Some(TileType::Open),
                        floor_height: Some(HeightUnit(4)),
                        ..TileProperties::default()
                    },
                )
                .await
        })
    };
    let ceiling = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .set_tile(
                    "p1",
                    "a1",
                    0,
                    7,
                    7,
                    TileProperties {
                        ceiling_height: Some(HeightUnit(20)),
                        ..TileProperties::default()
                    },
                )
                .await
        })
    };

    floor.await.unwrap().unwrap();
    ceiling.await.unwrap().unwrap();

    // Whatever the interleaving, both single-field patches merged.
    let tile = handle.tile("p1", "a1", 0, 7, 7).await.unwrap();
    assert_eq!(tile.tile_type, Some(TileType::Open));
    assert_eq!(tile.floor_height, Some(HeightUnit(4)));
    assert_eq!(tile.ceiling_height, Some(HeightUnit(20)));

    drop(handle);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn handle_clones_address_the_same_store() {
    let store = AssetStore::builder().build().await;
    let writer = store.handle();
    let reader = writer.clone();

    writer.new_project("shared").await.unwrap();
    let key = ResourceKey::new(ResourceType::LOG_CATEGORIES, 1);
    writer
        .set_text("shared", key, "security".to_string())
        .await
        .unwrap();

    assert_eq!(reader.text("shared", key).await.unwrap(), "security");

    // Dropping one clone leaves the store running for the other.
    drop(writer);
    assert_eq!(
        reader.projects().await.unwrap(),
        vec!["shared".to_string()]
    );

    drop(reader);
    store.shutdown().await.unwrap();
}
