//! Minimal editing session against a file-backed store.
//!
//! Run with `cargo run -p asset-store --example editor_session`; set
//! `RUST_LOG=asset_store=debug` to watch the workers.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use asset_model::{
    GameObjectProperties, HeightUnit, LevelObjectTemplate, ObjectTriple, ResourceKey, ResourceType,
    TileProperties, TileType,
};
use asset_store::{AssetStore, DataStore, FileProjectRepository};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let dir = tempfile::tempdir()?;
    let store = AssetStore::builder()
        .repository(FileProjectRepository::new(dir.path())?)
        .build()
        .await;
    let handle = store.handle();

    handle.new_project("citadel").await?;

    // Describe an object template, then place one instance on level 1.
    let triple = ObjectTriple::new(0, 2, 8);
    handle
        .set_game_object(
            "citadel",
            triple,
            GameObjectProperties {
                short_name: Some("rapier".to_string()),
                default_hitpoints: Some(40),
                ..GameObjectProperties::default()
            },
        )
        .await?;
    let placed = handle
        .add_level_object("citadel", "alpha", 1, LevelObjectTemplate::at(triple, 30, 22))
        .await?;
    println!("placed object {} at tile (30, 22)", placed.id);

    // Carve the tile under it open.
    let tile = handle
        .set_tile(
            "citadel",
            "alpha",
            1,
            30,
            22,
            TileProperties {
                tile_type: Some(TileType::Open),
                floor_height: Some(HeightUnit(4)),
                ceiling_height: Some(HeightUnit(22)),
                ..TileProperties::default()
            },
        )
        .await?;
    let walls = tile.calculated_wall_heights.map(|walls| walls.north.0);
    println!("north wall spans {walls:?} height units");

    handle
        .set_text(
            "citadel",
            ResourceKey::new(ResourceType::SCREEN_MESSAGES, 3),
            "POWER RESTORED".to_string(),
        )
        .await?;

    handle.save_project("citadel").await;
    drop(handle);
    store.shutdown().await?;
    println!("project saved under {}", dir.path().display());

    Ok(())
}
