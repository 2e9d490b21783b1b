//! # Brew Journal Binary
//!
//! The entry point that assembles the core services from the storage
//! plugins selected at compile time, loads the persisted collections, and
//! reports their state. The presentation layer drives the same services;
//! this binary doubles as a data-directory health check.

use std::path::PathBuf;
use std::sync::Arc;

use bj_core::models::{BrewingKit, Post};
use bj_services::{KitService, PostService, ProfileAggregate};

#[cfg(feature = "store-json")]
use bj_store_json::JsonRecordStore;

#[cfg(feature = "assets-local")]
use bj_assets_local::LocalAssetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let data_dir: PathBuf = std::env::var("BREW_JOURNAL_DATA_DIR")
        .unwrap_or_else(|_| "./data".to_string())
        .into();

    // 1. Initialize the asset store implementation
    #[cfg(feature = "assets-local")]
    let assets = Arc::new(LocalAssetStore::new(data_dir.join("assets")));

    // 2. Initialize one record store per collection
    #[cfg(feature = "store-json")]
    let post_store = Arc::new(JsonRecordStore::<Post>::new(&data_dir, "posts"));
    #[cfg(feature = "store-json")]
    let kit_store = Arc::new(JsonRecordStore::<BrewingKit>::new(&data_dir, "brewing_kits"));

    // 3. Assemble services (dynamic dispatch over the ports)
    let mut posts = PostService::new(post_store, assets.clone());
    let mut kits = KitService::new(kit_store, assets);
    let profile = ProfileAggregate::new(posts.subscribe_count());

    log::info!("☕ Brew Journal data dir: {}", data_dir.display());

    posts.load().await;
    kits.load().await;

    log::info!(
        "{} post(s) on record; profile count {}",
        posts.posts().len(),
        profile.post_count()
    );
    for (category, section) in kits.grouped() {
        log::info!("{category}: {} kit(s)", section.len());
    }

    Ok(())
}
