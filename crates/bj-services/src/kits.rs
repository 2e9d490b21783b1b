//! # KitService
//!
//! Create/edit/delete over brewing kits. Kits live in one flat collection
//! (array order preserved) and are only grouped by category for display;
//! the grouped view is never persisted.

use std::collections::BTreeMap;
use std::sync::Arc;

use bj_core::error::{AppError, Result};
use bj_core::models::{BrewingKit, CategoryChoice};
use bj_core::traits::{AssetStore, RecordStore};
use uuid::Uuid;

/// Input for a new kit from the add-kit form.
#[derive(Debug)]
pub struct KitDraft {
    pub name: String,
    pub description: String,
    /// At most one photo per kit.
    pub image: Option<Vec<u8>>,
    pub category: CategoryChoice,
}

/// Request/response edit for a kit; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct KitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replacement photo. The previous asset file is left behind.
    pub image: Option<Vec<u8>>,
    pub category: Option<CategoryChoice>,
}

pub struct KitService {
    store: Arc<dyn RecordStore<BrewingKit>>,
    assets: Arc<dyn AssetStore>,
    kits: Vec<BrewingKit>,
}

impl KitService {
    pub fn new(store: Arc<dyn RecordStore<BrewingKit>>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            assets,
            kits: Vec::new(),
        }
    }

    /// Replaces in-memory state from the persisted collection.
    pub async fn load(&mut self) -> &[BrewingKit] {
        self.kits = self.store.load_all().await;
        &self.kits
    }

    /// The flat collection in storage (insertion) order.
    pub fn kits(&self) -> &[BrewingKit] {
        &self.kits
    }

    /// Display grouping: categories in lexicographic order, kits in
    /// insertion order within each. A view concern only.
    pub fn grouped(&self) -> BTreeMap<String, Vec<BrewingKit>> {
        let mut groups: BTreeMap<String, Vec<BrewingKit>> = BTreeMap::new();
        for kit in &self.kits {
            groups.entry(kit.category.clone()).or_default().push(kit.clone());
        }
        groups
    }

    /// Creates a kit and appends it to the collection.
    ///
    /// An empty name is rejected. The category choice is resolved so the
    /// stored category is never empty; a failed image save just means the
    /// kit has no photo.
    pub async fn create(&mut self, draft: KitDraft) -> Result<BrewingKit> {
        if draft.name.is_empty() {
            return Err(AppError::ValidationError("kit name is empty".into()));
        }

        let mut image_name = None;
        if let Some(bytes) = &draft.image {
            image_name = self.assets.save(bytes).await;
        }

        let kit = BrewingKit::new(
            draft.name,
            draft.description,
            image_name,
            draft.category.resolve(),
        );
        self.kits.push(kit.clone());
        log::info!("created brewing kit {} in {:?}", kit.id, kit.category);

        self.persist().await?;
        Ok(kit)
    }

    /// Applies an edit to the kit with `id`; the id never changes.
    pub async fn update(&mut self, id: Uuid, update: KitUpdate) -> Result<BrewingKit> {
        // Check existence before touching the asset store so a bad id does
        // not strand freshly written files.
        if !self.kits.iter().any(|k| k.id == id) {
            return Err(AppError::NotFound("BrewingKit".into(), id.to_string()));
        }

        let mut image_name = None;
        if let Some(bytes) = &update.image {
            image_name = self.assets.save(bytes).await;
        }

        let kit = self
            .kits
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| AppError::NotFound("BrewingKit".into(), id.to_string()))?;

        if let Some(name) = update.name {
            kit.name = name;
        }
        if let Some(description) = update.description {
            kit.description = description;
        }
        if let Some(name) = image_name {
            // Old asset file stays on disk; only the reference moves.
            kit.image_name = Some(name);
        }
        if let Some(choice) = update.category {
            kit.category = choice.resolve();
        }
        let updated = kit.clone();

        self.persist().await?;
        Ok(updated)
    }

    /// Removes the kit with `id`; an unknown id is a no-op.
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.kits.len();
        self.kits.retain(|k| k.id != id);
        if self.kits.len() == before {
            return Ok(());
        }
        self.persist().await
    }

    /// Removes kits by their row offsets within one displayed category
    /// section. A position inside the grouped view is not a global index,
    /// so offsets are translated to ids before anything is removed.
    pub async fn delete_in_category(&mut self, category: &str, positions: &[usize]) -> Result<()> {
        let section: Vec<Uuid> = self
            .kits
            .iter()
            .filter(|k| k.category == category)
            .map(|k| k.id)
            .collect();

        let doomed: Vec<Uuid> = positions
            .iter()
            .filter_map(|&i| section.get(i).copied())
            .collect();
        if doomed.is_empty() {
            return Ok(());
        }

        self.kits.retain(|k| !doomed.contains(&k.id));
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        self.store.save_all(&self.kits).await
    }
}
