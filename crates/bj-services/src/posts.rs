//! # PostService
//!
//! Create/edit/delete/search over the journal's posts, plus assembly of
//! share payloads. Every mutation rewrites the whole persisted collection
//! and publishes the new post count for profile observers.

use std::sync::Arc;

use bj_core::error::{AppError, Result};
use bj_core::models::{Coordinate, Post};
use bj_core::traits::{AssetStore, RecordStore};
use tokio::sync::watch;
use uuid::Uuid;

/// Input for a new post, straight from the compose form and pickers.
#[derive(Debug, Default)]
pub struct PostDraft {
    pub content: String,
    /// Raw picker bytes; each is saved through the asset store and only
    /// successful saves end up referenced by the post.
    pub images: Vec<Vec<u8>>,
    pub location: Option<Coordinate>,
}

/// Request/response edit: the caller sends the changed values and the id,
/// and never holds a reference into the stored collection.
#[derive(Debug, Default)]
pub struct PostUpdate {
    /// Replacement content; `None` leaves the text untouched.
    pub content: Option<String>,
    /// Extra picker images appended to the post's gallery.
    pub new_images: Vec<Vec<u8>>,
}

/// What the share sheet receives: text plus at most one resolved image.
#[derive(Debug)]
pub struct SharePayload {
    pub text: String,
    pub image: Option<Vec<u8>>,
}

pub struct PostService {
    store: Arc<dyn RecordStore<Post>>,
    assets: Arc<dyn AssetStore>,
    posts: Vec<Post>,
    count_tx: watch::Sender<usize>,
}

impl PostService {
    pub fn new(store: Arc<dyn RecordStore<Post>>, assets: Arc<dyn AssetStore>) -> Self {
        let (count_tx, _) = watch::channel(0);
        Self {
            store,
            assets,
            posts: Vec::new(),
            count_tx,
        }
    }

    /// Replaces in-memory state from the persisted collection and publishes
    /// the count. A missing or corrupt blob loads as empty.
    pub async fn load(&mut self) -> &[Post] {
        self.posts = self.store.load_all().await;
        self.publish_count();
        &self.posts
    }

    /// The full collection, most recent first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Count-changed notifications for profile observers. The receiver
    /// always holds the latest published value.
    pub fn subscribe_count(&self) -> watch::Receiver<usize> {
        self.count_tx.subscribe()
    }

    /// Creates a post and prepends it to the collection (most-recent-first).
    ///
    /// Empty content is rejected and nothing changes. Images that fail to
    /// save are dropped from the post rather than retried; the post still
    /// goes through with whatever assets were produced.
    pub async fn create(&mut self, draft: PostDraft) -> Result<Post> {
        if draft.content.is_empty() {
            return Err(AppError::ValidationError("post content is empty".into()));
        }

        let mut image_names = Vec::with_capacity(draft.images.len());
        for bytes in &draft.images {
            if let Some(name) = self.assets.save(bytes).await {
                image_names.push(name);
            }
        }

        let post = Post::new(draft.content, image_names, draft.location);
        self.posts.insert(0, post.clone());
        log::info!("created post {}", post.id);

        let saved = self.persist().await;
        self.publish_count();
        saved.map(|_| post)
    }

    /// Applies an edit to the post with `id`. The id and creation date
    /// never change.
    pub async fn update(&mut self, id: Uuid, update: PostUpdate) -> Result<Post> {
        // Check existence before touching the asset store so a bad id does
        // not strand freshly written files.
        if !self.posts.iter().any(|p| p.id == id) {
            return Err(AppError::NotFound("Post".into(), id.to_string()));
        }

        let mut new_names = Vec::with_capacity(update.new_images.len());
        for bytes in &update.new_images {
            if let Some(name) = self.assets.save(bytes).await {
                new_names.push(name);
            }
        }

        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post".into(), id.to_string()))?;

        if let Some(content) = update.content {
            post.content = content;
        }
        post.image_names.extend(new_names);
        let updated = post.clone();

        self.persist().await?;
        Ok(updated)
    }

    /// Drops one image reference from a post's gallery. The asset file is
    /// left in place (assets are never reclaimed); an unknown image name
    /// is a no-op.
    pub async fn remove_image(&mut self, id: Uuid, image_name: &str) -> Result<Post> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post".into(), id.to_string()))?;

        let before = post.image_names.len();
        post.image_names.retain(|name| name != image_name);
        let updated = post.clone();

        if updated.image_names.len() != before {
            self.persist().await?;
        }
        Ok(updated)
    }

    /// Removes the post with `id`. Deleting an id that is not present is a
    /// no-op, not an error.
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            return Ok(());
        }
        log::info!("deleted post {id}");

        let saved = self.persist().await;
        self.publish_count();
        saved
    }

    /// Row-offset variant backing the list's swipe-to-delete. Offsets out
    /// of range are ignored.
    pub async fn delete_at(&mut self, positions: &[usize]) -> Result<()> {
        let doomed: Vec<Uuid> = positions
            .iter()
            .filter_map(|&i| self.posts.get(i))
            .map(|p| p.id)
            .collect();
        if doomed.is_empty() {
            return Ok(());
        }

        self.posts.retain(|p| !doomed.contains(&p.id));
        let saved = self.persist().await;
        self.publish_count();
        saved
    }

    /// Case-insensitive substring filter over content. The empty query
    /// returns the full collection in order. Read-only: never persisted,
    /// never reorders the backing collection.
    pub fn search(&self, query: &str) -> Vec<Post> {
        if query.is_empty() {
            return self.posts.clone();
        }
        let needle = query.to_lowercase();
        self.posts
            .iter()
            .filter(|p| p.content.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Content plus the first image reference that actually resolves.
    /// Degrades to text-only when no image loads.
    pub async fn share_payload(&self, id: Uuid) -> Result<SharePayload> {
        let post = self
            .posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post".into(), id.to_string()))?;

        let mut image = None;
        for name in &post.image_names {
            if let Some(bytes) = self.assets.load(name).await {
                image = Some(bytes);
                break;
            }
        }

        Ok(SharePayload {
            text: post.content.clone(),
            image,
        })
    }

    /// Saves the whole collection. On failure the in-memory mutation is
    /// kept and the error goes to the caller, who may re-invoke.
    async fn persist(&self) -> Result<()> {
        self.store.save_all(&self.posts).await
    }

    fn publish_count(&self) {
        self.count_tx.send_replace(self.posts.len());
    }
}
