//! # bj-store-json
//! brew-journal/crates/bj-plugins/bj-store-json/src/lib.rs
//! Filesystem implementation of `RecordStore`: one JSON blob per collection,
//! encoded and rewritten whole on every mutation. Saves go through a
//! write-temp-then-rename so a crash mid-save never leaves a truncated
//! blob behind.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bj_core::error::Result;
use bj_core::traits::{Record, RecordStore};
use tokio::fs;

/// Stores one collection of `T` as `<dir>/<collection>.json`.
pub struct JsonRecordStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> JsonRecordStore<T> {
    /// `collection` becomes the blob's file stem (e.g., "posts", "brewing_kits").
    pub fn new(dir: impl AsRef<Path>, collection: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{collection}.json")),
            _record: PhantomData,
        }
    }

    /// Location of the collection blob, mainly useful in diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for JsonRecordStore<T> {
    /// Reads and decodes the collection blob.
    ///
    /// A missing file is the normal first-run case and yields the empty
    /// collection. An unreadable or undecodable blob also yields the empty
    /// collection, logged at `warn` — the read path must never crash on
    /// corrupt state.
    async fn load_all(&self) -> Vec<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                log::warn!("failed to read {}: {err}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                log::warn!(
                    "discarding undecodable collection blob {}: {err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Encodes the full collection and atomically replaces the blob.
    async fn save_all(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write a sibling temp file first so the live blob is replaced in a
        // single rename, never observed half-written.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        log::debug!(
            "saved {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
