//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the services.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{BrewingKit, Post};

/// A persistable record with a unique, immutable id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn record_id(&self) -> Uuid;
}

impl Record for Post {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Record for BrewingKit {
    fn record_id(&self) -> Uuid {
        self.id
    }
}

/// Whole-collection persistence contract.
///
/// The collection is one encoded blob: every mutation saves the complete
/// updated sequence, overwriting prior state. There is no incremental
/// persistence and no transaction log; the design assumes a single active
/// writer.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Decodes the persisted collection. A missing blob or a decode failure
    /// degrades to the empty collection; it is never surfaced as an error.
    async fn load_all(&self) -> Vec<T>;

    /// Encodes and writes the entire collection. Failure is reported to the
    /// caller but in-memory state is never rolled back.
    async fn save_all(&self, records: &[T]) -> Result<()>;
}

/// Binary image asset contract.
///
/// Assets degrade rather than fail: a save that cannot produce a file
/// yields `None` ("no image attached"), and a load of a missing or
/// corrupt file yields `None` ("renders without that image"). Neither
/// path may crash a read.
///
/// There is deliberately no `delete`: asset lifecycle is tied only to
/// being referenced from a live record, never actively reclaimed.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Re-encodes the raw bytes as a JPEG under a freshly generated unique
    /// filename and returns that filename, or `None` if encoding or the
    /// write failed.
    async fn save(&self, bytes: &[u8]) -> Option<String>;

    /// Returns the stored bytes for `name`, or `None` if the file does not
    /// exist or cannot be decoded as an image.
    async fn load(&self, name: &str) -> Option<Vec<u8>>;
}
