//! # bj-services
//!
//! Business operations over the journal's records. Services own the
//! in-memory collection, go through the `RecordStore`/`AssetStore` ports
//! for durability, and publish derived state (the post count) over a
//! watch channel instead of letting observers reach into shared state.
//!
//! The model is a single cooperative caller: mutations take `&mut self`,
//! every mutation persists the whole collection immediately, and the last
//! save wins.

pub mod kits;
pub mod posts;
pub mod profile;

pub use kits::{KitDraft, KitService, KitUpdate};
pub use posts::{PostDraft, PostService, PostUpdate, SharePayload};
pub use profile::ProfileAggregate;
