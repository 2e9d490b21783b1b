//! # ProfileAggregate
//!
//! Derived profile state. The post count is pure derived data: it is
//! published by `PostService` after every mutating operation and only
//! observed here, never computed or adjusted independently. Observers
//! subscribe to the count channel instead of reaching into shared state.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

pub struct ProfileAggregate {
    join_date: DateTime<Utc>,
    membership_status: String,
    post_count: watch::Receiver<usize>,
}

impl ProfileAggregate {
    /// Placeholder profile details until accounts are real: joined 30 days
    /// ago, premium membership.
    pub fn new(post_count: watch::Receiver<usize>) -> Self {
        Self::with_details(
            Utc::now() - Duration::days(30),
            "Premium Member".to_string(),
            post_count,
        )
    }

    pub fn with_details(
        join_date: DateTime<Utc>,
        membership_status: String,
        post_count: watch::Receiver<usize>,
    ) -> Self {
        Self {
            join_date,
            membership_status,
            post_count,
        }
    }

    /// The latest count published by the post service.
    pub fn post_count(&self) -> usize {
        *self.post_count.borrow()
    }

    pub fn join_date(&self) -> DateTime<Utc> {
        self.join_date
    }

    pub fn membership_status(&self) -> &str {
        &self.membership_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::{PostDraft, PostService};
    use crate::testing::{MemoryAssetStore, MemoryRecordStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_profile_tracks_post_service_mutations() {
        let mut svc = PostService::new(
            Arc::new(MemoryRecordStore::<bj_core::models::Post>::new()),
            Arc::new(MemoryAssetStore::new()),
        );
        let profile = ProfileAggregate::new(svc.subscribe_count());
        assert_eq!(profile.post_count(), 0);

        let post = svc
            .create(PostDraft {
                content: "first crack".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(profile.post_count(), 1);

        svc.delete(post.id).await.unwrap();
        assert_eq!(profile.post_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_defaults() {
        let (_tx, rx) = watch::channel(0);
        let profile = ProfileAggregate::new(rx);

        assert_eq!(profile.membership_status(), "Premium Member");
        assert!(profile.join_date() < Utc::now());
    }
}
