//! Status record store
//!
//! One document per channel, keyed by the lowercased channel id. The store
//! is the only shared mutable resource in the service; per-key atomicity
//! comes from the backing database, not from in-process locking.

pub mod status_repo;

pub use status_repo::StatusRepository;

use crate::error::Result;
use crate::models::{StreamStatusRecord, StreamStatusUpdate};
use async_trait::async_trait;

/// Keyed upsert/get over status records.
///
/// `upsert` merges the populated fields of the update into the record,
/// creating it if absent, and stamps `updated_at` with the store clock.
/// Transient store errors propagate; recovery is the caller's decision.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn upsert(
        &self,
        channel_id: &str,
        update: StreamStatusUpdate,
    ) -> Result<StreamStatusRecord>;

    async fn get(&self, channel_id: &str) -> Result<Option<StreamStatusRecord>>;
}
