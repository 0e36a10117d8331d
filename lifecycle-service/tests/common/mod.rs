//! Shared test fixtures: in-memory fakes for the status store and the
//! streamer registry, plus helpers to assemble a coordinator around them.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use lifecycle_service::db::StatusStore;
use lifecycle_service::error::{AppError, Result};
use lifecycle_service::models::{StreamStatusRecord, StreamStatusUpdate};
use lifecycle_service::registry::StreamRegistry;
use lifecycle_service::services::{ArchiveReporter, LifecycleService, SignatureVerifier};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CDN_BASE: &str = "https://cdn.livecast.example";

/// In-memory status store with the same merge semantics as the Postgres
/// repository. Writes can be made to fail to exercise the loud path.
#[derive(Default)]
pub struct InMemoryStatusStore {
    records: Mutex<HashMap<String, StreamStatusRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryStatusStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, record: StreamStatusRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.channel_id.clone(), record);
    }

    pub fn set_archive_enabled(&self, channel_id: &str, enabled: bool) {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&channel_id.to_lowercase()) {
            record.archive_enabled = enabled;
        }
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn record(&self, channel_id: &str) -> Option<StreamStatusRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&channel_id.to_lowercase())
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn upsert(
        &self,
        channel_id: &str,
        update: StreamStatusUpdate,
    ) -> Result<StreamStatusRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database("injected store failure".to_string()));
        }

        let key = channel_id.to_lowercase();
        let mut records = self.records.lock().unwrap();
        let record = records.entry(key.clone()).or_insert_with(|| StreamStatusRecord {
            channel_id: key.clone(),
            live: false,
            playback_url: String::new(),
            content_type: String::new(),
            thumbnail_url: String::new(),
            archive_enabled: false,
            updated_at: Utc::now(),
        });

        if let Some(live) = update.live {
            record.live = live;
        }
        if let Some(playback_url) = update.playback_url {
            record.playback_url = playback_url;
        }
        if let Some(content_type) = update.content_type {
            record.content_type = content_type;
        }
        if let Some(thumbnail_url) = update.thumbnail_url {
            record.thumbnail_url = thumbnail_url;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn get(&self, channel_id: &str) -> Result<Option<StreamStatusRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&channel_id.to_lowercase())
            .cloned())
    }
}

/// Registry fake that records every notification in order.
#[derive(Default)]
pub struct RecordingRegistry {
    calls: Mutex<Vec<(&'static str, String)>>,
    fail: AtomicBool,
}

impl RecordingRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_calls(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamRegistry for RecordingRegistry {
    async fn add_streamer(&self, channel_id: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Registry("injected registry failure".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(("add", channel_id.to_string()));
        Ok(())
    }

    async fn remove_streamer(&self, channel_id: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Registry("injected registry failure".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(("remove", channel_id.to_string()));
        Ok(())
    }
}

/// Verifier pointed at a port nothing listens on.
pub fn unreachable_verifier() -> SignatureVerifier {
    SignatureVerifier::new("http://127.0.0.1:1/rpc".to_string(), Duration::from_millis(250))
        .expect("failed to build verifier")
}

/// Reporter pointed at a port nothing listens on.
pub fn unreachable_reporter() -> ArchiveReporter {
    ArchiveReporter::new(
        "http://127.0.0.1:1/archive".to_string(),
        "edge-test".to_string(),
        Duration::from_millis(250),
    )
    .expect("failed to build reporter")
}

pub fn service_with(
    store: Arc<InMemoryStatusStore>,
    registry: Arc<RecordingRegistry>,
    verifier: SignatureVerifier,
    reporter: ArchiveReporter,
) -> LifecycleService {
    LifecycleService::new(store, registry, verifier, reporter, CDN_BASE.to_string())
}

pub fn service(
    store: Arc<InMemoryStatusStore>,
    registry: Arc<RecordingRegistry>,
) -> LifecycleService {
    service_with(store, registry, unreachable_verifier(), unreachable_reporter())
}
