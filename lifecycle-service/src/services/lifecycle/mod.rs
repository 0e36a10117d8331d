//! Stream lifecycle coordination (business logic layer)
//!
//! Receives the webhook-driven lifecycle events and mediates the status
//! store, the streamer registry, the archive API and the signature RPC.
//! Authoritative live/offline failures are loud; best-effort notifications
//! (archive, registry) are logged and swallowed.

pub mod playback;

use crate::db::StatusStore;
use crate::error::Result;
use crate::metrics;
use crate::models::{StreamStatusUpdate, StreamStatusRecord, PLAYLIST_CONTENT_TYPE};
use crate::registry::StreamRegistry;
use crate::services::{ArchiveReporter, SignatureVerifier};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct LifecycleService {
    store: Arc<dyn StatusStore>,
    registry: Arc<dyn StreamRegistry>,
    verifier: SignatureVerifier,
    reporter: ArchiveReporter,
    cdn_base_url: String,
}

impl LifecycleService {
    pub fn new(
        store: Arc<dyn StatusStore>,
        registry: Arc<dyn StreamRegistry>,
        verifier: SignatureVerifier,
        reporter: ArchiveReporter,
        cdn_base_url: String,
    ) -> Self {
        Self {
            store,
            registry,
            verifier,
            reporter,
            cdn_base_url,
        }
    }

    /// Mark a channel live or offline (called on publish/unpublish webhooks).
    ///
    /// First call for a channel creates its record. Every call resets the
    /// playback URL to the direct form: a fresh publish starts in direct
    /// mode until a transcoder explicitly claims it. The store write happens
    /// before the registry notification; if the write fails the registry is
    /// never touched.
    pub async fn set_live_status(
        &self,
        channel_id: &str,
        is_live: bool,
    ) -> Result<StreamStatusRecord> {
        let channel_id = channel_id.to_lowercase();

        let update = StreamStatusUpdate {
            live: Some(is_live),
            playback_url: Some(playback::direct_playback_url(&self.cdn_base_url, &channel_id)),
            content_type: Some(PLAYLIST_CONTENT_TYPE.to_string()),
            thumbnail_url: Some(playback::thumbnail_url(&self.cdn_base_url, &channel_id)),
        };
        let record = self.store.upsert(&channel_id, update).await?;

        let notified = if is_live {
            self.registry.add_streamer(&channel_id).await
        } else {
            self.registry.remove_streamer(&channel_id).await
        };
        if let Err(e) = notified {
            warn!(%channel_id, error = %e, "failed to notify streamer registry");
        }

        info!(%channel_id, live = is_live, "stream live status updated");
        metrics::record_webhook_event("live", "ok");
        Ok(record)
    }

    /// Switch a live channel between direct playback and a transcoded
    /// location (called by the transcoder's webhooks).
    ///
    /// `location = Some(..)` selects the transcoded playlist form, `None`
    /// reverts to direct. Unknown channels are a logged no-op, not an error:
    /// a transcode webhook can race a concurrent offline transition.
    pub async fn set_transcode_status(
        &self,
        channel_id: &str,
        location: Option<&str>,
    ) -> Result<Option<StreamStatusRecord>> {
        let channel_id = channel_id.to_lowercase();

        if self.store.get(&channel_id).await?.is_none() {
            warn!(%channel_id, "transcode status change for unknown streamer, ignoring");
            metrics::record_webhook_event("transcode", "unknown_streamer");
            return Ok(None);
        }

        let playback_url = match location {
            Some(location) => {
                playback::transcoded_playback_url(&self.cdn_base_url, location, &channel_id)
            }
            None => playback::direct_playback_url(&self.cdn_base_url, &channel_id),
        };

        let update = StreamStatusUpdate {
            playback_url: Some(playback_url),
            ..Default::default()
        };
        let record = self.store.upsert(&channel_id, update).await?;

        info!(
            %channel_id,
            transcoded = location.is_some(),
            "stream transcode status updated"
        );
        metrics::record_webhook_event("transcode", "ok");
        Ok(Some(record))
    }

    /// Whether recordings of this channel should be archived.
    ///
    /// Unknown channels answer `false`; the diagnostic is distinct from a
    /// known channel with archiving disabled so operators can tell the two
    /// apart in the logs.
    pub async fn check_archive(&self, channel_id: &str) -> Result<bool> {
        let channel_id = channel_id.to_lowercase();

        match self.store.get(&channel_id).await? {
            Some(record) => Ok(record.archive_enabled),
            None => {
                warn!(%channel_id, "archive check for unknown streamer");
                Ok(false)
            }
        }
    }

    /// Forward finished-stream metadata to the archive API.
    ///
    /// Never fails the caller: archive ingestion is best-effort, and the
    /// status record is neither consulted nor mutated here.
    pub async fn save_archive(
        &self,
        channel_id: &str,
        location: &str,
        duration_secs: f64,
        thumbnails: &[String],
    ) -> Result<()> {
        let channel_id = channel_id.to_lowercase();

        match self
            .reporter
            .report(&channel_id, location, duration_secs, thumbnails)
            .await
        {
            Ok(ack) => {
                debug!(%channel_id, %ack, "archive report acknowledged");
                metrics::record_archive_report("ok");
            }
            Err(e) => {
                warn!(%channel_id, error = %e, "failed to report archive");
                metrics::record_archive_report("error");
            }
        }

        Ok(())
    }

    /// Check a claimed channel identity against the signature RPC.
    ///
    /// Pure passthrough with audit logging; callers must not honor a
    /// transcode-location switch without a prior successful check for the
    /// same channel and signature.
    pub async fn verify_signature(
        &self,
        channel_id: &str,
        data_hex: &str,
        signature: &str,
        signing_ts: &str,
    ) -> bool {
        let channel_id = channel_id.to_lowercase();

        info!(%channel_id, %signing_ts, "verifying channel signature");
        let valid = self
            .verifier
            .verify(&channel_id, data_hex, signature, signing_ts)
            .await;
        info!(%channel_id, valid, "channel signature verification finished");
        valid
    }
}
