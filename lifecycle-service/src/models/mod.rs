//! Data model for per-channel stream status

use chrono::{DateTime, Utc};
use serde::Serialize;

/// MIME type served for HLS playlists.
pub const PLAYLIST_CONTENT_TYPE: &str = "application/x-mpegurl";

/// Authoritative status record for one streaming channel.
///
/// Keyed by the lowercased channel id; absence of a record means the channel
/// has never published, which is distinct from an offline channel.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct StreamStatusRecord {
    pub channel_id: String,
    pub live: bool,
    pub playback_url: String,
    pub content_type: String,
    pub thumbnail_url: String,
    pub archive_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Partial update merged into a status record by the store.
///
/// `None` fields keep their stored value. `archive_enabled` has no field
/// here: it is operator-seeded and never written by this service.
#[derive(Debug, Clone, Default)]
pub struct StreamStatusUpdate {
    pub live: Option<bool>,
    pub playback_url: Option<String>,
    pub content_type: Option<String>,
    pub thumbnail_url: Option<String>,
}
