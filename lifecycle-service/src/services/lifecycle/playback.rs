//! Playback and thumbnail URL derivation
//!
//! `playback_url` is never read before being recomputed; these functions are
//! the single source of truth for the URL shapes the players depend on.

/// Un-transcoded live playlist, straight from the ingest pipeline.
pub fn direct_playback_url(cdn_base: &str, channel_id: &str) -> String {
    format!("{}/hls/{}/index.m3u8", cdn_base.trim_end_matches('/'), channel_id)
}

/// Playlist for a named transcode output variant, e.g. `transcode_480`.
/// `location` is embedded verbatim; its validity is the transcoder's problem.
pub fn transcoded_playback_url(cdn_base: &str, location: &str, channel_id: &str) -> String {
    format!(
        "{}/{}/{}.m3u8",
        cdn_base.trim_end_matches('/'),
        location,
        channel_id
    )
}

pub fn thumbnail_url(cdn_base: &str, channel_id: &str) -> String {
    format!("{}/preview/{}.jpg", cdn_base.trim_end_matches('/'), channel_id)
}
