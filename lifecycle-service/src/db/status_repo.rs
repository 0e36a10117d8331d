use crate::db::StatusStore;
use crate::error::Result;
use crate::models::{StreamStatusRecord, StreamStatusUpdate};
use async_trait::async_trait;
use sqlx::PgPool;

/// Postgres-backed status record store.
///
/// A single `INSERT .. ON CONFLICT DO UPDATE` per upsert keeps the merge
/// atomic per key; concurrent readers never observe a partial merge.
#[derive(Clone)]
pub struct StatusRepository {
    pool: PgPool,
}

impl StatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for StatusRepository {
    async fn upsert(
        &self,
        channel_id: &str,
        update: StreamStatusUpdate,
    ) -> Result<StreamStatusRecord> {
        let channel_id = channel_id.to_lowercase();

        let record = sqlx::query_as::<_, StreamStatusRecord>(
            r#"
            INSERT INTO stream_status (channel_id, live, playback_url, content_type, thumbnail_url)
            VALUES ($1, COALESCE($2, FALSE), COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''))
            ON CONFLICT (channel_id) DO UPDATE
            SET live = COALESCE($2, stream_status.live),
                playback_url = COALESCE($3, stream_status.playback_url),
                content_type = COALESCE($4, stream_status.content_type),
                thumbnail_url = COALESCE($5, stream_status.thumbnail_url),
                updated_at = NOW()
            RETURNING channel_id, live, playback_url, content_type, thumbnail_url,
                      archive_enabled, updated_at
            "#,
        )
        .bind(&channel_id)
        .bind(update.live)
        .bind(update.playback_url)
        .bind(update.content_type)
        .bind(update.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get(&self, channel_id: &str) -> Result<Option<StreamStatusRecord>> {
        let channel_id = channel_id.to_lowercase();

        let record = sqlx::query_as::<_, StreamStatusRecord>(
            r#"
            SELECT channel_id, live, playback_url, content_type, thumbnail_url,
                   archive_enabled, updated_at
            FROM stream_status
            WHERE channel_id = $1
            "#,
        )
        .bind(&channel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
