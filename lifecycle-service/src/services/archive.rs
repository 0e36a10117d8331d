//! Archive ingestion reporting
//!
//! Forwards finished-stream metadata to the archive API as one form-encoded
//! POST. Errors are returned to the coordinator, which logs and swallows
//! them: archive ingestion is best-effort relative to the live-status path.

use crate::error::{AppError, Result};
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct ArchiveReporter {
    http: Client,
    endpoint: String,
    server_name: String,
}

impl ArchiveReporter {
    pub fn new(
        endpoint: String,
        server_name: String,
        timeout: Duration,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            server_name,
        })
    }

    /// Submit one archived stream. On success the remote acknowledgement
    /// body is returned opaquely.
    pub async fn report(
        &self,
        channel_id: &str,
        location: &str,
        duration_secs: f64,
        thumbnails: &[String],
    ) -> Result<String> {
        let mut form: Vec<(&str, String)> = vec![
            ("server", self.server_name.clone()),
            ("username", channel_id.to_string()),
            ("location", location.to_string()),
            ("duration", duration_secs.to_string()),
        ];
        for thumbnail in thumbnails {
            form.push(("thumbnails[]", thumbnail.clone()));
        }

        let response = self.http.post(&self.endpoint).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "archive api returned {status}: {body}"
            )));
        }

        Ok(body)
    }
}
