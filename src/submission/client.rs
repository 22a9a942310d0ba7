//! HTTP transport to the Google Apps Script spreadsheet endpoint.

use async_trait::async_trait;
use std::fmt;

use super::payload::SubmissionPayload;
use crate::types::{Error, Result, SubmissionConfig};

/// Delivers a validated intake request somewhere.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()>;
}

/// Posts payloads as JSON to the configured Apps Script URL.
///
/// The endpoint's response is treated as opaque: only transport failures are
/// reported. After the request completes the client waits
/// `settle_delay` before declaring success.
pub struct SheetsClient {
    http: reqwest::Client,
    config: SubmissionConfig,
}

impl fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsClient")
            .field("script_url", &self.config.script_url)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    pub fn new(config: SubmissionConfig) -> Result<Self> {
        if config.is_placeholder() {
            tracing::warn!(
                script_url = %config.script_url,
                "spreadsheet endpoint still uses the placeholder URL; \
                 configure the Apps Script deployment"
            );
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::config(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Submitter for SheetsClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
        tracing::info!(service = %payload.service, "sending intake request");

        let response = self
            .http
            .post(&self.config.script_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "spreadsheet endpoint unreachable");
                Error::Submission(e)
            })?;
        tracing::debug!(status = %response.status(), "spreadsheet endpoint responded");

        tokio::time::sleep(self.config.settle_delay).await;
        tracing::info!(service = %payload.service, "intake request delivered");
        Ok(())
    }
}
