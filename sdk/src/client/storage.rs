use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::{MetadataPayload, SdkError, SdkResult, UploadedMetadata};

/// Durable storage for off-chain token metadata
#[async_trait]
pub trait MetadataUploader: Send + Sync {
    /// Store `payload` and return its content URI
    async fn upload_metadata(&self, payload: &MetadataPayload) -> SdkResult<UploadedMetadata>;
}

/// Uploads metadata documents to an HTTP storage gateway.
///
/// The gateway accepts the JSON payload as a POST body and answers with
/// `{ "uri": "..." }`.
pub struct HttpMetadataUploader {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpMetadataUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(60))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(timeout)
            .build();

        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetadataUploader for HttpMetadataUploader {
    async fn upload_metadata(&self, payload: &MetadataPayload) -> SdkResult<UploadedMetadata> {
        let body = serde_json::to_value(payload)?;
        debug!(endpoint = %self.endpoint, name = %payload.name, "uploading metadata");

        let uploaded = tokio::task::spawn_blocking({
            let agent = self.agent.clone();
            let endpoint = self.endpoint.clone();

            move || {
                let response = agent
                    .post(&endpoint)
                    .set("Content-Type", "application/json")
                    .send_json(body)
                    .map_err(|e| SdkError::Storage(e.to_string()))?;

                response
                    .into_json::<UploadedMetadata>()
                    .map_err(|e| SdkError::Storage(format!("Invalid upload response: {}", e)))
            }
        })
        .await
        .map_err(|e| SdkError::Storage(format!("Upload task failed: {}", e)))??;

        if uploaded.uri.is_empty() {
            return Err(SdkError::Storage("Upload returned an empty URI".to_string()));
        }

        Ok(uploaded)
    }
}
