//! The API accessor the waiters poll through.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{InstanceResponse, ScrapeConfigsResponse};

/// Error returned by an Argus API call.
#[derive(Debug, Clone, Error)]
#[error("Argus API request failed with status {status_code}: {message}")]
pub struct ApiError {
    /// HTTP status code of the failed request
    pub status_code: u16,
    /// Error body or description
    pub message: String,
}

impl ApiError {
    /// Create an API error with the given status code and message
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

/// Read operations of the Argus API used by the waiters.
///
/// Implemented by the HTTP client. Implementations must be safe to share
/// between concurrently running waiters.
#[async_trait]
pub trait ArgusApi: Send + Sync {
    /// Fetch an instance
    async fn get_instance(
        &self,
        instance_id: &str,
        project_id: &str,
    ) -> Result<InstanceResponse, ApiError>;

    /// List the scrape configs of an instance
    async fn get_scrape_configs(
        &self,
        instance_id: &str,
        project_id: &str,
    ) -> Result<ScrapeConfigsResponse, ApiError>;
}
