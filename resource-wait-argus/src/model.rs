//! Argus API records read by the waiters.
//!
//! Only the fields the waiters need (plus a few useful for diagnostics) are
//! modelled. Every field is optional: the API omits fields freely, and the
//! classifiers must tell "not set" apart from an empty value.

use serde::{Deserialize, Serialize};

/// Response of the get-instance operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of the list-scrape-configs operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeConfigsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Job>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScrapeConfigsResponse {
    /// Whether a scrape config with `job_name` is in the list
    pub fn contains_job(&self, job_name: &str) -> bool {
        self.data
            .iter()
            .flatten()
            .any(|job| job.job_name.as_deref() == Some(job_name))
    }
}

/// A single scrape config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_interval: Option<String>,
}

impl Job {
    /// A job with only its name set
    pub fn named(job_name: impl Into<String>) -> Self {
        Self {
            job_name: Some(job_name.into()),
            ..Default::default()
        }
    }
}
