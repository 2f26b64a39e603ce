//! Status classifiers for Argus operations.

use resource_wait::{Classify, PollState};

use crate::model::{InstanceResponse, ScrapeConfigsResponse};

pub const CREATE_SUCCEEDED: &str = "CREATE_SUCCEEDED";
pub const CREATE_FAILED: &str = "CREATE_FAILED";
pub const UPDATE_SUCCEEDED: &str = "UPDATE_SUCCEEDED";
pub const UPDATE_FAILED: &str = "UPDATE_FAILED";
pub const DELETE_SUCCEEDED: &str = "DELETE_SUCCEEDED";
pub const DELETE_FAILED: &str = "DELETE_FAILED";

/// Instance lifecycle operations, each with its own status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceOperation {
    Create,
    Update,
    Delete,
}

impl InstanceOperation {
    /// Status reported once the operation has completed
    pub fn success_status(self) -> &'static str {
        match self {
            Self::Create => CREATE_SUCCEEDED,
            Self::Update => UPDATE_SUCCEEDED,
            Self::Delete => DELETE_SUCCEEDED,
        }
    }

    /// Status reported when the operation has failed
    pub fn failure_status(self) -> &'static str {
        match self {
            Self::Create => CREATE_FAILED,
            Self::Update => UPDATE_FAILED,
            Self::Delete => DELETE_FAILED,
        }
    }

    /// Classify a status token against this operation's vocabulary.
    ///
    /// Tokens belonging to other operations are just pending.
    pub fn classify_status(self, status: &str) -> PollState {
        if status == self.success_status() {
            PollState::Success
        } else if status == self.failure_status() {
            PollState::Failure(status.to_string())
        } else {
            PollState::Pending
        }
    }

    pub(crate) fn action_name(self) -> &'static str {
        match self {
            Self::Create => "creation",
            Self::Update => "update",
            Self::Delete => "deletion",
        }
    }
}

/// Classifies get-instance responses for one instance and operation.
#[derive(Debug, Clone)]
pub struct InstanceStatus {
    operation: InstanceOperation,
    instance_id: String,
}

impl InstanceStatus {
    pub fn new(operation: InstanceOperation, instance_id: impl Into<String>) -> Self {
        Self {
            operation,
            instance_id: instance_id.into(),
        }
    }
}

impl Classify<InstanceResponse> for InstanceStatus {
    fn classify(&self, response: &InstanceResponse) -> PollState {
        let (Some(id), Some(status)) = (response.id.as_deref(), response.status.as_deref()) else {
            return PollState::Malformed(
                "could not get instance id or status from response".to_string(),
            );
        };
        // A record for some other instance says nothing about ours
        if id != self.instance_id {
            return PollState::Pending;
        }
        self.operation.classify_status(status)
    }
}

/// Whether a scrape-config wait expects the job to exist or be gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPresence {
    Present,
    Absent,
}

/// Classifies scrape-config lists by membership of one job name.
///
/// There is no failure status for scrape configs: a job that never shows up
/// (or never goes away) runs into the timeout.
#[derive(Debug, Clone)]
pub struct ScrapeConfigStatus {
    expected: JobPresence,
    job_name: String,
}

impl ScrapeConfigStatus {
    pub fn new(expected: JobPresence, job_name: impl Into<String>) -> Self {
        Self {
            expected,
            job_name: job_name.into(),
        }
    }
}

impl Classify<ScrapeConfigsResponse> for ScrapeConfigStatus {
    fn classify(&self, response: &ScrapeConfigsResponse) -> PollState {
        let present = response.contains_job(&self.job_name);
        match (self.expected, present) {
            (JobPresence::Present, true) | (JobPresence::Absent, false) => PollState::Success,
            _ => PollState::Pending,
        }
    }
}
