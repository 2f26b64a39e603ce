//! Poll sources bound to one Argus resource.

use std::sync::Arc;

use async_trait::async_trait;
use log::trace;
use resource_wait::{BoxError, PollSource};

use crate::api::ArgusApi;
use crate::model::{InstanceResponse, ScrapeConfigsResponse};

/// Fetches one instance.
pub struct InstanceSource<A: ?Sized> {
    api: Arc<A>,
    instance_id: String,
    project_id: String,
}

impl<A: ArgusApi + ?Sized> InstanceSource<A> {
    pub fn new(api: Arc<A>, instance_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api,
            instance_id: instance_id.into(),
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl<A: ArgusApi + ?Sized> PollSource for InstanceSource<A> {
    type Output = InstanceResponse;

    async fn fetch(&self) -> Result<InstanceResponse, BoxError> {
        trace!(
            "Fetching instance {} in project {}",
            self.instance_id,
            self.project_id
        );
        let response = self
            .api
            .get_instance(&self.instance_id, &self.project_id)
            .await?;
        Ok(response)
    }
}

/// Fetches the scrape-config list of one instance.
pub struct ScrapeConfigsSource<A: ?Sized> {
    api: Arc<A>,
    instance_id: String,
    project_id: String,
}

impl<A: ArgusApi + ?Sized> ScrapeConfigsSource<A> {
    pub fn new(api: Arc<A>, instance_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api,
            instance_id: instance_id.into(),
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl<A: ArgusApi + ?Sized> PollSource for ScrapeConfigsSource<A> {
    type Output = ScrapeConfigsResponse;

    async fn fetch(&self) -> Result<ScrapeConfigsResponse, BoxError> {
        trace!(
            "Listing scrape configs of instance {} in project {}",
            self.instance_id,
            self.project_id
        );
        let response = self
            .api
            .get_scrape_configs(&self.instance_id, &self.project_id)
            .await?;
        Ok(response)
    }
}
