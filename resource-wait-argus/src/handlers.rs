//! Wait handler factories, one per Argus operation.
//!
//! Each factory binds a poll source and classifier to the addressed resource
//! and returns a builder preset with the operation's default timeout. Adjust
//! timing on the builder if needed, then `build()` and `wait()`.

use std::sync::Arc;
use std::time::Duration;

use resource_wait::{WaitHandler, WaitHandlerBuilder};

use crate::api::ArgusApi;
use crate::source::{InstanceSource, ScrapeConfigsSource};
use crate::status::{InstanceOperation, InstanceStatus, JobPresence, ScrapeConfigStatus};

/// Default timeout for instance creation and updates
pub const INSTANCE_PROVISION_TIMEOUT: Duration = Duration::from_secs(45 * 60);
/// Default timeout for instance deletion
pub const INSTANCE_DELETE_TIMEOUT: Duration = Duration::from_secs(20 * 60);
/// Default timeout for scrape-config changes
pub const SCRAPE_CONFIG_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Builder for waits on an instance lifecycle operation
pub type InstanceWaitBuilder<A> = WaitHandlerBuilder<InstanceSource<A>, InstanceStatus>;
/// Builder for waits on a scrape-config change
pub type ScrapeConfigWaitBuilder<A> =
    WaitHandlerBuilder<ScrapeConfigsSource<A>, ScrapeConfigStatus>;

/// Wait until an instance has been created
pub fn create_instance_wait_handler<A: ArgusApi + ?Sized>(
    api: Arc<A>,
    instance_id: &str,
    project_id: &str,
) -> InstanceWaitBuilder<A> {
    instance_wait_handler(InstanceOperation::Create, api, instance_id, project_id)
        .timeout(INSTANCE_PROVISION_TIMEOUT)
}

/// Wait until an instance update has been applied
pub fn update_instance_wait_handler<A: ArgusApi + ?Sized>(
    api: Arc<A>,
    instance_id: &str,
    project_id: &str,
) -> InstanceWaitBuilder<A> {
    instance_wait_handler(InstanceOperation::Update, api, instance_id, project_id)
        .timeout(INSTANCE_PROVISION_TIMEOUT)
}

/// Wait until an instance has been deleted
pub fn delete_instance_wait_handler<A: ArgusApi + ?Sized>(
    api: Arc<A>,
    instance_id: &str,
    project_id: &str,
) -> InstanceWaitBuilder<A> {
    instance_wait_handler(InstanceOperation::Delete, api, instance_id, project_id)
        .timeout(INSTANCE_DELETE_TIMEOUT)
}

/// Wait until a scrape config named `job_name` is listed on the instance
pub fn create_scrape_config_wait_handler<A: ArgusApi + ?Sized>(
    api: Arc<A>,
    instance_id: &str,
    job_name: &str,
    project_id: &str,
) -> ScrapeConfigWaitBuilder<A> {
    scrape_config_wait_handler(JobPresence::Present, api, instance_id, job_name, project_id)
}

/// Wait until the scrape config named `job_name` is no longer listed
pub fn delete_scrape_config_wait_handler<A: ArgusApi + ?Sized>(
    api: Arc<A>,
    instance_id: &str,
    job_name: &str,
    project_id: &str,
) -> ScrapeConfigWaitBuilder<A> {
    scrape_config_wait_handler(JobPresence::Absent, api, instance_id, job_name, project_id)
}

fn instance_wait_handler<A: ArgusApi + ?Sized>(
    operation: InstanceOperation,
    api: Arc<A>,
    instance_id: &str,
    project_id: &str,
) -> InstanceWaitBuilder<A> {
    WaitHandler::builder(
        InstanceSource::new(api, instance_id, project_id),
        InstanceStatus::new(operation, instance_id),
    )
    .label(format!("{} of instance {instance_id}", operation.action_name()))
}

fn scrape_config_wait_handler<A: ArgusApi + ?Sized>(
    expected: JobPresence,
    api: Arc<A>,
    instance_id: &str,
    job_name: &str,
    project_id: &str,
) -> ScrapeConfigWaitBuilder<A> {
    let verb = match expected {
        JobPresence::Present => "creation",
        JobPresence::Absent => "deletion",
    };
    WaitHandler::builder(
        ScrapeConfigsSource::new(api, instance_id, project_id),
        ScrapeConfigStatus::new(expected, job_name),
    )
    .label(format!("{verb} of scrape config {job_name} on instance {instance_id}"))
    .timeout(SCRAPE_CONFIG_TIMEOUT)
}
