//! Wait handlers for the Argus observability service.
//!
//! Argus provisions instances and scrape configs asynchronously. After
//! issuing a create, update or delete request, hand the ids to one of the
//! factories below and wait for the outcome:
//! - instance creation, update and deletion are tracked by the instance
//!   status field (`CREATE_SUCCEEDED`, `UPDATE_FAILED`, ...)
//! - scrape-config creation and deletion are tracked by whether the job name
//!   shows up in the instance's scrape-config list
//!
//! The API client itself is supplied by the caller through [`ArgusApi`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use resource_wait::CancellationToken;
//! use resource_wait_argus::{create_instance_wait_handler, ArgusApi};
//!
//! # async fn example(client: Arc<dyn ArgusApi>) -> Result<(), Box<dyn std::error::Error>> {
//! let cancel = CancellationToken::new();
//! let instance = create_instance_wait_handler(client, "instance-id", "project-id")
//!     .poll_interval(Duration::from_secs(10))
//!     .build()?
//!     .wait(&cancel)
//!     .await?;
//! println!("instance {:?} is ready", instance.id);
//! # Ok(())
//! # }
//! ```

mod api;
mod handlers;
mod model;
mod source;
mod status;

pub use api::{ApiError, ArgusApi};
pub use handlers::{
    create_instance_wait_handler, create_scrape_config_wait_handler, delete_instance_wait_handler,
    delete_scrape_config_wait_handler, update_instance_wait_handler, InstanceWaitBuilder,
    ScrapeConfigWaitBuilder, INSTANCE_DELETE_TIMEOUT, INSTANCE_PROVISION_TIMEOUT,
    SCRAPE_CONFIG_TIMEOUT,
};
pub use model::{InstanceResponse, Job, ScrapeConfigsResponse};
pub use source::{InstanceSource, ScrapeConfigsSource};
pub use status::{
    InstanceOperation, InstanceStatus, JobPresence, ScrapeConfigStatus, CREATE_FAILED,
    CREATE_SUCCEEDED, DELETE_FAILED, DELETE_SUCCEEDED, UPDATE_FAILED, UPDATE_SUCCEEDED,
};
