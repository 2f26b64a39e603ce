//! Polling engine for asynchronously provisioned resources.
//!
//! Provisioning APIs usually accept a create, update or delete request and
//! return before the resource is ready. This crate waits for the outcome:
//! - [`PollSource`]: fetches the current representation of one resource
//! - [`Classify`]: maps a representation to a [`PollState`]
//! - [`WaitHandler`]: polls the source until the classifier reports a
//!   terminal state, the deadline passes, or the caller cancels
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use resource_wait::{BoxError, FnSource, PollState, WaitHandler};
//!
//! # async fn example() -> Result<(), resource_wait::WaitError> {
//! let source = FnSource::new(|| async { Ok::<_, BoxError>("ACTIVE".to_string()) });
//! let classifier = |status: &String| match status.as_str() {
//!     "ACTIVE" => PollState::Success,
//!     "FAILED" => PollState::Failure(status.clone()),
//!     _ => PollState::Pending,
//! };
//!
//! let status = WaitHandler::builder(source, classifier)
//!     .timeout(Duration::from_secs(300))
//!     .poll_interval(Duration::from_secs(2))
//!     .build()?
//!     .wait_until_done()
//!     .await?;
//! assert_eq!(status, "ACTIVE");
//! # Ok(())
//! # }
//! ```

mod classify;
mod config;
mod error;
mod handler;
mod source;

pub use classify::{Classify, PollState};
pub use config::WaitConfig;
pub use error::WaitError;
pub use handler::{WaitHandler, WaitHandlerBuilder};
pub use source::{BoxError, FnSource, PollSource};

/// Re-exported so callers can cancel waits without depending on `tokio-util` directly
pub use tokio_util::sync::CancellationToken;

/// Result type alias for wait operations
pub type WaitResult<T> = Result<T, WaitError>;
