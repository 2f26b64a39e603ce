//! The polling loop.
//!
//! A [`WaitHandler`] repeatedly fetches a resource through its
//! [`PollSource`], classifies every fetched representation, and stops at the
//! first terminal state:
//!
//! 1. The first poll happens immediately (unless an initial delay is set).
//! 2. A fetch error ends the wait with [`WaitError::TransportFailure`].
//! 3. `Success` returns the representation, `Failure` and `Malformed` return
//!    their errors. None of these are retried.
//! 4. `Pending` sleeps for the poll interval and polls again, until the
//!    deadline (`start + timeout`) passes.
//!
//! Both suspension points, the in-flight fetch and the inter-poll sleep, race
//! the caller's [`CancellationToken`]. The fetch also races the deadline and
//! sleeps are clamped to it, so a wait never overruns its timeout. A sleep
//! that ends at the deadline times out without starting another fetch.
//!
//! Timeouts too large to add to the current instant are capped at roughly
//! thirty years.
//!
//! Cancellation is checked before every poll and wins ties inside each
//! `select!`. A fetch that has already completed is always classified, so a
//! success observed before the cancellation check is returned as success.

use std::time::Duration;

use log::{debug, trace};
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::classify::{Classify, PollState};
use crate::config::WaitConfig;
use crate::error::WaitError;
use crate::source::PollSource;
use crate::WaitResult;

/// Cap for timeouts that overflow `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Drives one wait operation to a single terminal outcome.
///
/// Handlers are immutable once built and are consumed by [`WaitHandler::wait`].
pub struct WaitHandler<S, C> {
    source: S,
    classifier: C,
    config: WaitConfig,
    label: String,
}

/// Builder for [`WaitHandler`].
pub struct WaitHandlerBuilder<S, C> {
    source: S,
    classifier: C,
    config: WaitConfig,
    label: String,
}

impl<S, C> WaitHandlerBuilder<S, C> {
    /// Set the maximum time the wait may run
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the delay between polls
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.config.poll_interval = poll_interval;
        self
    }

    /// Set a delay before the first poll
    pub fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.config.initial_delay = initial_delay;
        self
    }

    /// Replace all timing settings at once
    pub fn config(mut self, config: WaitConfig) -> Self {
        self.config = config;
        self
    }

    /// Name used in log lines
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Timing settings as currently configured
    pub fn current_config(&self) -> &WaitConfig {
        &self.config
    }

    /// Freeze the configuration into a handler
    pub fn build(self) -> WaitResult<WaitHandler<S, C>> {
        self.config.validate()?;
        Ok(WaitHandler {
            source: self.source,
            classifier: self.classifier,
            config: self.config,
            label: self.label,
        })
    }
}

impl<S, C> WaitHandler<S, C>
where
    S: PollSource,
    C: Classify<S::Output>,
{
    /// Start building a handler with default timing
    pub fn builder(source: S, classifier: C) -> WaitHandlerBuilder<S, C> {
        WaitHandlerBuilder {
            source,
            classifier,
            config: WaitConfig::default(),
            label: "resource".to_string(),
        }
    }

    /// Create a handler from an explicit configuration
    pub fn with_config(source: S, classifier: C, config: WaitConfig) -> WaitResult<Self> {
        Self::builder(source, classifier).config(config).build()
    }

    /// Wait without an external cancellation signal.
    pub async fn wait_until_done(self) -> WaitResult<S::Output> {
        self.wait(&CancellationToken::new()).await
    }

    /// Poll until the resource reaches a terminal state.
    ///
    /// # Errors
    ///
    /// - [`WaitError::TransportFailure`] if a fetch fails
    /// - [`WaitError::OperationFailed`] if a failure status is observed
    /// - [`WaitError::MalformedResponse`] if a required field is missing
    /// - [`WaitError::Timeout`] if the deadline passes while pending
    /// - [`WaitError::Cancelled`] if `cancel` fires first
    pub async fn wait(self, cancel: &CancellationToken) -> WaitResult<S::Output> {
        let timeout = self.config.timeout;
        let started = Instant::now();
        let deadline = started
            .checked_add(timeout)
            .unwrap_or_else(|| started + FAR_FUTURE);

        if !self.config.initial_delay.is_zero() {
            let delay = self.config.initial_delay.min(remaining(deadline));
            debug!("Waiting {delay:?} before polling {}", self.label);
            pause(delay, cancel).await?;
        }

        let mut attempt = 0u32;
        loop {
            if cancel.is_cancelled() {
                return Err(WaitError::Cancelled);
            }

            attempt += 1;
            trace!("Polling {} (attempt {attempt})", self.label);

            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(WaitError::Cancelled),
                result = self.source.fetch() => result,
                () = sleep_until(deadline) => return Err(WaitError::Timeout(timeout)),
            };
            let representation = fetched.map_err(WaitError::TransportFailure)?;

            match self.classifier.classify(&representation) {
                PollState::Success => {
                    debug!("{} reached its target state after {attempt} poll(s)", self.label);
                    return Ok(representation);
                }
                PollState::Failure(status) => return Err(WaitError::OperationFailed { status }),
                PollState::Malformed(reason) => {
                    return Err(WaitError::MalformedResponse { reason })
                }
                PollState::Pending => {}
            }

            let left = remaining(deadline);
            if left.is_zero() {
                return Err(WaitError::Timeout(timeout));
            }

            let delay = self.config.poll_interval.min(left);
            trace!("{} still pending, next poll in {delay:?}", self.label);
            pause(delay, cancel).await?;

            // a fetch started now would lose the race against the deadline
            if remaining(deadline).is_zero() {
                return Err(WaitError::Timeout(timeout));
            }
        }
    }
}

/// Time left until `deadline`, zero once it has passed
fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

/// Sleep for `delay` unless cancelled first
async fn pause(delay: Duration, cancel: &CancellationToken) -> WaitResult<()> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(WaitError::Cancelled),
        () = sleep(delay) => Ok(()),
    }
}
