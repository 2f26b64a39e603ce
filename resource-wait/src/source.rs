//! The capability a wait handler polls.

use std::sync::Arc;

use async_trait::async_trait;

/// Opaque error returned by a poll source.
///
/// The engine never inspects it; any error ends the wait.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fetches the current representation of a single remote resource.
///
/// Implementations must be idempotent and free of side effects, since the
/// handler calls them an unbounded number of times.
#[async_trait]
pub trait PollSource: Send + Sync {
    /// The representation returned by each fetch
    type Output: Send;

    /// Fetch the resource's current state
    async fn fetch(&self) -> Result<Self::Output, BoxError>;
}

#[async_trait]
impl<T: PollSource> PollSource for Arc<T> {
    type Output = T::Output;

    async fn fetch(&self) -> Result<Self::Output, BoxError> {
        (**self).fetch().await
    }
}

/// A poll source backed by a closure returning a future.
///
/// Handy for one-off waits where writing a dedicated type is overkill.
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    /// Wrap a closure as a poll source
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F, Fut, T> PollSource for FnSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<T, BoxError>> + Send,
    T: Send,
{
    type Output = T;

    async fn fetch(&self) -> Result<T, BoxError> {
        (self.fetch)().await
    }
}
