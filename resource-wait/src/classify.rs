//! Classification of fetched representations.

/// Where a resource stands after a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Not finished yet; keep polling.
    Pending,
    /// Reached the desired terminal state.
    Success,
    /// Reached a known failure state, carrying the observed status token.
    Failure(String),
    /// A field required for classification was absent.
    Malformed(String),
}

/// Maps a representation to a [`PollState`].
///
/// Classifiers are pure; the same input always yields the same state.
pub trait Classify<R>: Send + Sync {
    /// Decide the state of `representation`
    fn classify(&self, representation: &R) -> PollState;
}

impl<R, F> Classify<R> for F
where
    F: Fn(&R) -> PollState + Send + Sync,
{
    fn classify(&self, representation: &R) -> PollState {
        self(representation)
    }
}
