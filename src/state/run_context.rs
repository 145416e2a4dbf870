use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Per-run context owned by the caller
///
/// Holds the cancellation token for one crawl and the time it started. The
/// engine keeps no state between runs, so anything a caller wants to observe
/// about a run in progress lives here.
#[derive(Debug, Clone)]
pub struct RunContext {
    cancel_token: CancellationToken,
    started_at: DateTime<Utc>,
}

impl RunContext {
    /// Creates a context with a fresh cancellation token
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Creates a context around an existing token
    pub fn with_token(cancel_token: CancellationToken) -> Self {
        Self {
            cancel_token,
            started_at: Utc::now(),
        }
    }

    /// Returns a handle to the run's cancellation token
    pub fn token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests that the run stop at its next checkpoint
    ///
    /// In-flight fetches are not interrupted; they finish or time out.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Returns true once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Returns when the run started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the time elapsed since the run started
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
