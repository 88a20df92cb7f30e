//! Per-call cancellation and deadline context
//!
//! Every cache operation takes an [`OpContext`]. Providers run their store
//! round-trip through [`OpContext::run`], which gives up as soon as the
//! caller's token is cancelled or the deadline passes, so a slow or
//! unreachable store never blocks the caller beyond the bound it chose.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation token plus optional deadline for one or more cache calls
#[derive(Debug, Clone)]
pub struct OpContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for OpContext {
    fn default() -> Self {
        Self::background()
    }
}

impl OpContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context that expires `timeout` from now
    ///
    /// A timeout too large to represent behaves like no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// A context that expires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A context driven by an externally owned token
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Tighten the deadline; an earlier existing deadline wins
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let Some(candidate) = Instant::now().checked_add(timeout) else {
            return self;
        };
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < candidate => existing,
            _ => candidate,
        });
        self
    }

    /// A context cancelled together with this one, and independently via its own token
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context (and its children)
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The cancellation token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if one was set
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once cancelled or past the deadline
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Drive `operation`, abandoning it on cancellation or deadline
    ///
    /// A context that is already done fails without polling `operation`.
    pub async fn run<F, T>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        match self.deadline {
            Some(deadline) => {
                if deadline <= Instant::now() {
                    return Err(Error::DeadlineExceeded);
                }
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(Error::Cancelled),
                    result = tokio::time::timeout_at(deadline, operation) => {
                        result.unwrap_or(Err(Error::DeadlineExceeded))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Err(Error::Cancelled),
                    result = operation => result,
                }
            }
        }
    }
}
