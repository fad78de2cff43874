//! The deferred outcome of a trigger.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FusedFuture};
use tracing::warn;

use crate::errors::HandlerResult;

/// A running (or not yet started) handler chain.
///
/// Resolves to `Ok(())` once every handler succeeded, or to the first
/// handler's error. Like any future it does nothing until polled; use
/// [`Trigger::spawn`] to drive it on the tokio runtime instead.
#[must_use = "a trigger does nothing unless awaited or spawned"]
pub struct Trigger {
    action: String,
    chain: BoxFuture<'static, HandlerResult>,
    settled: bool,
}

impl Trigger {
    pub(crate) fn new(action: String, chain: BoxFuture<'static, HandlerResult>) -> Self {
        Self {
            action,
            chain,
            settled: false,
        }
    }

    /// The action this trigger runs.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Whether the chain has settled.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Drive the chain to completion on the current tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<HandlerResult> {
        tokio::spawn(self)
    }
}

impl Future for Trigger {
    type Output = HandlerResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.settled {
            return Poll::Pending;
        }
        let outcome = this.chain.as_mut().poll(cx);
        if outcome.is_ready() {
            this.settled = true;
        }
        outcome
    }
}

impl FusedFuture for Trigger {
    fn is_terminated(&self) -> bool {
        self.settled
    }
}

impl Drop for Trigger {
    fn drop(&mut self) {
        if !self.settled {
            warn!(action = %self.action, "trigger dropped before its chain settled");
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("action", &self.action)
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}
