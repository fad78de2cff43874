//! Settlement of a single handler invocation.
//!
//! Both completion styles funnel into [`invoke`]: the handler's [`Done`] is
//! the sending half of a oneshot channel, and a deferred completion is raced
//! against the receiving half. Whichever settles first is the handler's
//! outcome.

use tokio::sync::oneshot;

use crate::args::HookArgs;
use crate::errors::{HandlerError, HandlerResult};
use crate::handler::{Completion, Done, Handler};

/// Run `handler` once and wait for its first completion signal.
pub(crate) async fn invoke(handler: &dyn Handler, args: HookArgs) -> HandlerResult {
    let (done, signal) = Done::channel();
    match handler.call(args, done) {
        Completion::Callback => signal
            .await
            .unwrap_or_else(|_| Err(HandlerError::completion_dropped())),
        Completion::Deferred(future) => first_signal(signal, future).await,
    }
}

async fn first_signal<F>(mut signal: oneshot::Receiver<HandlerResult>, future: F) -> HandlerResult
where
    F: std::future::Future<Output = HandlerResult>,
{
    tokio::pin!(future);
    tokio::select! {
        biased;
        sent = &mut signal => match sent {
            Ok(result) => result,
            // Done dropped unused; the deferred is authoritative.
            Err(_) => future.await,
        },
        result = &mut future => result,
    }
}
