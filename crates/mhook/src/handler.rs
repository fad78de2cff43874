//! Hook handlers and their two completion styles.
//!
//! A [`Handler`] is invoked with the trigger's [`HookArgs`] and a [`Done`]
//! completion callback. It finishes in one of two ways:
//!
//! - **Callback**: return [`Completion::Callback`] and later consume `Done`
//!   with [`Done::ok`] or [`Done::fail`]. `Done` is `Send`, so it can be
//!   moved into spawned work.
//! - **Deferred**: return [`Completion::Deferred`] with a future that
//!   resolves to the handler's outcome. `Done` may simply be dropped.
//!
//! If a handler signals both ways, whichever signal the dispatcher observes
//! first wins and the other is ignored.
//!
//! Most handlers are built from closures with [`callback`] and [`deferred`],
//! or from a type implementing [`AsyncHandler`] via [`from_async`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::args::HookArgs;
use crate::errors::{HandlerError, HandlerResult};

/// A unit of behavior attached to an action.
pub trait Handler: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Start the handler and say how it will report completion.
    fn call(&self, args: HookArgs, done: Done) -> Completion;
}

/// How a handler reports completion for one invocation.
pub enum Completion {
    /// The handler will consume the [`Done`] it was given.
    Callback,
    /// The handler's outcome is the output of this future.
    Deferred(BoxFuture<'static, HandlerResult>),
}

impl Completion {
    /// Box `future` as a deferred completion.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback => f.write_str("Callback"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Completion callback handed to every handler invocation.
///
/// Consuming methods make a second signal through the same `Done`
/// impossible.
pub struct Done {
    tx: oneshot::Sender<HandlerResult>,
}

impl Done {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<HandlerResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Signal success.
    pub fn ok(self) {
        self.complete(Ok(()));
    }

    /// Signal failure.
    pub fn fail(self, error: impl Into<HandlerError>) {
        self.complete(Err(error.into()));
    }

    /// Signal an outcome. Ignored if the chain already moved on.
    pub fn complete(self, result: HandlerResult) {
        let _ = self.tx.send(result);
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Callback-style handler built by [`callback`].
pub struct CallbackFn<F> {
    name: String,
    f: F,
}

impl<F> CallbackFn<F> {
    /// Set the name shown in logs.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Handler for CallbackFn<F>
where
    F: Fn(&HookArgs, Done) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: HookArgs, done: Done) -> Completion {
        (self.f)(&args, done);
        Completion::Callback
    }
}

/// Handler that completes by consuming its [`Done`].
pub fn callback<F>(f: F) -> CallbackFn<F>
where
    F: Fn(&HookArgs, Done) + Send + Sync,
{
    CallbackFn {
        name: "callback".to_string(),
        f,
    }
}

/// Deferred-style handler built by [`deferred`].
pub struct DeferredFn<F> {
    name: String,
    f: F,
}

impl<F> DeferredFn<F> {
    /// Set the name shown in logs.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F, Fut> Handler for DeferredFn<F>
where
    F: Fn(HookArgs) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: HookArgs, _done: Done) -> Completion {
        Completion::deferred((self.f)(args))
    }
}

/// Handler whose returned future is its completion.
pub fn deferred<F, Fut>(f: F) -> DeferredFn<F>
where
    F: Fn(HookArgs) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    DeferredFn {
        name: "deferred".to_string(),
        f,
    }
}

/// Handler type with an async body.
#[async_trait]
pub trait AsyncHandler: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Run the handler.
    async fn handle(&self, args: HookArgs) -> HandlerResult;
}

/// Adapter from [`AsyncHandler`] to [`Handler`], built by [`from_async`].
pub struct AsyncAdapter<T> {
    inner: Arc<T>,
}

impl<T: AsyncHandler> Handler for AsyncAdapter<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, args: HookArgs, _done: Done) -> Completion {
        let inner = Arc::clone(&self.inner);
        Completion::deferred(async move { inner.handle(args).await })
    }
}

/// Use an [`AsyncHandler`] as a deferred-style [`Handler`].
pub fn from_async<T: AsyncHandler>(handler: T) -> AsyncAdapter<T> {
    AsyncAdapter {
        inner: Arc::new(handler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> HookArgs {
        vec![json!(1), json!(2)].into()
    }

    #[tokio::test]
    async fn callback_handler_signals_through_done() {
        let handler = callback(|args, done| {
            if args.len() == 2 {
                done.ok();
            } else {
                done.fail("wrong arity");
            }
        });
        let (done, rx) = Done::channel();
        let completion = handler.call(args(), done);
        assert!(matches!(completion, Completion::Callback));
        assert!(rx.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn deferred_handler_returns_future() {
        let handler = deferred(|args: HookArgs| async move {
            let n: i64 = args.arg(0)?;
            if n == 1 { Ok(()) } else { Err("not one".into()) }
        });
        let (done, _rx) = Done::channel();
        match handler.call(args(), done) {
            Completion::Deferred(fut) => assert!(fut.await.is_ok()),
            Completion::Callback => panic!("expected a deferred completion"),
        }
    }

    #[tokio::test]
    async fn done_fail_carries_error() {
        let (done, rx) = Done::channel();
        done.fail("Some error");
        let err = rx.await.unwrap().unwrap_err();
        assert_eq!(err.message(), "Some error");
    }

    #[test]
    fn complete_after_receiver_dropped_is_ignored() {
        let (done, rx) = Done::channel();
        drop(rx);
        done.ok();
    }

    #[test]
    fn default_and_custom_names() {
        let cb = callback(|_, done| done.ok());
        assert_eq!(cb.name(), "callback");
        let named = callback(|_, done| done.ok()).named("audit");
        assert_eq!(named.name(), "audit");
        let df = deferred(|_| async { Ok(()) }).named("notify");
        assert_eq!(df.name(), "notify");
    }

    struct Audit;

    #[async_trait]
    impl AsyncHandler for Audit {
        fn name(&self) -> &str {
            "audit"
        }

        async fn handle(&self, args: HookArgs) -> HandlerResult {
            if args.is_empty() {
                Err("nothing to audit".into())
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn async_handler_adapts_to_deferred() {
        let handler = from_async(Audit);
        assert_eq!(handler.name(), "audit");

        let (done, _rx) = Done::channel();
        let Completion::Deferred(fut) = handler.call(HookArgs::default(), done) else {
            panic!("expected a deferred completion");
        };
        assert_eq!(fut.await.unwrap_err().message(), "nothing to audit");
    }

    #[test]
    fn completion_debug() {
        assert_eq!(format!("{:?}", Completion::Callback), "Callback");
        let deferred = Completion::deferred(async { Ok(()) });
        assert_eq!(format!("{deferred:?}"), "Deferred(..)");
    }
}
