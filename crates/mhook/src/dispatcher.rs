//! The hook dispatcher.
//!
//! Owns the closed action set and an ordered handler list per action.
//! [`Dispatcher::trigger`] snapshots the action's list and returns a
//! [`Trigger`] that runs the handlers one at a time, in registration order,
//! stopping at the first failure.

use std::sync::Arc;

use tracing::{Instrument, debug, debug_span, trace, warn};

use crate::action::ActionSet;
use crate::args::{HookArgs, IntoHookArgs};
use crate::catalog::HandlerCatalog;
use crate::errors::{HandlerError, HandlerResult, HookError, Result};
use crate::handler::Handler;
use crate::settings::DispatcherSettings;
use crate::settle;
use crate::trigger::Trigger;

type FinalCallback = Box<dyn FnOnce(Option<&HandlerError>) + Send>;

/// Ordered hook dispatcher over a fixed set of actions.
pub struct Dispatcher {
    actions: ActionSet,
    /// Handlers per action, indexed by the action's declaration position.
    hooks: Vec<Vec<Arc<dyn Handler>>>,
}

impl Dispatcher {
    /// Create a dispatcher for `actions`.
    ///
    /// Fails with [`HookError::Configuration`] when `actions` is empty or
    /// contains duplicate names.
    pub fn new<I, S>(actions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions = ActionSet::new(actions)?;
        let hooks = vec![Vec::new(); actions.len()];
        debug!(actions = actions.len(), "dispatcher created");
        Ok(Self { actions, hooks })
    }

    /// Build a dispatcher from settings, registering each bound handler by
    /// looking its name up in `catalog`.
    pub fn from_settings(settings: &DispatcherSettings, catalog: &HandlerCatalog) -> Result<Self> {
        let mut dispatcher = Self::new(settings.actions.iter().cloned())?;
        for (action, names) in &settings.bindings {
            for name in names {
                let _ = dispatcher.on_named(action, name, catalog)?;
            }
        }
        Ok(dispatcher)
    }

    /// Append `handler` to `action`'s chain.
    ///
    /// Returns `self` so registrations can be chained with `?`.
    pub fn on<H: Handler + 'static>(&mut self, action: &str, handler: H) -> Result<&mut Self> {
        self.on_shared(action, Arc::new(handler))
    }

    /// Append an already shared handler to `action`'s chain.
    pub fn on_shared(&mut self, action: &str, handler: Arc<dyn Handler>) -> Result<&mut Self> {
        let index = self.actions.check(action)?;
        self.push(index, action, handler);
        Ok(self)
    }

    /// Append the handler registered in `catalog` under `name`.
    ///
    /// Fails with [`HookError::InvalidHandler`] when the catalog has no such
    /// handler. The action is checked first.
    pub fn on_named(
        &mut self,
        action: &str,
        name: &str,
        catalog: &HandlerCatalog,
    ) -> Result<&mut Self> {
        let index = self.actions.check(action)?;
        let handler = catalog.get(name).ok_or_else(|| HookError::InvalidHandler {
            action: action.to_string(),
            reason: format!("no handler named `{name}`"),
        })?;
        self.push(index, action, handler);
        Ok(self)
    }

    fn push(&mut self, index: usize, action: &str, handler: Arc<dyn Handler>) {
        let handlers = &mut self.hooks[index];
        debug!(
            action,
            handler = handler.name(),
            position = handlers.len(),
            "registering hook"
        );
        handlers.push(handler);
    }

    /// Run `action`'s handlers with `args`.
    ///
    /// Unknown actions and non-sequence arguments are rejected here.
    /// Handler failures are only reported through the returned [`Trigger`].
    pub fn trigger(&self, action: &str, args: impl IntoHookArgs) -> Result<Trigger> {
        self.start(action, args, None)
    }

    /// Like [`trigger`](Self::trigger), additionally calling `callback` once
    /// with the chain's error (or `None`) when it settles.
    ///
    /// The chain only runs while the returned [`Trigger`] is polled: a
    /// dropped trigger runs no handlers and never calls `callback`. When the
    /// callback is the only consumer, hand the trigger to
    /// [`Trigger::spawn`].
    pub fn trigger_with<F>(&self, action: &str, args: impl IntoHookArgs, callback: F) -> Result<Trigger>
    where
        F: FnOnce(Option<&HandlerError>) + Send + 'static,
    {
        self.start(action, args, Some(Box::new(callback)))
    }

    fn start(
        &self,
        action: &str,
        args: impl IntoHookArgs,
        callback: Option<FinalCallback>,
    ) -> Result<Trigger> {
        let index = self.actions.check(action)?;
        let args = args.into_hook_args()?;
        let handlers: Arc<[Arc<dyn Handler>]> = self.hooks[index].iter().cloned().collect();

        let span = debug_span!("trigger", action = %action, handlers = handlers.len());
        let chain = run_chain(action.to_string(), handlers, args, callback).instrument(span);
        Ok(Trigger::new(action.to_string(), Box::pin(chain)))
    }

    /// Action names in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter()
    }

    /// Whether `action` is one of this dispatcher's actions.
    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Number of handlers registered for `action`.
    pub fn handler_count(&self, action: &str) -> Result<usize> {
        let index = self.actions.check(action)?;
        Ok(self.hooks[index].len())
    }

    /// Total number of registered handlers.
    pub fn count(&self) -> usize {
        self.hooks.iter().map(Vec::len).sum()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("actions", &self.actions.len())
            .field("hook_count", &self.count())
            .finish()
    }
}

async fn run_chain(
    action: String,
    handlers: Arc<[Arc<dyn Handler>]>,
    args: HookArgs,
    callback: Option<FinalCallback>,
) -> HandlerResult {
    let outcome = run_handlers(&action, &handlers, &args).await;
    if let Some(callback) = callback {
        callback(outcome.as_ref().err());
    }
    outcome
}

async fn run_handlers(action: &str, handlers: &[Arc<dyn Handler>], args: &HookArgs) -> HandlerResult {
    for (position, handler) in handlers.iter().enumerate() {
        trace!(action, position, handler = handler.name(), "running hook");
        if let Err(error) = settle::invoke(handler.as_ref(), args.clone()).await {
            warn!(
                action,
                position,
                handler = handler.name(),
                error = %error,
                "hook failed, skipping remaining handlers"
            );
            return Err(error);
        }
    }
    debug!(action, handlers = handlers.len(), "hook chain complete");
    Ok(())
}
