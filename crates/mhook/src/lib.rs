//! # mhook
//!
//! Ordered hook dispatcher.
//!
//! A [`Dispatcher`] is created with a fixed set of action names. Handlers are
//! attached to actions with [`Dispatcher::on`], and
//! [`Dispatcher::trigger`] runs an action's handlers one after another in
//! registration order.
//!
//! ## Completion styles
//!
//! A handler finishes either by consuming the [`Done`] callback it is given
//! or by returning a future ([`Completion::Deferred`]). The dispatcher waits
//! for whichever signal arrives first, so both styles can be mixed freely on
//! the same action.
//!
//! ## Failure
//!
//! The first handler to fail stops the chain; later handlers never run.
//! The error is the output of the [`Trigger`] future and, when a callback
//! was passed to [`Dispatcher::trigger_with`], is also handed to that
//! callback. Unknown actions and malformed arguments are rejected before a
//! chain starts.
//!
//! ## Example
//!
//! ```rust
//! use mhook::{Dispatcher, HookArgs, callback, deferred};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut hooks = Dispatcher::new(["beforeUpdate", "afterUpdate"])?;
//! hooks
//!     .on("beforeUpdate", callback(|_args, done| done.ok()))?
//!     .on("beforeUpdate", deferred(|args: HookArgs| async move {
//!         let id: i64 = args.arg(0)?;
//!         if id > 0 { Ok(()) } else { Err("bad id".into()) }
//!     }))?;
//!
//! hooks.trigger("beforeUpdate", vec![json!(1)])?.await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod action;
pub mod args;
pub mod catalog;
pub mod dispatcher;
pub mod errors;
pub mod handler;
pub mod settings;
mod settle;
pub mod trigger;

pub use action::ActionSet;
pub use args::{HookArgs, IntoHookArgs};
pub use catalog::HandlerCatalog;
pub use dispatcher::Dispatcher;
pub use errors::{HandlerError, HandlerResult, HookError, Result};
pub use handler::{
    AsyncAdapter, AsyncHandler, CallbackFn, Completion, DeferredFn, Done, Handler, callback,
    deferred, from_async,
};
pub use settings::{DispatcherSettings, SettingsError, load_settings_from_path, parse_settings};
pub use trigger::Trigger;

/// Install the stderr log subscriber at the level named in `settings`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(settings: &DispatcherSettings) -> bool {
    mhook_core::logging::init_subscriber(&settings.log_level)
}
