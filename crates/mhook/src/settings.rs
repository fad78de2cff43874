//! Dispatcher settings loaded from JSON.
//!
//! ```json
//! {
//!   "actions": ["beforeUpdate", "afterUpdate"],
//!   "bindings": { "beforeUpdate": ["validate", "audit"] },
//!   "logLevel": "debug"
//! }
//! ```
//!
//! Every field is optional in the file; missing ones take the values from
//! [`DispatcherSettings::default()`]. Binding lists keep their order, which
//! becomes the registration order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use mhook_core::logging::DEFAULT_LEVEL;

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings JSON was malformed.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Declarative dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatcherSettings {
    /// Action names, in declaration order.
    pub actions: Vec<String>,
    /// Handler names to register per action, in order.
    pub bindings: BTreeMap<String, Vec<String>>,
    /// Log level directive for [`crate::init_logging`].
    pub log_level: String,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            bindings: BTreeMap::new(),
            log_level: DEFAULT_LEVEL.to_string(),
        }
    }
}

/// Parse settings from a JSON string.
pub fn parse_settings(json: &str) -> Result<DispatcherSettings, SettingsError> {
    Ok(serde_json::from_str(json)?)
}

/// Load settings from a JSON file.
pub fn load_settings_from_path(path: &Path) -> Result<DispatcherSettings, SettingsError> {
    debug!(?path, "loading dispatcher settings");
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}
