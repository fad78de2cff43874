//! Trigger arguments.
//!
//! Every handler of one trigger sees the same [`HookArgs`]. The list is
//! immutable and reference counted, so handing it to each handler (or into
//! a spawned task) is a pointer copy.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{HandlerError, HookError, Result};

/// Ordered, shared argument list forwarded to every handler of a trigger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookArgs {
    values: Arc<[Value]>,
}

impl HookArgs {
    /// Build from a JSON value, which must be an array.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => Ok(Self::from(values)),
            other => Err(HookError::InvalidArguments(format!(
                "expected an array, got {}",
                kind(&other)
            ))),
        }
    }

    /// Argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Deserialize the argument at `index`.
    ///
    /// Fails with a [`HandlerError`] so handlers can use `?` directly.
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> std::result::Result<T, HandlerError> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| HandlerError::msg(format!("missing argument {index}")))?;
        Ok(T::deserialize(value)?)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The arguments in order.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Iterate the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl From<Vec<Value>> for HookArgs {
    fn from(values: Vec<Value>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl<'a> IntoIterator for &'a HookArgs {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Conversion into [`HookArgs`], validated at trigger time.
pub trait IntoHookArgs {
    /// Convert, failing with [`HookError::InvalidArguments`] when the input
    /// is not an ordered sequence.
    fn into_hook_args(self) -> Result<HookArgs>;
}

impl IntoHookArgs for HookArgs {
    fn into_hook_args(self) -> Result<HookArgs> {
        Ok(self)
    }
}

impl IntoHookArgs for Value {
    fn into_hook_args(self) -> Result<HookArgs> {
        HookArgs::from_value(self)
    }
}

impl IntoHookArgs for Vec<Value> {
    fn into_hook_args(self) -> Result<HookArgs> {
        Ok(self.into())
    }
}

impl IntoHookArgs for &[Value] {
    fn into_hook_args(self) -> Result<HookArgs> {
        Ok(self.to_vec().into())
    }
}

impl<const N: usize> IntoHookArgs for [Value; N] {
    fn into_hook_args(self) -> Result<HookArgs> {
        Ok(Vec::from(self).into())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
