//! The closed set of action names a dispatcher accepts.

use std::collections::HashMap;

use crate::errors::{HookError, Result};

/// Ordered, duplicate-free set of action names fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ActionSet {
    /// Build the set, rejecting empty input and duplicates.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(HookError::Configuration(
                "at least one action is required".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(HookError::Configuration(format!(
                    "duplicate action `{name}`"
                )));
            }
        }

        Ok(Self { names, index })
    }

    /// Position of `action` in declaration order.
    ///
    /// Fails with [`HookError::UnknownAction`] unless `action` is a member.
    pub fn check(&self, action: &str) -> Result<usize> {
        self.index
            .get(action)
            .copied()
            .ok_or_else(|| HookError::UnknownAction(action.to_string()))
    }

    /// Whether `action` is a member.
    pub fn contains(&self, action: &str) -> bool {
        self.index.contains_key(action)
    }

    /// Names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; an action set is never empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn keeps_declaration_order() {
        let set = ActionSet::new(["beforeUpdate", "afterUpdate", "afterRemove"]).unwrap();
        let names: Vec<_> = set.iter().collect();
        assert_eq!(names, ["beforeUpdate", "afterUpdate", "afterRemove"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn empty_input_is_a_configuration_error() {
        let err = ActionSet::new(Vec::<String>::new()).unwrap_err();
        assert_matches!(err, HookError::Configuration(_));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ActionSet::new(["a", "b", "a"]).unwrap_err();
        assert_matches!(err, HookError::Configuration(msg) if msg.contains("`a`"));
    }

    #[test]
    fn blank_names_are_ordinary_actions() {
        let set = ActionSet::new(["", " "]).unwrap();
        assert_eq!(set.check("").unwrap(), 0);
        assert_eq!(set.check(" ").unwrap(), 1);
    }

    #[test]
    fn check_membership() {
        let set = ActionSet::new(["beforeUpdate"]).unwrap();
        assert_eq!(set.check("beforeUpdate").unwrap(), 0);
        let err = set.check("someAction").unwrap_err();
        assert_matches!(err, HookError::UnknownAction(name) if name == "someAction");
    }

    #[test]
    fn check_returns_declaration_position() {
        let set = ActionSet::new(["a", "b", "c"]).unwrap();
        assert_eq!(set.check("c").unwrap(), 2);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let set = ActionSet::new(["beforeUpdate"]).unwrap();
        assert!(!set.contains("beforeupdate"));
    }
}
