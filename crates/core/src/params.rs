//! Bound parameters: the named-parameter view of a call's arguments.
//!
//! [`BoundParams`] is an ordered-insertion mapping from parameter name to
//! value. Reading a missing key fails with
//! [`Error::ParameterNotFound`](crate::Error::ParameterNotFound) naming the
//! key and enumerating the keys actually present - that contract belongs to
//! the mapping type itself, not to its callers.
//!
//! [`ParamValue`] is the command parameter set handed to the session: a
//! named mapping, a single raw value, or nothing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Ordered-insertion mapping from parameter name to argument value.
///
/// Insertion order is preserved; iteration and the `available` list in
/// lookup failures follow it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundParams {
    entries: IndexMap<String, Value>,
}

impl BoundParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value under a name. An existing binding for the same name is
    /// replaced; collision policy is the caller's responsibility.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Whether a name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up a bound value.
    ///
    /// Fails with `ParameterNotFound` when the name was never bound; the
    /// error lists the names that are present.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.entries.get(name).ok_or_else(|| Error::ParameterNotFound {
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })
    }

    /// Iterate bound names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The command parameter set handed to the session executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// No bindable arguments.
    Null,
    /// Exactly one unnamed, unmarked argument: the raw value, unwrapped.
    Single(Value),
    /// Named parameter mapping.
    Named(BoundParams),
}

impl ParamValue {
    /// The single raw value, if this is `Single`.
    pub fn as_single(&self) -> Option<&Value> {
        match self {
            ParamValue::Single(value) => Some(value),
            _ => None,
        }
    }

    /// The named mapping, if this is `Named`.
    pub fn as_named(&self) -> Option<&BoundParams> {
        match self {
            ParamValue::Named(params) => Some(params),
            _ => None,
        }
    }
}
