//! Type handlers: named value renderers.
//!
//! The registry maps a type name to a handler that renders values of that
//! type into the text form used for keyed results. It is read-only from
//! the engine's perspective; session implementations consume it when they
//! key a map query on a result column.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Renders a value into its canonical text form.
pub trait TypeHandler: fmt::Debug + Send + Sync {
    /// Render the value. A null renders as the empty string.
    fn to_text(&self, value: &Value) -> String;
}

/// Handler for the scalar types, rendering each by its natural text form.
#[derive(Debug, Default)]
pub struct ScalarTypeHandler;

impl TypeHandler for ScalarTypeHandler {
    fn to_text(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            other => format!("{other:?}"),
        }
    }
}

/// Registry of type handlers keyed by type name.
#[derive(Debug, Clone)]
pub struct TypeHandlerRegistry {
    handlers: FxHashMap<String, Arc<dyn TypeHandler>>,
}

impl TypeHandlerRegistry {
    /// Registry pre-populated with handlers for the scalar types.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: FxHashMap::default(),
        };
        let scalar: Arc<dyn TypeHandler> = Arc::new(ScalarTypeHandler);
        for name in ["Bool", "Int", "Long", "Float", "String"] {
            registry.register(name, scalar.clone());
        }
        registry
    }

    /// Register a handler for a type name, replacing any existing one.
    pub fn register(&mut self, type_name: impl Into<String>, handler: Arc<dyn TypeHandler>) {
        self.handlers.insert(type_name.into(), handler);
    }

    /// Whether a handler is registered for the type name.
    pub fn has_handler(&self, type_name: &str) -> bool {
        self.handlers.contains_key(type_name)
    }

    /// Look up the handler for a type name.
    pub fn handler(&self, type_name: &str) -> Option<&Arc<dyn TypeHandler>> {
        self.handlers.get(type_name)
    }

    /// Render a value with the named handler, falling back to the scalar
    /// rendering when the type has no registered handler.
    pub fn text_for(&self, type_name: &str, value: &Value) -> String {
        match self.handler(type_name) {
            Some(handler) => handler.to_text(value),
            None => ScalarTypeHandler.to_text(value),
        }
    }
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
