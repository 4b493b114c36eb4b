//! The MapperEngine - single entry point to method execution.
//!
//! The engine is a stateless dispatcher over a shared [`Configuration`]:
//! the only state it owns is the per-method metadata cache. Cached
//! entries (resolved command + signature) are written exactly once under
//! a first-call-wins policy; the DashMap entry lock serializes concurrent
//! first calls for the same method, so every overlapping caller observes
//! the same compiled value.

use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sqlbind_core::{PageBounds, RowCallback, Session, Value};

use crate::config::Configuration;
use crate::method::MapperMethod;
use crate::output::Output;
use crate::Result;

/// One call argument, positionally matching the declared parameter list.
///
/// Marker arguments are ordinary positional arguments; the engine
/// extracts them out-of-band instead of binding them as command
/// parameters.
pub enum Arg<'a> {
    /// An ordinary argument value.
    Value(Value),
    /// The paging-window marker.
    Page(PageBounds),
    /// The row-callback marker.
    Callback(&'a mut dyn RowCallback),
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Page(bounds) => f.debug_tuple("Page").field(bounds).finish(),
            Arg::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Cache key identifying one mapper method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    mapper: String,
    method: String,
}

impl MethodKey {
    /// Key for `method` on `mapper`.
    pub fn new(mapper: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            mapper: mapper.into(),
            method: method.into(),
        }
    }
}

/// The mapper-method execution engine.
///
/// # Thread Safety
///
/// The engine is `Send + Sync`; per-call state is exclusively owned by
/// each invocation, and the metadata cache is internally synchronized.
///
/// # Example
///
/// ```text
/// let engine = MapperEngine::new(Arc::new(config));
/// let out = engine.execute(&mut session, "app.UserMapper", "find",
///     vec![Arg::Value(Value::from("u1"))])?;
/// ```
pub struct MapperEngine {
    config: Arc<Configuration>,
    methods: DashMap<MethodKey, Arc<MapperMethod>>,
}

impl MapperEngine {
    /// Create an engine over a populated configuration.
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            methods: DashMap::new(),
        }
    }

    /// The configuration the engine resolves against.
    pub fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Execute `method` on `mapper` with the given arguments.
    ///
    /// Command resolution and return-shape analysis happen on the first
    /// call for the method and are reused afterwards; parameter binding
    /// runs per call. Exactly one session operation is invoked.
    pub fn execute<'a>(
        &self,
        session: &mut dyn Session,
        mapper: &str,
        method: &str,
        args: Vec<Arg<'a>>,
    ) -> Result<Output> {
        let compiled = self.method(mapper, method)?;
        compiled.execute(&self.config, session, args)
    }

    /// Fetch the compiled method, building it at most once.
    pub(crate) fn method(&self, mapper: &str, method: &str) -> Result<Arc<MapperMethod>> {
        let key = MethodKey::new(mapper, method);
        if let Some(compiled) = self.methods.get(&key) {
            return Ok(Arc::clone(&compiled));
        }
        // First call: the entry lock serializes racing compilations so the
        // cache is populated at most once. Failed compilations are not
        // cached; a later call retries.
        match self.methods.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                tracing::debug!(mapper, method, "compiling mapper method");
                let compiled = Arc::new(MapperMethod::compile(&self.config, mapper, method)?);
                entry.insert(Arc::clone(&compiled));
                Ok(compiled)
            }
        }
    }
}

impl fmt::Debug for MapperEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperEngine")
            .field("cached_methods", &self.methods.len())
            .finish()
    }
}
