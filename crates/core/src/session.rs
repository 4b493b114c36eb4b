//! The session contract the binding engine dispatches to.
//!
//! A session owns statement execution: connection-level blocking,
//! timeouts, cancellation, and result materialization all live behind this
//! trait. The engine performs exactly one session call per invocation and
//! adds no retries or timeouts of its own.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::callback::RowCallback;
use crate::cursor::RowCursor;
use crate::error::Result;
use crate::page::PageBounds;
use crate::params::ParamValue;
use crate::value::Value;

/// Keyed query result: map-key text to row, in result order.
pub type KeyedRows = IndexMap<String, Value>;

/// Outcome of one flushed batch statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Statement the batch was accumulated for.
    pub statement: String,
    /// Affected-row count per queued execution.
    pub update_counts: Vec<i32>,
}

/// Statement execution against a backing store.
///
/// `statement` is always the fully-qualified statement name resolved by
/// the engine; `param` is the command parameter set built from the call's
/// arguments. Row-limiting (`page`) is applied by the implementation.
pub trait Session {
    /// Execute an insert. Returns the affected-row count.
    fn insert(&mut self, statement: &str, param: ParamValue) -> Result<i32>;

    /// Execute an update. Returns the affected-row count.
    fn update(&mut self, statement: &str, param: ParamValue) -> Result<i32>;

    /// Execute a delete. Returns the affected-row count.
    fn delete(&mut self, statement: &str, param: ParamValue) -> Result<i32>;

    /// Execute a query expected to match at most one row.
    fn select_one(&mut self, statement: &str, param: ParamValue) -> Result<Option<Value>>;

    /// Execute a query and materialize the windowed rows.
    fn select_list(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
    ) -> Result<Vec<Value>>;

    /// Execute a query and key the windowed rows by the named result
    /// column.
    fn select_map(
        &mut self,
        statement: &str,
        param: ParamValue,
        map_key: &str,
        page: PageBounds,
    ) -> Result<KeyedRows>;

    /// Execute a query lazily. The returned cursor holds the underlying
    /// statement until closed; closing is the caller's responsibility.
    fn select_cursor(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
    ) -> Result<Box<dyn RowCursor>>;

    /// Execute a query, streaming each windowed row through the callback
    /// without buffering.
    fn select_each(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
        callback: &mut dyn RowCallback,
    ) -> Result<()>;

    /// Flush any batched statements, reporting per-statement outcomes.
    fn flush_statements(&mut self) -> Result<Vec<BatchResult>>;
}
