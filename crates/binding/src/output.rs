//! Output enum for dispatched method results.
//!
//! Every method produces exactly one output shape, determined by its
//! resolved command kind and declared return type. The mapping is
//! deterministic: the same method always produces the same variant.

use sqlbind_core::{BatchResult, KeyedRows, RowCollection, RowCursor, Value};

/// Successful method execution results.
///
/// # Example
///
/// ```text
/// match engine.execute(&mut session, "app.UserMapper", "find", args)? {
///     Output::Row(Some(row)) => println!("found: {row:?}"),
///     Output::Row(None) => println!("no match"),
///     _ => unreachable!("find is a single-row select"),
/// }
/// ```
#[derive(Debug)]
pub enum Output {
    /// No return value (void methods).
    Unit,
    /// Affected-row count for a method declared `Int`.
    Int(i32),
    /// Widened affected-row count for a method declared `Long`.
    Long(i64),
    /// Rows-affected test for a method declared `Bool`.
    Bool(bool),
    /// Single-row query result; `None` when no row matched.
    Row(Option<Value>),
    /// List query result, in result order.
    Rows(Vec<Value>),
    /// List query result converted to the declared array type.
    Array(Box<[Value]>),
    /// List query result loaded into the declared collection type.
    Collection(Box<dyn RowCollection>),
    /// Keyed query result.
    RowMap(KeyedRows),
    /// Lazy query result. The caller must close the cursor.
    Cursor(Box<dyn RowCursor>),
    /// Flushed batch outcomes.
    Batch(Vec<BatchResult>),
}

impl Output {
    /// The variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Output::Unit => "Unit",
            Output::Int(_) => "Int",
            Output::Long(_) => "Long",
            Output::Bool(_) => "Bool",
            Output::Row(_) => "Row",
            Output::Rows(_) => "Rows",
            Output::Array(_) => "Array",
            Output::Collection(_) => "Collection",
            Output::RowMap(_) => "RowMap",
            Output::Cursor(_) => "Cursor",
            Output::Batch(_) => "Batch",
        }
    }
}
