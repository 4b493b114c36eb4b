//! Core types and collaborator contracts for sqlbind
//!
//! This crate defines the foundational types consumed by the binding engine:
//! - Value: unified value model for arguments and result rows
//! - BoundParams / ParamValue: the named-parameter view of a call's arguments
//! - PageBounds: offset + limit paging window
//! - RowCursor: lazy, forward-only, single-pass row sequence
//! - RowCallback: per-row visitor for streaming results
//! - ObjectFactory / RowCollection: declared-collection construction
//! - TypeHandlerRegistry: named value renderers for keyed results
//! - Session: the statement-execution contract the engine dispatches to
//! - Error: failures raised by collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod callback;
pub mod cursor;
pub mod error;
pub mod factory;
pub mod handler;
pub mod page;
pub mod params;
pub mod session;
pub mod value;

// Re-export commonly used types and traits
pub use callback::RowCallback;
pub use cursor::{RowCursor, VecCursor};
pub use error::{Error, Result};
pub use factory::{DefaultObjectFactory, ObjectFactory, RowCollection};
pub use handler::{TypeHandler, TypeHandlerRegistry};
pub use page::PageBounds;
pub use params::{BoundParams, ParamValue};
pub use session::{BatchResult, KeyedRows, Session};
pub use value::Value;
