//! sqlbind - a mapper-method binding and execution engine
//!
//! sqlbind binds interface method calls, described only by their declared
//! signatures, to SQL-like commands and executes them against a session
//! abstraction, reshaping each raw result into the method's declared
//! return shape (scalar, list, map, array, cursor, or void).
//!
//! # Quick Start
//!
//! ```ignore
//! use sqlbind::{Arg, CommandKind, Configuration, MappedStatement, MapperEngine,
//!     MapperSpec, MethodDescriptor, ParamSpec, TypeRef, Value};
//! use std::sync::Arc;
//!
//! let mut config = Configuration::new();
//! config.add_mapper(
//!     MapperSpec::new("app.UserMapper").method(
//!         MethodDescriptor::new("find", TypeRef::named("User"))
//!             .param(ParamSpec::value("id")),
//!     ),
//! );
//! config.add_statement(MappedStatement::new("app.UserMapper.find", CommandKind::Select));
//!
//! let engine = MapperEngine::new(Arc::new(config));
//! let found = engine.execute(&mut session, "app.UserMapper", "find",
//!     vec![Arg::Value(Value::from("u1"))])?;
//! ```
//!
//! # Architecture
//!
//! All calls go through the [`MapperEngine`], which caches per-method
//! metadata (resolved command + return shape) and binds parameters per
//! call. Statement execution itself lives behind the [`Session`] trait;
//! the engine neither parses SQL nor touches connections.

// Re-export the public API from the member crates
pub use sqlbind_binding::*;

pub use sqlbind_core::{
    BatchResult, BoundParams, DefaultObjectFactory, KeyedRows, ObjectFactory, PageBounds,
    ParamValue, RowCallback, RowCollection, RowCursor, Session, TypeHandler, TypeHandlerRegistry,
    VecCursor,
};
