//! # sqlbind Binding Engine
//!
//! Binds mapper-interface method calls to SQL-like commands and executes
//! them against a [`Session`](sqlbind_core::Session).
//!
//! A mapper is a declared interface whose methods stand for commands,
//! resolved by name. Mappers and their statements are registered up front
//! in a [`Configuration`]; the [`MapperEngine`] then takes a logical call
//! - mapper name, method name, argument list - and:
//!
//! 1. resolves which command to run (walking the mapper's inheritance
//!    graph when the method is inherited),
//! 2. classifies the declared return type into a shape (void, many, map,
//!    cursor, or single value),
//! 3. converts the arguments into a command parameter set, extracting the
//!    paging-window and row-callback markers out-of-band,
//! 4. invokes the matching session operation and reshapes the raw result
//!    into the declared shape.
//!
//! Steps 1-2 are computed once per method and cached; step 3 runs per
//! call.
//!
//! ## Quick Start
//!
//! ```text
//! use sqlbind_binding::{Arg, CommandKind, Configuration, MappedStatement,
//!     MapperEngine, MapperSpec, MethodDescriptor, TypeRef, Value};
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
//! let row = engine.execute(&mut session, "app.UserMapper", "find",
//!     vec![Arg::Value(Value::from("u1"))])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod config;
mod error;
mod executor;
mod mapper;
mod method;
mod output;
mod params;
mod signature;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use command::{CommandKind, ResolvedCommand};
pub use config::{Configuration, MappedStatement, Settings};
pub use error::Error;
pub use executor::{Arg, MapperEngine, MethodKey};
pub use mapper::{MapperSpec, MethodDescriptor, ParamKind, ParamSpec, ParentRef, TypeRef};
pub use output::Output;

// Re-export the value model so callers don't need sqlbind-core for it
pub use sqlbind_core::Value;

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, Error>;
