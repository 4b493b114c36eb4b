//! Command resolution.
//!
//! A method call resolves to a command by statement identifier:
//! `{interface full name}.{method name}`. When the identifier is not
//! registered and the method is inherited, resolution recurses into each
//! parent interface through which the declaring interface is reachable,
//! and the first successful resolution wins. A method with no registered
//! statement resolves only if it carries the flush marker.
//!
//! Resolution is a pure lookup over the already-populated configuration;
//! the result is cached per method by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Configuration, MappedStatement};
use crate::error::Error;
use crate::mapper::{MapperSpec, MethodDescriptor};
use crate::Result;

/// The operation category of a command, governing dispatch and result
/// shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Row-inserting mutation.
    Insert,
    /// Row-updating mutation.
    Update,
    /// Row-deleting mutation.
    Delete,
    /// Query.
    Select,
    /// Flush of batched statements.
    Flush,
    /// Unusable; never dispatched.
    Unknown,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Insert => "INSERT",
            CommandKind::Update => "UPDATE",
            CommandKind::Delete => "DELETE",
            CommandKind::Select => "SELECT",
            CommandKind::Flush => "FLUSH",
            CommandKind::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// A method's resolved command: statement name and kind.
///
/// The name is absent only for flush methods; the kind is never `Unknown`
/// for a successfully resolved named command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCommand {
    name: Option<String>,
    kind: CommandKind,
}

impl ResolvedCommand {
    /// Resolve the command for `method` as called through `owner`.
    ///
    /// `declaring` names the interface that actually declares the method;
    /// for a method declared directly on `owner` the two coincide.
    pub(crate) fn resolve(
        config: &Configuration,
        owner: &MapperSpec,
        method: &MethodDescriptor,
        declaring: &str,
    ) -> Result<Self> {
        match resolve_mapped_statement(config, owner, &method.name, declaring) {
            None => {
                if method.flush {
                    Ok(Self {
                        name: None,
                        kind: CommandKind::Flush,
                    })
                } else {
                    Err(Error::UnresolvedStatement {
                        statement: format!("{}.{}", owner.name, method.name),
                    })
                }
            }
            Some(statement) => {
                if statement.kind() == CommandKind::Unknown {
                    return Err(Error::UnknownCommandKind {
                        statement: statement.id().to_string(),
                    });
                }
                tracing::debug!(
                    statement = statement.id(),
                    kind = %statement.kind(),
                    "resolved command"
                );
                Ok(Self {
                    name: Some(statement.id().to_string()),
                    kind: statement.kind(),
                })
            }
        }
    }

    /// The resolved statement name; absent for flush methods.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The resolved command kind.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }
}

/// Search `mapper` and, when the method is inherited, its parents for the
/// registered statement.
///
/// The search only descends into parents through which `declaring` is
/// reachable, so sibling hierarchies that happen to share a method name
/// are never consulted.
fn resolve_mapped_statement<'a>(
    config: &'a Configuration,
    mapper: &MapperSpec,
    method_name: &str,
    declaring: &str,
) -> Option<&'a MappedStatement> {
    let statement_id = format!("{}.{}", mapper.name, method_name);
    if config.has_statement(&statement_id) {
        return config.mapped_statement(&statement_id);
    }
    if mapper.name == declaring {
        return None;
    }
    for parent in &mapper.parents {
        let Some(parent_spec) = config.mapper(&parent.name) else {
            continue;
        };
        if !config.is_assignable(declaring, &parent_spec.name) {
            continue;
        }
        if let Some(statement) =
            resolve_mapped_statement(config, parent_spec, method_name, declaring)
        {
            return Some(statement);
        }
    }
    None
}
