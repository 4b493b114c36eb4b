//! Compiled mapper methods and the dispatch state machine.
//!
//! A [`MapperMethod`] ties together a method's resolved command, its
//! return-shape signature, and its parameter resolver. It is built once
//! per method and cached by the engine; `execute` then routes each call
//! to the matching session operation and reshapes the raw result into the
//! declared return shape.

use sqlbind_core::{PageBounds, ParamValue, RowCallback, Session, Value};

use crate::command::{CommandKind, ResolvedCommand};
use crate::config::Configuration;
use crate::error::Error;
use crate::executor::Arg;
use crate::mapper::TypeRef;
use crate::output::Output;
use crate::signature::MethodSignature;
use crate::Result;

/// Compiled per-method state: resolved command + signature.
#[derive(Debug)]
pub(crate) struct MapperMethod {
    /// `{mapper}.{method}`, used in messages when no statement name was
    /// resolved (flush methods).
    id: String,
    method_name: String,
    command: ResolvedCommand,
    signature: MethodSignature,
}

impl MapperMethod {
    /// Resolve and analyze `method_name` as called through `mapper_name`.
    pub(crate) fn compile(
        config: &Configuration,
        mapper_name: &str,
        method_name: &str,
    ) -> Result<Self> {
        let owner = config
            .mapper(mapper_name)
            .ok_or_else(|| Error::UnknownMapper {
                mapper: mapper_name.to_string(),
            })?;
        let id = format!("{mapper_name}.{method_name}");
        let (descriptor, declaring) = config
            .find_method(mapper_name, method_name)
            .ok_or_else(|| Error::UnresolvedStatement {
                statement: id.clone(),
            })?;
        let command = ResolvedCommand::resolve(config, owner, descriptor, declaring)?;
        let signature = MethodSignature::analyze(config, owner, descriptor, declaring)?;
        Ok(Self {
            id,
            method_name: method_name.to_string(),
            command,
            signature,
        })
    }

    pub(crate) fn command(&self) -> &ResolvedCommand {
        &self.command
    }

    /// Execute one call.
    pub(crate) fn execute<'a>(
        &self,
        config: &Configuration,
        session: &mut dyn Session,
        args: Vec<Arg<'a>>,
    ) -> Result<Output> {
        let (mut values, page, callback) = self.split_args(args)?;
        tracing::debug!(
            statement = self.command.name().unwrap_or(&self.id),
            kind = %self.command.kind(),
            "dispatching"
        );

        match self.command.kind() {
            CommandKind::Insert => {
                let param = self.bind(&mut values)?;
                let count = session.insert(self.statement()?, param)?;
                self.row_count_result(count)
            }
            CommandKind::Update => {
                let param = self.bind(&mut values)?;
                let count = session.update(self.statement()?, param)?;
                self.row_count_result(count)
            }
            CommandKind::Delete => {
                let param = self.bind(&mut values)?;
                let count = session.delete(self.statement()?, param)?;
                self.row_count_result(count)
            }
            CommandKind::Select => {
                if self.signature.returns_void() && self.signature.has_callback() {
                    self.execute_with_callback(config, session, &mut values, page, callback)
                } else if self.signature.returns_many() {
                    self.execute_for_many(config, session, &mut values, page)
                } else if self.signature.returns_map() {
                    self.execute_for_map(session, &mut values, page)
                } else if self.signature.returns_cursor() {
                    let param = self.bind(&mut values)?;
                    let cursor = session.select_cursor(
                        self.statement()?,
                        param,
                        page.unwrap_or(PageBounds::UNBOUNDED),
                    )?;
                    Ok(Output::Cursor(cursor))
                } else {
                    let param = self.bind(&mut values)?;
                    let row = session.select_one(self.statement()?, param)?;
                    if self.signature.returns_void() {
                        return Ok(Output::Unit);
                    }
                    if row.is_none() && self.returns_primitive() {
                        return Err(Error::NullForPrimitiveReturn {
                            statement: self.statement()?.to_string(),
                            declared: self.signature.return_type().describe(),
                        });
                    }
                    Ok(Output::Row(row))
                }
            }
            CommandKind::Flush => {
                let results = session.flush_statements()?;
                if self.signature.returns_void() {
                    Ok(Output::Unit)
                } else {
                    Ok(Output::Batch(results))
                }
            }
            CommandKind::Unknown => Err(Error::UnknownCommandDispatch {
                statement: self.command.name().unwrap_or(&self.id).to_string(),
            }),
        }
    }

    // =========================================================================
    // Select branches
    // =========================================================================

    fn execute_with_callback<'a>(
        &self,
        config: &Configuration,
        session: &mut dyn Session,
        values: &mut [Option<Value>],
        page: Option<PageBounds>,
        callback: Option<&'a mut dyn RowCallback>,
    ) -> Result<Output> {
        let statement = self.statement()?;
        let declared = config
            .mapped_statement(statement)
            .and_then(|ms| ms.declared_result_type());
        if declared.is_none() {
            return Err(Error::MissingResultShapeAnnotation {
                statement: statement.to_string(),
            });
        }
        let callback = callback.ok_or_else(|| Error::ArgumentMismatch {
            method: self.method_name.clone(),
            reason: "row callback argument missing".to_string(),
        })?;
        let param = self.bind(values)?;
        session.select_each(
            statement,
            param,
            page.unwrap_or(PageBounds::UNBOUNDED),
            callback,
        )?;
        Ok(Output::Unit)
    }

    fn execute_for_many(
        &self,
        config: &Configuration,
        session: &mut dyn Session,
        values: &mut [Option<Value>],
        page: Option<PageBounds>,
    ) -> Result<Output> {
        let statement = self.statement()?;
        let param = self.bind(values)?;
        let rows = session.select_list(statement, param, page.unwrap_or(PageBounds::UNBOUNDED))?;
        tracing::trace!(statement, rows = rows.len(), "list query returned");

        match self.signature.return_type() {
            TypeRef::List(_) => Ok(Output::Rows(rows)),
            TypeRef::Array(_) => Ok(Output::Array(rows.into_boxed_slice())),
            TypeRef::Collection { name, .. } => {
                let mut collection = config.object_factory().create_collection(name)?;
                for row in rows {
                    collection.push(row);
                }
                Ok(Output::Collection(collection))
            }
            other => Err(Error::UnsupportedReturnType {
                statement: statement.to_string(),
                declared: other.describe(),
            }),
        }
    }

    fn execute_for_map(
        &self,
        session: &mut dyn Session,
        values: &mut [Option<Value>],
        page: Option<PageBounds>,
    ) -> Result<Output> {
        let statement = self.statement()?;
        let Some(map_key) = self.signature.map_key() else {
            return Err(Error::UnknownCommandDispatch {
                statement: statement.to_string(),
            });
        };
        let param = self.bind(values)?;
        let keyed = session.select_map(
            statement,
            param,
            map_key,
            page.unwrap_or(PageBounds::UNBOUNDED),
        )?;
        Ok(Output::RowMap(keyed))
    }

    // =========================================================================
    // Argument and result plumbing
    // =========================================================================

    /// Separate marker arguments from bindable values, checking the call
    /// against the declared parameter list before any session call.
    fn split_args<'a>(
        &self,
        args: Vec<Arg<'a>>,
    ) -> Result<(
        Vec<Option<Value>>,
        Option<PageBounds>,
        Option<&'a mut dyn RowCallback>,
    )> {
        if args.len() != self.signature.param_count() {
            return Err(Error::ArgumentMismatch {
                method: self.method_name.clone(),
                reason: format!(
                    "expected {} arguments, got {}",
                    self.signature.param_count(),
                    args.len()
                ),
            });
        }

        let mut values: Vec<Option<Value>> = (0..args.len()).map(|_| None).collect();
        let mut page = None;
        let mut callback = None;
        for (i, arg) in args.into_iter().enumerate() {
            match arg {
                Arg::Value(value) => {
                    if self.signature.page_index() == Some(i)
                        || self.signature.callback_index() == Some(i)
                    {
                        return Err(self.marker_mismatch(i, "a marker"));
                    }
                    values[i] = Some(value);
                }
                Arg::Page(bounds) => {
                    if self.signature.page_index() != Some(i) {
                        return Err(self.marker_mismatch(i, "a paging window"));
                    }
                    page = Some(bounds);
                }
                Arg::Callback(cb) => {
                    if self.signature.callback_index() != Some(i) {
                        return Err(self.marker_mismatch(i, "a row callback"));
                    }
                    callback = Some(cb);
                }
            }
        }
        Ok((values, page, callback))
    }

    fn marker_mismatch(&self, position: usize, got: &str) -> Error {
        Error::ArgumentMismatch {
            method: self.method_name.clone(),
            reason: format!("argument at position {position} is not declared as {got}"),
        }
    }

    fn bind(&self, values: &mut [Option<Value>]) -> Result<ParamValue> {
        self.signature.resolver().bind(&self.method_name, values)
    }

    /// The resolved statement name. Present for every kind except flush;
    /// absent here means dispatch took an impossible branch.
    fn statement(&self) -> Result<&str> {
        self.command
            .name()
            .ok_or_else(|| Error::UnknownCommandDispatch {
                statement: self.id.clone(),
            })
    }

    /// Convert an affected-row count into the declared return type.
    fn row_count_result(&self, count: i32) -> Result<Output> {
        match self.signature.return_type() {
            TypeRef::Void => Ok(Output::Unit),
            TypeRef::Int => Ok(Output::Int(count)),
            TypeRef::Long => Ok(Output::Long(i64::from(count))),
            TypeRef::Bool => Ok(Output::Bool(count > 0)),
            other => Err(Error::UnsupportedReturnType {
                statement: self.command.name().unwrap_or(&self.id).to_string(),
                declared: other.describe(),
            }),
        }
    }

    fn returns_primitive(&self) -> bool {
        matches!(
            self.signature.return_type(),
            TypeRef::Int | TypeRef::Long | TypeRef::Bool
        )
    }
}
