//! Configuration registry.
//!
//! The registry holds everything the engine resolves against: mapped
//! statements, mapper interfaces, naming settings, the object factory,
//! and the type-handler registry. It is populated at registration time
//! and read-only during execution.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sqlbind_core::{DefaultObjectFactory, ObjectFactory, TypeHandlerRegistry};

use crate::command::CommandKind;
use crate::mapper::{MapperSpec, MethodDescriptor, TypeRef};

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Name unnamed parameters after their source identifier instead of
    /// their 1-based position.
    pub use_actual_param_names: bool,
}

/// A registered command: statement identifier, kind, and the declared
/// result type when one was registered.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedStatement {
    id: String,
    kind: CommandKind,
    result_type: Option<TypeRef>,
}

impl MappedStatement {
    /// A statement with the given identifier and kind.
    pub fn new(id: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            id: id.into(),
            kind,
            result_type: None,
        }
    }

    /// Declare the statement's result row type. A declared result type is
    /// what allows a row callback to be used against the statement.
    pub fn result_type(mut self, result_type: TypeRef) -> Self {
        self.result_type = Some(result_type);
        self
    }

    /// Fully-qualified statement identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Command kind.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Declared result row type, if registered.
    pub fn declared_result_type(&self) -> Option<&TypeRef> {
        self.result_type.as_ref()
    }
}

/// The registry the engine resolves statements and mappers against.
#[derive(Debug)]
pub struct Configuration {
    settings: Settings,
    statements: FxHashMap<String, MappedStatement>,
    mappers: FxHashMap<String, MapperSpec>,
    object_factory: Arc<dyn ObjectFactory>,
    type_handlers: TypeHandlerRegistry,
}

impl Configuration {
    /// An empty registry with default settings and collaborators.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// An empty registry with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            statements: FxHashMap::default(),
            mappers: FxHashMap::default(),
            object_factory: Arc::new(DefaultObjectFactory),
            type_handlers: TypeHandlerRegistry::new(),
        }
    }

    /// Register a mapped statement, replacing any previous registration
    /// under the same identifier.
    pub fn add_statement(&mut self, statement: MappedStatement) {
        tracing::debug!(statement = statement.id(), kind = %statement.kind(), "registering statement");
        self.statements.insert(statement.id().to_string(), statement);
    }

    /// Register a mapper interface.
    pub fn add_mapper(&mut self, mapper: MapperSpec) {
        tracing::debug!(mapper = %mapper.name, methods = mapper.methods.len(), "registering mapper");
        self.mappers.insert(mapper.name.clone(), mapper);
    }

    /// Replace the object factory.
    pub fn set_object_factory(&mut self, factory: Arc<dyn ObjectFactory>) {
        self.object_factory = factory;
    }

    /// Whether a statement is registered under the identifier.
    pub fn has_statement(&self, id: &str) -> bool {
        self.statements.contains_key(id)
    }

    /// The statement registered under the identifier.
    pub fn mapped_statement(&self, id: &str) -> Option<&MappedStatement> {
        self.statements.get(id)
    }

    /// The mapper interface registered under the full name.
    pub fn mapper(&self, name: &str) -> Option<&MapperSpec> {
        self.mappers.get(name)
    }

    /// Engine settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The collection-building collaborator.
    pub fn object_factory(&self) -> &Arc<dyn ObjectFactory> {
        &self.object_factory
    }

    /// The type-handler registry. Read-only from the engine's
    /// perspective; session implementations consume it.
    pub fn type_handlers(&self) -> &TypeHandlerRegistry {
        &self.type_handlers
    }

    /// Mutable access to the type-handler registry, for registration.
    pub fn type_handlers_mut(&mut self) -> &mut TypeHandlerRegistry {
        &mut self.type_handlers
    }

    /// Whether `descendant` is `ancestor` or reaches it through the
    /// interface graph.
    pub fn is_assignable(&self, ancestor: &str, descendant: &str) -> bool {
        if ancestor == descendant {
            return true;
        }
        let Some(spec) = self.mapper(descendant) else {
            return false;
        };
        spec.parents
            .iter()
            .any(|parent| self.is_assignable(ancestor, &parent.name))
    }

    /// Find a method visible on `mapper`: declared directly, or inherited
    /// through the interface graph (first declaration found, in parent
    /// declaration order).
    ///
    /// Returns the descriptor together with the name of the interface
    /// that declares it.
    pub(crate) fn find_method<'a>(
        &'a self,
        mapper_name: &str,
        method_name: &str,
    ) -> Option<(&'a MethodDescriptor, &'a str)> {
        let spec = self.mapper(mapper_name)?;
        if let Some(descriptor) = spec.declared_method(method_name) {
            return Some((descriptor, spec.name.as_str()));
        }
        for parent in &spec.parents {
            if let Some(found) = self.find_method(&parent.name, method_name) {
                return Some(found);
            }
        }
        None
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
