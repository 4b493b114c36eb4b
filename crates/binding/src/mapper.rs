//! Mapper registration model.
//!
//! Mapper interfaces, their methods, and their parameter lists are
//! registered as explicit descriptors rather than discovered by runtime
//! inspection. Each descriptor is pure data: a tagged record carrying the
//! method name, its ordered parameters, its declared return type, and the
//! markers that would otherwise live in annotations (map key, flush).
//!
//! Inheritance is an explicit directed graph: a [`MapperSpec`] names its
//! parents, and each [`ParentRef`] binds the parent's type parameters, so
//! generic return declarations can be resolved without reflection.

use serde::{Deserialize, Serialize};

/// The declared type of a mapper method's return value or type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    /// No return value.
    Void,
    /// 32-bit integer (affected-row counts).
    Int,
    /// 64-bit integer (widened affected-row counts).
    Long,
    /// Boolean (rows > 0).
    Bool,
    /// A named row/entity type.
    Named(String),
    /// A list of the element type.
    List(Box<TypeRef>),
    /// An array of the element type.
    Array(Box<TypeRef>),
    /// A custom container built by the object factory.
    Collection {
        /// Container type name, as the object factory knows it.
        name: String,
        /// Element type.
        element: Box<TypeRef>,
    },
    /// Rows keyed by a result column.
    Map {
        /// Row type.
        value: Box<TypeRef>,
    },
    /// A lazy, single-pass row sequence.
    Cursor(Box<TypeRef>),
    /// A type parameter of the declaring interface, resolved against the
    /// owning interface's bindings.
    Param(String),
}

impl TypeRef {
    /// Shorthand for a named row type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Shorthand for a list of a named row type.
    pub fn list_of(name: impl Into<String>) -> Self {
        TypeRef::List(Box::new(TypeRef::named(name)))
    }

    /// Human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TypeRef::Void => "void".to_string(),
            TypeRef::Int => "Int".to_string(),
            TypeRef::Long => "Long".to_string(),
            TypeRef::Bool => "Bool".to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::List(element) => format!("Vec<{}>", element.describe()),
            TypeRef::Array(element) => format!("[{}]", element.describe()),
            TypeRef::Collection { name, element } => {
                format!("{}<{}>", name, element.describe())
            }
            TypeRef::Map { value } => format!("Map<String, {}>", value.describe()),
            TypeRef::Cursor(element) => format!("Cursor<{}>", element.describe()),
            TypeRef::Param(name) => name.clone(),
        }
    }
}

/// Kind of a declared method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// An ordinary argument, bound as a command parameter.
    Value,
    /// The paging-window marker, extracted out-of-band.
    Page,
    /// The row-callback marker, extracted out-of-band.
    Callback,
}

/// One declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// The source identifier of the parameter.
    pub ident: String,
    /// Explicit parameter name, when one was declared.
    pub name: Option<String>,
    /// Parameter kind.
    pub kind: ParamKind,
}

impl ParamSpec {
    /// An ordinary unnamed parameter.
    pub fn value(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            name: None,
            kind: ParamKind::Value,
        }
    }

    /// An ordinary parameter with an explicit name.
    pub fn named(ident: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            name: Some(name.into()),
            kind: ParamKind::Value,
        }
    }

    /// A paging-window marker parameter.
    pub fn page(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            name: None,
            kind: ParamKind::Page,
        }
    }

    /// A row-callback marker parameter.
    pub fn callback(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            name: None,
            kind: ParamKind::Callback,
        }
    }
}

/// A method declared directly on a mapper interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Ordered parameter list.
    pub params: Vec<ParamSpec>,
    /// Declared return type.
    pub return_type: TypeRef,
    /// Map-key name, when the method declares a keyed result.
    pub map_key: Option<String>,
    /// Whether the method carries the flush marker.
    pub flush: bool,
}

impl MethodDescriptor {
    /// A method with the given name and declared return type.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type,
            map_key: None,
            flush: false,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Declare the map-key name for a keyed result.
    pub fn map_key(mut self, key: impl Into<String>) -> Self {
        self.map_key = Some(key.into());
        self
    }

    /// Mark the method as a flush method.
    pub fn flush(mut self) -> Self {
        self.flush = true;
        self
    }
}

/// A parent interface reference, binding the parent's type parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    /// Parent interface full name.
    pub name: String,
    /// Type arguments, positional against the parent's type parameters.
    pub args: Vec<TypeRef>,
}

impl ParentRef {
    /// A parent reference without type arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parent reference with type arguments.
    pub fn with_args(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// A registered mapper interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperSpec {
    /// Full interface name; statement identifiers are prefixed with it.
    pub name: String,
    /// Declared type parameters, in order.
    pub type_params: Vec<String>,
    /// Parent interfaces.
    pub parents: Vec<ParentRef>,
    /// Methods declared directly on this interface.
    pub methods: Vec<MethodDescriptor>,
}

impl MapperSpec {
    /// An interface with the given full name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            parents: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Declare a type parameter.
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Declare a parent interface.
    pub fn extends(mut self, parent: ParentRef) -> Self {
        self.parents.push(parent);
        self
    }

    /// Declare a method.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// The method declared directly on this interface, if any.
    pub fn declared_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}
