//! Return-shape analysis.
//!
//! A method's declared return type is inspected once and classified into a
//! shape: void, many (collection or array), map (keyed), cursor (lazy
//! streaming), or single value. The same pass resolves generic return
//! declarations against the owning interface's type bindings and records
//! the positions of the paging-window and row-callback marker parameters.
//!
//! The resulting [`MethodSignature`] is cached per method alongside the
//! resolved command; it is computed exactly once.

use std::collections::HashMap;

use crate::config::Configuration;
use crate::error::Error;
use crate::mapper::{MapperSpec, MethodDescriptor, ParamKind, TypeRef};
use crate::params::ParamResolver;
use crate::Result;

/// Compiled signature metadata for one mapper method.
#[derive(Debug)]
pub(crate) struct MethodSignature {
    returns_void: bool,
    returns_many: bool,
    returns_map: bool,
    returns_cursor: bool,
    return_type: TypeRef,
    map_key: Option<String>,
    page_index: Option<usize>,
    callback_index: Option<usize>,
    param_count: usize,
    resolver: ParamResolver,
}

impl MethodSignature {
    /// Analyze `method` as declared on `declaring` and called through
    /// `owner`.
    pub(crate) fn analyze(
        config: &Configuration,
        owner: &MapperSpec,
        method: &MethodDescriptor,
        declaring: &str,
    ) -> Result<Self> {
        let return_type = resolve_return_type(config, owner, declaring, &method.return_type);

        let returns_void = return_type == TypeRef::Void;
        let returns_many = match &return_type {
            TypeRef::List(_) | TypeRef::Array(_) => true,
            TypeRef::Collection { name, .. } => config.object_factory().is_collection(name),
            _ => false,
        };
        let returns_cursor = matches!(return_type, TypeRef::Cursor(_));
        let map_key = match return_type {
            TypeRef::Map { .. } => method.map_key.clone(),
            _ => None,
        };
        let returns_map = map_key.is_some();

        let page_index = unique_marker_index(method, ParamKind::Page, "paging-window")?;
        let callback_index = unique_marker_index(method, ParamKind::Callback, "row-callback")?;
        let resolver = ParamResolver::new(config.settings(), method);

        Ok(Self {
            returns_void,
            returns_many,
            returns_map,
            returns_cursor,
            return_type,
            map_key,
            page_index,
            callback_index,
            param_count: method.params.len(),
            resolver,
        })
    }

    pub(crate) fn returns_void(&self) -> bool {
        self.returns_void
    }

    pub(crate) fn returns_many(&self) -> bool {
        self.returns_many
    }

    pub(crate) fn returns_map(&self) -> bool {
        self.returns_map
    }

    pub(crate) fn returns_cursor(&self) -> bool {
        self.returns_cursor
    }

    pub(crate) fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub(crate) fn map_key(&self) -> Option<&str> {
        self.map_key.as_deref()
    }

    pub(crate) fn page_index(&self) -> Option<usize> {
        self.page_index
    }

    pub(crate) fn has_callback(&self) -> bool {
        self.callback_index.is_some()
    }

    pub(crate) fn callback_index(&self) -> Option<usize> {
        self.callback_index
    }

    pub(crate) fn param_count(&self) -> usize {
        self.param_count
    }

    pub(crate) fn resolver(&self) -> &ParamResolver {
        &self.resolver
    }
}

/// Resolve a declared return type to its concrete form.
///
/// Type parameters of the declaring interface are substituted with the
/// arguments bound along the owner-to-declaring inheritance path. A
/// parameter that survives substitution degrades to a plain named type.
fn resolve_return_type(
    config: &Configuration,
    owner: &MapperSpec,
    declaring: &str,
    declared: &TypeRef,
) -> TypeRef {
    let bindings = if owner.name == declaring {
        HashMap::new()
    } else {
        param_bindings(config, owner, HashMap::new(), declaring).unwrap_or_default()
    };
    degrade(substitute(declared.clone(), &bindings))
}

/// Compose the type-argument bindings along the path from `current` to the
/// declaring interface.
fn param_bindings(
    config: &Configuration,
    current: &MapperSpec,
    bindings: HashMap<String, TypeRef>,
    declaring: &str,
) -> Option<HashMap<String, TypeRef>> {
    if current.name == declaring {
        return Some(bindings);
    }
    for parent in &current.parents {
        let Some(parent_spec) = config.mapper(&parent.name) else {
            continue;
        };
        if !config.is_assignable(declaring, &parent_spec.name) {
            continue;
        }
        let mut parent_bindings = HashMap::new();
        for (i, type_param) in parent_spec.type_params.iter().enumerate() {
            let arg = parent
                .args
                .get(i)
                .cloned()
                .unwrap_or_else(|| TypeRef::Param(type_param.clone()));
            parent_bindings.insert(type_param.clone(), substitute(arg, &bindings));
        }
        if let Some(found) = param_bindings(config, parent_spec, parent_bindings, declaring) {
            return Some(found);
        }
    }
    None
}

/// Substitute bound type parameters, recursing through containers.
fn substitute(ty: TypeRef, bindings: &HashMap<String, TypeRef>) -> TypeRef {
    match ty {
        TypeRef::Param(name) => bindings
            .get(&name)
            .cloned()
            .unwrap_or(TypeRef::Param(name)),
        TypeRef::List(element) => TypeRef::List(Box::new(substitute(*element, bindings))),
        TypeRef::Array(element) => TypeRef::Array(Box::new(substitute(*element, bindings))),
        TypeRef::Collection { name, element } => TypeRef::Collection {
            name,
            element: Box::new(substitute(*element, bindings)),
        },
        TypeRef::Map { value } => TypeRef::Map {
            value: Box::new(substitute(*value, bindings)),
        },
        TypeRef::Cursor(element) => TypeRef::Cursor(Box::new(substitute(*element, bindings))),
        other => other,
    }
}

/// Turn any unresolved type parameters into plain named types.
fn degrade(ty: TypeRef) -> TypeRef {
    match ty {
        TypeRef::Param(name) => TypeRef::Named(name),
        TypeRef::List(element) => TypeRef::List(Box::new(degrade(*element))),
        TypeRef::Array(element) => TypeRef::Array(Box::new(degrade(*element))),
        TypeRef::Collection { name, element } => TypeRef::Collection {
            name,
            element: Box::new(degrade(*element)),
        },
        TypeRef::Map { value } => TypeRef::Map {
            value: Box::new(degrade(*value)),
        },
        TypeRef::Cursor(element) => TypeRef::Cursor(Box::new(degrade(*element))),
        other => other,
    }
}

/// The index of the unique parameter of the given marker kind, if any.
fn unique_marker_index(
    method: &MethodDescriptor,
    kind: ParamKind,
    marker: &str,
) -> Result<Option<usize>> {
    let mut index = None;
    for (i, param) in method.params.iter().enumerate() {
        if param.kind == kind {
            if index.is_some() {
                return Err(Error::DuplicateMarkerParameter {
                    method: method.name.clone(),
                    marker: marker.to_string(),
                });
            }
            index = Some(i);
        }
    }
    Ok(index)
}
