//! Parameter binding.
//!
//! Converts a call's ordered argument values into the command parameter
//! set handed to the session. Marker arguments (paging window, row
//! callback) are stripped by the signature before naming; the remainder
//! are named by explicit declaration, by source identifier (when
//! configured), or by 1-based position.
//!
//! A generated name that collides with an already-bound entry never
//! overwrites it: the later value lands on the first free generic
//! `param{N}` slot, so both values stay retrievable. Every value is also
//! aliased under its generic `param{N}` name unless an explicit name
//! claims that slot.

use sqlbind_core::{BoundParams, ParamValue, Value};

use crate::config::Settings;
use crate::error::Error;
use crate::mapper::{MethodDescriptor, ParamKind};
use crate::Result;

/// Per-method parameter naming, precomputed at registration.
#[derive(Debug)]
pub(crate) struct ParamResolver {
    /// (argument index, generated name), in declaration order, markers
    /// excluded.
    names: Vec<(usize, String)>,
    has_explicit_name: bool,
}

impl ParamResolver {
    pub(crate) fn new(settings: &Settings, method: &MethodDescriptor) -> Self {
        let has_explicit_name = method
            .params
            .iter()
            .any(|p| p.kind == ParamKind::Value && p.name.is_some());

        let mut names = Vec::new();
        for (index, param) in method.params.iter().enumerate() {
            if param.kind != ParamKind::Value {
                continue;
            }
            let name = match &param.name {
                Some(explicit) => explicit.clone(),
                None if settings.use_actual_param_names => param.ident.clone(),
                None => (names.len() + 1).to_string(),
            };
            names.push((index, name));
        }

        Self {
            names,
            has_explicit_name,
        }
    }

    /// Build the command parameter set from the call's argument slots.
    ///
    /// `values` is indexed by declared parameter position; marker slots
    /// are `None`. Bindable slots are taken out of the vector.
    pub(crate) fn bind(
        &self,
        method_name: &str,
        values: &mut [Option<Value>],
    ) -> Result<ParamValue> {
        if self.names.is_empty() {
            return Ok(ParamValue::Null);
        }

        if !self.has_explicit_name && self.names.len() == 1 {
            let (index, _) = &self.names[0];
            let value = take_value(method_name, values, *index)?;
            return Ok(ParamValue::Single(value));
        }

        let mut params = BoundParams::new();
        for (position, (index, name)) in self.names.iter().enumerate() {
            let value = take_value(method_name, values, *index)?;
            let generic = format!("param{}", position + 1);

            if params.contains(name) {
                // Collision: keep both values retrievable.
                let slot = free_generic_slot(&params, position + 1);
                params.insert(slot, value.clone());
            } else {
                params.insert(name.clone(), value.clone());
            }

            // Generic alias, unless an explicit name claims the slot.
            if !params.contains(&generic) && !self.names.iter().any(|(_, n)| n == &generic) {
                params.insert(generic, value);
            }
        }
        Ok(ParamValue::Named(params))
    }
}

fn take_value(method_name: &str, values: &mut [Option<Value>], index: usize) -> Result<Value> {
    values
        .get_mut(index)
        .and_then(Option::take)
        .ok_or_else(|| Error::ArgumentMismatch {
            method: method_name.to_string(),
            reason: format!("missing value for parameter at position {index}"),
        })
}

fn free_generic_slot(params: &BoundParams, start: usize) -> String {
    let mut n = start;
    loop {
        let candidate = format!("param{n}");
        if !params.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
