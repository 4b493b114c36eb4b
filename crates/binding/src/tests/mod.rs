//! Test modules for the binding crate.

pub mod support;
