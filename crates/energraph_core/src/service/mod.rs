//! Use-case facade over the reflective core.
//!
//! # Responsibility
//! - Compose store, metamodel, and reflective engine into the call surface
//!   the presentation layer consumes.
//! - Keep session context explicit on every entry point.

pub mod data_layer;
pub mod profiles;
