//! Runtime-typed model graph for one loaded energy system.
//!
//! # Responsibility
//! - Define the dynamic instance shape (`ModelObject`) shared by every
//!   concrete class the metamodel declares at load time.
//! - Keep containment-tree bookkeeping (container links, child order,
//!   structural paths) inside the model boundary.
//!
//! # Invariants
//! - Every object has at most one container; the root has none.
//! - The stable-id index always reflects the `id` attribute values of the
//!   objects owned by the model.

pub mod fragment;
pub mod graph;
pub mod object;
