//! Metamodel contracts.
//!
//! # Responsibility
//! - Define the metadata queries the reflective core needs about the
//!   externally-loaded class set.
//! - Keep slot legality and type-compatibility questions out of instance
//!   code.
//!
//! # Invariants
//! - Providers answer from a snapshot of the loaded metamodel; the core
//!   never caches answers across calls.
//! - `types_assignable_to` enumeration order is implementation-defined but
//!   stable for one loaded metamodel.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod registry;

/// Result type for metamodel queries.
pub type MetaResult<T> = Result<T, MetaError>;

/// Errors from metamodel registration and queries.
#[derive(Debug, PartialEq, Eq)]
pub enum MetaError {
    /// The named class is not part of the loaded metamodel.
    UnknownType(String),
    /// A class was registered twice.
    DuplicateType(String),
    /// A class names a supertype that is not registered yet.
    UnknownSupertype { class: String, supertype: String },
}

impl Display for MetaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(name) => write!(f, "unknown metamodel type `{name}`"),
            Self::DuplicateType(name) => write!(f, "metamodel type `{name}` registered twice"),
            Self::UnknownSupertype { class, supertype } => {
                write!(f, "class `{class}` names unknown supertype `{supertype}`")
            }
        }
    }
}

impl Error for MetaError {}

/// Declared shape of one attribute or reference slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMeta {
    /// Slot name on the declaring class.
    pub name: String,
    /// Declared type: a scalar type name for attributes, a class name for
    /// references.
    pub declared_type: String,
    /// Multiplicity: `true` for many-valued slots.
    pub many: bool,
    /// Whether a reference slot is a containment edge. Always `false` for
    /// attributes.
    pub containment: bool,
}

/// Metadata queries over the runtime-loaded class set.
///
/// Implementations are expected to be fast, synchronous, in-process
/// lookups; the reflective core calls them on every describe operation.
pub trait MetadataProvider {
    /// Attribute slots of `type_name`, inherited slots included.
    fn attributes_of(&self, type_name: &str) -> MetaResult<Vec<SlotMeta>>;

    /// Reference slots of `type_name`, inherited slots included.
    fn references_of(&self, type_name: &str) -> MetaResult<Vec<SlotMeta>>;

    /// All concrete classes assignable to `declared_type`, in the
    /// provider's stable enumeration order.
    fn types_assignable_to(&self, declared_type: &str) -> MetaResult<Vec<String>>;

    /// Documentation string of `type_name`, when the metamodel carries one.
    fn documentation_of(&self, type_name: &str) -> MetaResult<Option<String>>;

    /// Whether `class` is `to` or one of its transitive subtypes.
    ///
    /// Unknown names are not assignable to anything.
    fn is_assignable(&self, class: &str, to: &str) -> bool;
}
