//! Reflective read layer over runtime-typed energy-system models.
//! This crate is the single source of truth for resolution and description
//! semantics; callers never need per-class knowledge.

pub mod logging;
pub mod meta;
pub mod model;
pub mod reflect;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use meta::registry::{ClassDef, MetamodelRegistry};
pub use meta::{MetaError, MetaResult, MetadataProvider, SlotMeta};
pub use model::fragment::FragmentError;
pub use model::graph::{Model, ModelError, ModelResult};
pub use model::object::{AttrValue, ModelObject, NodeId, RefValue};
pub use reflect::describe::{
    short_repr, AttributeDescriptor, ContainerDescriptor, DescribeError, DescribeResult,
    Describer, ObjectDescriptor, ObjectInfo, ReferenceDescriptor, DEFAULT_MAX_CONTAINER_DEPTH,
};
pub use reflect::filter::{category_of, filterable_types, AssetCategory};
pub use reflect::resolve::{resolve, Identifier, ResolveError, ResolveResult};
pub use service::data_layer::{DataLayer, DataLayerError, DataLayerResult, ObjectSummary};
pub use service::profiles::{list_standard_profiles, ProfileCatalog, ProfileEntry, ProfileSummary};
pub use store::memory::InMemoryModelStore;
pub use store::{ModelStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
