//! Data-layer facade for the reflective read surface.
//!
//! # Responsibility
//! - Expose resolve/describe/filter entry points over one store and one
//!   metamodel, with the session key passed explicitly on every call.
//! - Host the two documented convenience operations: typed object listing
//!   under the session's area, and lazy `Services` singleton access.
//!
//! # Invariants
//! - Every operation is a pure read except `services_container`, whose
//!   lazy creation is the core's only model mutation.
//! - `filterable_types` never fails; missing sessions degrade to an empty
//!   list.

use crate::meta::MetadataProvider;
use crate::model::graph::{Model, ModelError};
use crate::model::object::{ModelObject, NodeId, RefValue};
use crate::reflect::describe::{DescribeError, Describer, ObjectInfo, DEFAULT_MAX_CONTAINER_DEPTH};
use crate::reflect::filter;
use crate::reflect::resolve::{self, Identifier, ResolveError};
use crate::store::{ModelStore, StoreError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Result type for data-layer operations.
pub type DataLayerResult<T> = Result<T, DataLayerError>;

/// Errors from data-layer operations.
#[derive(Debug)]
pub enum DataLayerError {
    /// Identifier resolution failure.
    Resolve(ResolveError),
    /// Description failure (metadata or structure).
    Describe(DescribeError),
    /// Session/store-level failure.
    Store(StoreError),
    /// Model mutation failure from the lazy `Services` creation path.
    Model(ModelError),
}

impl Display for DataLayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve(err) => write!(f, "{err}"),
            Self::Describe(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DataLayerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            Self::Describe(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<ResolveError> for DataLayerError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<DescribeError> for DataLayerError {
    fn from(value: DescribeError) -> Self {
        Self::Describe(value)
    }
}

impl From<StoreError> for DataLayerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ModelError> for DataLayerError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

/// `{id, name}` summary for typed object listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Facade composing a model store and a metadata provider.
pub struct DataLayer<S: ModelStore, P: MetadataProvider> {
    store: S,
    meta: P,
    max_container_depth: usize,
}

impl<S: ModelStore, P: MetadataProvider> DataLayer<S, P> {
    /// Creates a facade owning its collaborators.
    pub fn new(store: S, meta: P) -> Self {
        Self {
            store,
            meta,
            max_container_depth: DEFAULT_MAX_CONTAINER_DEPTH,
        }
    }

    /// Overrides the container-chain depth guard used by descriptions.
    pub fn with_max_container_depth(mut self, max_depth: usize) -> Self {
        self.max_container_depth = max_depth;
        self
    }

    /// Borrows the underlying store, e.g. for session management.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Borrows the metadata provider.
    pub fn meta(&self) -> &P {
        &self.meta
    }

    /// Resolves an identifier to a live object handle.
    pub fn resolve(&self, session: &str, identifier: &Identifier) -> DataLayerResult<NodeId> {
        Ok(resolve::resolve(&self.store, session, identifier)?)
    }

    /// Resolves an identifier and describes the object it names.
    pub fn describe(&self, session: &str, identifier: &Identifier) -> DataLayerResult<ObjectInfo> {
        let object = self.resolve(session, identifier)?;
        self.describe_object(session, object)
    }

    /// Describes a live object handle.
    pub fn describe_object(&self, session: &str, object: NodeId) -> DataLayerResult<ObjectInfo> {
        let model = self.store.model(session)?;
        Ok(self.describer().describe(model, object)?)
    }

    /// Concrete types legally assignable to `reference_slot` of `object`.
    ///
    /// Never fails: a missing session or slot yields an empty list.
    pub fn filterable_types(
        &self,
        session: &str,
        object: NodeId,
        reference_slot: &str,
    ) -> Vec<String> {
        match self.store.model(session) {
            Ok(model) => filter::filterable_types(model, &self.meta, object, reference_slot),
            Err(err) => {
                debug!("event=filter_session_miss module=service status=empty error={err}");
                Vec::new()
            }
        }
    }

    /// Lists `{id, name}` summaries of every object under the session's
    /// area whose class is assignable to `type_name`.
    ///
    /// The walk starts at the root's `area` child when one is contained,
    /// else at the root itself, and visits contents in deterministic
    /// containment order.
    pub fn list_objects_of_type(
        &self,
        session: &str,
        type_name: &str,
    ) -> DataLayerResult<Vec<ObjectSummary>> {
        let model = self.store.model(session)?;
        let start = area_of(model).unwrap_or_else(|| model.root());
        let mut summaries = Vec::new();
        for node in model.all_contents(start) {
            let object = model.node(node);
            if self.meta.is_assignable(object.class(), type_name) {
                summaries.push(ObjectSummary {
                    id: object.attr_str("id").map(str::to_string),
                    name: object.attr_str("name").map(str::to_string),
                });
            }
        }
        Ok(summaries)
    }

    /// Returns the session's `Services` singleton, creating it with a
    /// fresh stable id when absent.
    ///
    /// This is the core's only model mutation; creation is logged.
    pub fn services_container(&mut self, session: &str) -> DataLayerResult<NodeId> {
        let model = self.store.model_mut(session)?;
        let root = model.root();
        if let Some(RefValue::Single(Some(services))) = model.node(root).reference("services") {
            return Ok(*services);
        }

        let id = Uuid::new_v4().to_string();
        let services = model.set_child(
            root,
            "services",
            ModelObject::new("Services").with_attr("id", id.as_str()),
        )?;
        info!("event=services_created module=service status=ok session={session} id={id}");
        Ok(services)
    }

    fn describer(&self) -> Describer<'_, P> {
        Describer::new(&self.meta).with_max_depth(self.max_container_depth)
    }
}

// The session root usually contains its assets under a single `area`
// child; fall back to the root when the model is shaped differently.
fn area_of(model: &Model) -> Option<NodeId> {
    match model.node(model.root()).reference("area") {
        Some(RefValue::Single(Some(area))) => Some(*area),
        Some(RefValue::Many(areas)) => areas.first().copied(),
        _ => None,
    }
}
