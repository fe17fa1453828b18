//! Dynamic model instances.
//!
//! # Responsibility
//! - Represent one runtime-typed object: declared class name, attribute
//!   slots, reference slots, container link.
//! - Stay free of per-class logic; slot legality is a metamodel question.
//!
//! # Invariants
//! - `id` and `name` are ordinary attribute slots, not struct fields.
//! - Reference slots hold node handles only; the owning [`Model`] resolves
//!   them.
//!
//! [`Model`]: crate::model::graph::Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle to one object inside its owning model arena.
///
/// Handles are only meaningful for the model that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Current value of one reference slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    /// Single-valued slot; `None` means unset.
    Single(Option<NodeId>),
    /// Multi-valued slot in stable insertion order.
    Many(Vec<NodeId>),
}

/// Link from an object to its containing parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLink {
    /// Containing object.
    pub parent: NodeId,
    /// Name of the containment reference slot on the parent.
    pub slot: String,
}

/// One runtime-typed instance of an externally-defined class.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    class: String,
    attrs: BTreeMap<String, AttrValue>,
    refs: BTreeMap<String, RefValue>,
    container: Option<ContainerLink>,
}

impl ModelObject {
    /// Creates an instance of the named class with no slots set.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attrs: BTreeMap::new(),
            refs: BTreeMap::new(),
            container: None,
        }
    }

    /// Chainable attribute setter for construction sites.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Declared class name of this instance.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Current value of one attribute slot, `None` when unset.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// String value of one attribute slot; `None` when unset or non-string.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(AttrValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Current value of one reference slot, `None` when unset.
    pub fn reference(&self, name: &str) -> Option<&RefValue> {
        self.refs.get(name)
    }

    /// Set reference slots in stable name order.
    pub fn references(&self) -> impl Iterator<Item = (&str, &RefValue)> {
        self.refs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Container link, `None` for the root or a detached object.
    pub fn container(&self) -> Option<&ContainerLink> {
        self.container.as_ref()
    }

    /// Containing node handle, `None` for the root or a detached object.
    pub fn container_node(&self) -> Option<NodeId> {
        self.container.as_ref().map(|link| link.parent)
    }

    pub(crate) fn set_attr_value(&mut self, name: String, value: AttrValue) {
        self.attrs.insert(name, value);
    }

    pub(crate) fn set_container(&mut self, link: Option<ContainerLink>) {
        self.container = link;
    }

    pub(crate) fn ref_slot_mut(&mut self, name: &str) -> Option<&mut RefValue> {
        self.refs.get_mut(name)
    }

    pub(crate) fn insert_ref_slot(&mut self, name: String, value: RefValue) {
        self.refs.insert(name, value);
    }
}
