//! Generic object description.
//!
//! # Responsibility
//! - Compose an object's self-description, attribute map, reference map,
//!   and container chain from metamodel metadata alone.
//! - Keep every record display-ready for the presentation layer: plain
//!   data, serde-serializable, no live handles except where stated.
//!
//! # Invariants
//! - Exactly one of `id`/`fragment` is populated on every descriptor,
//!   chosen by whether the object carries a set `id` attribute value.
//! - Object descriptors fall back to the declared type name when `name` is
//!   unset; container descriptors do not — their `name` stays absent.
//! - Containment recursion is depth-guarded; exceeding the guard signals a
//!   malformed model, not a user error.

use crate::meta::{MetaError, MetadataProvider, SlotMeta};
use crate::model::graph::Model;
use crate::model::object::{AttrValue, NodeId, RefValue};
use log::error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Default limit for container-chain recursion.
pub const DEFAULT_MAX_CONTAINER_DEPTH: usize = 64;

/// Result type for description operations.
pub type DescribeResult<T> = Result<T, DescribeError>;

/// Errors from description operations.
#[derive(Debug)]
pub enum DescribeError {
    /// The metamodel cannot describe a declared type.
    Metadata(MetaError),
    /// Containment recursion exceeded the configured depth guard.
    Structure { max_depth: usize },
}

impl Display for DescribeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metadata(err) => write!(f, "{err}"),
            Self::Structure { max_depth } => write!(
                f,
                "containment chain exceeds maximum depth {max_depth}; model is malformed"
            ),
        }
    }
}

impl std::error::Error for DescribeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Metadata(err) => Some(err),
            Self::Structure { .. } => None,
        }
    }
}

impl From<MetaError> for DescribeError {
    fn from(value: MetaError) -> Self {
        Self::Metadata(value)
    }
}

/// Generic self-description of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// Display name: the `name` attribute value, or the declared type name
    /// when unset.
    pub name: String,
    /// Class documentation from the metamodel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Declared type name.
    pub declared_type: String,
    /// Stable id; absent exactly when `fragment` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Structural path; absent exactly when `id` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// Linked description of an object's containment ancestry.
///
/// Unlike [`ObjectDescriptor`], `name` does not fall back to the declared
/// type name; an unnamed container stays unnamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub declared_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Description of the next ancestor; absent at the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Box<ContainerDescriptor>>,
}

/// Metadata-driven description of one attribute slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub declared_type: String,
    pub many: bool,
    /// Current value, absent when the slot is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttrValue>,
}

/// Metadata-driven description of one reference slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    pub name: String,
    pub declared_type: String,
    pub many: bool,
    /// Short representations of the current target(s); empty when unset.
    pub repr: Vec<String>,
}

/// Complete description record for one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub object: ObjectDescriptor,
    pub attributes: Vec<AttributeDescriptor>,
    pub references: Vec<ReferenceDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerDescriptor>,
}

/// Short textual representation of a referenced value.
///
/// Ports render as `"<name> (<declared type>)"` with the declared type name
/// standing in for a missing `name`; everything else renders as the
/// declared type name alone. `None` stays `None`. Intentionally drops
/// id/fragment information — this is display summarization, not a
/// descriptor.
pub fn short_repr(
    model: &Model,
    meta: &impl MetadataProvider,
    value: Option<NodeId>,
) -> Option<String> {
    let node = value?;
    let object = model.node(node);
    let class = object.class();
    if meta.is_assignable(class, "Port") {
        let name = object.attr_str("name").unwrap_or(class);
        return Some(format!("{name} ({class})"));
    }
    Some(class.to_string())
}

/// Reflective descriptor builder over one metadata provider.
pub struct Describer<'a, P: MetadataProvider> {
    meta: &'a P,
    max_depth: usize,
}

impl<'a, P: MetadataProvider> Describer<'a, P> {
    /// Creates a describer with the default container-depth guard.
    pub fn new(meta: &'a P) -> Self {
        Self {
            meta,
            max_depth: DEFAULT_MAX_CONTAINER_DEPTH,
        }
    }

    /// Overrides the container-chain depth guard.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Describes `object`: self-description, attributes, references,
    /// container chain.
    ///
    /// # Errors
    /// - [`DescribeError::Metadata`] when the metamodel cannot describe the
    ///   object's declared type; logged with the offending type name.
    /// - [`DescribeError::Structure`] when the containment chain exceeds
    ///   the depth guard.
    pub fn describe(&self, model: &Model, object: NodeId) -> DescribeResult<ObjectInfo> {
        let node = model.node(object);
        let class = node.class().to_string();

        let descriptor = ObjectDescriptor {
            name: node
                .attr_str("name")
                .unwrap_or(class.as_str())
                .to_string(),
            documentation: self.documentation(&class)?,
            declared_type: class.clone(),
            id: node.attr_str("id").map(str::to_string),
            fragment: match node.attr_str("id") {
                Some(_) => None,
                None => Some(model.fragment_of(object)),
            },
        };

        let container = self.describe_container(model, node.container_node())?;
        let attributes = self.attributes(model, object, &class)?;
        let references = self.references(model, object, &class)?;

        Ok(ObjectInfo {
            object: descriptor,
            attributes,
            references,
            container,
        })
    }

    /// Describes the containment chain starting at `object`.
    ///
    /// `None` input yields `None`: the terminal case for the model root and
    /// detached nodes.
    pub fn describe_container(
        &self,
        model: &Model,
        object: Option<NodeId>,
    ) -> DescribeResult<Option<ContainerDescriptor>> {
        object
            .map(|node| self.container_chain(model, node, 1))
            .transpose()
    }

    fn container_chain(
        &self,
        model: &Model,
        node: NodeId,
        depth: usize,
    ) -> DescribeResult<ContainerDescriptor> {
        if depth > self.max_depth {
            return Err(DescribeError::Structure {
                max_depth: self.max_depth,
            });
        }

        let object = model.node(node);
        let class = object.class().to_string();
        let container = match object.container_node() {
            Some(parent) => Some(Box::new(self.container_chain(model, parent, depth + 1)?)),
            None => None,
        };

        Ok(ContainerDescriptor {
            name: object.attr_str("name").map(str::to_string),
            documentation: self.documentation(&class)?,
            declared_type: class,
            id: object.attr_str("id").map(str::to_string),
            fragment: match object.attr_str("id") {
                Some(_) => None,
                None => Some(model.fragment_of(node)),
            },
            container,
        })
    }

    fn attributes(
        &self,
        model: &Model,
        object: NodeId,
        class: &str,
    ) -> DescribeResult<Vec<AttributeDescriptor>> {
        let slots = self.slots(class, true)?;
        let node = model.node(object);
        Ok(slots
            .into_iter()
            .map(|slot| AttributeDescriptor {
                value: node.attr(&slot.name).cloned(),
                name: slot.name,
                declared_type: slot.declared_type,
                many: slot.many,
            })
            .collect())
    }

    fn references(
        &self,
        model: &Model,
        object: NodeId,
        class: &str,
    ) -> DescribeResult<Vec<ReferenceDescriptor>> {
        let slots = self.slots(class, false)?;
        let node = model.node(object);
        Ok(slots
            .into_iter()
            .map(|slot| {
                let repr = match node.reference(&slot.name) {
                    Some(RefValue::Single(target)) => {
                        short_repr(model, self.meta, *target).into_iter().collect()
                    }
                    Some(RefValue::Many(targets)) => targets
                        .iter()
                        .filter_map(|target| short_repr(model, self.meta, Some(*target)))
                        .collect(),
                    None => Vec::new(),
                };
                ReferenceDescriptor {
                    repr,
                    name: slot.name,
                    declared_type: slot.declared_type,
                    many: slot.many,
                }
            })
            .collect())
    }

    fn slots(&self, class: &str, attributes: bool) -> DescribeResult<Vec<SlotMeta>> {
        let result = if attributes {
            self.meta.attributes_of(class)
        } else {
            self.meta.references_of(class)
        };
        result.map_err(|err| self.metadata_failure(class, err))
    }

    fn documentation(&self, class: &str) -> DescribeResult<Option<String>> {
        self.meta
            .documentation_of(class)
            .map_err(|err| self.metadata_failure(class, err))
    }

    fn metadata_failure(&self, class: &str, err: MetaError) -> DescribeError {
        error!("event=metadata_failure module=reflect status=error type={class} error={err}");
        DescribeError::Metadata(err)
    }
}
