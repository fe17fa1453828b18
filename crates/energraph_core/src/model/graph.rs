//! Model arena and containment-tree operations.
//!
//! # Responsibility
//! - Own every object of one loaded model and mint their handles.
//! - Maintain the stable-id index alongside containment mutations.
//! - Provide deterministic containment traversal and structural paths.
//!
//! # Invariants
//! - Child listing order is deterministic: reference slots in name order,
//!   targets in insertion order.
//! - An object is a containment child of `parent` exactly when its
//!   container link points back at `(parent, slot)`.

use crate::model::fragment::{self, FragmentError};
use crate::model::object::{AttrValue, ContainerLink, ModelObject, NodeId, RefValue};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for model mutation operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors from model graph mutations.
#[derive(Debug)]
pub enum ModelError {
    /// Another object in this model already carries the stable id.
    DuplicateId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate stable id `{id}` in model"),
        }
    }
}

impl Error for ModelError {}

/// One session's loaded object graph.
///
/// The model owns its objects; callers hold [`NodeId`] handles. Handles
/// from another model are out of range or silently refer to the wrong
/// object, so they must never cross model boundaries.
#[derive(Debug, Clone)]
pub struct Model {
    nodes: Vec<ModelObject>,
    id_index: HashMap<String, NodeId>,
    root: NodeId,
}

impl Model {
    /// Creates a model owning `root` as its containment root.
    pub fn new(root: ModelObject) -> Self {
        let mut model = Self {
            nodes: Vec::new(),
            id_index: HashMap::new(),
            root: NodeId(0),
        };
        let root_id = model.push_node(root);
        model.root = root_id;
        model
    }

    /// Handle of the containment root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows one object.
    ///
    /// Panics when `node` was not minted by this model; use [`Model::get`]
    /// for handles of uncertain provenance.
    pub fn node(&self, node: NodeId) -> &ModelObject {
        &self.nodes[node.0 as usize]
    }

    /// Borrows one object, `None` for foreign handles.
    pub fn get(&self, node: NodeId) -> Option<&ModelObject> {
        self.nodes.get(node.0 as usize)
    }

    /// Looks up an object by stable id.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Number of objects owned by this model.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the model owns no objects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds `object` under a multi-valued containment slot of `parent`.
    ///
    /// The slot is created as multi-valued when first used. Returns the new
    /// object's handle.
    ///
    /// # Errors
    /// - [`ModelError::DuplicateId`] when the object's `id` attribute value
    ///   is already indexed; the model is left unchanged.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        slot: &str,
        object: ModelObject,
    ) -> ModelResult<NodeId> {
        self.check_new_id(&object)?;
        let child = self.push_node(object);
        self.nodes[child.0 as usize].set_container(Some(ContainerLink {
            parent,
            slot: slot.to_string(),
        }));
        match self.nodes[parent.0 as usize].ref_slot_mut(slot) {
            Some(RefValue::Many(targets)) => targets.push(child),
            // Slot shape is decided by first use.
            Some(single @ RefValue::Single(_)) => *single = RefValue::Many(vec![child]),
            None => {
                self.nodes[parent.0 as usize]
                    .insert_ref_slot(slot.to_string(), RefValue::Many(vec![child]));
            }
        }
        Ok(child)
    }

    /// Sets `object` as the single-valued containment child of `parent`.
    ///
    /// A previously contained child on the same slot is detached (container
    /// link cleared) but remains owned by the model.
    pub fn set_child(
        &mut self,
        parent: NodeId,
        slot: &str,
        object: ModelObject,
    ) -> ModelResult<NodeId> {
        self.check_new_id(&object)?;
        if let Some(RefValue::Single(Some(previous))) =
            self.nodes[parent.0 as usize].reference(slot).cloned()
        {
            self.nodes[previous.0 as usize].set_container(None);
        }
        let child = self.push_node(object);
        self.nodes[child.0 as usize].set_container(Some(ContainerLink {
            parent,
            slot: slot.to_string(),
        }));
        self.nodes[parent.0 as usize]
            .insert_ref_slot(slot.to_string(), RefValue::Single(Some(child)));
        Ok(child)
    }

    /// Sets a single-valued cross reference from `from` to `to`.
    pub fn set_reference(&mut self, from: NodeId, slot: &str, to: NodeId) {
        self.nodes[from.0 as usize].insert_ref_slot(slot.to_string(), RefValue::Single(Some(to)));
    }

    /// Appends a target to a multi-valued cross reference on `from`.
    pub fn add_reference(&mut self, from: NodeId, slot: &str, to: NodeId) {
        match self.nodes[from.0 as usize].ref_slot_mut(slot) {
            Some(RefValue::Many(targets)) => targets.push(to),
            Some(single @ RefValue::Single(_)) => *single = RefValue::Many(vec![to]),
            None => {
                self.nodes[from.0 as usize]
                    .insert_ref_slot(slot.to_string(), RefValue::Many(vec![to]));
            }
        }
    }

    /// Sets one attribute slot, keeping the stable-id index current.
    pub fn set_attr(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> ModelResult<()> {
        let value = value.into();
        if name == "id" {
            if let AttrValue::Str(new_id) = &value {
                if self
                    .id_index
                    .get(new_id)
                    .is_some_and(|existing| *existing != node)
                {
                    return Err(ModelError::DuplicateId(new_id.clone()));
                }
            }
            if let Some(old_id) = self.nodes[node.0 as usize].attr_str("id") {
                let old_id = old_id.to_string();
                self.id_index.remove(&old_id);
            }
            if let AttrValue::Str(new_id) = &value {
                self.id_index.insert(new_id.clone(), node);
            }
        }
        self.nodes[node.0 as usize].set_attr_value(name.to_string(), value);
        Ok(())
    }

    /// Direct containment children of `node` in deterministic order.
    pub fn contents(&self, node: NodeId) -> Vec<NodeId> {
        let mut children = Vec::new();
        for (slot, value) in self.node(node).references() {
            let targets: Vec<NodeId> = match value {
                RefValue::Single(Some(target)) => vec![*target],
                RefValue::Single(None) => Vec::new(),
                RefValue::Many(targets) => targets.clone(),
            };
            for target in targets {
                let is_child = self
                    .node(target)
                    .container()
                    .is_some_and(|link| link.parent == node && link.slot == slot);
                if is_child {
                    children.push(target);
                }
            }
        }
        children
    }

    /// All transitively contained objects of `node`, preorder.
    pub fn all_contents(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = self.contents(node);
        stack.reverse();
        while let Some(current) = stack.pop() {
            result.push(current);
            let mut children = self.contents(current);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Structural path of `node` within this model's containment tree.
    pub fn fragment_of(&self, node: NodeId) -> String {
        fragment::fragment_of(self, node)
    }

    /// Resolves a structural path to an object handle.
    ///
    /// # Errors
    /// - [`FragmentError::InvalidSyntax`] for malformed paths.
    /// - [`FragmentError::Unresolved`] when a segment does not match the
    ///   current tree shape.
    pub fn resolve_fragment(&self, path: &str) -> Result<NodeId, FragmentError> {
        fragment::resolve_fragment(self, path)
    }

    fn check_new_id(&self, object: &ModelObject) -> ModelResult<()> {
        if let Some(id) = object.attr_str("id") {
            if self.id_index.contains_key(id) {
                return Err(ModelError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    fn push_node(&mut self, object: ModelObject) -> NodeId {
        let node = NodeId(self.nodes.len() as u32);
        if let Some(id) = object.attr_str("id") {
            self.id_index.insert(id.to_string(), node);
        }
        self.nodes.push(object);
        node
    }
}
