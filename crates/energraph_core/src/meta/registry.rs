//! Table-backed metamodel registry.
//!
//! # Responsibility
//! - Hold the class table populated at model-load time and answer the
//!   [`MetadataProvider`] queries from it.
//! - Validate registrations so later reflective queries cannot dangle.
//!
//! # Invariants
//! - Supertypes must be registered before their subtypes; this keeps the
//!   supertype graph acyclic by construction.
//! - `types_assignable_to` enumerates concrete classes in registration
//!   order.

use crate::meta::{MetaError, MetaResult, MetadataProvider, SlotMeta};
use std::collections::HashMap;

/// Declaration of one metamodel class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name, unique within the metamodel.
    pub name: String,
    /// Documentation string shown in object descriptors.
    pub doc: Option<String>,
    /// Abstract classes never appear in assignable-type enumerations.
    pub is_abstract: bool,
    /// Direct supertype names.
    pub supers: Vec<String>,
    /// Own (non-inherited) attribute slots.
    pub attributes: Vec<SlotMeta>,
    /// Own (non-inherited) reference slots.
    pub references: Vec<SlotMeta>,
}

impl ClassDef {
    /// Creates a concrete class with no slots and no supertypes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_abstract: false,
            supers: Vec::new(),
            attributes: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Marks the class abstract.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Sets the documentation string.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds a direct supertype.
    pub fn with_super(mut self, supertype: impl Into<String>) -> Self {
        self.supers.push(supertype.into());
        self
    }

    /// Adds a single-valued attribute slot.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        self.attributes.push(SlotMeta {
            name: name.into(),
            declared_type: declared_type.into(),
            many: false,
            containment: false,
        });
        self
    }

    /// Adds a reference slot with explicit multiplicity and containment.
    pub fn with_reference(
        mut self,
        name: impl Into<String>,
        declared_type: impl Into<String>,
        many: bool,
        containment: bool,
    ) -> Self {
        self.references.push(SlotMeta {
            name: name.into(),
            declared_type: declared_type.into(),
            many,
            containment,
        });
        self
    }
}

/// Metamodel registry populated at model-load time.
#[derive(Debug, Default)]
pub struct MetamodelRegistry {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, usize>,
}

impl MetamodelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one class declaration.
    ///
    /// # Errors
    /// - [`MetaError::DuplicateType`] when the name is already registered.
    /// - [`MetaError::UnknownSupertype`] when a named supertype has not
    ///   been registered yet.
    pub fn register(&mut self, class: ClassDef) -> MetaResult<()> {
        if self.by_name.contains_key(&class.name) {
            return Err(MetaError::DuplicateType(class.name));
        }
        for supertype in &class.supers {
            if !self.by_name.contains_key(supertype) {
                return Err(MetaError::UnknownSupertype {
                    class: class.name.clone(),
                    supertype: supertype.clone(),
                });
            }
        }
        self.by_name.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Borrows one class declaration.
    pub fn class(&self, name: &str) -> MetaResult<&ClassDef> {
        self.by_name
            .get(name)
            .map(|index| &self.classes[*index])
            .ok_or_else(|| MetaError::UnknownType(name.to_string()))
    }

    /// Registered class names in registration order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.name.as_str())
    }

    // Supertypes-first slot collection, deduplicated by slot name so a
    // subclass redeclaration wins over the inherited one.
    fn collect_slots(
        &self,
        type_name: &str,
        pick: fn(&ClassDef) -> &Vec<SlotMeta>,
    ) -> MetaResult<Vec<SlotMeta>> {
        let class = self.class(type_name)?;
        let mut slots: Vec<SlotMeta> = Vec::new();
        for supertype in &class.supers {
            for inherited in self.collect_slots(supertype, pick)? {
                if !slots.iter().any(|slot| slot.name == inherited.name) {
                    slots.push(inherited);
                }
            }
        }
        for own in pick(class) {
            if let Some(existing) = slots.iter_mut().find(|slot| slot.name == own.name) {
                *existing = own.clone();
            } else {
                slots.push(own.clone());
            }
        }
        Ok(slots)
    }
}

impl MetadataProvider for MetamodelRegistry {
    fn attributes_of(&self, type_name: &str) -> MetaResult<Vec<SlotMeta>> {
        self.collect_slots(type_name, |class| &class.attributes)
    }

    fn references_of(&self, type_name: &str) -> MetaResult<Vec<SlotMeta>> {
        self.collect_slots(type_name, |class| &class.references)
    }

    fn types_assignable_to(&self, declared_type: &str) -> MetaResult<Vec<String>> {
        // Fail on unknown targets instead of answering "nothing matches".
        self.class(declared_type)?;
        Ok(self
            .classes
            .iter()
            .filter(|class| !class.is_abstract && self.is_assignable(&class.name, declared_type))
            .map(|class| class.name.clone())
            .collect())
    }

    fn documentation_of(&self, type_name: &str) -> MetaResult<Option<String>> {
        Ok(self.class(type_name)?.doc.clone())
    }

    fn is_assignable(&self, class: &str, to: &str) -> bool {
        let Ok(current) = self.class(class) else {
            return false;
        };
        if current.name == to {
            return true;
        }
        current
            .supers
            .iter()
            .any(|supertype| self.is_assignable(supertype, to))
    }
}
