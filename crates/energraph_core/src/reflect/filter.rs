//! Legal target types for reference slots.
//!
//! # Responsibility
//! - Compute the concrete classes assignable to one reference slot of one
//!   object.
//! - Contain the single domain-specific override: control-strategy slots
//!   narrow by the owning asset's capability instead of the generic
//!   metadata enumeration.
//!
//! # Invariants
//! - The override table is a closed whitelist; an unmatched category yields
//!   an empty result and never unions with the generic path.
//! - This operation never fails; metadata misses degrade to an empty list.

use crate::meta::MetadataProvider;
use crate::model::graph::Model;
use crate::model::object::NodeId;
use log::debug;

const CONTROL_STRATEGY: &str = "ControlStrategy";
const CURTAILMENT_STRATEGY: &str = "CurtailmentStrategy";
const STORAGE_STRATEGY: &str = "StorageStrategy";
const DRIVEN_BY_DEMAND: &str = "DrivenByDemand";
const DRIVEN_BY_SUPPLY: &str = "DrivenBySupply";
const DRIVEN_BY_PROFILE: &str = "DrivenByProfile";

/// Capability category of an energy asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    /// Produces energy (wind turbines, PV parcs, ...).
    Producer,
    /// Stores energy (batteries, heat buffers, ...).
    Storage,
    /// Converts one carrier into another (heat pumps, electrolyzers, ...).
    Conversion,
}

/// Capability category of `class`, `None` for assets outside the
/// capability set.
///
/// Probe order is producer, storage, conversion; the first matching
/// capability wins. Well-formed metamodels keep these disjoint.
pub fn category_of(meta: &impl MetadataProvider, class: &str) -> Option<AssetCategory> {
    if meta.is_assignable(class, "Producer") {
        Some(AssetCategory::Producer)
    } else if meta.is_assignable(class, "Storage") {
        Some(AssetCategory::Storage)
    } else if meta.is_assignable(class, "Conversion") {
        Some(AssetCategory::Conversion)
    } else {
        None
    }
}

/// Concrete types legally assignable to `reference_slot` of `object`.
///
/// Control-strategy slots narrow polymorphically by the object's category;
/// every other slot enumerates assignable types from the metamodel. An
/// unknown slot, class, or category yields an empty list.
pub fn filterable_types(
    model: &Model,
    meta: &impl MetadataProvider,
    object: NodeId,
    reference_slot: &str,
) -> Vec<String> {
    let class = model.node(object).class();
    let references = match meta.references_of(class) {
        Ok(references) => references,
        Err(err) => {
            debug!("event=reference_meta_miss module=reflect status=empty class={class} error={err}");
            return Vec::new();
        }
    };
    let Some(slot) = references.iter().find(|slot| slot.name == reference_slot) else {
        return Vec::new();
    };

    if slot.declared_type == CONTROL_STRATEGY {
        return strategy_override(category_of(meta, class));
    }

    match meta.types_assignable_to(&slot.declared_type) {
        Ok(types) => types,
        Err(err) => {
            debug!(
                "event=type_enum_miss module=reflect status=empty type={} error={err}",
                slot.declared_type
            );
            Vec::new()
        }
    }
}

// The one deliberate exception to generic reflection: a closed table keyed
// by asset capability.
fn strategy_override(category: Option<AssetCategory>) -> Vec<String> {
    match category {
        Some(AssetCategory::Producer) => vec![CURTAILMENT_STRATEGY.to_string()],
        Some(AssetCategory::Storage) => vec![STORAGE_STRATEGY.to_string()],
        Some(AssetCategory::Conversion) => vec![
            DRIVEN_BY_DEMAND.to_string(),
            DRIVEN_BY_SUPPLY.to_string(),
            DRIVEN_BY_PROFILE.to_string(),
        ],
        None => Vec::new(),
    }
}
