//! Standard-profile catalog listing.
//!
//! The catalog itself is an external collaborator; this module only shapes
//! its entries into the summaries the presentation layer shows.

use serde::{Deserialize, Serialize};

/// One catalog entry as the external catalog stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// Catalog key.
    pub key: String,
    /// Human-facing profile name.
    pub ui_name: String,
}

/// External standard-profile catalog.
pub trait ProfileCatalog {
    /// All catalog entries in the catalog's own order.
    fn profiles(&self) -> Vec<ProfileEntry>;
}

/// Profile summary shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
}

/// Lists the standard profiles the catalog offers.
pub fn list_standard_profiles(catalog: &impl ProfileCatalog) -> Vec<ProfileSummary> {
    catalog
        .profiles()
        .into_iter()
        .map(|entry| ProfileSummary {
            id: entry.key,
            name: entry.ui_name,
        })
        .collect()
}
