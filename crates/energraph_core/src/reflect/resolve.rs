//! Identifier resolution with structural-path fallback.
//!
//! # Responsibility
//! - Turn a client-supplied identifier (stable id and/or structural path)
//!   into a live object handle.
//!
//! # Invariants
//! - Stable-id lookup is tried first whenever an id is present.
//! - An id miss falls back to the structural path and is logged at the
//!   fallback boundary; it is the only error the core recovers from
//!   silently towards the caller.
//! - Stale identifiers surface as `NotFound`, never as retries.

use crate::model::object::NodeId;
use crate::store::{ModelStore, StoreError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for identifier resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors from identifier resolution.
#[derive(Debug)]
pub enum ResolveError {
    /// Neither the stable id nor the structural path yields an object.
    NotFound {
        id: Option<String>,
        fragment: Option<String>,
    },
    /// Session-level store failure, distinct from a stale identifier.
    Store(StoreError),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id, fragment } => write!(
                f,
                "identifier resolves to no object (id={}, fragment={})",
                id.as_deref().unwrap_or("-"),
                fragment.as_deref().unwrap_or("-")
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

/// Client-supplied object identifier.
///
/// At least one field must be present; the stable id is preferred when both
/// are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifier {
    /// Stable id, persisted independent of tree position.
    pub id: Option<String>,
    /// Structural path, usable when no stable id was ever registered.
    pub fragment: Option<String>,
}

impl Identifier {
    /// Identifier carrying a stable id only.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fragment: None,
        }
    }

    /// Identifier carrying a structural path only.
    pub fn by_fragment(fragment: impl Into<String>) -> Self {
        Self {
            id: None,
            fragment: Some(fragment.into()),
        }
    }

    /// Identifier carrying both, as clients send for durable references.
    pub fn new(id: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fragment: Some(fragment.into()),
        }
    }
}

/// Resolves `identifier` in the session's model.
///
/// Stable-id lookup is the common O(1) path; the structural path is the
/// durable fallback for objects whose id was never registered or whose id
/// the client holds stale.
///
/// # Errors
/// - [`ResolveError::NotFound`] when no strategy yields an object.
/// - [`ResolveError::Store`] for session-level failures.
pub fn resolve<S: ModelStore>(
    store: &S,
    session: &str,
    identifier: &Identifier,
) -> ResolveResult<NodeId> {
    if let Some(id) = &identifier.id {
        match store.get_by_id(session, id) {
            Ok(node) => return Ok(node),
            Err(StoreError::IdNotFound { .. }) => {
                warn!(
                    "event=id_lookup_miss module=reflect status=fallback session={session} id={id}"
                );
            }
            Err(other) => return Err(ResolveError::Store(other)),
        }
    }

    let Some(fragment) = &identifier.fragment else {
        return Err(not_found(identifier));
    };
    match store.resolve_fragment(session, fragment) {
        Ok(node) => Ok(node),
        Err(StoreError::FragmentNotFound { .. }) | Err(StoreError::InvalidFragment { .. }) => {
            Err(not_found(identifier))
        }
        Err(other) => Err(ResolveError::Store(other)),
    }
}

fn not_found(identifier: &Identifier) -> ResolveError {
    ResolveError::NotFound {
        id: identifier.id.clone(),
        fragment: identifier.fragment.clone(),
    }
}
