//! Session-keyed model store contracts.
//!
//! # Responsibility
//! - Define how the reflective core reaches the model loaded for a
//!   session: by stable id, by structural path, or from the root.
//! - Keep session management out of the reflective core; every operation
//!   takes an explicit session key.
//!
//! # Invariants
//! - A session key maps to at most one loaded model.
//! - Lookup failures are semantic (`IdNotFound`, `FragmentNotFound`), never
//!   panics, so callers can drive the documented resolution fallback.

use crate::model::fragment::FragmentError;
use crate::model::graph::Model;
use crate::model::object::NodeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from session and object lookup.
#[derive(Debug)]
pub enum StoreError {
    /// No model is loaded for the session key.
    SessionNotFound(String),
    /// A session with this key is already loaded.
    SessionExists(String),
    /// The stable id is not indexed in the session's model.
    IdNotFound { session: String, id: String },
    /// The structural path does not resolve in the session's model.
    FragmentNotFound { session: String, fragment: String },
    /// The structural path is malformed.
    InvalidFragment { fragment: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotFound(session) => write!(f, "no model loaded for session `{session}`"),
            Self::SessionExists(session) => {
                write!(f, "session `{session}` already has a loaded model")
            }
            Self::IdNotFound { session, id } => {
                write!(f, "no object with id `{id}` in session `{session}`")
            }
            Self::FragmentNotFound { session, fragment } => write!(
                f,
                "structural path `{fragment}` does not resolve in session `{session}`"
            ),
            Self::InvalidFragment { fragment } => {
                write!(f, "malformed structural path `{fragment}`")
            }
        }
    }
}

impl Error for StoreError {}

impl StoreError {
    pub(crate) fn from_fragment_error(session: &str, error: FragmentError) -> Self {
        match error {
            FragmentError::InvalidSyntax { fragment } => Self::InvalidFragment { fragment },
            FragmentError::Unresolved { fragment, .. } => Self::FragmentNotFound {
                session: session.to_string(),
                fragment,
            },
        }
    }
}

/// Session-keyed access to loaded models.
///
/// The store is the only mutable shared resource the core touches;
/// `model_mut` exists solely for the documented lazy `Services` creation
/// path.
pub trait ModelStore {
    /// Borrows the model loaded for `session`.
    fn model(&self, session: &str) -> StoreResult<&Model>;

    /// Mutably borrows the model loaded for `session`.
    fn model_mut(&mut self, session: &str) -> StoreResult<&mut Model>;

    /// Looks up an object by stable id in the session's index.
    fn get_by_id(&self, session: &str, id: &str) -> StoreResult<NodeId> {
        self.model(session)?
            .get_by_id(id)
            .ok_or_else(|| StoreError::IdNotFound {
                session: session.to_string(),
                id: id.to_string(),
            })
    }

    /// Resolves a structural path against the session's root resource.
    fn resolve_fragment(&self, session: &str, fragment: &str) -> StoreResult<NodeId> {
        self.model(session)?
            .resolve_fragment(fragment)
            .map_err(|error| StoreError::from_fragment_error(session, error))
    }

    /// Root object of the session's model.
    fn get_root(&self, session: &str) -> StoreResult<NodeId> {
        Ok(self.model(session)?.root())
    }
}
