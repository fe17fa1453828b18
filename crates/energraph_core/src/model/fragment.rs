//! Structural-path computation and resolution.
//!
//! A structural path locates an object by its position in the containment
//! tree, independent of stable ids. The root is `/`; every other object is
//! `//` followed by `/`-joined segments of the form `@slot.index`
//! (multi-valued containment) or `@slot` (single-valued containment), read
//! from the root downwards. `fragment_of` and `resolve_fragment` are
//! inverses on a well-formed tree.

use crate::model::graph::Model;
use crate::model::object::{NodeId, RefValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@([A-Za-z_][A-Za-z0-9_]*)(?:\.([0-9]+))?$").expect("valid fragment segment regex")
});

/// Errors from structural-path resolution.
#[derive(Debug)]
pub enum FragmentError {
    /// Path does not follow the fragment syntax.
    InvalidSyntax {
        fragment: String,
    },
    /// Path is syntactically valid but names a slot or index the current
    /// tree does not have.
    Unresolved {
        fragment: String,
        segment: String,
    },
}

impl Display for FragmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax { fragment } => {
                write!(f, "malformed structural path `{fragment}`")
            }
            Self::Unresolved { fragment, segment } => write!(
                f,
                "structural path `{fragment}` does not resolve at segment `{segment}`"
            ),
        }
    }
}

impl Error for FragmentError {}

pub(crate) fn fragment_of(model: &Model, node: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = node;
    while let Some(link) = model.node(current).container() {
        let segment = match model.node(link.parent).reference(&link.slot) {
            Some(RefValue::Many(targets)) => {
                let index = targets
                    .iter()
                    .position(|target| *target == current)
                    .unwrap_or_default();
                format!("@{}.{index}", link.slot)
            }
            _ => format!("@{}", link.slot),
        };
        segments.push(segment);
        current = link.parent;
    }

    if segments.is_empty() {
        return "/".to_string();
    }
    segments.reverse();
    let mut path = String::from("/");
    for segment in &segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

pub(crate) fn resolve_fragment(model: &Model, path: &str) -> Result<NodeId, FragmentError> {
    if path == "/" {
        return Ok(model.root());
    }
    let Some(rest) = path.strip_prefix("//") else {
        return Err(FragmentError::InvalidSyntax {
            fragment: path.to_string(),
        });
    };

    let mut current = model.root();
    for raw_segment in rest.split('/') {
        let captures =
            SEGMENT_RE
                .captures(raw_segment)
                .ok_or_else(|| FragmentError::InvalidSyntax {
                    fragment: path.to_string(),
                })?;
        let slot = &captures[1];
        let index = captures
            .get(2)
            .map(|m| {
                m.as_str()
                    .parse::<usize>()
                    .map_err(|_| FragmentError::InvalidSyntax {
                        fragment: path.to_string(),
                    })
            })
            .transpose()?;

        let unresolved = || FragmentError::Unresolved {
            fragment: path.to_string(),
            segment: raw_segment.to_string(),
        };
        current = match (model.node(current).reference(slot), index) {
            (Some(RefValue::Many(targets)), Some(index)) => {
                *targets.get(index).ok_or_else(unresolved)?
            }
            (Some(RefValue::Single(Some(target))), None) => *target,
            _ => return Err(unresolved()),
        };
    }
    Ok(current)
}
