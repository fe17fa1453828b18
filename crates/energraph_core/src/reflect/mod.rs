//! Reflective resolution and description engine.
//!
//! # Responsibility
//! - Resolve opaque identifiers to live object handles with the documented
//!   id-then-fragment fallback.
//! - Describe any object generically from metamodel metadata: self
//!   description, attribute map, reference map, container chain.
//! - Compute legal target types for reference slots, including the one
//!   closed polymorphic override the domain requires.
//!
//! # Invariants
//! - No per-class logic outside the single override table in `filter`.
//! - All operations are pure read traversals over a call-time snapshot.

pub mod describe;
pub mod filter;
pub mod resolve;
